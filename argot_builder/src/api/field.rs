use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::marker::PhantomData;
use std::str::FromStr;

use crate::api::capture::*;
use crate::constant::{FALSE_VALUES, TRUE_VALUES};
use crate::prelude::Collectable;

/// A parameter that takes a single value, overwriting the variable.
///
/// An empty value (ex: `--name=`) leaves the variable untouched.
pub struct Scalar<'a, T> {
    variable: &'a mut T,
}

impl<'a, T> CliOption for Scalar<'a, T> {}
impl<'a, T> CliArgument for Scalar<'a, T> {}

impl<'a, T> Scalar<'a, T> {
    /// Create a scalar parameter.
    pub fn new(variable: &'a mut T) -> Self {
        Self { variable }
    }
}

impl<'a, T> GenericCapturable<'a, T> for Scalar<'a, T>
where
    T: FromStr,
{
    fn capture(&mut self, token: &str) -> Result<(), InvalidCapture> {
        if token.is_empty() {
            return Ok(());
        }

        *self.variable = convert(token)?;
        Ok(())
    }
}

/// A boolean parameter whose presence alone means `true`.
///
/// A flag may also be given an explicit value from the vocabulary `1`, `0`, `true`, `false`, `on`, `off`, `yes`, `no`.
/// Long flags may be negated with `--no-NAME`.
pub struct Flag<'a> {
    target: FlagTarget<'a>,
}

enum FlagTarget<'a> {
    Variable(&'a mut bool),
    Handler(Box<dyn FnMut(bool) + 'a>),
}

impl<'a> CliOption for Flag<'a> {}
impl<'a> CliArgument for Flag<'a> {}

impl<'a> Flag<'a> {
    /// Create a flag parameter.
    pub fn new(variable: &'a mut bool) -> Self {
        Self {
            target: FlagTarget::Variable(variable),
        }
    }

    /// Create a flag parameter which hands its value to `handler`.
    pub fn handler(handler: impl FnMut(bool) + 'a) -> Self {
        Self {
            target: FlagTarget::Handler(Box::new(handler)),
        }
    }
}

impl<'a> GenericCapturable<'a, bool> for Flag<'a> {
    fn capture(&mut self, token: &str) -> Result<(), InvalidCapture> {
        let value = parse_flag(token)?;

        match &mut self.target {
            FlagTarget::Variable(variable) => **variable = value,
            FlagTarget::Handler(handler) => handler(value),
        };

        Ok(())
    }

    fn is_flag(&self) -> bool {
        true
    }
}

/// A parameter that maps down to [`Option`], taking a single value.
pub struct Optional<'a, T> {
    variable: &'a mut Option<T>,
}

impl<'a, T> CliOption for Optional<'a, T> {}
impl<'a, T> CliArgument for Optional<'a, T> {}

impl<'a, T> Optional<'a, T> {
    /// Create an optional parameter.
    pub fn new(variable: &'a mut Option<T>) -> Self {
        Self { variable }
    }
}

impl<'a, T> GenericCapturable<'a, T> for Optional<'a, T>
where
    T: FromStr,
{
    fn capture(&mut self, token: &str) -> Result<(), InvalidCapture> {
        if token.is_empty() {
            return Ok(());
        }

        self.variable.replace(convert(token)?);
        Ok(())
    }
}

/// A parameter that accumulates each value into a [`Collectable`], in the order received.
///
/// Any initial contents of the collection are kept.
pub struct Collection<'a, C, T>
where
    C: 'a + Collectable<T>,
{
    variable: &'a mut C,
    _phantom: PhantomData<T>,
}

impl<'a, C, T> CliOption for Collection<'a, C, T> where C: 'a + Collectable<T> {}
impl<'a, C, T> CliArgument for Collection<'a, C, T> where C: 'a + Collectable<T> {}
impl<'a, C, T> CliRest for Collection<'a, C, T> where C: 'a + Collectable<T> {}

impl<'a, C, T> Collection<'a, C, T>
where
    C: 'a + Collectable<T>,
{
    /// Create a collection parameter.
    pub fn new(variable: &'a mut C) -> Self {
        Self {
            variable,
            _phantom: PhantomData,
        }
    }
}

impl<'a, C, T> GenericCapturable<'a, T> for Collection<'a, C, T>
where
    T: FromStr,
    C: 'a + Collectable<T>,
{
    fn capture(&mut self, token: &str) -> Result<(), InvalidCapture> {
        if token.is_empty() {
            return Ok(());
        }

        self.variable.add(convert(token)?);
        Ok(())
    }
}

/// A parameter that takes a single `KEY=VALUE` value into a tuple, overwriting the variable.
pub struct Pair<'a, K, V> {
    variable: &'a mut (K, V),
}

impl<'a, K, V> CliOption for Pair<'a, K, V> {}
impl<'a, K, V> CliArgument for Pair<'a, K, V> {}

impl<'a, K, V> Pair<'a, K, V> {
    /// Create a pair parameter.
    pub fn new(variable: &'a mut (K, V)) -> Self {
        Self { variable }
    }
}

impl<'a, K, V> GenericCapturable<'a, (K, V)> for Pair<'a, K, V>
where
    K: FromStr,
    V: FromStr,
{
    fn capture(&mut self, token: &str) -> Result<(), InvalidCapture> {
        *self.variable = split_pair(token)?;
        Ok(())
    }
}

/// A parameter that accumulates `KEY=VALUE` values into a map-like [`Collectable`].
///
/// A repeated key overwrites the earlier entry for [`HashMap`] and [`BTreeMap`].
pub struct Entries<'a, M, K, V>
where
    M: 'a + Collectable<(K, V)>,
{
    variable: &'a mut M,
    _phantom: PhantomData<(K, V)>,
}

impl<'a, M, K, V> CliOption for Entries<'a, M, K, V> where M: 'a + Collectable<(K, V)> {}
impl<'a, M, K, V> CliArgument for Entries<'a, M, K, V> where M: 'a + Collectable<(K, V)> {}
impl<'a, M, K, V> CliRest for Entries<'a, M, K, V> where M: 'a + Collectable<(K, V)> {}

impl<'a, M, K, V> Entries<'a, M, K, V>
where
    M: 'a + Collectable<(K, V)>,
{
    /// Create an entries parameter.
    pub fn new(variable: &'a mut M) -> Self {
        Self {
            variable,
            _phantom: PhantomData,
        }
    }
}

impl<'a, M, K, V> GenericCapturable<'a, (K, V)> for Entries<'a, M, K, V>
where
    K: FromStr,
    V: FromStr,
    M: 'a + Collectable<(K, V)>,
{
    fn capture(&mut self, token: &str) -> Result<(), InvalidCapture> {
        self.variable.add(split_pair(token)?);
        Ok(())
    }
}

/// A parameter that converts each value and hands it to a closure.
///
/// An empty value does not invoke the closure.
pub struct Handler<'a, T> {
    handler: Box<dyn FnMut(T) + 'a>,
}

impl<'a, T> CliOption for Handler<'a, T> {}
impl<'a, T> CliArgument for Handler<'a, T> {}
impl<'a, T> CliRest for Handler<'a, T> {}

impl<'a, T> Handler<'a, T> {
    /// Create a handler parameter.
    pub fn new(handler: impl FnMut(T) + 'a) -> Self {
        Self {
            handler: Box::new(handler),
        }
    }
}

impl<'a, T> GenericCapturable<'a, T> for Handler<'a, T>
where
    T: FromStr,
{
    fn capture(&mut self, token: &str) -> Result<(), InvalidCapture> {
        if token.is_empty() {
            return Ok(());
        }

        let value = convert(token)?;
        (self.handler)(value);
        Ok(())
    }
}

fn convert<T: FromStr>(token: &str) -> Result<T, InvalidCapture> {
    T::from_str(token).map_err(|_| InvalidCapture::InvalidConversion {
        token: token.to_string(),
        type_name: std::any::type_name::<T>(),
    })
}

fn parse_flag(token: &str) -> Result<bool, InvalidCapture> {
    if token.is_empty() || TRUE_VALUES.contains(&token) {
        Ok(true)
    } else if FALSE_VALUES.contains(&token) {
        Ok(false)
    } else {
        Err(InvalidCapture::InvalidFlag {
            token: token.to_string(),
        })
    }
}

fn split_pair<K: FromStr, V: FromStr>(token: &str) -> Result<(K, V), InvalidCapture> {
    let (key, value) = token
        .split_once('=')
        .ok_or_else(|| InvalidCapture::InvalidPair {
            token: token.to_string(),
        })?;
    let key = K::from_str(key).map_err(|_| InvalidCapture::InvalidKey {
        token: token.to_string(),
        type_name: std::any::type_name::<K>(),
    })?;
    let value = V::from_str(value).map_err(|_| InvalidCapture::InvalidPairValue {
        token: token.to_string(),
        type_name: std::any::type_name::<V>(),
    })?;
    Ok((key, value))
}

impl<T> Collectable<T> for Vec<T> {
    fn add(&mut self, item: T) {
        self.push(item);
    }
}

impl<T> Collectable<T> for VecDeque<T> {
    fn add(&mut self, item: T) {
        self.push_back(item);
    }
}

impl<T: Eq + std::hash::Hash> Collectable<T> for HashSet<T> {
    fn add(&mut self, item: T) {
        self.insert(item);
    }
}

impl<T: Ord> Collectable<T> for BTreeSet<T> {
    fn add(&mut self, item: T) {
        self.insert(item);
    }
}

impl<K: Eq + std::hash::Hash, V> Collectable<(K, V)> for HashMap<K, V> {
    fn add(&mut self, (key, value): (K, V)) {
        self.insert(key, value);
    }
}

impl<K: Ord, V> Collectable<(K, V)> for BTreeMap<K, V> {
    fn add(&mut self, (key, value): (K, V)) {
        self.insert(key, value);
    }
}
