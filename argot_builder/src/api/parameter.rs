use crate::api::{CliArgument, CliOption, CliRest, GenericCapturable, InvalidCapture};
use crate::constant::*;
use crate::matcher::{OptionConfig, OptionNames};
use crate::parser::{
    AnonymousCapturable, ArgumentCapture, ArgumentParameter, ConfigError, OptionCapture,
    OptionParameter,
};

/// Erases the value type `T` of a field, so fields of every type fit a single collection.
pub(crate) struct AnonymousCapture<'a, T: 'a> {
    field: Box<dyn GenericCapturable<'a, T> + 'a>,
}

impl<'a, T> AnonymousCapture<'a, T> {
    pub(crate) fn bind(field: impl GenericCapturable<'a, T> + 'a) -> Self {
        Self {
            field: Box::new(field),
        }
    }

    pub(crate) fn is_flag(&self) -> bool {
        self.field.is_flag()
    }
}

impl<'a, T> AnonymousCapturable for AnonymousCapture<'a, T> {
    fn capture(&mut self, value: &str) -> Result<(), InvalidCapture> {
        self.field.capture(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ParameterClass {
    Opt,
    Arg,
    Rest,
}

pub(super) struct ParameterInner<'a, T: 'a> {
    class: ParameterClass,
    field: AnonymousCapture<'a, T>,
    names: Vec<String>,
    required: bool,
    help: Option<String>,
}

impl<'a, T> std::fmt::Debug for ParameterInner<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterInner")
            .field("class", &self.class)
            .field("names", &self.names)
            .field("required", &self.required)
            .field("help", &self.help)
            .finish()
    }
}

impl<'a, T> ParameterInner<'a, T> {
    #[cfg(test)]
    pub(super) fn class(&self) -> ParameterClass {
        self.class
    }

    fn display_name(&self) -> String {
        match (self.class, self.names.first()) {
            (_, Some(name)) if !name.is_empty() => name.clone(),
            (ParameterClass::Rest, _) => ANONYMOUS_REST.to_string(),
            _ => ANONYMOUS_ARGUMENT.to_string(),
        }
    }
}

/// The runtime pieces of a parameter: what binds its values, and what documents it.
pub(super) enum Registration<'a> {
    Option(OptionCapture<'a>, OptionParameter),
    Argument(ArgumentCapture<'a>, ArgumentParameter),
    Rest(ArgumentCapture<'a>, ArgumentParameter),
}

impl<'a> std::fmt::Debug for Registration<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Registration::Option(..) => write!(f, "Registration::Option"),
            Registration::Argument(..) => write!(f, "Registration::Argument"),
            Registration::Rest(..) => write!(f, "Registration::Rest"),
        }
    }
}

impl<'a, T> TryFrom<ParameterInner<'a, T>> for Registration<'a>
where
    T: 'a,
{
    type Error = ConfigError;

    fn try_from(inner: ParameterInner<'a, T>) -> Result<Self, Self::Error> {
        match inner.class {
            ParameterClass::Opt => {
                let names = OptionNames::parse(&inner.names)?;
                let flag = inner.field.is_flag();
                let parameter = OptionParameter::new(names.clone(), inner.required, inner.help);
                let capture = OptionCapture::new(
                    OptionConfig::new(names, flag),
                    inner.required,
                    Box::new(inner.field),
                );
                Ok(Registration::Option(capture, parameter))
            }
            ParameterClass::Arg | ParameterClass::Rest => {
                let name = inner.display_name();
                if inner.names.len() > 1 {
                    return Err(ConfigError(format!(
                        "Cannot give the argument '{name}' more than one name."
                    )));
                }

                let rest = inner.class == ParameterClass::Rest;
                let parameter =
                    ArgumentParameter::new(name.clone(), inner.required, rest, inner.help);
                let capture = ArgumentCapture::new(name, inner.required, Box::new(inner.field));

                if rest {
                    Ok(Registration::Rest(capture, parameter))
                } else {
                    Ok(Registration::Argument(capture, parameter))
                }
            }
        }
    }
}

/// An option, positional argument, or rest argument of the command line parser.
///
/// The `field` decides how each textual value is bound (see [`Scalar`](./struct.Scalar.html), [`Flag`](./struct.Flag.html), [`Collection`](./struct.Collection.html), etc).
/// Which fields are allowed where is enforced by the marker traits [`CliOption`], [`CliArgument`], and [`CliRest`].
pub struct Parameter<'a, T: 'a>(ParameterInner<'a, T>);

impl<'a, T> Parameter<'a, T> {
    /// Create an option parameter.
    ///
    /// The `name` is one spelling of the option: short (`-v`), long (`--verbose`), or non-conventional (`+fb`).
    /// Add the other spellings with [`Parameter::name`].
    ///
    /// Flag fields take no value; every other field consumes one value per occurrence, either from the next token or inline (`--count=5`, `-n5`).
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{CommandLineParser, Flag, Parameter, Scalar};
    ///
    /// let mut verbose = false;
    /// let mut count: u32 = 0;
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::option(Flag::new(&mut verbose), "-v").name("--verbose"))
    ///     .add(Parameter::option(Scalar::new(&mut count), "--count"))
    ///     .build();
    ///
    /// parser.parse_tokens(&["--verbose", "--count=5"]).unwrap();
    ///
    /// assert!(verbose);
    /// assert_eq!(count, 5);
    /// ```
    pub fn option(
        field: impl GenericCapturable<'a, T> + CliOption + 'a,
        name: impl Into<String>,
    ) -> Self {
        Self(ParameterInner {
            class: ParameterClass::Opt,
            field: AnonymousCapture::bind(field),
            names: vec![name.into()],
            required: false,
            help: None,
        })
    }

    /// Create a positional argument parameter.
    ///
    /// Positional arguments take one value each, in the order they are added to the parser.
    /// An empty `name` is displayed as `ARG`.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{CommandLineParser, Parameter, Scalar};
    ///
    /// let mut source = String::default();
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::argument(Scalar::new(&mut source), "source"))
    ///     .build();
    ///
    /// parser.parse_tokens(&["a.txt"]).unwrap();
    ///
    /// assert_eq!(&source, "a.txt");
    /// ```
    pub fn argument(
        field: impl GenericCapturable<'a, T> + CliArgument + 'a,
        name: impl Into<String>,
    ) -> Self {
        Self(ParameterInner {
            class: ParameterClass::Arg,
            field: AnonymousCapture::bind(field),
            names: vec![name.into()],
            required: false,
            help: None,
        })
    }

    /// Create the rest argument parameter, which takes every positional value left over once the positional arguments are filled.
    ///
    /// At most one rest argument may be declared per parser (and per command).
    /// An empty `name` is displayed as `REST`.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{Collection, CommandLineParser, Parameter, Scalar};
    ///
    /// let mut first = String::default();
    /// let mut others: Vec<String> = Vec::default();
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::argument(Scalar::new(&mut first), "first"))
    ///     .add(Parameter::rest(Collection::new(&mut others), "others"))
    ///     .build();
    ///
    /// parser.parse_tokens(&["a", "b", "--", "-c"]).unwrap();
    ///
    /// assert_eq!(&first, "a");
    /// assert_eq!(others, vec!["b".to_string(), "-c".to_string()]);
    /// ```
    pub fn rest(
        field: impl GenericCapturable<'a, T> + CliRest + 'a,
        name: impl Into<String>,
    ) -> Self {
        Self(ParameterInner {
            class: ParameterClass::Rest,
            field: AnonymousCapture::bind(field),
            names: vec![name.into()],
            required: false,
            help: None,
        })
    }

    /// Add another spelling for an option.
    ///
    /// An option has at most one short, one long, and one non-conventional spelling.
    /// Arguments only have the one name; giving them another is a configuration error.
    pub fn name(self, name: impl Into<String>) -> Self {
        let mut inner = self.0;
        inner.names.push(name.into());
        Self(inner)
    }

    /// Document the help message for this parameter.
    /// If repeated, only the final help message will apply to the parameter.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{Flag, Parameter};
    ///
    /// let mut verbose = false;
    /// Parameter::option(Flag::new(&mut verbose), "-v")
    ///     .help("--this will get discarded--")
    ///     .help("Print more.");
    /// ```
    pub fn help(self, description: impl Into<String>) -> Self {
        let mut inner = self.0;
        inner.help.replace(description.into());
        Self(inner)
    }

    /// Mark this parameter as required.
    ///
    /// A required option must appear at least once; a required argument must receive a value.
    /// Requirements are checked after every token has been consumed.
    pub fn required(self) -> Self {
        let mut inner = self.0;
        inner.required = true;
        Self(inner)
    }

    pub(super) fn consume(self) -> ParameterInner<'a, T> {
        self.0
    }
}
