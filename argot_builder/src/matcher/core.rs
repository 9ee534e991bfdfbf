use std::collections::HashSet;
use thiserror::Error;

use crate::constant::*;
use crate::matcher::api::*;
use crate::matcher::model::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum TokenMatcherError {
    #[error("Cannot use '{0}' as an option name.")]
    InvalidName(String),

    #[error("Cannot name an option both '{existing}' and '{name}'.")]
    RepeatedForm { existing: String, name: String },

    #[error("Cannot declare an option without a name.")]
    Unnamed,

    #[error("Cannot duplicate the option '{0}'.")]
    DuplicateOption(String),

    #[error("Cannot use '{0}' as a command name.")]
    InvalidCommand(String),

    #[error("Cannot duplicate the command '{0}'.")]
    DuplicateCommand(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MatchError {
    #[error("Invalid option \"{0}\".")]
    InvalidOption(String),
}

#[derive(Debug)]
pub(crate) struct TokenMatcher {
    options: Vec<OptionConfig>,
    commands: Vec<CommandConfig>,
}

impl TokenMatcher {
    pub(crate) fn new(
        options: Vec<OptionConfig>,
        commands: Vec<CommandConfig>,
    ) -> Result<Self, TokenMatcherError> {
        check_options(&options)?;
        let mut command_names = HashSet::new();

        for command in &commands {
            check_options(command.options())?;

            for name in command.names() {
                if name.trim().is_empty() || name.starts_with('-') {
                    return Err(TokenMatcherError::InvalidCommand(name.to_string()));
                }

                if !command_names.insert(name) {
                    return Err(TokenMatcherError::DuplicateCommand(name.to_string()));
                }
            }
        }

        Ok(Self { options, commands })
    }

    pub(crate) fn config(&self, target: Target) -> &OptionConfig {
        match target {
            Target::Global(i) => &self.options[i],
            Target::Command(c, i) => &self.commands[c].options()[i],
        }
    }

    /// Classify the token at `index`, given the (optionally) active command.
    ///
    /// Must not be called once the separator has been seen; from then on every token is positional.
    pub(crate) fn classify(
        &self,
        tokens: &[&str],
        index: usize,
        active: Option<usize>,
    ) -> Result<Matched, MatchError> {
        let token = tokens[index];
        let matched = self.classify_inner(tokens, index, active)?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Token {index} '{token}' matched: {matched:?}.");
        }

        if matched == Matched::Positional && token.starts_with('-') {
            return Err(MatchError::InvalidOption(token.to_string()));
        }

        Ok(matched)
    }

    fn classify_inner(
        &self,
        tokens: &[&str],
        index: usize,
        active: Option<usize>,
    ) -> Result<Matched, MatchError> {
        let token = tokens[index];

        // 1. The separator and help switch.
        if token == SEPARATOR {
            return Ok(Matched::Separator);
        }

        if token == HELP_NAME {
            return Ok(Matched::Help);
        }

        // 2. Implicit negation of a long flag, such as:
        //  --no-verbose
        if let Some(name) = token.strip_prefix(NEGATION_PREFIX) {
            let long = format!("{SEPARATOR}{name}");
            if let Some(target) = self
                .find(active, |o| o.names().long() == Some(&long))
                .filter(|t| self.config(*t).flag())
            {
                return Ok(Matched::Option {
                    target,
                    value: Some(FLAG_FALSE.to_string()),
                    consumed: 1,
                });
            }
        }

        // 3. An exact option, such as:
        //  -s
        //  -s ..
        //  --long
        //  --long ..
        if let Some(target) = self.find(active, |o| o.names().contains(token)) {
            let next = tokens.get(index + 1);

            let (value, consumed) = if self.config(target).flag() {
                match next {
                    Some(next) if is_flag_value(next) => (Some(next.to_string()), 2),
                    _ => (Some(FLAG_TRUE.to_string()), 1),
                }
            } else {
                match next {
                    Some(next) if !next.starts_with('-') => (Some(next.to_string()), 2),
                    _ => (None, 1),
                }
            };

            return Ok(Matched::Option {
                target,
                value,
                consumed,
            });
        }

        // 4. An equals delimited option, such as:
        //  -s=..
        //  --long=..
        //  +fb=..
        if let Some((target, value)) = self.find_map(active, |o| {
            o.names()
                .iter()
                .find_map(|n| token.strip_prefix(n).and_then(|r| r.strip_prefix('=')))
        }) {
            return Ok(Matched::Option {
                target,
                value: Some(value.to_string()),
                consumed: 1,
            });
        }

        if let Some(letters) = token.strip_prefix('-') {
            if !letters.starts_with('-') {
                // 5. Grouped short flags, such as (both -r and -f are flags):
                //  -rf
                if letters.chars().count() >= 2 {
                    let group: Option<Vec<Target>> = letters
                        .chars()
                        .map(|c| {
                            self.find(active, |o| o.names().short_char() == Some(c))
                                .filter(|t| self.config(*t).flag())
                        })
                        .collect();

                    if let Some(group) = group {
                        return Ok(Matched::Group(group));
                    }
                }

                // 6. A short option with an inline value, such as:
                //  -n10
                //  -s0
                if let Some((target, value)) = self.find_map(active, |o| {
                    o.names()
                        .short()
                        .and_then(|s| token.strip_prefix(s))
                        .filter(|r| !r.is_empty())
                }) {
                    if self.config(target).flag() && !is_flag_value(value) {
                        return Err(MatchError::InvalidOption(token.to_string()));
                    }

                    return Ok(Matched::Option {
                        target,
                        value: Some(value.to_string()),
                        consumed: 1,
                    });
                }
            }
        }

        // 7. Anything prefixed by a non-conventional name, but not otherwise matched.
        if self
            .find(active, |o| {
                o.names()
                    .non_conventional()
                    .map_or(false, |n| token.starts_with(n))
            })
            .is_some()
        {
            return Err(MatchError::InvalidOption(token.to_string()));
        }

        // 8. A command, but only while no command has been selected.
        if active.is_none() && !token.starts_with('-') {
            for (i, command) in self.commands.iter().enumerate() {
                if let Some(consumed) = command.match_tokens(&tokens[index..]) {
                    return Ok(Matched::Command {
                        index: i,
                        consumed,
                    });
                }
            }
        }

        Ok(Matched::Positional)
    }

    /// Find an option, searching the active command first and then the globals.
    fn find(&self, active: Option<usize>, predicate: impl Fn(&OptionConfig) -> bool) -> Option<Target> {
        self.find_map(active, |o| predicate(o).then_some(()))
            .map(|(target, _)| target)
    }

    fn find_map<'t, R>(
        &'t self,
        active: Option<usize>,
        f: impl Fn(&'t OptionConfig) -> Option<R>,
    ) -> Option<(Target, R)> {
        if let Some(c) = active {
            let found = self.commands[c]
                .options()
                .iter()
                .enumerate()
                .find_map(|(i, o)| f(o).map(|r| (Target::Command(c, i), r)));

            if found.is_some() {
                return found;
            }
        }

        self.options
            .iter()
            .enumerate()
            .find_map(|(i, o)| f(o).map(|r| (Target::Global(i), r)))
    }
}

fn check_options(options: &[OptionConfig]) -> Result<(), TokenMatcherError> {
    let mut names = HashSet::from([HELP_NAME]);

    for option in options {
        for name in option.names().iter() {
            if !names.insert(name) {
                return Err(TokenMatcherError::DuplicateOption(name.to_string()));
            }
        }
    }

    Ok(())
}
