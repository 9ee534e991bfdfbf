use thiserror::Error;

use crate::api::InvalidCapture;
use crate::constant::*;
use crate::matcher::*;
use crate::model::Parsed;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Error for when a [`CommandLineParser`](./struct.CommandLineParser.html) isn't set up correctly.
#[derive(Debug, Error)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

impl From<TokenMatcherError> for ConfigError {
    fn from(error: TokenMatcherError) -> Self {
        ConfigError(error.to_string())
    }
}

/// Error for when the command line tokens do not fit the configured parser.
///
/// Option and command names are reported by their display name: every spelling joined with `", "` (ex: `"-a, --all"`).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A token that looks like an option, but matches no option.
    #[error("Invalid option \"{option}\".")]
    InvalidOption {
        /// The raw token.
        option: String,
    },

    /// A global option received a value it could not capture.
    #[error("Invalid value for option \"{option}\". {reason}")]
    InvalidOptionValue {
        /// The option display name.
        option: String,
        /// The raw value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A command option received a value it could not capture.
    #[error("Invalid value for command \"{command}\" option \"{option}\". {reason}")]
    InvalidCommandOptionValue {
        /// The command display name.
        command: String,
        /// The option display name.
        option: String,
        /// The raw value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A global argument received a value it could not capture.
    #[error("Invalid value for argument \"{arg}\". {reason}")]
    InvalidArgValue {
        /// The argument display name.
        arg: String,
        /// The raw value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A command argument received a value it could not capture.
    #[error("Invalid value for command \"{command}\" argument \"{arg}\". {reason}")]
    InvalidCommandArgValue {
        /// The command display name.
        command: String,
        /// The argument display name.
        arg: String,
        /// The raw value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A positional token with no argument left to receive it.
    #[error("Unexpected argument \"{value}\".")]
    UnexpectedArg {
        /// The raw token.
        value: String,
    },

    /// A command is required, but none was given.
    #[error("Command is required.")]
    MissingCommand,

    /// A required global option was not given.
    #[error("Option \"{option}\" is required.")]
    MissingOption {
        /// The option display name.
        option: String,
    },

    /// A required option of the selected command was not given.
    #[error("Command \"{command}\" option \"{option}\" is required.")]
    MissingCommandOption {
        /// The command display name.
        command: String,
        /// The option display name.
        option: String,
    },

    /// A required global argument was not given.
    #[error("Argument \"{arg}\" is required.")]
    MissingArg {
        /// The argument display name.
        arg: String,
    },

    /// A required argument of the selected command was not given.
    #[error("Command \"{command}\" argument \"{arg}\" is required.")]
    MissingCommandArg {
        /// The command display name.
        command: String,
        /// The argument display name.
        arg: String,
    },
}

impl From<MatchError> for ParseError {
    fn from(error: MatchError) -> Self {
        match error {
            MatchError::InvalidOption(option) => ParseError::InvalidOption { option },
        }
    }
}

/// Behaviour to capture an implicit type from an input `&str`.
///
/// This is the type-erased counterpart of `GenericCapturable`, so parameters of every `T` live under one collection.
pub(crate) trait AnonymousCapturable {
    fn capture(&mut self, value: &str) -> Result<(), InvalidCapture>;
}

pub(crate) struct OptionCapture<'a> {
    config: OptionConfig,
    required: bool,
    capture: Box<dyn AnonymousCapturable + 'a>,
}

impl<'a> OptionCapture<'a> {
    pub(crate) fn new(
        config: OptionConfig,
        required: bool,
        capture: Box<dyn AnonymousCapturable + 'a>,
    ) -> Self {
        Self {
            config,
            required,
            capture,
        }
    }
}

pub(crate) struct ArgumentCapture<'a> {
    name: String,
    required: bool,
    capture: Box<dyn AnonymousCapturable + 'a>,
}

impl<'a> ArgumentCapture<'a> {
    pub(crate) fn new(
        name: impl Into<String>,
        required: bool,
        capture: Box<dyn AnonymousCapturable + 'a>,
    ) -> Self {
        Self {
            name: name.into(),
            required,
            capture,
        }
    }
}

/// The parameters declared at one level (globally, or within a command).
#[derive(Default)]
pub(crate) struct Declarations<'a> {
    options: Vec<OptionCapture<'a>>,
    arguments: Vec<ArgumentCapture<'a>>,
    rests: Vec<ArgumentCapture<'a>>,
}

impl<'a> Declarations<'a> {
    pub(crate) fn option(&mut self, capture: OptionCapture<'a>) {
        self.options.push(capture);
    }

    pub(crate) fn argument(&mut self, capture: ArgumentCapture<'a>) {
        self.arguments.push(capture);
    }

    pub(crate) fn rest(&mut self, capture: ArgumentCapture<'a>) {
        self.rests.push(capture);
    }
}

pub(crate) struct CommandCapture<'a> {
    name: String,
    alias: Option<String>,
    destination: Option<&'a mut bool>,
    declarations: Declarations<'a>,
    action: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a> CommandCapture<'a> {
    pub(crate) fn new(
        name: String,
        alias: Option<String>,
        destination: Option<&'a mut bool>,
        declarations: Declarations<'a>,
        action: Option<Box<dyn FnOnce() + 'a>>,
    ) -> Self {
        Self {
            name,
            alias,
            destination,
            declarations,
            action,
        }
    }
}

struct Slot<'a> {
    display: String,
    required: bool,
    exists: bool,
    capture: Box<dyn AnonymousCapturable + 'a>,
}

impl<'a> Slot<'a> {
    fn new(display: String, required: bool, capture: Box<dyn AnonymousCapturable + 'a>) -> Self {
        Self {
            display,
            required,
            exists: false,
            capture,
        }
    }

    fn bind(&mut self, value: &str) -> Result<(), InvalidCapture> {
        self.capture.capture(value)?;
        self.exists = true;
        Ok(())
    }

    fn missing(&self) -> bool {
        self.required && !self.exists
    }
}

struct Level<'a> {
    options: Vec<Slot<'a>>,
    arguments: Vec<Slot<'a>>,
    rest: Option<Slot<'a>>,
}

impl<'a> Level<'a> {
    fn new(
        declarations: Declarations<'a>,
        owner: Option<&str>,
    ) -> Result<(Self, Vec<OptionConfig>), ConfigError> {
        let Declarations {
            options,
            arguments,
            mut rests,
        } = declarations;

        if rests.len() > 1 {
            return Err(ConfigError(match owner {
                Some(command) => {
                    format!("Cannot declare more than one rest argument for command '{command}'.")
                }
                None => "Cannot declare more than one rest argument.".to_string(),
            }));
        }

        let mut configs = Vec::default();
        let mut option_slots = Vec::default();

        for OptionCapture {
            config,
            required,
            capture,
        } in options
        {
            option_slots.push(Slot::new(config.names().display(), required, capture));
            configs.push(config);
        }

        let level = Level {
            options: option_slots,
            arguments: arguments
                .into_iter()
                .map(|a| Slot::new(a.name, a.required, a.capture))
                .collect(),
            rest: rests
                .pop()
                .map(|r| Slot::new(r.name, r.required, r.capture)),
        };

        Ok((level, configs))
    }

    fn missing_option(&self) -> Option<&Slot<'a>> {
        self.options.iter().find(|slot| slot.missing())
    }

    fn missing_argument(&self) -> Option<&Slot<'a>> {
        self.arguments
            .iter()
            .chain(self.rest.iter())
            .find(|slot| slot.missing())
    }
}

struct CommandUnit<'a> {
    name: String,
    display: String,
    level: Level<'a>,
    destination: Option<&'a mut bool>,
    action: Option<Box<dyn FnOnce() + 'a>>,
}

#[derive(Debug, Default)]
struct ParseCursor {
    index: usize,
    position: usize,
    command_position: usize,
    args_only: bool,
    command: Option<usize>,
}

pub(crate) struct Parser<'a> {
    matcher: TokenMatcher,
    global: Level<'a>,
    commands: Vec<CommandUnit<'a>>,
    command_required: bool,
}

impl<'a> std::fmt::Debug for Parser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("matcher", &self.matcher)
            .field("command_required", &self.command_required)
            .finish()
    }
}

impl<'a> Parser<'a> {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(Declarations::default(), Vec::default(), false)
            .expect("internal error - an empty parser must be valid")
    }

    pub(crate) fn new(
        global: Declarations<'a>,
        commands: Vec<CommandCapture<'a>>,
        command_required: bool,
    ) -> Result<Self, ConfigError> {
        let (global, option_configs) = Level::new(global, None)?;
        let mut command_configs = Vec::default();
        let mut command_units = Vec::default();

        for CommandCapture {
            name,
            alias,
            destination,
            declarations,
            action,
        } in commands
        {
            let (level, configs) = Level::new(declarations, Some(name.as_str()))?;
            let config = CommandConfig::new(name.clone(), alias, configs);
            command_units.push(CommandUnit {
                name,
                display: config.display(),
                level,
                destination,
                action,
            });
            command_configs.push(config);
        }

        Ok(Self {
            matcher: TokenMatcher::new(option_configs, command_configs)?,
            global,
            commands: command_units,
            command_required,
        })
    }

    /// Walk the tokens once, binding each to its destination.
    ///
    /// On error, also reports the offset of the token at fault (`tokens.len()` for post-parse requirements).
    pub(crate) fn consume(mut self, tokens: &[&str]) -> Result<Parsed, (usize, ParseError)> {
        let mut cursor = ParseCursor::default();

        while cursor.index < tokens.len() {
            let index = cursor.index;
            let token = tokens[index];

            if cursor.args_only {
                self.bind_positional(&mut cursor, token)
                    .map_err(|e| (index, e))?;
                cursor.index += 1;
                continue;
            }

            let matched = self
                .matcher
                .classify(tokens, index, cursor.command)
                .map_err(|e| (index, ParseError::from(e)))?;

            match matched {
                Matched::Separator => {
                    cursor.args_only = true;
                    cursor.index += 1;
                }
                Matched::Help => {
                    return Ok(Parsed::Help {
                        command: cursor.command.map(|c| self.commands[c].name.clone()),
                    });
                }
                Matched::Option {
                    target,
                    value,
                    consumed,
                } => {
                    let result = match value {
                        Some(value) => self.bind_option(target, &value),
                        None => Err(self.invalid_option_value(target, "", EMPTY_VALUE)),
                    };
                    result.map_err(|e| (index, e))?;
                    cursor.index += consumed;
                }
                Matched::Group(targets) => {
                    for target in targets {
                        self.bind_option(target, FLAG_TRUE)
                            .map_err(|e| (index, e))?;
                    }
                    cursor.index += 1;
                }
                Matched::Command { index: c, consumed } => {
                    let command = &mut self.commands[c];
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Selected command '{}'.", command.name);
                    }

                    if let Some(destination) = command.destination.as_mut() {
                        **destination = true;
                    }

                    cursor.command.replace(c);
                    cursor.index += consumed;
                }
                Matched::Positional => {
                    self.bind_positional(&mut cursor, token)
                        .map_err(|e| (index, e))?;
                    cursor.index += 1;
                }
            }
        }

        self.validate(cursor.command)
            .map_err(|e| (tokens.len(), e))?;

        let command = match cursor.command {
            Some(c) => {
                let command = &mut self.commands[c];

                if let Some(action) = command.action.take() {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Invoking the action for command '{}'.", command.name);
                    }

                    action();
                }

                Some(command.name.clone())
            }
            None => None,
        };

        Ok(Parsed::Complete { command })
    }

    fn bind_option(&mut self, target: Target, value: &str) -> Result<(), ParseError> {
        let slot = match target {
            Target::Global(i) => &mut self.global.options[i],
            Target::Command(c, i) => &mut self.commands[c].level.options[i],
        };

        match slot.bind(value) {
            Ok(()) => Ok(()),
            Err(error) => Err(self.invalid_option_value(target, value, &error.to_string())),
        }
    }

    fn invalid_option_value(&self, target: Target, value: &str, reason: &str) -> ParseError {
        match target {
            Target::Global(i) => ParseError::InvalidOptionValue {
                option: self.global.options[i].display.clone(),
                value: value.to_string(),
                reason: reason.to_string(),
            },
            Target::Command(c, i) => ParseError::InvalidCommandOptionValue {
                command: self.commands[c].display.clone(),
                option: self.commands[c].level.options[i].display.clone(),
                value: value.to_string(),
                reason: reason.to_string(),
            },
        }
    }

    /// Bind in order: command arguments, command rest, global arguments, global rest.
    fn bind_positional(&mut self, cursor: &mut ParseCursor, token: &str) -> Result<(), ParseError> {
        if let Some(c) = cursor.command {
            let command = &mut self.commands[c];
            let slot = match command.level.arguments.get_mut(cursor.command_position) {
                Some(slot) => {
                    cursor.command_position += 1;
                    Some(slot)
                }
                None => command.level.rest.as_mut(),
            };

            if let Some(slot) = slot {
                return slot
                    .bind(token)
                    .map_err(|error| ParseError::InvalidCommandArgValue {
                        command: command.display.clone(),
                        arg: slot.display.clone(),
                        value: token.to_string(),
                        reason: error.to_string(),
                    });
            }
        }

        let slot = match self.global.arguments.get_mut(cursor.position) {
            Some(slot) => {
                cursor.position += 1;
                Some(slot)
            }
            None => self.global.rest.as_mut(),
        };

        match slot {
            Some(slot) => slot.bind(token).map_err(|error| ParseError::InvalidArgValue {
                arg: slot.display.clone(),
                value: token.to_string(),
                reason: error.to_string(),
            }),
            None => Err(ParseError::UnexpectedArg {
                value: token.to_string(),
            }),
        }
    }

    fn validate(&self, command: Option<usize>) -> Result<(), ParseError> {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Validating requirements, command: {command:?}.");
        }

        if self.command_required && command.is_none() {
            return Err(ParseError::MissingCommand);
        }

        if let Some(slot) = self.global.missing_option() {
            return Err(ParseError::MissingOption {
                option: slot.display.clone(),
            });
        }

        if let Some(slot) = self.global.missing_argument() {
            return Err(ParseError::MissingArg {
                arg: slot.display.clone(),
            });
        }

        if let Some(c) = command {
            let command = &self.commands[c];

            if let Some(slot) = command.level.missing_option() {
                return Err(ParseError::MissingCommandOption {
                    command: command.display.clone(),
                    option: slot.display.clone(),
                });
            }

            if let Some(slot) = command.level.missing_argument() {
                return Err(ParseError::MissingCommandArg {
                    command: command.display.clone(),
                    arg: slot.display.clone(),
                });
            }
        }

        Ok(())
    }
}
