use crate::api::{Parameter, Registration};
use crate::parser::{
    ArgumentParameter, CommandCapture, CommandParameter, ConfigError, ConsoleInterface,
    Declarations, GeneralParser, OptionParameter, Parser, Printer, UserInterface,
};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The parameters registered at one level: globally, or within a command.
#[derive(Default)]
struct Level<'a> {
    declarations: Declarations<'a>,
    option_parameters: Vec<OptionParameter>,
    argument_parameters: Vec<ArgumentParameter>,
}

impl<'a> Level<'a> {
    fn add<T: 'a>(&mut self, parameter: Parameter<'a, T>) -> Result<(), ConfigError> {
        let inner = parameter.consume();
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Registering {inner:?}.");
        }

        match Registration::try_from(inner)? {
            Registration::Option(capture, parameter) => {
                self.declarations.option(capture);
                self.option_parameters.push(parameter);
            }
            Registration::Argument(capture, parameter) => {
                self.declarations.argument(capture);
                self.argument_parameters.push(parameter);
            }
            Registration::Rest(capture, parameter) => {
                self.declarations.rest(capture);
                self.argument_parameters.push(parameter);
            }
        }

        Ok(())
    }
}

/// The base command line parser.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::CommandLineParser;
///
/// let parser = CommandLineParser::new("program")
///     // Configure with CommandLineParser::add and CommandLineParser::command.
///     .build();
/// parser.parse_tokens(&[]).unwrap();
/// ```
pub struct CommandLineParser<'a> {
    program: String,
    about: Option<String>,
    command_required: bool,
    help_handler: Option<Box<dyn FnOnce() + 'a>>,
    level: Level<'a>,
    commands: Vec<Command<'a>>,
    deferred_error: Option<ConfigError>,
}

impl<'a> CommandLineParser<'a> {
    /// Create a command line parser.
    ///
    /// The `program` name appears in the usage line; an empty name is displayed as `CMD`.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::CommandLineParser;
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .build();
    ///
    /// parser.parse_tokens(vec![].as_slice()).unwrap();
    /// ```
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            command_required: false,
            help_handler: None,
            level: Level::default(),
            commands: Vec::default(),
            deferred_error: None,
        }
    }

    /// Document the about message for this command line parser.
    /// If repeated, only the final message will apply.
    ///
    /// An about message documents the command line parser in full sentence/paragraph format.
    /// We recommend allowing `argot` to format this field (ex: it is not recommended to use line breaks `'\n'`).
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::CommandLineParser;
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .about("--this will get discarded--")
    ///     .about("My program that does awesome stuff.  Check it out!")
    ///     .build();
    ///
    /// assert!(parser.format_help().contains("awesome"));
    /// ```
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Add an option/argument to the command line parser.
    ///
    /// The order of argument parameters corresponds to their positional order during parsing.
    /// The order of option parameters does not affect the command parser semantics.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{CommandLineParser, Parameter, Scalar};
    ///
    /// let mut a: u32 = 0;
    /// let mut b: u32 = 0;
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::argument(Scalar::new(&mut a), "a"))
    ///     .add(Parameter::argument(Scalar::new(&mut b), "b"))
    ///     .build();
    ///
    /// parser.parse_tokens(vec!["1", "2"].as_slice()).unwrap();
    ///
    /// assert_eq!(a, 1);
    /// assert_eq!(b, 2);
    /// ```
    pub fn add<T: 'a>(mut self, parameter: Parameter<'a, T>) -> Self {
        if let Err(error) = self.level.add(parameter) {
            self.deferred_error.get_or_insert(error);
        }

        self
    }

    /// Add a command.
    ///
    /// At most one command is selected per parse: the first token (outside of options) that spells its name or alias.
    /// Names may contain spaces, in which case they are matched against consecutive tokens (ex: `"remote add"`).
    /// Once selected, the command's options and arguments are searched before the global ones.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{CommandLineParser, Parameter, Scalar};
    ///
    /// let mut listing = false;
    /// let mut depth: u32 = 0;
    /// let parser = CommandLineParser::new("program")
    ///     .command("list", |command| {
    ///         command
    ///             .alias("l")
    ///             .about("List everything.")
    ///             .destination(&mut listing)
    ///             .add(Parameter::option(Scalar::new(&mut depth), "--depth"))
    ///     })
    ///     .build();
    ///
    /// let command = parser.parse_tokens(&["l", "--depth", "2"]).unwrap();
    ///
    /// assert_eq!(command, Some("list".to_string()));
    /// assert!(listing);
    /// assert_eq!(depth, 2);
    /// ```
    pub fn command(
        mut self,
        name: impl Into<String>,
        setup_fn: impl FnOnce(Command<'a>) -> Command<'a>,
    ) -> Self {
        let mut command = setup_fn(Command::new(name.into()));

        if let Some(error) = command.deferred_error.take() {
            self.deferred_error.get_or_insert(error);
        }

        self.commands.push(command);
        self
    }

    /// Require a command to be selected.
    /// Parsing without one fails with [`ParseError::MissingCommand`](./enum.ParseError.html#variant.MissingCommand).
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{CommandLineParser, ParseError};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .command("run", |command| command)
    ///     .command_required()
    ///     .build();
    ///
    /// assert_eq!(parser.try_parse_tokens(&[]).unwrap_err(), ParseError::MissingCommand);
    /// ```
    pub fn command_required(mut self) -> Self {
        self.command_required = true;
        self
    }

    /// Replace the default help message behaviour of [`GeneralParser::parse_tokens`](./struct.GeneralParser.html#method.parse_tokens).
    /// When `--help` is encountered, the handler runs instead of the help message being printed.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::CommandLineParser;
    /// use std::cell::Cell;
    ///
    /// let asked = Cell::new(false);
    /// let parser = CommandLineParser::new("program")
    ///     .help_handler(|| asked.set(true))
    ///     .build();
    ///
    /// assert_eq!(parser.parse_tokens(&["--help"]), Err(0));
    /// assert!(asked.get());
    /// ```
    pub fn help_handler(mut self, handler: impl FnOnce() + 'a) -> Self {
        self.help_handler.replace(Box::new(handler));
        self
    }

    pub(crate) fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<GeneralParser<'a>, ConfigError> {
        if let Some(error) = self.deferred_error {
            return Err(error);
        }

        let mut command_captures = Vec::default();
        let mut command_parameters = Vec::default();

        for command in self.commands.into_iter() {
            let Command {
                name,
                alias,
                about,
                destination,
                action,
                level,
                ..
            } = command;
            command_parameters.push(CommandParameter::new(
                name.clone(),
                alias.clone(),
                about,
                level.option_parameters,
                level.argument_parameters,
            ));
            command_captures.push(CommandCapture::new(
                name,
                alias,
                destination,
                level.declarations,
                action,
            ));
        }

        let parser = Parser::new(
            self.level.declarations,
            command_captures,
            self.command_required,
        )?;
        let printer = Printer::terminal(
            self.program,
            self.about,
            self.command_required,
            self.level.option_parameters,
            self.level.argument_parameters,
            command_parameters,
        );
        Ok(GeneralParser::new(
            parser,
            printer,
            self.help_handler,
            user_interface,
        ))
    }

    /// Build the command line parser as a Result.
    /// This finalizes the configuration and checks for errors (ex: a repeated option name).
    pub fn build_parser(self) -> Result<GeneralParser<'a>, ConfigError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Build the command line parser.
    /// This finalizes the configuration and checks for errors (ex: a repeated option name).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> GeneralParser<'a> {
        match self.build_parser() {
            Ok(gp) => gp,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}

/// A command of the command line parser.
///
/// Used with [`CommandLineParser::command`].
pub struct Command<'a> {
    name: String,
    alias: Option<String>,
    about: Option<String>,
    destination: Option<&'a mut bool>,
    action: Option<Box<dyn FnOnce() + 'a>>,
    level: Level<'a>,
    deferred_error: Option<ConfigError>,
}

impl<'a> Command<'a> {
    fn new(name: String) -> Self {
        Self {
            name,
            alias: None,
            about: None,
            destination: None,
            action: None,
            level: Level::default(),
            deferred_error: None,
        }
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Build a [`Command`] for use in testing.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{Command, Parameter, Scalar};
    ///
    /// // Function under test.
    /// // We want to make sure the setup_fn is wired up correctly.
    /// pub fn setup_fn<'a>(value: &'a mut u32) -> impl FnOnce(Command<'a>) -> Command<'a> {
    ///     |command| command.add(Parameter::argument(Scalar::new(value), "value"))
    /// }
    ///
    /// let mut x: u32 = 1;
    /// let parser = setup_fn(&mut x)(Command::test_dummy()).build_parser().unwrap();
    /// parser.parse_tokens(vec!["2"].as_slice()).unwrap();
    /// assert_eq!(x, 2);
    /// ```
    #[cfg(feature = "unit_test")]
    pub fn test_dummy() -> Self {
        Command::new("test-dummy".to_string())
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Build a [`GeneralParser`] for testing.
    /// The command's parameters become the parameters of the program; its destination and action are left out.
    /// See [`Command::test_dummy`] for an example.
    #[cfg(feature = "unit_test")]
    pub fn build_parser(self) -> Result<GeneralParser<'a>, ConfigError> {
        let Command {
            name,
            about,
            level,
            deferred_error,
            ..
        } = self;
        CommandLineParser {
            program: name,
            about,
            command_required: false,
            help_handler: None,
            level,
            commands: Vec::default(),
            deferred_error,
        }
        .build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Give the command a second name.
    /// If repeated, only the final alias will apply.
    ///
    /// See [`CommandLineParser::command`] for usage.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias.replace(alias.into());
        self
    }

    /// Document the about message for this command.
    /// If repeated, only the final message will apply.
    ///
    /// See [`CommandLineParser::command`] for usage.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Set `variable` to `true` as soon as this command is selected.
    ///
    /// See [`CommandLineParser::command`] for usage.
    pub fn destination(mut self, variable: &'a mut bool) -> Self {
        self.destination.replace(variable);
        self
    }

    /// Add an option/argument to the command.
    ///
    /// The order of argument parameters corresponds to their positional order during parsing.
    /// The order of option parameters does not affect the command parser semantics.
    ///
    /// See [`CommandLineParser::command`] for usage.
    pub fn add<T: 'a>(mut self, parameter: Parameter<'a, T>) -> Self {
        if let Err(error) = self.level.add(parameter) {
            self.deferred_error.get_or_insert(error);
        }

        self
    }

    /// Run `action` once parsing selected this command and every requirement is satisfied.
    ///
    /// The action never runs when help is requested or parsing fails.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{CommandLineParser, Parameter, Scalar};
    /// use std::cell::Cell;
    ///
    /// let ran = Cell::new(false);
    /// let mut target = String::default();
    /// let parser = CommandLineParser::new("program")
    ///     .command("fetch", |command| {
    ///         command
    ///             .add(Parameter::argument(Scalar::new(&mut target), "target").required())
    ///             .action(|| ran.set(true))
    ///     })
    ///     .build();
    ///
    /// parser.parse_tokens(&["fetch", "origin"]).unwrap();
    ///
    /// assert!(ran.get());
    /// assert_eq!(&target, "origin");
    /// ```
    pub fn action(mut self, action: impl FnOnce() + 'a) -> Self {
        self.action.replace(Box::new(action));
        self
    }
}
