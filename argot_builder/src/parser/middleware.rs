use std::env;

use crate::model::Parsed;
use crate::parser::base::*;
use crate::parser::interface::UserInterface;
use crate::parser::printer::Printer;
use crate::parser::ErrorContext;

/// The configured command line parser.
/// Built via [`CommandLineParser::build`](./struct.CommandLineParser.html#method.build) or [`CommandLineParser::build_parser`](./struct.CommandLineParser.html#method.build_parser).
///
/// A parser borrows its destinations for its whole life, and is consumed by parsing.
/// The `format_*` methods render the help/usage text, and may be called beforehand.
pub struct GeneralParser<'a> {
    parser: Parser<'a>,
    printer: Printer,
    help_handler: Option<Box<dyn FnOnce() + 'a>>,
    user_interface: Box<dyn UserInterface>,
}

impl<'a> GeneralParser<'a> {
    pub(crate) fn new(
        parser: Parser<'a>,
        printer: Printer,
        help_handler: Option<Box<dyn FnOnce() + 'a>>,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            parser,
            printer,
            help_handler,
            user_interface,
        }
    }

    /// Run the command line parser against the input tokens, without any console interaction.
    ///
    /// Tokens are processed in a single pass, binding each value to its destination as it is encountered.
    /// The first error stops the parse; values bound until then are kept.
    /// Requirements (ex: required options) are checked once every token has been consumed, and only then will the selected command's action run.
    ///
    /// If the help switch (`--help`) is encountered, parsing stops and [`Parsed::Help`] is returned.
    pub fn try_parse_tokens(self, tokens: &[&str]) -> Result<Parsed, ParseError> {
        self.parser.consume(tokens).map_err(|(_, error)| error)
    }

    /// Run the command line parser against the input tokens.
    ///
    /// Behaves like [`GeneralParser::try_parse_tokens`], returning the name of the selected command (if any).
    ///
    /// If at any point the parser encounters an error (ex: an unknown option, an un-capturable value, a missing requirement), it will print the error and return with `Err(1)`.
    ///
    /// If the help switch (`--help`) is encountered, the parser will run the custom help handler, or otherwise display the help message (of the selected command, if any), and return with `Err(0)`.
    pub fn parse_tokens(self, tokens: &[&str]) -> Result<Option<String>, i32> {
        let GeneralParser {
            parser,
            printer,
            help_handler,
            user_interface,
        } = self;

        match parser.consume(tokens) {
            Ok(Parsed::Complete { command }) => Ok(command),
            Ok(Parsed::Help { command }) => {
                match help_handler {
                    Some(help_handler) => help_handler(),
                    None => {
                        let help = command
                            .as_deref()
                            .and_then(|c| printer.command_help(c))
                            .unwrap_or_else(|| printer.help());
                        user_interface.print(help.trim_end().to_string());
                    }
                }

                Err(0)
            }
            Err((offset, parse_error)) => {
                user_interface.print_error(parse_error);
                user_interface.print_error_context(ErrorContext::new(offset, tokens));
                Err(1)
            }
        }
    }

    /// Run the command line parser against the Cli [`env::args`].
    ///
    /// Behaves like [`GeneralParser::parse_tokens`], except instead of returning `Err(code)` it will exit with that code (via [`std::process::exit`]).
    pub fn parse(self) -> Option<String> {
        let command_input: Vec<String> = env::args().skip(1).collect();
        match self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(command) => command,
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        }
    }

    /// The usage line(s) of the program.
    pub fn format_usage(&self) -> String {
        self.printer.usage()
    }

    /// The full help message of the program.
    pub fn format_help(&self) -> String {
        self.printer.help()
    }

    /// The description of each global option.
    pub fn format_options(&self) -> String {
        self.printer.options()
    }

    /// The description of each global argument.
    pub fn format_args(&self) -> String {
        self.printer.arguments()
    }

    /// The description of each command.
    pub fn format_commands(&self) -> String {
        self.printer.commands()
    }

    /// The usage lines of a command, found by its name or alias.
    /// Returns `None` for an unknown command.
    pub fn format_command_usage(&self, name: &str) -> Option<String> {
        self.printer.command_usage(name)
    }

    /// The full help message of a command, found by its name or alias.
    /// Returns `None` for an unknown command.
    pub fn format_command_help(&self, name: &str) -> Option<String> {
        self.printer.command_help(name)
    }

    /// The description of each option of a command, found by its name or alias.
    /// Returns `None` for an unknown command.
    pub fn format_command_options(&self, name: &str) -> Option<String> {
        self.printer.command_options(name)
    }

    /// The description of each argument of a command, found by its name or alias.
    /// Returns `None` for an unknown command.
    pub fn format_command_args(&self, name: &str) -> Option<String> {
        self.printer.command_arguments(name)
    }
}
