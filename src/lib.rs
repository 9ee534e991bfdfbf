//! `argot` is a declarative, type-safe command line parser for Rust.
//!
//! Configure the parser with the variables your program already has, and `argot` binds each command line value straight onto them.
//! There are no intermediate string maps to query afterwards, and no `&str -> T` conversions to call by hand.
//! `argot` aims for the command line conventions most users already know:
//! * Flags and options spelled short (`-v`), long (`--verbose`), or any other way (`+fb`, `-frtti`).
//! * Values given inline (`--count=5`, `-n5`) or as the next token (`--count 5`).
//! * Grouped short flags (`-abc`), explicit boolean values (`-a 0`, `--all=yes`), and implicit negation (`--no-all`).
//! * Positional arguments, a variadic rest argument, and `--` to end option processing.
//! * Commands (including multi-word ones, such as `remote add`) with their own options and arguments.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/simple.rs")]
//! ```
//!
//! ```console
//! $ summer --help
//! USAGE
//!       summer [options] <items...>
//!
//! DESCRIPTION
//!       Sum up the items, and print the result.
//!
//! ARGUMENTS
//!       items             The items to sum.
//!
//! OPTIONS
//!       -v, --verbose     Print every item before the sum.
//!       -p, --precision   The number of decimal places to print.
//!
//! $ summer -p2 1 2.5
//! Sum: 3.50
//!
//! $ summer
//! Argument "items" is required.
//!
//! ^
//!
//! $ summer 1 blah
//! Invalid value for argument "items". Can't convert "blah" to f64.
//! 1 blah
//!   ^
//! ```
//!
//! # Builder Api
//! Configure `argot` by starting with a [`CommandLineParser`] and `add`ing parameters.
//! There are three classes of parameters: [`Parameter::option`], [`Parameter::argument`], and [`Parameter::rest`].
//!
//! Each parameter takes a *field*, which decides how a textual value reaches your variable.
//! All type `T` parsing in `argot` is controlled by [`std::str::FromStr`].
//!
//! ### Fields
//! * [`Scalar`]: replaces the variable with each value received.
//! * [`Flag`]: a `bool` option which needs no value.
//! It may still be given one of `1`, `0`, `true`, `false`, `yes`, `no`, `on`, `off`.
//! [`Flag::handler`] hands the value to a closure instead.
//! * [`Optional`]: replaces an `Option<T>` with `Some`.
//! * [`Collection`]: adds each value to any [Collectable](./prelude/trait.Collectable.html) (ex: `Vec<T>`, `HashSet<T>`).
//! * [`Pair`] and [`Entries`]: parse `KEY=VALUE` values into a `(K, V)` or a map.
//! * [`Handler`]: hands each parsed value to a closure.
//!
//! ### Commands
//! Commands collect related programs into a single Cli.
//! Each command is set up through a closure over [`Command`], with its own alias, options, and arguments.
//! At most one command is selected per invocation.
//!
//! ```no_run
#![doc = include_str!("../demos/commands.rs")]
//! ```
//!
//! ### Defaults & Initials
//! `argot` has nothing to do with default values.
//! The defaults of your Cli come from the variable initializations when configuring `argot`.
//! Collections are *added to*, so their initial contents are kept.
//!
//! ```
//! // The default for the 'verbose' parameter is 'false'.
//! let mut verbose: bool = false;
//! // The initial for the 'items' parameter is '[0, 1, 2]'.
//! let mut items: Vec<u32> = vec![0, 1, 2];
//! ```
//!
//! # Cli Semantics
//! Each token is classified by the first rule that applies:
//! 1. `--` ends option processing; every later token is positional.
//! 2. `--help` stops parsing and shows the help message (of the selected command, if any).
//! 3. `--no-NAME` sets the flag `--NAME` to false.
//! 4. An exact option name binds its value from the next token.
//! A flag only takes the next token if it is a boolean literal; any other option takes it unless it starts with `-`.
//! 5. `NAME=VALUE` binds everything after the first `=`.
//! 6. `-abc` sets the short flags `-a`, `-b`, and `-c`.
//! 7. `-nVALUE` binds `VALUE` to the short option `-n`.
//! 8. Any other token that looks like an option is an error.
//! 9. The first token spelling a command's name or alias selects that command.
//! 10. Positional values fill the command's arguments, then its rest, then the global arguments, then the global rest.
//!
//! Requirements (ex: [`Parameter::required`]) are checked once every token has been consumed.
//! A command's [action](./struct.Command.html#method.action) runs only after they all pass.
//!
//! ### Errors
//! [`GeneralParser::try_parse_tokens`] reports the first problem as a [`ParseError`], without printing anything.
//! [`GeneralParser::parse_tokens`] and [`GeneralParser::parse`] print the error along with the offending token.
//!
//! ```no_run
#![doc = include_str!("../demos/errors.rs")]
//! ```
//!
//! # Features
//! * `unit_test`: For features that help with unit testing.
//! * `tracing_debug`: Emit `tracing` debug events while configuring and parsing.
pub use argot_builder::*;
