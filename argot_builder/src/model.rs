/// The outcome of a successful [`GeneralParser::try_parse_tokens`](./struct.GeneralParser.html#method.try_parse_tokens).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// Every token was bound and all requirements were satisfied.
    Complete {
        /// The name of the command selected during the parse, if any.
        command: Option<String>,
    },
    /// The `--help` switch was encountered.
    /// Parsing stopped at that token; no requirements were checked and no command action ran.
    Help {
        /// The name of the command selected before `--help` appeared, if any.
        command: Option<String>,
    },
}

impl Parsed {
    /// The name of the command selected during the parse, if any.
    pub fn command(&self) -> Option<&str> {
        match self {
            Parsed::Complete { command } | Parsed::Help { command } => command.as_deref(),
        }
    }

    /// Whether the parse stopped because help was requested.
    pub fn is_help(&self) -> bool {
        matches!(self, Parsed::Help { .. })
    }
}
