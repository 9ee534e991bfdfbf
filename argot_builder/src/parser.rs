mod base;
mod interface;
mod middleware;
mod printer;

pub(crate) use self::base::*;
pub use self::base::{ConfigError, ParseError};
pub(crate) use self::interface::*;
pub use self::middleware::GeneralParser;
pub(crate) use self::printer::*;

/// Points at the token where parsing stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ErrorContext {
    offset: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new(offset: usize, tokens: &[&str]) -> Self {
        Self {
            offset,
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Each preceding token contributes its width plus the space that follows it.
        let caret = self
            .tokens
            .iter()
            .take(self.offset)
            .map(|t| t.chars().count() + 1)
            .sum::<usize>();
        let line = self.tokens.join(" ");
        write!(f, "{line}\n{:caret$}^", "")
    }
}
