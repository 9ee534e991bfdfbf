use thiserror::Error;

/// Marker trait for capturable types that can formulate an option in the Cli.
pub trait CliOption {}

/// Marker trait for capturable types that can formulate a positional argument in the Cli.
pub trait CliArgument {}

/// Marker trait for capturable types that can formulate the variadic rest argument in the Cli.
///
/// Only types that accumulate (or observe) every value they receive are allowed here.
pub trait CliRest {}

/// Behaviour to capture an explicit generic type T from an input `&str`.
///
/// We use this at the bottom of the command line parser object graph so the compiler can maintain each field's type.
#[doc(hidden)]
pub trait GenericCapturable<'a, T> {
    /// Capture a value into the generic type T for this parameter.
    fn capture(&mut self, token: &str) -> Result<(), InvalidCapture>;

    /// Whether this parameter behaves as a flag (its presence alone is meaningful).
    fn is_flag(&self) -> bool {
        false
    }
}

/// The reason a textual value could not be captured into its destination.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidCapture {
    /// The value does not parse into the destination type.
    #[error("Can't convert \"{token}\" to {type_name}.")]
    InvalidConversion {
        /// The offending value.
        token: String,
        /// The destination type.
        type_name: &'static str,
    },

    /// The value is outside the boolean vocabulary.
    #[error(
        "Value \"{token}\" is not one of \"1\", \"0\", \"true\", \"false\", \"on\", \"off\", \"yes\", \"no\"."
    )]
    InvalidFlag {
        /// The offending value.
        token: String,
    },

    /// A key/value destination received a value without `=`.
    #[error("Value \"{token}\" is not key=value pair.")]
    InvalidPair {
        /// The offending value.
        token: String,
    },

    /// The key half of a key/value pair does not parse.
    #[error("Can't convert key in pair \"{token}\" to {type_name}.")]
    InvalidKey {
        /// The offending value (the whole pair).
        token: String,
        /// The key type.
        type_name: &'static str,
    },

    /// The value half of a key/value pair does not parse.
    #[error("Can't convert value in pair \"{token}\" to {type_name}.")]
    InvalidPairValue {
        /// The offending value (the whole pair).
        token: String,
        /// The value type.
        type_name: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_capture_display() {
        let error = InvalidCapture::InvalidConversion {
            token: "abc".to_string(),
            type_name: "u32",
        };
        assert_eq!(error.to_string(), "Can't convert \"abc\" to u32.");

        let error = InvalidCapture::InvalidFlag {
            token: "maybe".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Value \"maybe\" is not one of \"1\", \"0\", \"true\", \"false\", \"on\", \"off\", \"yes\", \"no\"."
        );

        let error = InvalidCapture::InvalidPair {
            token: "a".to_string(),
        };
        assert_eq!(error.to_string(), "Value \"a\" is not key=value pair.");
    }
}
