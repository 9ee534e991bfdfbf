/// Where a matched option lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    /// Index into the global options.
    Global(usize),
    /// Index of the command, then index into that command's options.
    Command(usize, usize),
}

/// The classification of a single token.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Matched {
    /// `--`: every following token is positional.
    Separator,
    /// `--help`.
    Help,
    /// An option bound to a value.
    /// A `None` value means the option requires a value which was not provided.
    Option {
        target: Target,
        value: Option<String>,
        consumed: usize,
    },
    /// Grouped short flags, ex: `-rf`.
    Group(Vec<Target>),
    /// A command, spelled out over `consumed` tokens.
    Command { index: usize, consumed: usize },
    /// Anything else, to be bound to a positional or rest argument.
    Positional,
}
