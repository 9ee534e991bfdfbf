use crate::constant::*;
use crate::matcher::TokenMatcherError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NameForm {
    /// `-x`
    Short,
    /// `--xxx`
    Long,
    /// Anything else, ex: `+fb` or `-frtti`.
    NonConventional,
}

impl NameForm {
    pub(crate) fn of(name: &str) -> Self {
        if name.starts_with(SEPARATOR) && name.len() > SEPARATOR.len() {
            NameForm::Long
        } else if name.starts_with('-') && name != SEPARATOR && name.chars().count() == 2 {
            NameForm::Short
        } else {
            NameForm::NonConventional
        }
    }
}

/// The (up to three) spellings of a single option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct OptionNames {
    short: Option<String>,
    long: Option<String>,
    non_conventional: Option<String>,
}

impl OptionNames {
    pub(crate) fn parse(names: &[String]) -> Result<Self, TokenMatcherError> {
        let mut option_names = OptionNames::default();

        for name in names {
            if name.is_empty()
                || name == "-"
                || name == SEPARATOR
                || name.contains('=')
                || name.contains(char::is_whitespace)
            {
                return Err(TokenMatcherError::InvalidName(name.clone()));
            }

            let slot = match NameForm::of(name) {
                NameForm::Short => &mut option_names.short,
                NameForm::Long => &mut option_names.long,
                NameForm::NonConventional => &mut option_names.non_conventional,
            };

            if let Some(existing) = slot.replace(name.clone()) {
                return Err(TokenMatcherError::RepeatedForm {
                    existing,
                    name: name.clone(),
                });
            }
        }

        if option_names.iter().next().is_none() {
            return Err(TokenMatcherError::Unnamed);
        }

        Ok(option_names)
    }

    pub(crate) fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    pub(crate) fn short_char(&self) -> Option<char> {
        self.short.as_ref().and_then(|s| s.chars().nth(1))
    }

    pub(crate) fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub(crate) fn non_conventional(&self) -> Option<&str> {
        self.non_conventional.as_deref()
    }

    /// The spellings in display order: short, long, non-conventional.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &str> {
        [&self.short, &self.long, &self.non_conventional]
            .into_iter()
            .filter_map(|n| n.as_deref())
    }

    pub(crate) fn contains(&self, token: &str) -> bool {
        self.iter().any(|n| n == token)
    }

    /// The spelling used in usage lines: long, short, then non-conventional.
    pub(crate) fn preferred(&self) -> &str {
        self.long()
            .or(self.short())
            .or(self.non_conventional())
            .expect("internal error - an option must have at least one name")
    }

    pub(crate) fn display(&self) -> String {
        self.iter().collect::<Vec<&str>>().join(DISPLAY_DELIMITER)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct OptionConfig {
    names: OptionNames,
    flag: bool,
}

impl OptionConfig {
    pub(crate) fn new(names: OptionNames, flag: bool) -> Self {
        Self { names, flag }
    }

    pub(crate) fn names(&self) -> &OptionNames {
        &self.names
    }

    pub(crate) fn flag(&self) -> bool {
        self.flag
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CommandConfig {
    name: String,
    alias: Option<String>,
    options: Vec<OptionConfig>,
}

impl CommandConfig {
    pub(crate) fn new(
        name: impl Into<String>,
        alias: Option<String>,
        options: Vec<OptionConfig>,
    ) -> Self {
        Self {
            name: name.into(),
            alias,
            options,
        }
    }

    pub(crate) fn options(&self) -> &[OptionConfig] {
        &self.options
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.alias.as_deref())
    }

    pub(crate) fn display(&self) -> String {
        self.names().collect::<Vec<&str>>().join(DISPLAY_DELIMITER)
    }

    /// Match the leading tokens against this command's name or alias.
    /// Multi-word names are matched by joining consecutive tokens with a single space.
    /// Returns the number of tokens that spell the command.
    pub(crate) fn match_tokens(&self, tokens: &[&str]) -> Option<usize> {
        let limit = self.names().map(str::len).max().unwrap_or_default();
        let mut candidate = tokens.first()?.to_string();
        let mut consumed = 1;

        loop {
            if self.names().any(|n| n == candidate) {
                return Some(consumed);
            }

            if candidate.len() >= limit {
                return None;
            }

            match tokens.get(consumed) {
                Some(next) if !next.starts_with('-') => {
                    candidate.push(' ');
                    candidate.push_str(next);
                    consumed += 1;
                }
                _ => return None,
            }
        }
    }
}
