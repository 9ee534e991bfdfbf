use terminal_size::{terminal_size, Width};

use crate::constant::*;
use crate::matcher::OptionNames;
use crate::parser::{
    chunk, ColumnRenderer, LeftWidth, MiddleWidth, PaddingWidth, TotalWidth, MINIMUM_MIDDLE_WIDTH,
};

const INDENT: usize = 6;
const LABEL_WIDTH: usize = 16;
const PADDING_WIDTH: usize = 2;
const REQUIRED_PREFIX: &str = "Required! ";

pub(crate) struct OptionParameter {
    names: OptionNames,
    required: bool,
    help: Option<String>,
}

impl OptionParameter {
    pub(crate) fn new(names: OptionNames, required: bool, help: Option<String>) -> Self {
        Self {
            names,
            required,
            help,
        }
    }
}

pub(crate) struct ArgumentParameter {
    name: String,
    required: bool,
    rest: bool,
    help: Option<String>,
}

impl ArgumentParameter {
    pub(crate) fn new(name: String, required: bool, rest: bool, help: Option<String>) -> Self {
        Self {
            name,
            required,
            rest,
            help,
        }
    }
}

pub(crate) struct CommandParameter {
    name: String,
    alias: Option<String>,
    about: Option<String>,
    options: Vec<OptionParameter>,
    arguments: Vec<ArgumentParameter>,
}

impl CommandParameter {
    pub(crate) fn new(
        name: String,
        alias: Option<String>,
        about: Option<String>,
        options: Vec<OptionParameter>,
        mut arguments: Vec<ArgumentParameter>,
    ) -> Self {
        arguments.sort_by_key(|a| a.rest);
        Self {
            name,
            alias,
            about,
            options,
            arguments,
        }
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.alias.as_deref())
    }
}

/// Renders the configured schema into help and usage text.
///
/// Every section is newline terminated.
pub(crate) struct Printer {
    program: String,
    about: Option<String>,
    command_required: bool,
    options: Vec<OptionParameter>,
    arguments: Vec<ArgumentParameter>,
    commands: Vec<CommandParameter>,
    terminal_width: Option<usize>,
}

impl Printer {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(
            "program",
            None,
            false,
            Vec::default(),
            Vec::default(),
            Vec::default(),
            None,
        )
    }

    pub(crate) fn terminal(
        program: impl Into<String>,
        about: Option<String>,
        command_required: bool,
        options: Vec<OptionParameter>,
        arguments: Vec<ArgumentParameter>,
        commands: Vec<CommandParameter>,
    ) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(
            program,
            about,
            command_required,
            options,
            arguments,
            commands,
            terminal_width,
        )
    }

    pub(crate) fn new(
        program: impl Into<String>,
        about: Option<String>,
        command_required: bool,
        options: Vec<OptionParameter>,
        mut arguments: Vec<ArgumentParameter>,
        commands: Vec<CommandParameter>,
        terminal_width: Option<usize>,
    ) -> Self {
        let program = program.into();
        arguments.sort_by_key(|a| a.rest);
        Self {
            program: if program.is_empty() {
                ANONYMOUS_PROGRAM.to_string()
            } else {
                program
            },
            about,
            command_required,
            options,
            arguments,
            commands,
            terminal_width,
        }
    }

    pub(crate) fn usage(&self) -> String {
        let prefix = format!(
            "{:INDENT$}{p}{o}{a}",
            "",
            p = self.program,
            o = usage_options(&self.options),
            a = usage_arguments(&self.arguments),
        );

        let lines: Vec<String> = if self.command_required && !self.commands.is_empty() {
            self.commands
                .iter()
                .map(|c| {
                    format!(
                        "{prefix} {n}{o}{a}",
                        n = c.names().collect::<Vec<&str>>().join("|"),
                        o = usage_options(&c.options),
                        a = usage_arguments(&c.arguments),
                    )
                })
                .collect()
        } else if self.commands.is_empty() {
            vec![prefix]
        } else {
            vec![format!("{prefix} [command] ...")]
        };

        format!("{}\n", lines.join("\n"))
    }

    pub(crate) fn help(&self) -> String {
        let mut out = format!("USAGE\n{}", self.usage());

        if let Some(about) = &self.about {
            out.push_str(&format!("\nDESCRIPTION\n{}", self.paragraph(about)));
        }

        if !self.arguments.is_empty() {
            out.push_str(&format!("\nARGUMENTS\n{}", self.arguments()));
        }

        if !self.options.is_empty() {
            out.push_str(&format!("\nOPTIONS\n{}", self.options()));
        }

        if !self.commands.is_empty() {
            out.push_str(&format!("\nCOMMANDS\n{}", self.commands()));
        }

        out
    }

    pub(crate) fn options(&self) -> String {
        self.describe(describe_options(&self.options))
    }

    pub(crate) fn arguments(&self) -> String {
        self.describe(describe_arguments(&self.arguments))
    }

    pub(crate) fn commands(&self) -> String {
        self.describe(
            self.commands
                .iter()
                .map(|c| {
                    (
                        c.names().collect::<Vec<&str>>().join(DISPLAY_DELIMITER),
                        c.about.clone().unwrap_or_default(),
                    )
                })
                .collect(),
        )
    }

    pub(crate) fn command_usage(&self, name: &str) -> Option<String> {
        let command = self.find(name)?;
        let lines: Vec<String> = command
            .names()
            .map(|n| {
                format!(
                    "{:INDENT$}{p}{o}{a} {n}{co}{ca}",
                    "",
                    p = self.program,
                    o = usage_options(&self.options),
                    a = usage_arguments(&self.arguments),
                    co = usage_options(&command.options),
                    ca = usage_arguments(&command.arguments),
                )
            })
            .collect();

        Some(format!("{}\n", lines.join("\n")))
    }

    pub(crate) fn command_help(&self, name: &str) -> Option<String> {
        let command = self.find(name)?;
        let mut out = format!("USAGE\n{}", self.command_usage(name)?);

        if let Some(about) = &command.about {
            out.push_str(&format!("\nDESCRIPTION\n{}", self.paragraph(about)));
        }

        if !command.arguments.is_empty() {
            out.push_str(&format!(
                "\nARGUMENTS\n{}",
                self.describe(describe_arguments(&command.arguments))
            ));
        }

        if !command.options.is_empty() {
            out.push_str(&format!(
                "\nOPTIONS\n{}",
                self.describe(describe_options(&command.options))
            ));
        }

        Some(out)
    }

    pub(crate) fn command_options(&self, name: &str) -> Option<String> {
        self.find(name)
            .map(|c| self.describe(describe_options(&c.options)))
    }

    pub(crate) fn command_arguments(&self, name: &str) -> Option<String> {
        self.find(name)
            .map(|c| self.describe(describe_arguments(&c.arguments)))
    }

    fn find(&self, name: &str) -> Option<&CommandParameter> {
        self.commands.iter().find(|c| c.names().any(|n| n == name))
    }

    fn describe(&self, entries: Vec<(String, String)>) -> String {
        let middle = entries
            .iter()
            .map(|(_, description)| description.chars().count())
            .max()
            .unwrap_or_default();
        let renderer = self.renderer(middle);
        let lines: Vec<String> = entries
            .iter()
            .flat_map(|(label, description)| renderer.render(label, description))
            .collect();

        format!("{}\n", lines.join("\n"))
    }

    fn renderer(&self, middle: usize) -> ColumnRenderer {
        let padding =
            PaddingWidth::new(PADDING_WIDTH).expect("internal error - padding must be valid");
        let left = LeftWidth::new(LABEL_WIDTH).expect("internal error - label width must be valid");
        let middle = MiddleWidth::new(std::cmp::max(middle, 2))
            .expect("internal error - middle must be at least 2");

        match self.terminal_width {
            Some(total) => ColumnRenderer::guided(INDENT, padding, left, middle, TotalWidth(total)),
            None => ColumnRenderer::new(INDENT, padding, left, middle),
        }
    }

    fn paragraph(&self, text: &str) -> String {
        let width = match self.terminal_width {
            Some(total) => std::cmp::max(total.saturating_sub(INDENT), MINIMUM_MIDDLE_WIDTH),
            None => std::cmp::max(text.chars().count(), 2),
        };

        chunk(text, width)
            .iter()
            .map(|line| format!("{:INDENT$}{line}\n", ""))
            .collect()
    }
}

fn usage_options(options: &[OptionParameter]) -> String {
    let mut out = String::default();

    for option in options.iter().filter(|o| o.required) {
        out.push_str(&format!(" {}=value", option.names.preferred()));
    }

    if options.iter().any(|o| !o.required) {
        out.push_str(" [options]");
    }

    out
}

fn usage_arguments(arguments: &[ArgumentParameter]) -> String {
    arguments
        .iter()
        .map(|a| match (a.rest, a.required) {
            (false, true) => format!(" <{}>", a.name),
            (false, false) => format!(" [<{}>]", a.name),
            (true, true) => format!(" <{}...>", a.name),
            (true, false) => format!(" [<{}...>]", a.name),
        })
        .collect()
}

fn describe_options(options: &[OptionParameter]) -> Vec<(String, String)> {
    options
        .iter()
        .map(|o| {
            let prefix = if o.required { REQUIRED_PREFIX } else { "" };
            (
                o.names.display(),
                format!("{prefix}{}", o.help.as_deref().unwrap_or_default()),
            )
        })
        .collect()
}

fn describe_arguments(arguments: &[ArgumentParameter]) -> Vec<(String, String)> {
    arguments
        .iter()
        .map(|a| (a.name.clone(), a.help.clone().unwrap_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::assert_contains;

    fn names(values: &[&str]) -> OptionNames {
        let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        OptionNames::parse(&values).unwrap()
    }

    fn line(label: &str, description: &str) -> String {
        format!("{:INDENT$}{label:LABEL_WIDTH$}{:PADDING_WIDTH$}{description}", "", "")
            .trim_end()
            .to_string()
    }

    fn printer(command_required: bool, terminal_width: Option<usize>) -> Printer {
        Printer::new(
            "cli-cmd",
            Some("Does things.".to_string()),
            command_required,
            vec![
                OptionParameter::new(names(&["-a"]), true, Some("Global option A".to_string())),
                OptionParameter::new(
                    names(&["-b", "--bb"]),
                    false,
                    Some("Global option B".to_string()),
                ),
            ],
            vec![
                ArgumentParameter::new(
                    "rest".to_string(),
                    false,
                    true,
                    Some("Rest global args".to_string()),
                ),
                ArgumentParameter::new(
                    "arg1".to_string(),
                    true,
                    false,
                    Some("Global arg 1".to_string()),
                ),
                ArgumentParameter::new("arg2".to_string(), false, false, None),
            ],
            vec![
                CommandParameter::new(
                    "list".to_string(),
                    Some("l".to_string()),
                    Some("List command".to_string()),
                    vec![
                        OptionParameter::new(names(&["-c"]), false, Some("Option C".to_string())),
                        OptionParameter::new(
                            names(&["-d", "--dd"]),
                            true,
                            Some("Option D".to_string()),
                        ),
                    ],
                    vec![
                        ArgumentParameter::new(
                            "carg1".to_string(),
                            true,
                            false,
                            Some("List command arg1".to_string()),
                        ),
                        ArgumentParameter::new("crest".to_string(), true, true, None),
                    ],
                ),
                CommandParameter::new(
                    "get".to_string(),
                    None,
                    None,
                    vec![],
                    vec![ArgumentParameter::new(
                        "smt".to_string(),
                        false,
                        false,
                        None,
                    )],
                ),
            ],
            terminal_width,
        )
    }

    #[test]
    fn usage() {
        assert_eq!(
            printer(false, None).usage(),
            "      cli-cmd -a=value [options] <arg1> [<arg2>] [<rest...>] [command] ...\n"
        );
        assert_eq!(
            printer(true, None).usage(),
            "      cli-cmd -a=value [options] <arg1> [<arg2>] [<rest...>] list|l --dd=value [options] <carg1> <crest...>\n      cli-cmd -a=value [options] <arg1> [<arg2>] [<rest...>] get [<smt>]\n"
        );
    }

    #[test]
    fn usage_empty() {
        assert_eq!(Printer::empty().usage(), "      program\n");
        assert_eq!(
            Printer::new("", None, true, vec![], vec![], vec![], None).usage(),
            "      CMD\n"
        );
    }

    #[test]
    fn options() {
        assert_eq!(
            printer(false, None).options(),
            format!(
                "{}\n{}\n",
                line("-a", "Required! Global option A"),
                line("-b, --bb", "Global option B")
            )
        );
    }

    #[test]
    fn options_long_label() {
        let printer = Printer::new(
            "program",
            None,
            false,
            vec![
                OptionParameter::new(
                    names(&["--a-very-long-option"]),
                    false,
                    Some("Described below.".to_string()),
                ),
                OptionParameter::new(names(&["--quiet"]), false, None),
            ],
            vec![],
            vec![],
            None,
        );

        assert_eq!(
            printer.options(),
            "      --a-very-long-option\n            Described below.\n      --quiet\n"
        );
    }

    #[test]
    fn options_wrapped() {
        let printer = Printer::new(
            "program",
            None,
            false,
            vec![OptionParameter::new(
                names(&["-a"]),
                false,
                Some("one two three four five six".to_string()),
            )],
            vec![],
            vec![],
            Some(40),
        );

        assert_eq!(
            printer.options(),
            format!(
                "{}\n{}\n",
                line("-a", "one two three"),
                line("", "four five six")
            )
        );
    }

    #[test]
    fn arguments() {
        assert_eq!(
            printer(false, None).arguments(),
            format!(
                "{}\n{}\n{}\n",
                line("arg1", "Global arg 1"),
                line("arg2", ""),
                line("rest", "Rest global args")
            )
        );
    }

    #[test]
    fn commands() {
        assert_eq!(
            printer(false, None).commands(),
            format!("{}\n{}\n", line("list, l", "List command"), line("get", ""))
        );
    }

    #[test]
    fn help() {
        let help = printer(false, None).help();
        assert!(help.starts_with("USAGE\n      cli-cmd -a=value"));
        assert_contains!(help, "\nDESCRIPTION\n      Does things.\n");
        assert_contains!(help, "\nARGUMENTS\n");
        assert_contains!(help, "\nOPTIONS\n");
        assert_contains!(help, "\nCOMMANDS\n");
        assert_contains!(help, &line("-b, --bb", "Global option B"));
        assert_contains!(help, &line("list, l", "List command"));
    }

    #[test]
    fn help_empty() {
        assert_eq!(Printer::empty().help(), "USAGE\n      program\n");
    }

    #[test]
    fn command_usage() {
        let printer = printer(false, None);
        let expected = "      cli-cmd -a=value [options] <arg1> [<arg2>] [<rest...>] list --dd=value [options] <carg1> <crest...>\n      cli-cmd -a=value [options] <arg1> [<arg2>] [<rest...>] l --dd=value [options] <carg1> <crest...>\n";
        assert_eq!(printer.command_usage("list").unwrap(), expected);
        assert_eq!(printer.command_usage("l").unwrap(), expected);
        assert_eq!(printer.command_usage("x"), None);
    }

    #[test]
    fn command_help() {
        let printer = printer(false, None);
        let help = printer.command_help("get").unwrap();
        assert_eq!(
            help,
            format!(
                "USAGE\n      cli-cmd -a=value [options] <arg1> [<arg2>] [<rest...>] get [<smt>]\n\nARGUMENTS\n{}\n",
                line("smt", "")
            )
        );

        let help = printer.command_help("l").unwrap();
        assert_contains!(help, "\nDESCRIPTION\n      List command\n");
        assert_contains!(help, &line("-d, --dd", "Required! Option D"));
        assert_contains!(help, &line("carg1", "List command arg1"));
        assert!(!help.contains("COMMANDS"));
        assert_eq!(printer.command_help("x"), None);
    }

    #[test]
    fn command_sections() {
        let printer = printer(false, None);
        assert_eq!(
            printer.command_options("list").unwrap(),
            format!(
                "{}\n{}\n",
                line("-c", "Option C"),
                line("-d, --dd", "Required! Option D")
            )
        );
        assert_eq!(
            printer.command_arguments("list").unwrap(),
            format!(
                "{}\n{}\n",
                line("carg1", "List command arg1"),
                line("crest", "")
            )
        );
        assert_eq!(printer.command_options("get").unwrap(), "\n");
        assert_eq!(printer.command_arguments("x"), None);
    }
}
