use crate::parser::base::ParseError;
use crate::parser::ErrorContext;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug)]
pub(crate) struct PaddingWidth(usize);

impl PaddingWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // padding must be at least 1
        if width >= 1 {
            Ok(PaddingWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct LeftWidth(usize);

impl LeftWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // left must be at least 1
        if width >= 1 {
            Ok(LeftWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct MiddleWidth(usize);

impl MiddleWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // middle must be at least 2 (so we can hyphenate)
        if width >= 2 {
            Ok(MiddleWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct TotalWidth(pub usize);

/// Renders a label column followed by a wrapped description column.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    indent: usize,
    padding: PaddingWidth,
    left: LeftWidth,
    middle: MiddleWidth,
}

// Leave a margin of 5% on the right.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Three words of average length 5, with a space between each.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

impl ColumnRenderer {
    /// Produce a renderer based off the provided widths.
    /// The description width is widened or narrowed to suit the terminal.
    pub(crate) fn guided(
        indent: usize,
        padding: PaddingWidth,
        left: LeftWidth,
        middle: MiddleWidth,
        total_width: TotalWidth,
    ) -> Self {
        let non_middle: usize = indent + left.0 + padding.0;
        let target_total_width = (total_width.0 as f64 * TARGET_TOTAL_FACTOR) as usize;
        let guided_middle = std::cmp::max(middle.0, MINIMUM_MIDDLE_WIDTH);

        if guided_middle + non_middle <= target_total_width {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Help columns fit in {target_total_width}; description width {guided_middle}.");
            }

            Self::new(indent, padding, left, MiddleWidth(guided_middle))
        } else if non_middle < total_width.0 {
            let calculated_middle =
                std::cmp::max(total_width.0 - non_middle, MINIMUM_MIDDLE_WIDTH);
            #[cfg(feature = "tracing_debug")]
            {
                debug!(
                    "Help columns squeezed into {}; description width {calculated_middle}.",
                    total_width.0
                );
            }

            Self::new(indent, padding, left, MiddleWidth(calculated_middle))
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!(
                    "Help columns overflow {}; description width {MINIMUM_MIDDLE_WIDTH}.",
                    total_width.0
                );
            }

            Self::new(indent, padding, left, MiddleWidth(MINIMUM_MIDDLE_WIDTH))
        }
    }

    /// Produce a renderer based off the provided widths.
    pub(crate) fn new(
        indent: usize,
        padding: PaddingWidth,
        left: LeftWidth,
        middle: MiddleWidth,
    ) -> Self {
        Self {
            indent,
            padding,
            left,
            middle,
        }
    }

    /// Render the label and its description.
    ///
    /// A label wider than the left column takes a line of its own; the description then follows at double indentation.
    pub(crate) fn render(&self, left: &str, middle: &str) -> Vec<String> {
        let indent = self.indent;
        let left_column_width = self.left.0;
        let padding = self.padding.0;
        let mut out = Vec::default();

        if left.chars().count() > left_column_width {
            let description_indent = indent * 2;
            out.push(format!("{:indent$}{left}", ""));

            for part in chunk(middle, self.middle.0) {
                out.push(format!("{:description_indent$}{part}", ""));
            }
        } else {
            let mut parts = chunk(middle, self.middle.0).into_iter();
            out.push(format!(
                "{:indent$}{:left_column_width$}{:padding$}{}",
                "",
                left,
                "",
                parts.next().unwrap_or_default()
            ));

            for part in parts {
                out.push(format!(
                    "{:indent$}{:left_column_width$}{:padding$}{part}",
                    "", "", ""
                ));
            }
        }

        out.into_iter().map(trim_end).collect()
    }
}

fn trim_end(line: String) -> String {
    line.trim_end().to_string()
}

pub(crate) fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if !word.is_empty() {
            if current.is_empty() {
                hyphenate(width, &mut lines, &mut current, word);
            } else if current.chars().count() + word.chars().count() + 1 <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = String::default();
                hyphenate(width, &mut lines, &mut current, word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let increment = width - 1;
    let characters: Vec<char> = word.chars().collect();
    let mut left = 0;

    while characters.len() - left > width {
        let piece: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{piece}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: ParseError);
    fn print_error_context(&self, error_context: ErrorContext);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: ParseError) {
        eprintln!("{error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}
