pub(crate) const HELP_NAME: &str = "--help";
pub(crate) const SEPARATOR: &str = "--";
pub(crate) const NEGATION_PREFIX: &str = "--no-";

pub(crate) const FLAG_TRUE: &str = "true";
pub(crate) const FLAG_FALSE: &str = "false";
pub(crate) const TRUE_VALUES: [&str; 4] = ["1", "true", "on", "yes"];
pub(crate) const FALSE_VALUES: [&str; 4] = ["0", "false", "off", "no"];

pub(crate) const ANONYMOUS_ARGUMENT: &str = "ARG";
pub(crate) const ANONYMOUS_REST: &str = "REST";
pub(crate) const ANONYMOUS_PROGRAM: &str = "CMD";
pub(crate) const DISPLAY_DELIMITER: &str = ", ";
pub(crate) const EMPTY_VALUE: &str = "Value is empty.";

pub(crate) fn is_flag_value(value: &str) -> bool {
    TRUE_VALUES.contains(&value) || FALSE_VALUES.contains(&value)
}
