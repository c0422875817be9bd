/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Returns formatted output that greys out empty totals.
///
/// Example:
/// `colorize_total("00h 00m")` → "<grey>00h 00m<reset>"
pub fn colorize_total(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" || value.trim() == "00h 00m" {
        format!("{GREY}{value}{RESET}")
    } else {
        format!("{GREEN}{value}{RESET}")
    }
}

/// Yes/no flag: green when true, grey otherwise.
pub fn colorize_flag(on: bool) -> String {
    if on {
        format!("{GREEN}yes{RESET}")
    } else {
        format!("{GREY}no{RESET}")
    }
}
