//! Cargo-style output formatting
//!
//! Status lines go to stderr so that compiler diagnostics on stdout stay readable.

/// ANSI color codes
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD_GREEN: &str = "\x1b[1;32m";
    pub const BOLD_CYAN: &str = "\x1b[1;36m";
    pub const BOLD_YELLOW: &str = "\x1b[1;33m";
    pub const BOLD_RED: &str = "\x1b[1;31m";
}

/// Check if terminal supports colors
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err() && std::env::var("TERM").map(|t| t != "dumb").unwrap_or(true)
}

/// Format: "{status:>12} {message}"
fn print_status(status: &str, color: &str, message: &str) {
    if supports_color() {
        eprintln!("{}{:>12}{} {}", color, status, colors::RESET, message);
    } else {
        eprintln!("{:>12} {}", status, message);
    }
}

/// Print "Compiling" status (green)
pub fn compiling(message: &str) {
    print_status("Compiling", colors::BOLD_GREEN, message);
}

/// Print "Linking" status (green)
pub fn linking(message: &str) {
    print_status("Linking", colors::BOLD_GREEN, message);
}

/// Print "Stripping" status (green)
pub fn stripping(message: &str) {
    print_status("Stripping", colors::BOLD_GREEN, message);
}

/// Print "Built" status (green)
pub fn built(message: &str) {
    print_status("Built", colors::BOLD_GREEN, message);
}

/// Print "Finished" status (green)
pub fn finished(message: &str) {
    print_status("Finished", colors::BOLD_GREEN, message);
}

/// Print "Removed" status (green)
pub fn removed(message: &str) {
    print_status("Removed", colors::BOLD_GREEN, message);
}

/// Print "Running" status (cyan)
pub fn running(message: &str) {
    print_status("Running", colors::BOLD_CYAN, message);
}

/// Print "Found" status (cyan)
pub fn found(message: &str) {
    print_status("Found", colors::BOLD_CYAN, message);
}

/// Print "Skipping" status (yellow)
pub fn skipping(message: &str) {
    print_status("Skipping", colors::BOLD_YELLOW, message);
}

/// Print "Warning" status (yellow)
pub fn warning(message: &str) {
    print_status("Warning", colors::BOLD_YELLOW, message);
}

/// Print "Error" status (red)
pub fn error(message: &str) {
    print_status("Error", colors::BOLD_RED, message);
}

/// Format duration in human readable form
pub fn format_duration(secs: f64) -> String {
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let secs = secs % 60.0;
        format!("{:.0}m {:.2}s", mins, secs)
    }
}
