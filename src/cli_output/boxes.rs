//! Simple line-based CLI output utilities.
//!
//! Progress goes to stdout, problems to stderr so `--json` output stays
//! parseable.

/// Line width for separators.
pub const LINE_WIDTH: usize = 60;

/// Print the main header.
///
/// ```text
/// GHWRAPPED v0.1.0 · @octocat · 2024
/// ════════════════════════════════════════════════════════════
/// ```
pub fn print_header(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "═".repeat(LINE_WIDTH));
    println!();
}

/// Print a status line.
///
/// ```text
///   ✓ Fetched 12 repositories and 340 commits via graphql
/// ```
pub fn print_step_line(icon: &str, message: &str) {
    println!("  {} {}", icon, message);
}

/// Print a failure line on stderr.
pub fn print_error_line(message: &str) {
    eprintln!("  {} {}", icons::FAILURE, message);
}

/// Print a warning line on stderr.
pub fn print_warning_line(message: &str) {
    eprintln!("  {} {}", icons::WARNING, message);
}

/// Print indented troubleshooting lines on stderr.
pub fn print_troubleshoot(lines: &[&str]) {
    eprintln!();
    for line in lines {
        eprintln!("    {}", line);
    }
}

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const PENDING: &str = "…";
}
