//! Terminal output for the command line.
//!
//! The computed version goes to stdout; everything else goes to stderr so
//! the output can be captured by scripts.

use console::style;

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a warning with a yellow marker.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    display_warning(&warning.to_string());
}

/// Print a resolved value, with nothing else on the line.
pub fn display_result(value: &str) {
    println!("{}", value);
}
