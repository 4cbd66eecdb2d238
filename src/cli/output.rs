//! Shared CLI output helpers.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: hints, account names
//! - Bold: important values
//! - Dimmed: skipped regions and secondary info

use console::style;
use std::fmt::Display;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ deployed to westeurope`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print an error message to stderr (red).
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a warning message (yellow).
pub fn warn(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("⚠").yellow(), msg);
    } else {
        println!("⚠ {}", msg);
    }
}

/// Print a hint message (cyan).
///
/// Example: `→ check the ARM_* credentials`
pub fn hint(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        println!("→ {}", msg);
    }
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  version:  7`
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!("  {}  {}", style(label).dim(), style(value).bold());
    } else {
        println!("  {}  {}", label, value);
    }
}

/// Print a list item with bullet.
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// Format a storage account name in cyan.
pub fn account(name: &str) -> String {
    if colors_enabled() {
        style(name).cyan().to_string()
    } else {
        name.to_string()
    }
}

/// Print a dimmed/secondary message.
pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", style(msg).dim());
    } else {
        println!("{}", msg);
    }
}

/// Emit a step output for later pipeline steps.
///
/// Appends `name=value` to the GitHub Actions output file when one is
/// configured, otherwise prints the pair to stdout.
///
/// # Errors
///
/// Returns an I/O error if the output file cannot be written.
pub fn set_output(name: &str, value: impl Display, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            let mut file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            writeln!(file, "{}={}", name, value)?;
        }
        None => println!("{}={}", name, value),
    }
    Ok(())
}

/// Print a GitHub Actions error annotation.
pub fn annotate_error(msg: &str) {
    // Annotations are single-line; escape per the workflow command format.
    let escaped = msg
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    println!("::error::{}", escaped);
}
