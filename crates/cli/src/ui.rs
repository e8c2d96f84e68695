//! Terminal output helpers.
//!
//! Tables and payloads print to stdout; context lines (target banner,
//! counts, warnings) go to stderr so piped output stays parseable.

use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use satgate_config::{Config, Surface};

/// Print the target banner to stderr: which gateway and surface the
/// command is about to talk to.
pub fn print_target(config: &Config) {
    let mut line = format!(
        "{} Target: {} ({})",
        "⚡".yellow(),
        config.gateway.cyan(),
        config.surface
    );
    if config.surface == Surface::Cloud && !config.tenant.is_empty() {
        line.push_str(&format!(" tenant={}", config.tenant));
    }
    eprintln!("{line}");
}

/// Dim horizontal rule for section separation.
pub fn rule() {
    println!("{}", "─".repeat(29).dimmed());
}

/// Truncate a string to at most `max` characters, appending an ellipsis
/// when anything was cut. Char-based, so multibyte names stay intact.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

/// Print a simple aligned table with a dimmed dash underline under the
/// header row. Column widths fit the widest cell.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut header_line = String::new();
    let mut underline = String::new();
    for (i, header) in headers.iter().enumerate() {
        if i > 0 {
            header_line.push_str("  ");
            underline.push_str("  ");
        }
        header_line.push_str(&format!("{header:<width$}", width = widths[i]));
        underline.push_str(&"-".repeat(widths[i]));
    }
    println!("{}", header_line.bold());
    println!("{}", underline.dimmed());

    for row in rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate().take(cols) {
            if i > 0 {
                line.push_str("  ");
            }
            // Pad by char count so colored or multibyte cells stay aligned
            let pad = widths[i].saturating_sub(cell.chars().count());
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
        }
        println!("{}", line.trim_end());
    }
}

/// Ask the user to confirm a destructive action. `--yes` skips the prompt.
pub fn confirm(prompt: &str, assume_yes: bool) -> anyhow::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_char_safe() {
        assert_eq!(truncate("short", 12), "short");
        assert_eq!(truncate("tok_0123456789abcdef", 12), "tok_0123456…");
        assert_eq!(truncate("héllo wörld yes", 8), "héllo w…");
    }
}
