//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static METHOD: Emoji<'_, '_> = Emoji("🧭 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static REPORT: Emoji<'_, '_> = Emoji("📄 ", "");
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
     ___                   _              _
    | _ \ ___  _  _  __ _ | |_   __  _  _| |_
    |   // _ \| || |/ _` || ' \ / _|| || |  _|
    |_|_\\___/ \_,_|\__, ||_||_|\__| \_,_|\__|
                    |___/
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Rough-set reduction of decision tables").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Settings shown in the configuration card
pub struct ConfigCard<'a> {
    pub input: &'a Path,
    pub method: &'a str,
    pub output: &'a Path,
    pub report: &'a Path,
    pub encoding: &'a str,
    pub separator: char,
    pub single_rule_policy: &'a str,
}

/// Print configuration card
pub fn print_config(card: &ConfigCard<'_>) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style(format!("{}Configuration", GEAR)).cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!("    │  {} Input:  {:<39}│", FOLDER, truncate_path(card.input, 38));
    println!("    │  {} Method: {:<39}│", METHOD, truncate_string(card.method, 38));
    println!("    │  {} Output: {:<39}│", SAVE, truncate_path(card.output, 38));
    println!("    │  {} Report: {:<39}│", REPORT, truncate_path(card.report, 38));
    println!("    ├{}┤", line);
    println!(
        "    │  Encoding / separator:  {:<29}│",
        style(format!("{} / '{}'", card.encoding, card.separator)).yellow()
    );
    println!(
        "    │  Single-rule policy:    {:<29}│",
        style(card.single_rule_policy).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print elapsed time for a step
pub fn print_step_time(elapsed: std::time::Duration) {
    println!(
        "    {}",
        style(format!("⏱  {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Roughcut analysis complete!").green().bold()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, extra_info: Option<&str>) {
    if let Some(info) = extra_info {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!("      Found {} {}", style(count).yellow().bold(), description);
    }
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate_string("data.csv", 38), "data.csv");
    }

    #[test]
    fn test_truncate_long_string_keeps_tail() {
        let truncated = truncate_string("abcdefghijklmnop", 10);
        assert_eq!(truncated, "...jklmnop");
        assert_eq!(truncated.chars().count(), 10);
    }
}
