//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static SEED: Emoji<'_, '_> = Emoji("🌱 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
    ██╗     ███████╗ █████╗ ██╗  ██╗██╗     ███████╗███████╗███████╗
    ██║     ██╔════╝██╔══██╗██║ ██╔╝██║     ██╔════╝██╔════╝██╔════╝
    ██║     █████╗  ███████║█████╔╝ ██║     █████╗  ███████╗███████╗
    ██║     ██╔══╝  ██╔══██║██╔═██╗ ██║     ██╔══╝  ╚════██║╚════██║
    ███████╗███████╗██║  ██║██║  ██╗███████╗███████╗███████║███████║
    ╚══════╝╚══════╝╚═╝  ╚═╝╚═╝  ╚═╝╚══════╝╚══════╝╚══════╝╚══════╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Train-only statistics, honest predictions").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Settings shown in the configuration card
pub struct ConfigCard<'a> {
    pub train: &'a Path,
    pub test: &'a Path,
    pub output: &'a Path,
    pub label: &'a str,
    pub id: &'a str,
    pub seed: u64,
    pub max_iter: usize,
}

/// Print configuration card
pub fn print_config(card: &ConfigCard) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!("    │  {} Train:  {:<39}│", FOLDER, truncate_path(card.train, 38));
    println!("    │  {} Test:   {:<39}│", FOLDER, truncate_path(card.test, 38));
    println!("    │  {} Output: {:<39}│", SAVE, truncate_path(card.output, 38));
    println!("    ├{}┤", line);
    println!(
        "    │  {} Label: {:<16} Id: {:<17}│",
        TARGET,
        truncate_string(card.label, 16),
        truncate_string(card.id, 17)
    );
    println!(
        "    │  {} Seed:  {:<16} Max iterations: {:<5}│",
        SEED,
        style(card.seed).yellow(),
        style(card.max_iter).yellow()
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

/// Print an indented decision line
pub fn print_detail(message: &str) {
    println!("      {} {}", style("•").dim(), message);
}

/// Print a non-fatal warning
pub fn print_warning(message: &str) {
    println!("    {} {}", WARN, style(message).yellow());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Leakless run complete!").green().bold()
    );
    println!();
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
