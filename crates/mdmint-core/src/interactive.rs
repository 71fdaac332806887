// Interactive prompts and terminal output

use anyhow::Result;
use inquire::Confirm;
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Check if we may prompt the user
pub fn is_interactive() -> bool {
    if is_test_env() || is_ci() {
        return false;
    }
    std::io::stdin().is_terminal()
}

fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
}

/// Test builds, `MDMINT_TEST`, or a test harness thread
fn is_test_env() -> bool {
    if cfg!(test) || std::env::var("MDMINT_TEST").is_ok() {
        return true;
    }
    std::thread::current()
        .name()
        .is_some_and(|name| name.contains("test_"))
}

pub fn prompt_confirm(message: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new(message).with_default(default).prompt()?)
}

pub fn print_section(text: &str) {
    println!("{} {}", "▸".bright_cyan(), text.bright_white().bold());
}

pub fn print_success(text: &str) {
    println!("{} {}", "✓".bright_green(), text.green());
}

pub fn print_error(text: &str) {
    eprintln!("{} {}", "✗".bright_red(), text.red());
}

/// Print a file path under the current section
pub fn print_file(prefix: &str, path: &str) {
    println!("   {} {}", prefix.green(), path.bright_white());
}

pub fn print_item(text: &str) {
    println!("   {} {}", "•".bright_black(), text);
}
