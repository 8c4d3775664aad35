//! Console status lines.

use console::{style, StyledObject};

/// Severity tag shown in front of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Info,
    Ok,
    Warn,
    Error,
}

impl Status {
    fn tag(self) -> StyledObject<&'static str> {
        match self {
            Status::Info => style("INFO").cyan().bold(),
            Status::Ok => style("OK").green().bold(),
            Status::Warn => style("WARN").yellow().bold(),
            Status::Error => style("ERROR").red().bold(),
        }
    }
}

/// Print a tagged status line; errors go to stderr.
pub fn print_status(status: Status, message: &str) {
    match status {
        Status::Error => eprintln!("{} {}", status.tag(), message),
        _ => println!("{} {}", status.tag(), message),
    }
}

pub fn print_info(message: &str) {
    print_status(Status::Info, message);
}

pub fn print_success(message: &str) {
    print_status(Status::Ok, message);
}

pub fn print_warning(message: &str) {
    print_status(Status::Warn, message);
}

pub fn print_error(message: &str) {
    print_status(Status::Error, message);
}

/// Print the start-up banner with the terms-of-service reminder.
pub fn print_banner() {
    println!();
    println!(
        "{} {}",
        style("tube-snapper").cyan().bold(),
        style(env!("CARGO_PKG_VERSION")).dim()
    );
    println!(
        "{}",
        style("Please check the platform's terms of service before downloading.").dim()
    );
}

/// Print what is about to be downloaded and where.
pub fn print_config_summary(mode: &str, format: &str, quality: u32, download_dir: &str) {
    let rows = [
        ("Input", mode.to_string()),
        ("Format", format.to_string()),
        ("Quality", format!("up to {}p", quality)),
        ("Directory", download_dir.to_string()),
    ];

    println!();
    for (label, value) in rows {
        println!("  {:<10} {}", style(label).bold(), value);
    }
    println!();
}
