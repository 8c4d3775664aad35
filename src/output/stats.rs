//! Statistics reporting.

use console::style;

use crate::download::RunReport;

/// Print the outcome of a download run.
pub fn print_run_summary(report: &RunReport) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Summary:").bold());
    println!("  URLs:       {}", report.total);
    println!("  Downloaded: {}", style(report.succeeded.len()).green());
    println!("  Passes:     {}", report.passes);
    if report.failed_attempts() > 0 {
        println!(
            "  Retried:    {}",
            style(report.failed_attempts()).yellow()
        );
    }
    println!("{}", style("═".repeat(50)).dim());
}

/// Print the URLs that could not be downloaded.
pub fn print_failed_urls(urls: &[String]) {
    eprintln!();
    eprintln!(
        "{}",
        style(format!("{} URL(s) could not be downloaded:", urls.len()))
            .red()
            .bold()
    );
    for url in urls {
        eprintln!("  {}", url);
    }
}
