//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - step-by-step quantum state-vector simulation",
        style("Joko").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  joko-ir   Complex arithmetic, gate catalogue, circuits");
    println!("  joko-sim  State vectors, gate kernel, column executor");
    println!("  joko-cli  Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/jokoquantum/joko").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
