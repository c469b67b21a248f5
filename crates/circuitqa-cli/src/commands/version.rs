//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - questions and answers about Qiskit circuits",
        style("Circuit Q&A").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  circuitqa-core    Form controllers, gate scanner and rendering");
    println!("  circuitqa-client  Backend HTTP client");
    println!("  circuitqa-cli     Command-line interface");
    println!();
    println!(
        "Default backend: {}",
        style(circuitqa_client::DEFAULT_BASE_URL).underlined()
    );
}
