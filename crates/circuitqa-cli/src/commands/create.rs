//! Create command implementation.
//!
//! Sends a Qiskit circuit to the backend and prints the page of the new circuit.

use anyhow::Result;
use console::style;

use circuitqa_core::{CircuitFields, CreateCircuitForm};

use super::common::{Settings, Terminal, load_source};

/// Execute the create command.
pub async fn execute(
    settings: &Settings,
    title: Option<&str>,
    code: Option<&str>,
    example: Option<&str>,
) -> Result<()> {
    let source = load_source(code, example)?;
    if let Some(path) = code {
        println!(
            "{} Creating circuit from {}",
            style("→").cyan().bold(),
            style(path).green()
        );
    }

    let fields = CircuitFields {
        title: title.unwrap_or_default().to_string(),
        qiskit_code: source,
    };

    let client = settings.client()?;
    let mut terminal = Terminal::new(settings);
    let mut form = CreateCircuitForm::new();
    let outcome = form
        .submit_with(&client, &fields, |control| terminal.apply_control(control))
        .await;
    terminal.finish(outcome)
}
