//! Scan command implementation.
//!
//! Lists the gate calls found in Qiskit source, as the preview pane does.

use anyhow::Result;
use console::style;

use circuitqa_core::render::render_gate_list;
use circuitqa_core::scanner::scan_gates;

use super::common::{OutputFormat, Settings, load_source};

/// Execute the scan command.
pub fn execute(settings: &Settings, input: Option<&str>, example: Option<&str>) -> Result<()> {
    if input.is_none() && example.is_none() {
        anyhow::bail!("Provide a source file or --example");
    }
    let source = load_source(input, example)?;
    let gates = scan_gates(&source);

    match settings.format {
        OutputFormat::Html => println!("{}", render_gate_list(&gates)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&gates)?),
        OutputFormat::Text => {
            if gates.is_empty() {
                println!("{}", style("No gates detected").dim());
                return Ok(());
            }
            println!(
                "{} {} gate(s) detected:\n",
                style("✓").green().bold(),
                gates.len()
            );
            for gate in &gates {
                println!(
                    "  {:<8} on {}",
                    style(gate.kind.label()).bold(),
                    style(&gate.qubit_expression).yellow()
                );
            }
        }
    }
    Ok(())
}
