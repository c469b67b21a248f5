//! Circuits command implementation.
//!
//! Lists the circuits a question can be asked about.

use anyhow::Result;

use circuitqa_core::CircuitSelector;

use super::common::{Settings, Terminal};

/// Execute the circuits command.
pub async fn execute(settings: &Settings) -> Result<()> {
    let client = settings.client()?;
    let mut terminal = Terminal::new(settings);
    let mut selector = CircuitSelector::new();
    let outcome = selector
        .load_with(&client, |control| terminal.apply_control(control))
        .await;
    terminal.finish(outcome)
}
