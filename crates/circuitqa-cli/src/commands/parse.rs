//! Parse command implementation.
//!
//! Asks the backend to parse a stored circuit and reports its size.

use anyhow::Result;

use circuitqa_core::ParseCircuitAction;

use super::common::{Settings, Terminal};

/// Execute the parse command.
pub async fn execute(settings: &Settings, id: i64) -> Result<()> {
    let client = settings.client()?;
    let mut terminal = Terminal::new(settings);
    let mut action = ParseCircuitAction::new();
    let outcome = action
        .submit_with(&client, id, |control| terminal.apply_control(control))
        .await;
    terminal.finish(outcome)
}
