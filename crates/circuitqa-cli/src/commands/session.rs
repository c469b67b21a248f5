//! Session command implementation.

use anyhow::Result;

use circuitqa_core::SessionView;

use super::common::{Settings, Terminal};

/// Execute the session command.
pub async fn execute(settings: &Settings, id: i64) -> Result<()> {
    let client = settings.client()?;
    let mut terminal = Terminal::new(settings);
    let mut view = SessionView::new();
    let outcome = view
        .load_with(&client, id, |control| terminal.apply_control(control))
        .await;
    terminal.finish(outcome)
}
