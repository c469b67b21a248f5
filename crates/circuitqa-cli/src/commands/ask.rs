//! Ask command implementation.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use circuitqa_core::clipboard::{Clipboard, copy_text};
use circuitqa_core::{AskQuestionForm, QuestionFields, UiError, UiResult, ViewUpdate};

use super::common::{Settings, Terminal};

/// Clipboard stand-in that writes copied text to a file.
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Clipboard for FileClipboard {
    fn write_text(&mut self, text: &str) -> UiResult<()> {
        fs::write(&self.path, text)
            .map_err(|e| UiError::Clipboard(format!("{}: {e}", self.path.display())))
    }
}

/// Execute the ask command.
pub async fn execute(
    settings: &Settings,
    question: Option<&str>,
    circuit: Option<&str>,
    copy: Option<&str>,
) -> Result<()> {
    let fields = QuestionFields {
        question: question.unwrap_or_default().to_string(),
        circuit_id: circuit.unwrap_or_default().to_string(),
    };

    let client = settings.client()?;
    let mut terminal = Terminal::new(settings);
    let mut form = AskQuestionForm::new();
    let outcome = form
        .submit_with(&client, &fields, |control| terminal.apply_control(control))
        .await;

    let answer = match (&outcome.update, copy) {
        (Some(ViewUpdate::ShowExchange { exchange, .. }), Some(_)) => Some(exchange.answer.clone()),
        _ => None,
    };
    terminal.finish(outcome)?;

    if let (Some(answer), Some(path)) = (answer, copy) {
        let notice = copy_text(&mut FileClipboard::new(path), &answer);
        terminal.show(notice);
    }
    Ok(())
}
