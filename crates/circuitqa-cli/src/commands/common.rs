//! Shared helpers for CLI commands.
//!
//! [`Terminal`] is the adapter between controller outcomes and the terminal:
//! it turns control states into a spinner, notices into styled lines and view
//! updates into printed text or markup.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use circuitqa_client::{ApiClient, ClientConfig};
use circuitqa_core::render::{AnswerBlock, answer_blocks};
use circuitqa_core::snippets::load_example;
use circuitqa_core::{
    CircuitSummary, ControlState, ExchangeView, Notice, NotificationCenter, Severity,
    SubmitOutcome, ViewUpdate,
};

/// How rendered fragments are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Styled terminal text.
    Text,
    /// The HTML fragment a page would insert.
    Html,
    /// The settled outcome as JSON.
    Json,
}

/// Marker error: the failure was already shown to the user.
#[derive(Debug)]
pub struct Reported;

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("failure already reported")
    }
}

impl std::error::Error for Reported {}

/// Global options shared by every command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub cookie: Option<String>,
    pub csrf_cookie: String,
    pub timeout_secs: u64,
    pub format: OutputFormat,
}

impl Settings {
    /// Cookie string from `--cookie`, or from the cookie file.
    pub fn cookies(&self) -> Result<String> {
        if let Some(cookie) = &self.cookie {
            return Ok(cookie.clone());
        }
        let path = default_cookie_file()?;
        if !path.exists() {
            tracing::debug!("no cookie file at {}", path.display());
            return Ok(String::new());
        }
        read_cookie_file(&path)
    }

    /// Build the backend client.
    pub fn client(&self) -> Result<ApiClient> {
        let config = ClientConfig::new(&self.api_url)
            .with_cookies(self.cookies()?)
            .with_csrf_cookie(&self.csrf_cookie)
            .with_timeout(Duration::from_secs(self.timeout_secs));
        ApiClient::new(config).map_err(|e| anyhow::anyhow!("Failed to create client: {e}"))
    }
}

/// Return the cookie file location (~/.circuitqa/cookie).
pub fn default_cookie_file() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    Ok(home.join(".circuitqa").join("cookie"))
}

/// Read a cookie file, joining non-comment lines with `; `.
pub fn read_cookie_file(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read cookie file: {}", path.display()))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("; "))
}

/// Load Qiskit source from a file or a built-in example.
///
/// Returns an empty string when neither is given, leaving validation to the form.
pub fn load_source(path: Option<&str>, example: Option<&str>) -> Result<String> {
    match (path, example) {
        (Some(path), _) => {
            if !Path::new(path).exists() {
                anyhow::bail!("File not found: {path}");
            }
            fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
        }
        (None, Some(key)) => load_example(key)
            .map(|snippet| snippet.code)
            .ok_or_else(|| unknown_example(key)),
        (None, None) => Ok(String::new()),
    }
}

/// Error for an unknown example key, listing the valid ones.
pub fn unknown_example(key: &str) -> anyhow::Error {
    let keys: Vec<&str> = circuitqa_core::snippets::example_keys().collect();
    anyhow::anyhow!(
        "Unknown example: '{key}'. Available: {}",
        keys.join(", ")
    )
}

/// Terminal adapter for controller outcomes.
pub struct Terminal {
    format: OutputFormat,
    base_url: String,
    toasts: NotificationCenter,
    spinner: Option<ProgressBar>,
}

impl Terminal {
    pub fn new(settings: &Settings) -> Self {
        Self {
            format: settings.format,
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            toasts: NotificationCenter::new(),
            spinner: None,
        }
    }

    /// Show a control state: a spinner while loading, nothing otherwise.
    pub fn apply_control(&mut self, state: &ControlState) {
        if state.loading {
            let spinner = self.spinner.get_or_insert_with(|| {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.cyan} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                spinner.enable_steady_tick(Duration::from_millis(100));
                spinner
            });
            spinner.set_message(state.label.clone());
        } else if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print a notice styled by severity.
    pub fn show(&mut self, notice: Notice) {
        let marker = match notice.severity {
            Severity::Success => style("✓").green().bold(),
            Severity::Info => style("→").cyan().bold(),
            Severity::Warning => style("!").yellow().bold(),
            Severity::Error => style("✗").red().bold(),
        };
        match self.format {
            OutputFormat::Text | OutputFormat::Json => eprintln!("{} {}", marker, notice.message),
            OutputFormat::Html => {
                let id = self.toasts.show(notice);
                if let Some(toast) = self.toasts.active().iter().find(|t| t.id == id) {
                    eprintln!("{}", circuitqa_core::render::render_notification(toast));
                }
            }
        }
    }

    /// Apply a settled submission. Fails with [`Reported`] when it did not succeed.
    pub fn finish(&mut self, outcome: SubmitOutcome) -> Result<()> {
        self.apply_control(&outcome.control);
        let succeeded = outcome.is_success();
        if self.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            return if succeeded { Ok(()) } else { Err(Reported.into()) };
        }
        if let Some(notice) = outcome.notice {
            self.show(notice);
        }
        if let Some(update) = outcome.update {
            self.apply_update(update);
        }
        if !outcome.clear_fields.is_empty() {
            tracing::debug!(fields = ?outcome.clear_fields, "clearing submitted fields");
        }
        if succeeded {
            Ok(())
        } else {
            Err(Reported.into())
        }
    }

    fn apply_update(&self, update: ViewUpdate) {
        match update {
            ViewUpdate::Navigate { path } => {
                println!(
                    "{} {}{}",
                    style("→").cyan().bold(),
                    self.base_url,
                    style(path).underlined()
                );
            }
            ViewUpdate::ShowExchange { exchange, markup } => match self.format {
                OutputFormat::Html => println!("{markup}"),
                OutputFormat::Text | OutputFormat::Json => print_exchange(&exchange),
            },
            ViewUpdate::ShowCircuits { circuits, markup } => match self.format {
                OutputFormat::Html => println!("{markup}"),
                OutputFormat::Text | OutputFormat::Json => print_circuits(&circuits),
            },
            ViewUpdate::ShowParse {
                circuit_id,
                parsed,
                markup,
            } => match self.format {
                OutputFormat::Html => println!("{markup}"),
                OutputFormat::Text | OutputFormat::Json => {
                    println!("{} Circuit #{circuit_id}", style("→").cyan().bold());
                    println!("  Qubits: {}", parsed.num_qubits);
                    println!("  Gates:  {}", parsed.num_gates);
                }
            },
        }
    }
}

/// Print an exchange as styled text.
pub fn print_exchange(exchange: &ExchangeView) {
    if let Some(title) = &exchange.circuit_title {
        println!("{} {}", style("Circuit:").dim(), title);
    }
    println!("{} {}\n", style("Q:").cyan().bold(), style(&exchange.question).bold());

    for block in answer_blocks(&exchange.answer) {
        match block {
            AnswerBlock::Paragraph { lines } => {
                println!("{}\n", lines.join("\n"));
            }
            AnswerBlock::Code { body, .. } => {
                for line in body.lines() {
                    println!("    {}", style(line).yellow());
                }
                println!();
            }
        }
    }

    println!("{}", style(format!("Session #{}", exchange.session_id)).dim());
}

/// Print the circuit list as the question form's selector would offer it.
pub fn print_circuits(circuits: &[CircuitSummary]) {
    if circuits.is_empty() {
        println!("{}", style("No circuits yet").dim());
        return;
    }
    for circuit in circuits {
        println!(
            "  {} {:<6} {} {}",
            style("●").green(),
            style(format!("#{}", circuit.id)).yellow(),
            style(&circuit.title).bold(),
            style(format!("({} qubits)", circuit.num_qubits)).dim()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cookie_file_joins_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookie");
        fs::write(&path, "# exported from browser\nsessionid=abc\n\ncsrftoken=xyz\n").unwrap();
        assert_eq!(read_cookie_file(&path).unwrap(), "sessionid=abc; csrftoken=xyz");
    }

    #[test]
    fn test_explicit_cookie_wins() {
        let settings = Settings {
            api_url: "http://localhost:8000".into(),
            cookie: Some("csrftoken=abc".into()),
            csrf_cookie: "csrftoken".into(),
            timeout_secs: 5,
            format: OutputFormat::Text,
        };
        assert_eq!(settings.cookies().unwrap(), "csrftoken=abc");
        assert_eq!(settings.client().unwrap().csrf_token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_load_source_from_example() {
        let code = load_source(None, Some("ghz_state")).unwrap();
        assert!(code.contains("qc.cx(1, 2)"));
    }

    #[test]
    fn test_load_source_unknown_example() {
        let err = load_source(None, Some("shor")).unwrap_err();
        assert!(err.to_string().contains("bell_state"));
    }

    #[test]
    fn test_load_source_missing_file() {
        let err = load_source(Some("/definitely/not/here.py"), None).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_load_source_nothing_given() {
        assert_eq!(load_source(None, None).unwrap(), "");
    }
}
