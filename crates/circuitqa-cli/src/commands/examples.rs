//! Examples command implementation.

use anyhow::Result;
use console::style;

use circuitqa_core::render::render_snippet_preview;
use circuitqa_core::snippets::{all_examples, load_example};

use super::common::{OutputFormat, Settings, unknown_example};

/// List the built-in examples.
pub fn list() {
    println!("{} Example circuits:\n", style("Circuit Q&A").cyan().bold());
    for snippet in all_examples() {
        println!(
            "  {} {:<24} {}",
            style("●").green(),
            style(&snippet.key).bold(),
            snippet.title
        );
    }
    println!();
    println!(
        "Use {} to print one.",
        style("circuitqa example <key>").yellow()
    );
}

/// Print one example's code.
pub fn show(settings: &Settings, key: &str) -> Result<()> {
    let snippet = load_example(key).ok_or_else(|| unknown_example(key))?;
    match settings.format {
        OutputFormat::Html => println!("{}", render_snippet_preview(&snippet)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snippet)?),
        OutputFormat::Text => {
            println!("{} {}\n", style("#").dim(), style(&snippet.title).bold());
            println!("{}", snippet.code);
        }
    }
    Ok(())
}
