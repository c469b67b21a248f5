//! Pure render helpers: view models in, HTML fragments out.
//!
//! Every function here is idempotent and escapes user-supplied text. Adapters
//! insert the returned [`Markup`] into the page (or print it) as-is.

use std::fmt;

use serde::Serialize;

use crate::api::{CircuitSummary, ParsedCircuit};
use crate::notify::Notification;
use crate::scanner::GateMatch;
use crate::snippets::ExampleSnippet;

/// An HTML fragment that is safe to insert into the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    /// Wrap markup produced by this module. The caller vouches for escaping.
    pub(crate) fn from_trusted(html: impl Into<String>) -> Self {
        Markup(html.into())
    }

    /// Escaped plain text.
    pub fn text(text: &str) -> Self {
        Markup(escape_html(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ============================================================================
// Answers
// ============================================================================

/// A block of answer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnswerBlock {
    /// Consecutive non-blank lines.
    Paragraph { lines: Vec<String> },
    /// A fenced segment, kept verbatim.
    Code {
        language: Option<String>,
        body: String,
    },
}

/// Split answer text into paragraphs on blank lines, keeping fenced
/// (```` ``` ````) segments whole. An unterminated fence runs to the end.
pub fn answer_blocks(text: &str) -> Vec<AnswerBlock> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<String> = Vec::new();
    let mut fence: Option<(Option<String>, Vec<&str>)> = None;

    for line in text.lines() {
        let trimmed = line.trim_start();

        if let Some((language, body)) = fence.as_mut() {
            if trimmed.starts_with("```") {
                blocks.push(AnswerBlock::Code {
                    language: language.take(),
                    body: body.join("\n"),
                });
                fence = None;
            } else {
                body.push(line);
            }
            continue;
        }

        if let Some(info) = trimmed.strip_prefix("```") {
            flush_paragraph(&mut paragraph, &mut blocks);
            let info = info.trim();
            let language = (!info.is_empty()).then(|| info.to_string());
            fence = Some((language, Vec::new()));
        } else if line.trim().is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
        } else {
            paragraph.push(line.trim_end().to_string());
        }
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    if let Some((language, body)) = fence {
        blocks.push(AnswerBlock::Code {
            language,
            body: body.join("\n"),
        });
    }
    blocks
}

fn flush_paragraph(paragraph: &mut Vec<String>, blocks: &mut Vec<AnswerBlock>) {
    if !paragraph.is_empty() {
        blocks.push(AnswerBlock::Paragraph {
            lines: std::mem::take(paragraph),
        });
    }
}

/// Render answer blocks as `<p>` and `<pre><code>` elements.
pub fn render_answer_blocks(blocks: &[AnswerBlock]) -> Markup {
    let mut html = String::new();
    for block in blocks {
        match block {
            AnswerBlock::Paragraph { lines } => {
                let escaped: Vec<String> = lines.iter().map(|l| escape_html(l)).collect();
                html.push_str(&format!("<p>{}</p>", escaped.join("<br>")));
            }
            AnswerBlock::Code { language, body } => {
                let class = language
                    .as_deref()
                    .map(|lang| format!(r#" class="language-{}""#, escape_html(lang)))
                    .unwrap_or_default();
                html.push_str(&format!(
                    "<pre><code{class}>{}</code></pre>",
                    escape_html(body)
                ));
            }
        }
    }
    Markup(html)
}

/// Render a question/answer exchange card.
pub fn render_exchange(question: &str, answer: &str, circuit_title: Option<&str>) -> Markup {
    let mut html = String::from(r#"<div class="qa-exchange card">"#);
    html.push_str(r#"<div class="card-body">"#);
    if let Some(title) = circuit_title.filter(|t| !t.trim().is_empty()) {
        html.push_str(&format!(
            r#"<p class="text-muted small">Circuit: {}</p>"#,
            escape_html(title)
        ));
    }
    html.push_str(&format!(
        r#"<h5 class="card-title">Q: {}</h5>"#,
        escape_html(question)
    ));
    html.push_str(r#"<div class="answer">"#);
    html.push_str(render_answer_blocks(&answer_blocks(answer)).as_str());
    html.push_str("</div></div></div>");
    Markup(html)
}

// ============================================================================
// Circuits
// ============================================================================

/// Render the circuit selector options, led by the "no circuit" choice.
///
/// The empty value maps to a `null` circuit id on submission.
pub fn render_circuit_options(circuits: &[CircuitSummary]) -> Markup {
    let mut html = String::from(r#"<option value="">General question (no circuit)</option>"#);
    for circuit in circuits {
        html.push_str(&format!(
            r#"<option value="{}">{} ({} qubits)</option>"#,
            circuit.id,
            escape_html(&circuit.title),
            circuit.num_qubits
        ));
    }
    Markup(html)
}

/// Render the result of a server-side parse.
pub fn render_parse_summary(parsed: &ParsedCircuit) -> Markup {
    Markup(format!(
        r#"<div class="parse-summary"><p>{}</p><ul><li>Qubits: {}</li><li>Gates: {}</li></ul></div>"#,
        escape_html(&parsed.status),
        parsed.num_qubits,
        parsed.num_gates
    ))
}

// ============================================================================
// Gates, notifications, snippets
// ============================================================================

/// Render detected gates, or a placeholder when there are none.
pub fn render_gate_list(gates: &[GateMatch]) -> Markup {
    if gates.is_empty() {
        return Markup::from_trusted(r#"<p class="text-muted">No gates detected</p>"#);
    }
    let mut html = String::from(r#"<ul class="list-group gate-list">"#);
    for gate in gates {
        html.push_str(&format!(
            r#"<li class="list-group-item"><strong>{}</strong> on <code>{}</code></li>"#,
            escape_html(&gate.kind.label()),
            escape_html(&gate.qubit_expression)
        ));
    }
    html.push_str("</ul>");
    Markup(html)
}

/// Render a dismissible toast styled by severity.
pub fn render_notification(notification: &Notification) -> Markup {
    Markup(format!(
        r#"<div class="alert alert-{} alert-dismissible fade show" role="alert" data-notification-id="{}">{}<button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button></div>"#,
        notification.severity.css_class(),
        notification.id.0,
        escape_html(&notification.message)
    ))
}

/// Render an example snippet with its title.
pub fn render_snippet_preview(snippet: &ExampleSnippet) -> Markup {
    Markup(format!(
        r#"<div class="snippet-preview"><h6>{}</h6><pre><code class="language-python">{}</code></pre></div>"#,
        escape_html(&snippet.title),
        escape_html(&snippet.code)
    ))
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::notify::{NotificationId, Severity};
    use crate::scanner::GateKind;

    #[test]
    fn test_circuit_options_start_with_no_circuit() {
        let circuits = vec![CircuitSummary {
            id: 3,
            title: "Bell <test>".into(),
            num_qubits: 2,
        }];
        let html = render_circuit_options(&circuits).into_string();
        assert!(html.starts_with(r#"<option value="">"#));
        assert!(html.contains(r#"<option value="3">Bell &lt;test&gt; (2 qubits)</option>"#));
        assert_eq!(html.matches("<option").count(), 2);
    }

    #[test]
    fn test_parse_summary() {
        let html = render_parse_summary(&ParsedCircuit {
            status: "Circuit parsed successfully".into(),
            num_qubits: 3,
            num_gates: 4,
        });
        assert!(html.as_str().contains("<li>Gates: 4</li>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_blank_lines_split_paragraphs() {
        let blocks = answer_blocks("First line\nstill first\n\n  \nSecond");
        assert_eq!(
            blocks,
            vec![
                AnswerBlock::Paragraph {
                    lines: vec!["First line".into(), "still first".into()]
                },
                AnswerBlock::Paragraph {
                    lines: vec!["Second".into()]
                },
            ]
        );
    }

    #[test]
    fn test_fenced_code_keeps_blank_lines() {
        let text = "Try this:\n```python\nqc.h(0)\n\nqc.cx(0, 1)\n```\nDone.";
        let blocks = answer_blocks(text);
        assert_eq!(blocks.len(), 3);
        assert_eq!(
            blocks[1],
            AnswerBlock::Code {
                language: Some("python".into()),
                body: "qc.h(0)\n\nqc.cx(0, 1)".into()
            }
        );
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let blocks = answer_blocks("```\nqc.x(0)");
        assert_eq!(
            blocks,
            vec![AnswerBlock::Code {
                language: None,
                body: "qc.x(0)".into()
            }]
        );
    }

    #[test]
    fn test_render_exchange_escapes_and_formats() {
        let html = render_exchange(
            "What does <h> do?",
            "It creates superposition.\n\n```python\nqc.h(0)\n```",
            Some("Bell & Co"),
        );
        let s = html.as_str();
        assert!(s.contains("Q: What does &lt;h&gt; do?"));
        assert!(s.contains("Circuit: Bell &amp; Co"));
        assert!(s.contains("<p>It creates superposition.</p>"));
        assert!(s.contains(r#"<pre><code class="language-python">qc.h(0)</code></pre>"#));
    }

    #[test]
    fn test_render_exchange_without_circuit() {
        let html = render_exchange("Q?", "A.", None);
        assert!(!html.as_str().contains("Circuit:"));
    }

    #[test]
    fn test_render_gate_list() {
        let gates = vec![
            GateMatch::new(GateKind::H, "0"),
            GateMatch::new(GateKind::Cx, "0, 1"),
        ];
        let html = render_gate_list(&gates);
        assert!(html.as_str().contains("<strong>H</strong> on <code>0</code>"));
        assert!(html.as_str().contains("<strong>CX</strong> on <code>0, 1</code>"));
    }

    #[test]
    fn test_render_empty_gate_list() {
        assert!(render_gate_list(&[]).as_str().contains("No gates detected"));
    }

    #[test]
    fn test_render_notification() {
        let n = Notification {
            id: NotificationId(7),
            message: "Failed <badly>".into(),
            severity: Severity::Error,
            created_at: Instant::now(),
            lifetime: Duration::from_secs(5),
        };
        let html = render_notification(&n);
        assert!(html.as_str().contains("alert-danger"));
        assert!(html.as_str().contains(r#"data-notification-id="7""#));
        assert!(html.as_str().contains("Failed &lt;badly&gt;"));
    }
}
