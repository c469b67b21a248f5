//! Pattern-based gate detection over Qiskit source text.
//!
//! The scanner looks for method calls of the form `.tag(<args>)` where `tag`
//! is one of the [`GateKind`] tags and `<args>` is any run of characters other
//! than `)`. It is not a parser: nested parentheses, strings, comments and
//! calls split across lines are not understood.
//!
//! Matches are reported in source order.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Gate tags recognised by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateKind {
    H,
    X,
    Y,
    Z,
    S,
    T,
    Sdg,
    Tdg,
    Rx,
    Ry,
    Rz,
    Cx,
    Cy,
    Cz,
    Ch,
    Swap,
    Ccx,
    Cswap,
    Reset,
    Barrier,
    Measure,
}

impl GateKind {
    /// Every known tag.
    pub const ALL: [GateKind; 21] = [
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::S,
        GateKind::T,
        GateKind::Sdg,
        GateKind::Tdg,
        GateKind::Rx,
        GateKind::Ry,
        GateKind::Rz,
        GateKind::Cx,
        GateKind::Cy,
        GateKind::Cz,
        GateKind::Ch,
        GateKind::Swap,
        GateKind::Ccx,
        GateKind::Cswap,
        GateKind::Reset,
        GateKind::Barrier,
        GateKind::Measure,
    ];

    /// The method name as it appears in source (`"cx"`).
    pub fn tag(self) -> &'static str {
        match self {
            GateKind::H => "h",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::S => "s",
            GateKind::T => "t",
            GateKind::Sdg => "sdg",
            GateKind::Tdg => "tdg",
            GateKind::Rx => "rx",
            GateKind::Ry => "ry",
            GateKind::Rz => "rz",
            GateKind::Cx => "cx",
            GateKind::Cy => "cy",
            GateKind::Cz => "cz",
            GateKind::Ch => "ch",
            GateKind::Swap => "swap",
            GateKind::Ccx => "ccx",
            GateKind::Cswap => "cswap",
            GateKind::Reset => "reset",
            GateKind::Barrier => "barrier",
            GateKind::Measure => "measure",
        }
    }

    /// Look up a kind by its source tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Uppercased display label (`"CX"`).
    pub fn label(self) -> String {
        self.tag().to_uppercase()
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single detected gate call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateMatch {
    /// Which gate was called.
    #[serde(rename = "type")]
    pub kind: GateKind,
    /// Raw text between the parentheses, untouched.
    pub qubit_expression: String,
    /// Reserved for gate parameters; always empty.
    pub parameters: FxHashMap<String, String>,
}

impl GateMatch {
    pub fn new(kind: GateKind, qubit_expression: impl Into<String>) -> Self {
        Self {
            kind,
            qubit_expression: qubit_expression.into(),
            parameters: FxHashMap::default(),
        }
    }
}

fn gate_call_re() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| {
        let tags = GateKind::ALL
            .iter()
            .map(|kind| regex::escape(kind.tag()))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"\.({tags})\(([^)]*)\)")).expect("gate call pattern is valid")
    })
}

/// Lazily scan `code` for gate calls, in source order.
pub fn scan(code: &str) -> impl Iterator<Item = GateMatch> + '_ {
    gate_call_re().captures_iter(code).filter_map(|caps| {
        let kind = GateKind::from_tag(caps.get(1)?.as_str())?;
        let args = caps.get(2).map_or("", |m| m.as_str());
        Some(GateMatch::new(kind, args))
    })
}

/// Eagerly scan `code` for gate calls, in source order.
pub fn scan_gates(code: &str) -> Vec<GateMatch> {
    let gates: Vec<GateMatch> = scan(code).collect();
    tracing::debug!(count = gates.len(), "scanned source for gate calls");
    gates
}
