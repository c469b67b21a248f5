//! Canned example circuits offered in the editor.

use serde::Serialize;

/// An example loaded into the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleSnippet {
    pub key: String,
    pub title: String,
    pub code: String,
}

const BELL_STATE: &str = "\
from qiskit import QuantumCircuit

qc = QuantumCircuit(2, 2)
qc.h(0)
qc.cx(0, 1)
qc.measure([0, 1], [0, 1])
";

const SUPERPOSITION: &str = "\
from qiskit import QuantumCircuit

qc = QuantumCircuit(1, 1)
qc.h(0)
qc.measure(0, 0)
";

const GHZ_STATE: &str = "\
from qiskit import QuantumCircuit

qc = QuantumCircuit(3, 3)
qc.h(0)
qc.cx(0, 1)
qc.cx(1, 2)
qc.measure([0, 1, 2], [0, 1, 2])
";

const QUANTUM_TELEPORTATION: &str = "\
from qiskit import QuantumCircuit

qc = QuantumCircuit(3, 3)
qc.x(0)
qc.barrier()
qc.h(1)
qc.cx(1, 2)
qc.cx(0, 1)
qc.h(0)
qc.measure([0, 1], [0, 1])
qc.cx(1, 2)
qc.cz(0, 2)
qc.measure(2, 2)
";

const GROVER_SEARCH: &str = "\
from qiskit import QuantumCircuit

qc = QuantumCircuit(2, 2)
qc.h([0, 1])
qc.cz(0, 1)
qc.h([0, 1])
qc.x([0, 1])
qc.cz(0, 1)
qc.x([0, 1])
qc.h([0, 1])
qc.measure([0, 1], [0, 1])
";

const EXAMPLES: [(&str, &str); 5] = [
    ("bell_state", BELL_STATE),
    ("superposition", SUPERPOSITION),
    ("ghz_state", GHZ_STATE),
    ("quantum_teleportation", QUANTUM_TELEPORTATION),
    ("grover_search", GROVER_SEARCH),
];

/// Keys of every example, in menu order.
pub fn example_keys() -> impl Iterator<Item = &'static str> {
    EXAMPLES.iter().map(|(key, _)| *key)
}

/// Load an example by key.
pub fn load_example(key: &str) -> Option<ExampleSnippet> {
    EXAMPLES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(k, code)| ExampleSnippet {
            key: k.to_string(),
            title: title_from_key(k),
            code: code.to_string(),
        })
}

/// All examples, in menu order.
pub fn all_examples() -> Vec<ExampleSnippet> {
    example_keys().filter_map(load_example).collect()
}

/// `"quantum_teleportation"` -> `"Quantum Teleportation"`.
pub fn title_from_key(key: &str) -> String {
    key.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{GateKind, scan_gates};

    #[test]
    fn test_title_from_key() {
        assert_eq!(title_from_key("bell_state"), "Bell State");
        assert_eq!(title_from_key("ghz-state"), "Ghz State");
        assert_eq!(title_from_key("superposition"), "Superposition");
        assert_eq!(title_from_key("__x__"), "X");
    }

    #[test]
    fn test_load_known_example() {
        let snippet = load_example("bell_state").unwrap();
        assert_eq!(snippet.title, "Bell State");
        assert!(snippet.code.contains("qc.cx(0, 1)"));
    }

    #[test]
    fn test_unknown_example() {
        assert!(load_example("shor").is_none());
    }

    #[test]
    fn test_every_example_has_gates() {
        let examples = all_examples();
        assert_eq!(examples.len(), 5);
        for snippet in examples {
            assert!(!scan_gates(&snippet.code).is_empty(), "{}", snippet.key);
        }
    }

    #[test]
    fn test_bell_example_gates() {
        let gates = scan_gates(&load_example("bell_state").unwrap().code);
        let kinds: Vec<GateKind> = gates.iter().map(|g| g.kind).collect();
        assert_eq!(kinds, vec![GateKind::H, GateKind::Cx, GateKind::Measure]);
    }
}
