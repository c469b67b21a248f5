//! Backend contract.
//!
//! The [`CircuitApi`] trait is the seam between the form controllers and the
//! HTTP client. Implementations attach the CSRF token and JSON content type;
//! controllers only see typed requests and [`UiError`]s.
//!
//! | Method | Endpoint |
//! |--------|----------|
//! | `create_circuit()` | `POST /api/circuits/` |
//! | `list_circuits()` | `GET /api/circuits/` |
//! | `parse_circuit()` | `POST /api/circuits/{id}/parse/` |
//! | `ask_question()` | `POST /api/qa-sessions/ask_question/` |
//! | `get_session()` | `GET /api/qa-sessions/{id}/` |

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::UiResult;

/// Path of the circuit collection: creation and listing.
pub const CIRCUITS_PATH: &str = "/api/circuits/";

/// Path of the question endpoint.
pub const ASK_QUESTION_PATH: &str = "/api/qa-sessions/ask_question/";

/// Path of a stored Q&A session.
pub fn session_path(id: i64) -> String {
    format!("/api/qa-sessions/{id}/")
}

/// Path of the parse action of a stored circuit.
pub fn circuit_parse_path(id: i64) -> String {
    format!("/api/circuits/{id}/parse/")
}

/// Path of the circuit detail page the UI navigates to after creation.
pub fn circuit_detail_path(id: i64) -> String {
    format!("/circuits/{id}/")
}

/// Body of `POST /api/circuits/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCircuitRequest {
    pub title: String,
    pub qiskit_code: String,
}

/// Response of `POST /api/circuits/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedCircuit {
    pub id: i64,
}

/// One entry of `GET /api/circuits/`, as used by the circuit selector.
///
/// Other fields of the stored circuit are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitSummary {
    pub id: i64,
    pub title: String,
    #[serde(default = "default_qubits")]
    pub num_qubits: u32,
}

fn default_qubits() -> u32 {
    1
}

/// Response of `POST /api/circuits/{id}/parse/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCircuit {
    /// Human-readable status, e.g. "Circuit parsed successfully".
    pub status: String,
    pub num_qubits: u32,
    pub num_gates: u32,
}

/// Body of `POST /api/qa-sessions/ask_question/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskQuestionRequest {
    pub question: String,
    /// Serialized as `null` when no circuit is selected.
    pub circuit_id: Option<i64>,
}

/// Response of `POST /api/qa-sessions/ask_question/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswerExchange {
    pub question: String,
    pub answer: String,
    pub session_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_title: Option<String>,
}

/// Response of `GET /api/qa-sessions/{id}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDetail {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_title: Option<String>,
}

/// Error body returned by the backend on failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Calls the front end makes against the backend.
#[async_trait]
pub trait CircuitApi: Send + Sync {
    /// Store a new circuit.
    async fn create_circuit(&self, req: &CreateCircuitRequest) -> UiResult<CreatedCircuit>;

    /// List the user's circuits.
    async fn list_circuits(&self) -> UiResult<Vec<CircuitSummary>>;

    /// Parse a stored circuit's code on the server.
    async fn parse_circuit(&self, id: i64) -> UiResult<ParsedCircuit>;

    /// Ask a question, optionally about a stored circuit.
    async fn ask_question(&self, req: &AskQuestionRequest) -> UiResult<QuestionAnswerExchange>;

    /// Fetch a previous exchange.
    async fn get_session(&self, id: i64) -> UiResult<SessionDetail>;
}
