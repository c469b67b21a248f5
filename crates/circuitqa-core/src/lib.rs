//! Circuit Q&A core - view models and controllers for the circuit authoring front end.
//!
//! This crate holds everything the front end does that is not event wiring:
//!
//! - Detecting gate calls in Qiskit source text ([`scanner`])
//! - Rendering answers, gate lists and notifications to markup ([`render`])
//! - Toast notifications and loading-state controls ([`notify`], [`control`])
//! - Reading the CSRF token from a cookie string ([`cookie`])
//! - Form controllers that validate, submit and map responses ([`forms`])
//!
//! Adapters (a browser binding, the `circuitqa` CLI) translate user events into
//! calls on these types and apply the returned [`ViewUpdate`]s and notifications.
//!
//! # Quick Start
//!
//! ```rust
//! use circuitqa_core::{render, scanner};
//!
//! let gates = scanner::scan_gates("qc.h(0)\nqc.cx(0, 1)");
//! assert_eq!(gates.len(), 2);
//!
//! let markup = render::render_gate_list(&gates);
//! assert!(markup.as_str().contains("CX"));
//! ```

pub mod api;
pub mod clipboard;
pub mod control;
pub mod cookie;
pub mod error;
pub mod forms;
pub mod notify;
pub mod render;
pub mod scanner;
pub mod snippets;

pub use api::{
    AskQuestionRequest, CircuitApi, CircuitSummary, CreateCircuitRequest, CreatedCircuit,
    ParsedCircuit, QuestionAnswerExchange, SessionDetail,
};
pub use control::{ControlState, LoadingControl};
pub use cookie::{CSRF_COOKIE_NAME, CSRF_HEADER_NAME, read_cookie_token};
pub use error::{UiError, UiResult};
pub use forms::{
    AskQuestionForm, CircuitFields, CircuitSelector, CreateCircuitForm, ExchangeView,
    OutcomeStatus, ParseCircuitAction, PendingSubmission, QuestionFields, Rejection,
    RequestToken, SessionView, SubmitOutcome, ViewUpdate,
};
pub use notify::{Notice, Notification, NotificationCenter, NotificationId, Severity};
pub use render::Markup;
pub use scanner::{GateKind, GateMatch};
pub use snippets::ExampleSnippet;
