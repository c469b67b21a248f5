//! Integration tests for the form controllers against an in-memory backend.

use std::sync::Mutex;

use async_trait::async_trait;
use circuitqa_core::{
    AskQuestionForm, AskQuestionRequest, CircuitApi, CircuitFields, CircuitSelector,
    CircuitSummary, ControlState, CreateCircuitForm, CreateCircuitRequest, CreatedCircuit,
    LoadingControl, NotificationCenter, OutcomeStatus, ParseCircuitAction, ParsedCircuit,
    QuestionAnswerExchange, QuestionFields, SessionDetail, SessionView, Severity, UiError,
    UiResult, ViewUpdate,
};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Default)]
struct FakeApi {
    created: Mutex<Vec<CreateCircuitRequest>>,
    asked: Mutex<Vec<AskQuestionRequest>>,
    fail_with: Option<UiError>,
}

impl FakeApi {
    fn failing(err: UiError) -> Self {
        Self {
            fail_with: Some(err),
            ..Default::default()
        }
    }

    fn calls(&self) -> usize {
        self.created.lock().unwrap().len() + self.asked.lock().unwrap().len()
    }
}

#[async_trait]
impl CircuitApi for FakeApi {
    async fn list_circuits(&self) -> UiResult<Vec<CircuitSummary>> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(vec![
            CircuitSummary {
                id: 1,
                title: "Bell".into(),
                num_qubits: 2,
            },
            CircuitSummary {
                id: 2,
                title: "GHZ".into(),
                num_qubits: 3,
            },
        ])
    }

    async fn parse_circuit(&self, id: i64) -> UiResult<ParsedCircuit> {
        if id == 403 {
            return Err(UiError::request(403, Some("Permission denied".into())));
        }
        Ok(ParsedCircuit {
            status: "Circuit parsed successfully".into(),
            num_qubits: 2,
            num_gates: 3,
        })
    }

    async fn create_circuit(&self, req: &CreateCircuitRequest) -> UiResult<CreatedCircuit> {
        self.created.lock().unwrap().push(req.clone());
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(CreatedCircuit { id: 42 }),
        }
    }

    async fn ask_question(&self, req: &AskQuestionRequest) -> UiResult<QuestionAnswerExchange> {
        self.asked.lock().unwrap().push(req.clone());
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(QuestionAnswerExchange {
            question: req.question.clone(),
            answer: "A Hadamard gate puts a qubit in superposition.\n\n```python\nqc.h(0)\n```"
                .into(),
            session_id: 11,
            circuit_title: req.circuit_id.map(|id| format!("Circuit #{id}")),
        })
    }

    async fn get_session(&self, id: i64) -> UiResult<SessionDetail> {
        if id == 404 {
            return Err(UiError::request(404, Some("Session not found".into())));
        }
        Ok(SessionDetail {
            question: "What is a Bell state?".into(),
            answer: "A maximally entangled two-qubit state.".into(),
            circuit_title: Some("Bell".into()),
        })
    }
}

fn circuit(title: &str, code: &str) -> CircuitFields {
    CircuitFields {
        title: title.into(),
        qiskit_code: code.into(),
    }
}

// ============================================================================
// Create circuit
// ============================================================================

#[tokio::test]
async fn test_empty_title_warns_without_network_call() {
    let api = FakeApi::default();
    let mut form = CreateCircuitForm::new();

    let outcome = form.submit(&api, &circuit("", "qc.h(0)")).await;

    assert_eq!(outcome.status, OutcomeStatus::Rejected);
    assert_eq!(outcome.notice.unwrap().severity, Severity::Warning);
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn test_created_circuit_notifies_then_navigates() {
    let api = FakeApi::default();
    let mut form = CreateCircuitForm::new();
    let mut toasts = NotificationCenter::new();

    let outcome = form.submit(&api, &circuit("Bell", "qc.h(0)")).await;

    let notice = outcome.notice.clone().unwrap();
    assert_eq!(notice.severity, Severity::Success);
    toasts.show(notice);
    assert_eq!(toasts.active().len(), 1);

    assert_eq!(
        outcome.update,
        Some(ViewUpdate::Navigate {
            path: "/circuits/42/".into()
        })
    );
    assert_eq!(api.created.lock().unwrap()[0].title, "Bell");
}

#[tokio::test]
async fn test_request_error_shows_server_message() {
    let api = FakeApi::failing(UiError::request(400, Some("Title already taken".into())));
    let mut form = CreateCircuitForm::with_control(LoadingControl::register("save", "Save"));

    let outcome = form.submit(&api, &circuit("Bell", "qc.h(0)")).await;

    assert_eq!(outcome.status, OutcomeStatus::Failed);
    let notice = outcome.notice.unwrap();
    assert_eq!(notice.severity, Severity::Error);
    assert_eq!(notice.message, "Title already taken");
    assert_eq!(outcome.control.label, "Save");
    assert!(!outcome.control.disabled);
    assert!(!form.is_busy());
}

#[tokio::test]
async fn test_transport_error_appends_detail() {
    let api = FakeApi::failing(UiError::Transport("connection reset".into()));
    let mut form = CreateCircuitForm::new();

    let outcome = form.submit(&api, &circuit("Bell", "qc.h(0)")).await;

    assert_eq!(
        outcome.notice.unwrap().message,
        "An error occurred: connection reset"
    );
    assert!(!outcome.control.loading);
}

// ============================================================================
// Ask question
// ============================================================================

#[tokio::test]
async fn test_question_without_circuit_sends_null() {
    let api = FakeApi::default();
    let mut form = AskQuestionForm::new();

    let outcome = form
        .submit(
            &api,
            &QuestionFields {
                question: "What does H do?".into(),
                circuit_id: String::new(),
            },
        )
        .await;

    assert!(outcome.is_success());
    assert_eq!(api.asked.lock().unwrap()[0].circuit_id, None);
    match outcome.update {
        Some(ViewUpdate::ShowExchange { exchange, markup }) => {
            assert_eq!(exchange.session_id, 11);
            assert!(markup.as_str().contains("language-python"));
            assert!(!markup.as_str().contains("Circuit:"));
        }
        other => panic!("unexpected update: {other:?}"),
    }
}

#[tokio::test]
async fn test_question_about_circuit() {
    let api = FakeApi::default();
    let mut form = AskQuestionForm::new();

    let outcome = form
        .submit(
            &api,
            &QuestionFields {
                question: "Explain this".into(),
                circuit_id: "3".into(),
            },
        )
        .await;

    match outcome.update {
        Some(ViewUpdate::ShowExchange { markup, .. }) => {
            assert!(markup.as_str().contains("Circuit: Circuit #3"));
        }
        other => panic!("unexpected update: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_question_is_not_sent() {
    let api = FakeApi::default();
    let mut form = AskQuestionForm::new();

    let outcome = form.submit(&api, &QuestionFields::default()).await;

    assert_eq!(outcome.status, OutcomeStatus::Rejected);
    assert_eq!(api.calls(), 0);
}

// ============================================================================
// Session view
// ============================================================================

#[tokio::test]
async fn test_session_renders_exchange() {
    let api = FakeApi::default();
    let mut view = SessionView::new();

    let outcome = view.load(&api, 8).await;

    assert!(outcome.is_success());
    assert!(outcome.notice.is_none());
    match outcome.update {
        Some(ViewUpdate::ShowExchange { exchange, markup }) => {
            assert_eq!(exchange.session_id, 8);
            assert!(markup.as_str().contains("Q: What is a Bell state?"));
        }
        other => panic!("unexpected update: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_session_is_error_notice() {
    let api = FakeApi::default();
    let mut view = SessionView::new();

    let outcome = view.load(&api, 404).await;

    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert_eq!(outcome.notice.unwrap().message, "Session not found");
    assert!(!outcome.control.loading);
}

#[tokio::test]
async fn test_on_start_sees_loading_control() {
    let api = FakeApi::default();
    let mut form = CreateCircuitForm::new();
    let mut seen: Option<ControlState> = None;

    let outcome = form
        .submit_with(&api, &circuit("Bell", "qc.h(0)"), |control| {
            seen = Some(control.clone());
        })
        .await;

    let seen = seen.expect("on_start was not called");
    assert!(seen.loading);
    assert!(seen.disabled);
    assert_eq!(seen.label, "Creating...");
    assert!(!outcome.control.loading);
}

#[tokio::test]
async fn test_on_start_skipped_when_rejected() {
    let api = FakeApi::default();
    let mut form = AskQuestionForm::new();
    let mut called = false;

    let outcome = form
        .submit_with(&api, &QuestionFields::default(), |_| called = true)
        .await;

    assert_eq!(outcome.status, OutcomeStatus::Rejected);
    assert!(!called);
}

// ============================================================================
// Circuit list and parse
// ============================================================================

#[tokio::test]
async fn test_selector_fills_options() {
    let api = FakeApi::default();
    let mut selector = CircuitSelector::new();

    let outcome = selector.load(&api).await;

    assert!(outcome.is_success());
    match outcome.update {
        Some(ViewUpdate::ShowCircuits { circuits, markup }) => {
            assert_eq!(circuits.len(), 2);
            assert!(markup.as_str().contains(r#"<option value="2">GHZ (3 qubits)</option>"#));
        }
        other => panic!("unexpected update: {other:?}"),
    }
    assert!(selector.contains(1));
}

#[tokio::test]
async fn test_selector_failure_is_error_notice() {
    let api = FakeApi::failing(UiError::Transport("connection refused".into()));
    let mut selector = CircuitSelector::new();

    let outcome = selector.load(&api).await;

    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert_eq!(
        outcome.notice.unwrap().message,
        "An error occurred: connection refused"
    );
}

#[tokio::test]
async fn test_parse_success_and_permission_error() {
    let api = FakeApi::default();
    let mut action = ParseCircuitAction::new();

    let outcome = action.submit(&api, 5).await;
    assert_eq!(outcome.notice.unwrap().severity, Severity::Success);
    match outcome.update {
        Some(ViewUpdate::ShowParse { parsed, markup, .. }) => {
            assert_eq!(parsed.num_gates, 3);
            assert!(markup.as_str().contains("<li>Qubits: 2</li>"));
        }
        other => panic!("unexpected update: {other:?}"),
    }

    let outcome = action.submit(&api, 403).await;
    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert_eq!(outcome.notice.unwrap().message, "Permission denied");
}
