//! Form controllers.
//!
//! Each controller owns its submit control and an in-flight request token.
//! A submission runs in three steps that line up with the event loop's turns:
//!
//! ```text
//!   begin(fields) ──→ api call (await) ──→ complete(token, result)
//!    validate,           suspension         release token,
//!    take token,         point              restore control,
//!    enter loading                          map result
//! ```
//!
//! `begin` rejects while a token is outstanding, so a second click during a
//! request is refused instead of racing. `reset` drops the token; a
//! completion that arrives afterwards is reported as stale and ignored.
//!
//! [`CreateCircuitForm::submit`] and friends run all three steps. The
//! `*_with` variants hand the loading control state to a callback before the
//! request goes out, for adapters that show it.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::api::{
    AskQuestionRequest, CircuitApi, CircuitSummary, CreateCircuitRequest, CreatedCircuit,
    ParsedCircuit, QuestionAnswerExchange, SessionDetail, circuit_detail_path,
};
use crate::control::{ControlState, LoadingControl};
use crate::error::{UiError, UiResult};
use crate::notify::Notice;
use crate::render::{Markup, render_circuit_options, render_exchange, render_parse_summary};

// ============================================================================
// Outcomes
// ============================================================================

/// Change the adapter applies to the page after a successful request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewUpdate {
    /// Go to another page.
    Navigate { path: String },
    /// Show a question/answer exchange in the answer area.
    ShowExchange {
        exchange: ExchangeView,
        markup: Markup,
    },
    /// Refill the circuit selector.
    ShowCircuits {
        circuits: Vec<CircuitSummary>,
        markup: Markup,
    },
    /// Show the result of parsing a stored circuit.
    ShowParse {
        circuit_id: i64,
        parsed: ParsedCircuit,
        markup: Markup,
    },
}

/// Question/answer data as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeView {
    pub question: String,
    pub answer: String,
    pub session_id: i64,
    pub circuit_title: Option<String>,
}

impl ExchangeView {
    pub fn render(&self) -> Markup {
        render_exchange(&self.question, &self.answer, self.circuit_title.as_deref())
    }
}

impl From<QuestionAnswerExchange> for ExchangeView {
    fn from(x: QuestionAnswerExchange) -> Self {
        Self {
            question: x.question,
            answer: x.answer,
            session_id: x.session_id,
            circuit_title: x.circuit_title,
        }
    }
}

impl ExchangeView {
    fn from_session(id: i64, detail: SessionDetail) -> Self {
        Self {
            question: detail.question,
            answer: detail.answer,
            session_id: id,
            circuit_title: detail.circuit_title,
        }
    }

    fn into_update(self) -> ViewUpdate {
        let markup = self.render();
        ViewUpdate::ShowExchange {
            exchange: self,
            markup,
        }
    }
}

/// How a submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The backend accepted the request.
    Succeeded,
    /// The request was sent and failed.
    Failed,
    /// Validation failed or another request was in flight; nothing was sent.
    Rejected,
    /// The form was reset while the request ran; the result was discarded.
    Stale,
}

/// Everything the adapter applies once a submission settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    pub status: OutcomeStatus,
    /// Notification to show, if any.
    pub notice: Option<Notice>,
    /// State of the submit control after the submission.
    pub control: ControlState,
    /// Page change on success.
    pub update: Option<ViewUpdate>,
    /// Names of fields to clear.
    pub clear_fields: Vec<&'static str>,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Succeeded
    }

    fn failed(control: ControlState, err: &UiError) -> Self {
        Self {
            status: OutcomeStatus::Failed,
            notice: Some(Notice::from_error(err)),
            control,
            update: None,
            clear_fields: Vec::new(),
        }
    }

    fn stale(control: ControlState) -> Self {
        Self {
            status: OutcomeStatus::Stale,
            notice: None,
            control,
            update: None,
            clear_fields: Vec::new(),
        }
    }
}

/// A submission refused by `begin`. Nothing was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub error: UiError,
    pub notice: Notice,
    /// Control state, unchanged by the rejection.
    pub control: ControlState,
}

impl From<Rejection> for SubmitOutcome {
    fn from(r: Rejection) -> Self {
        Self {
            status: OutcomeStatus::Rejected,
            notice: Some(r.notice),
            control: r.control,
            update: None,
            clear_fields: Vec::new(),
        }
    }
}

/// Identifies one in-flight request of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// A request that passed `begin` and is ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission<R> {
    pub token: RequestToken,
    pub request: R,
    /// Control state to show while the request runs.
    pub control: ControlState,
}

// ============================================================================
// Shared controller state
// ============================================================================

#[derive(Debug)]
struct FormCore {
    control: LoadingControl,
    loading_label: Option<&'static str>,
    next_token: u64,
    in_flight: Option<RequestToken>,
}

impl FormCore {
    fn new(control: LoadingControl, loading_label: Option<&'static str>) -> Self {
        Self {
            control,
            loading_label,
            next_token: 0,
            in_flight: None,
        }
    }

    fn reject(&self, error: UiError) -> Rejection {
        debug!(control = self.control.id(), "submission rejected: {}", error);
        Rejection {
            notice: Notice::from_error(&error),
            error,
            control: self.control.state(),
        }
    }

    fn ensure_idle(&self) -> Result<(), Rejection> {
        match self.in_flight {
            Some(_) => Err(self.reject(UiError::Busy)),
            None => Ok(()),
        }
    }

    fn start<R>(&mut self, request: R) -> PendingSubmission<R> {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.in_flight = Some(token);
        let control = self.control.set_loading(true, self.loading_label);
        debug!(control = self.control.id(), token = token.0, "submission started");
        PendingSubmission {
            token,
            request,
            control,
        }
    }

    /// Release `token`. `None` means the token is stale.
    fn finish(&mut self, token: RequestToken) -> Option<ControlState> {
        if self.in_flight != Some(token) {
            debug!(control = self.control.id(), token = token.0, "discarding stale completion");
            return None;
        }
        self.in_flight = None;
        Some(self.control.set_loading(false, None))
    }

    fn reset(&mut self) -> ControlState {
        self.in_flight = None;
        self.control.set_loading(false, None)
    }
}

fn required(value: &str, message: &str) -> UiResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(UiError::Validation(message.to_string()))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional_id(value: &str, field: &str) -> UiResult<Option<i64>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| UiError::Validation(format!("Invalid {field}: '{trimmed}'")))
}

// ============================================================================
// Create circuit
// ============================================================================

/// Raw field values of the circuit creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CircuitFields {
    pub title: String,
    pub qiskit_code: String,
}

/// Controller for the "create circuit" form.
#[derive(Debug)]
pub struct CreateCircuitForm {
    core: FormCore,
}

impl CreateCircuitForm {
    /// Element id of the submit button.
    pub const SUBMIT_ID: &'static str = "create-circuit-btn";

    /// Create the controller with the default submit button.
    pub fn new() -> Self {
        Self::with_control(LoadingControl::register(Self::SUBMIT_ID, "Create Circuit"))
    }

    /// Create the controller around an already registered control.
    pub fn with_control(control: LoadingControl) -> Self {
        Self {
            core: FormCore::new(control, Some("Creating...")),
        }
    }

    pub fn control(&self) -> &LoadingControl {
        &self.core.control
    }

    pub fn is_busy(&self) -> bool {
        self.core.in_flight.is_some()
    }

    /// Validate the fields and take the in-flight token.
    pub fn begin(
        &mut self,
        fields: &CircuitFields,
    ) -> Result<PendingSubmission<CreateCircuitRequest>, Rejection> {
        self.core.ensure_idle()?;
        let request = Self::validate(fields).map_err(|e| self.core.reject(e))?;
        Ok(self.core.start(request))
    }

    fn validate(fields: &CircuitFields) -> UiResult<CreateCircuitRequest> {
        let title = required(&fields.title, "Please enter a circuit title")?;
        if fields.qiskit_code.trim().is_empty() {
            return Err(UiError::Validation("Please enter Qiskit code".into()));
        }
        Ok(CreateCircuitRequest {
            title,
            qiskit_code: fields.qiskit_code.clone(),
        })
    }

    /// Release the token and map the backend's answer.
    pub fn complete(
        &mut self,
        token: RequestToken,
        result: UiResult<CreatedCircuit>,
    ) -> SubmitOutcome {
        let Some(control) = self.core.finish(token) else {
            return SubmitOutcome::stale(self.core.control.state());
        };
        match result {
            Ok(created) => {
                info!(id = created.id, "circuit created");
                SubmitOutcome {
                    status: OutcomeStatus::Succeeded,
                    notice: Some(Notice::success("Circuit created successfully!")),
                    control,
                    update: Some(ViewUpdate::Navigate {
                        path: circuit_detail_path(created.id),
                    }),
                    clear_fields: Vec::new(),
                }
            }
            Err(err) => {
                warn!("circuit creation failed: {}", err);
                SubmitOutcome::failed(control, &err)
            }
        }
    }

    /// Run a whole submission against `api`.
    pub async fn submit(&mut self, api: &dyn CircuitApi, fields: &CircuitFields) -> SubmitOutcome {
        self.submit_with(api, fields, |_| {}).await
    }

    /// Like [`submit`](Self::submit), calling `on_start` with the loading
    /// control state once the request is about to be sent.
    pub async fn submit_with(
        &mut self,
        api: &dyn CircuitApi,
        fields: &CircuitFields,
        on_start: impl FnOnce(&ControlState),
    ) -> SubmitOutcome {
        let pending = match self.begin(fields) {
            Ok(pending) => pending,
            Err(rejection) => return rejection.into(),
        };
        on_start(&pending.control);
        let result = api.create_circuit(&pending.request).await;
        self.complete(pending.token, result)
    }

    /// Tear down: forget the in-flight request and restore the control.
    pub fn reset(&mut self) -> ControlState {
        self.core.reset()
    }
}

impl Default for CreateCircuitForm {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Ask question
// ============================================================================

/// Raw field values of the question form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFields {
    pub question: String,
    /// Selected circuit id; empty when none is selected.
    pub circuit_id: String,
}

/// Controller for the "ask a question" form.
#[derive(Debug)]
pub struct AskQuestionForm {
    core: FormCore,
}

impl AskQuestionForm {
    /// Element id of the submit button.
    pub const SUBMIT_ID: &'static str = "ask-question-btn";

    pub fn new() -> Self {
        Self::with_control(LoadingControl::register(Self::SUBMIT_ID, "Ask Question"))
    }

    pub fn with_control(control: LoadingControl) -> Self {
        Self {
            core: FormCore::new(control, Some("Thinking...")),
        }
    }

    pub fn control(&self) -> &LoadingControl {
        &self.core.control
    }

    pub fn is_busy(&self) -> bool {
        self.core.in_flight.is_some()
    }

    pub fn begin(
        &mut self,
        fields: &QuestionFields,
    ) -> Result<PendingSubmission<AskQuestionRequest>, Rejection> {
        self.core.ensure_idle()?;
        let request = Self::validate(fields).map_err(|e| self.core.reject(e))?;
        Ok(self.core.start(request))
    }

    fn validate(fields: &QuestionFields) -> UiResult<AskQuestionRequest> {
        Ok(AskQuestionRequest {
            question: required(&fields.question, "Please enter a question")?,
            circuit_id: optional_id(&fields.circuit_id, "circuit selection")?,
        })
    }

    pub fn complete(
        &mut self,
        token: RequestToken,
        result: UiResult<QuestionAnswerExchange>,
    ) -> SubmitOutcome {
        let Some(control) = self.core.finish(token) else {
            return SubmitOutcome::stale(self.core.control.state());
        };
        match result {
            Ok(exchange) => {
                info!(session_id = exchange.session_id, "answer received");
                SubmitOutcome {
                    status: OutcomeStatus::Succeeded,
                    notice: Some(Notice::success("Answer received!")),
                    control,
                    update: Some(ExchangeView::from(exchange).into_update()),
                    clear_fields: vec!["question"],
                }
            }
            Err(err) => {
                warn!("question failed: {}", err);
                SubmitOutcome::failed(control, &err)
            }
        }
    }

    pub async fn submit(
        &mut self,
        api: &dyn CircuitApi,
        fields: &QuestionFields,
    ) -> SubmitOutcome {
        self.submit_with(api, fields, |_| {}).await
    }

    pub async fn submit_with(
        &mut self,
        api: &dyn CircuitApi,
        fields: &QuestionFields,
        on_start: impl FnOnce(&ControlState),
    ) -> SubmitOutcome {
        let pending = match self.begin(fields) {
            Ok(pending) => pending,
            Err(rejection) => return rejection.into(),
        };
        on_start(&pending.control);
        let result = api.ask_question(&pending.request).await;
        self.complete(pending.token, result)
    }

    pub fn reset(&mut self) -> ControlState {
        self.core.reset()
    }
}

impl Default for AskQuestionForm {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Session detail
// ============================================================================

/// Controller for the stored-session detail view.
#[derive(Debug)]
pub struct SessionView {
    core: FormCore,
}

impl SessionView {
    /// Element id of the reload button.
    pub const SUBMIT_ID: &'static str = "load-session-btn";

    pub fn new() -> Self {
        Self {
            core: FormCore::new(
                LoadingControl::register(Self::SUBMIT_ID, "Load Session"),
                None,
            ),
        }
    }

    pub fn control(&self) -> &LoadingControl {
        &self.core.control
    }

    pub fn begin(&mut self, session_id: i64) -> Result<PendingSubmission<i64>, Rejection> {
        self.core.ensure_idle()?;
        if session_id <= 0 {
            return Err(self
                .core
                .reject(UiError::Validation(format!("Invalid session id: {session_id}"))));
        }
        Ok(self.core.start(session_id))
    }

    pub fn complete(
        &mut self,
        token: RequestToken,
        session_id: i64,
        result: UiResult<SessionDetail>,
    ) -> SubmitOutcome {
        let Some(control) = self.core.finish(token) else {
            return SubmitOutcome::stale(self.core.control.state());
        };
        match result {
            Ok(detail) => SubmitOutcome {
                status: OutcomeStatus::Succeeded,
                notice: None,
                control,
                update: Some(ExchangeView::from_session(session_id, detail).into_update()),
                clear_fields: Vec::new(),
            },
            Err(err) => {
                warn!(session_id, "loading session failed: {}", err);
                SubmitOutcome::failed(control, &err)
            }
        }
    }

    pub async fn load(&mut self, api: &dyn CircuitApi, session_id: i64) -> SubmitOutcome {
        self.load_with(api, session_id, |_| {}).await
    }

    pub async fn load_with(
        &mut self,
        api: &dyn CircuitApi,
        session_id: i64,
        on_start: impl FnOnce(&ControlState),
    ) -> SubmitOutcome {
        let pending = match self.begin(session_id) {
            Ok(pending) => pending,
            Err(rejection) => return rejection.into(),
        };
        on_start(&pending.control);
        let result = api.get_session(pending.request).await;
        self.complete(pending.token, pending.request, result)
    }

    pub fn reset(&mut self) -> ControlState {
        self.core.reset()
    }
}

impl Default for SessionView {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Circuit selector
// ============================================================================

/// Controller that loads the user's circuits into the question form's selector.
#[derive(Debug)]
pub struct CircuitSelector {
    core: FormCore,
    circuits: Vec<CircuitSummary>,
}

impl CircuitSelector {
    /// Element id of the refresh button.
    pub const SUBMIT_ID: &'static str = "refresh-circuits-btn";

    pub fn new() -> Self {
        Self {
            core: FormCore::new(LoadingControl::register(Self::SUBMIT_ID, "Refresh"), None),
            circuits: Vec::new(),
        }
    }

    pub fn control(&self) -> &LoadingControl {
        &self.core.control
    }

    /// Circuits from the last successful load.
    pub fn circuits(&self) -> &[CircuitSummary] {
        &self.circuits
    }

    /// Whether `id` is one of the loaded circuits.
    pub fn contains(&self, id: i64) -> bool {
        self.circuits.iter().any(|c| c.id == id)
    }

    pub fn begin(&mut self) -> Result<PendingSubmission<()>, Rejection> {
        self.core.ensure_idle()?;
        Ok(self.core.start(()))
    }

    pub fn complete(
        &mut self,
        token: RequestToken,
        result: UiResult<Vec<CircuitSummary>>,
    ) -> SubmitOutcome {
        let Some(control) = self.core.finish(token) else {
            return SubmitOutcome::stale(self.core.control.state());
        };
        match result {
            Ok(circuits) => {
                debug!(count = circuits.len(), "circuits loaded");
                self.circuits = circuits.clone();
                SubmitOutcome {
                    status: OutcomeStatus::Succeeded,
                    notice: None,
                    control,
                    update: Some(ViewUpdate::ShowCircuits {
                        markup: render_circuit_options(&circuits),
                        circuits,
                    }),
                    clear_fields: Vec::new(),
                }
            }
            Err(err) => {
                warn!("loading circuits failed: {}", err);
                SubmitOutcome::failed(control, &err)
            }
        }
    }

    pub async fn load(&mut self, api: &dyn CircuitApi) -> SubmitOutcome {
        self.load_with(api, |_| {}).await
    }

    pub async fn load_with(
        &mut self,
        api: &dyn CircuitApi,
        on_start: impl FnOnce(&ControlState),
    ) -> SubmitOutcome {
        let pending = match self.begin() {
            Ok(pending) => pending,
            Err(rejection) => return rejection.into(),
        };
        on_start(&pending.control);
        let result = api.list_circuits().await;
        self.complete(pending.token, result)
    }

    pub fn reset(&mut self) -> ControlState {
        self.core.reset()
    }
}

impl Default for CircuitSelector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Parse circuit
// ============================================================================

/// Controller for the "parse circuit" button on a circuit's page.
#[derive(Debug)]
pub struct ParseCircuitAction {
    core: FormCore,
}

impl ParseCircuitAction {
    /// Element id of the parse button.
    pub const SUBMIT_ID: &'static str = "parse-circuit-btn";

    pub fn new() -> Self {
        Self {
            core: FormCore::new(
                LoadingControl::register(Self::SUBMIT_ID, "Parse Circuit"),
                Some("Parsing..."),
            ),
        }
    }

    pub fn control(&self) -> &LoadingControl {
        &self.core.control
    }

    pub fn begin(&mut self, circuit_id: i64) -> Result<PendingSubmission<i64>, Rejection> {
        self.core.ensure_idle()?;
        if circuit_id <= 0 {
            return Err(self
                .core
                .reject(UiError::Validation(format!("Invalid circuit id: {circuit_id}"))));
        }
        Ok(self.core.start(circuit_id))
    }

    pub fn complete(
        &mut self,
        token: RequestToken,
        circuit_id: i64,
        result: UiResult<ParsedCircuit>,
    ) -> SubmitOutcome {
        let Some(control) = self.core.finish(token) else {
            return SubmitOutcome::stale(self.core.control.state());
        };
        match result {
            Ok(parsed) => {
                info!(circuit_id, gates = parsed.num_gates, "circuit parsed");
                let message = if parsed.status.trim().is_empty() {
                    "Circuit parsed successfully".to_string()
                } else {
                    parsed.status.clone()
                };
                SubmitOutcome {
                    status: OutcomeStatus::Succeeded,
                    notice: Some(Notice::success(message)),
                    control,
                    update: Some(ViewUpdate::ShowParse {
                        circuit_id,
                        markup: render_parse_summary(&parsed),
                        parsed,
                    }),
                    clear_fields: Vec::new(),
                }
            }
            Err(err) => {
                warn!(circuit_id, "parsing circuit failed: {}", err);
                SubmitOutcome::failed(control, &err)
            }
        }
    }

    pub async fn submit(&mut self, api: &dyn CircuitApi, circuit_id: i64) -> SubmitOutcome {
        self.submit_with(api, circuit_id, |_| {}).await
    }

    pub async fn submit_with(
        &mut self,
        api: &dyn CircuitApi,
        circuit_id: i64,
        on_start: impl FnOnce(&ControlState),
    ) -> SubmitOutcome {
        let pending = match self.begin(circuit_id) {
            Ok(pending) => pending,
            Err(rejection) => return rejection.into(),
        };
        on_start(&pending.control);
        let result = api.parse_circuit(pending.request).await;
        self.complete(pending.token, pending.request, result)
    }

    pub fn reset(&mut self) -> ControlState {
        self.core.reset()
    }
}

impl Default for ParseCircuitAction {
    fn default() -> Self {
        Self::new()
    }
}
