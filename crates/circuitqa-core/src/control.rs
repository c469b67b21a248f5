//! Loading state for submit controls.
//!
//! Each control captures its label once, when it is registered. Entering the
//! loading state disables it and swaps the label for a spinner; leaving the
//! loading state puts the captured label back verbatim.

use serde::Serialize;

use crate::render::{Markup, escape_html};

/// Label shown next to the spinner when no custom label is given.
pub const DEFAULT_LOADING_LABEL: &str = "Loading...";

const SPINNER: &str = r#"<span class="spinner-border spinner-border-sm" role="status" aria-hidden="true"></span>"#;

/// Visible state of a control, applied by the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlState {
    /// Element id of the control.
    pub id: String,
    /// Whether the control is disabled.
    pub disabled: bool,
    /// Whether a request is running.
    pub loading: bool,
    /// Plain-text label (what a terminal shows).
    pub label: String,
    /// Label markup (what a page shows).
    pub markup: Markup,
}

/// A submit control with its original label.
#[derive(Debug, Clone)]
pub struct LoadingControl {
    id: String,
    original_label: String,
    loading_label: Option<String>,
}

impl LoadingControl {
    /// Register a control, capturing its current label.
    pub fn register(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            original_label: label.into(),
            loading_label: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The label captured at registration.
    pub fn original_label(&self) -> &str {
        &self.original_label
    }

    pub fn is_loading(&self) -> bool {
        self.loading_label.is_some()
    }

    /// Enter or leave the loading state and return the resulting state.
    ///
    /// `custom_label` is only used when entering the loading state.
    pub fn set_loading(&mut self, loading: bool, custom_label: Option<&str>) -> ControlState {
        self.loading_label = if loading {
            Some(custom_label.unwrap_or(DEFAULT_LOADING_LABEL).to_string())
        } else {
            None
        };
        self.state()
    }

    /// Current visible state.
    pub fn state(&self) -> ControlState {
        match &self.loading_label {
            Some(label) => ControlState {
                id: self.id.clone(),
                disabled: true,
                loading: true,
                label: label.clone(),
                markup: Markup::from_trusted(format!("{SPINNER} {}", escape_html(label))),
            },
            None => ControlState {
                id: self.id.clone(),
                disabled: false,
                loading: false,
                label: self.original_label.clone(),
                markup: Markup::from_trusted(escape_html(&self.original_label)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_round_trip_restores_label() {
        let mut btn = LoadingControl::register("submit-btn", "Create Circuit <b>now</b>");
        let before = btn.state();

        let loading = btn.set_loading(true, None);
        assert!(loading.disabled);
        assert!(loading.loading);
        assert_eq!(loading.label, DEFAULT_LOADING_LABEL);
        assert!(loading.markup.as_str().contains("spinner-border"));

        let after = btn.set_loading(false, None);
        assert_eq!(after, before);
        assert_eq!(after.label, "Create Circuit <b>now</b>");
    }

    #[test]
    fn test_custom_loading_label() {
        let mut btn = LoadingControl::register("ask-btn", "Ask");
        let state = btn.set_loading(true, Some("Thinking..."));
        assert_eq!(state.label, "Thinking...");
        assert!(state.markup.as_str().ends_with("Thinking..."));
    }

    #[test]
    fn test_leaving_twice_is_harmless() {
        let mut btn = LoadingControl::register("b", "Go");
        btn.set_loading(false, None);
        let state = btn.set_loading(false, Some("ignored"));
        assert_eq!(state.label, "Go");
        assert!(!state.disabled);
    }
}
