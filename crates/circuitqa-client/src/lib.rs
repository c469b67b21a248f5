//! HTTP client for the Circuit Q&A backend.
//!
//! [`ApiClient`] implements [`circuitqa_core::CircuitApi`], so the form
//! controllers can be driven against a live backend:
//!
//! ```rust,no_run
//! use circuitqa_client::{ApiClient, ClientConfig};
//! use circuitqa_core::{CircuitFields, CreateCircuitForm};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(
//!     ClientConfig::new("http://127.0.0.1:8000").with_cookies("csrftoken=abc123"),
//! )?;
//!
//! let mut form = CreateCircuitForm::new();
//! let fields = CircuitFields {
//!     title: "Bell".into(),
//!     qiskit_code: "qc.h(0)\nqc.cx(0, 1)".into(),
//! };
//! let outcome = form.submit(&client, &fields).await;
//! println!("{:?}", outcome.update);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;

pub use api::{ApiClient, ClientConfig, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult};
