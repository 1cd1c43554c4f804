//! Typed request builder for the accounts API (balances, IBAN lookup,
//! payment-card issuance and lifecycle).
//!
//! # Overview
//! Builds `HttpRequest` values from `Operation` values without touching the
//! network (host-does-IO pattern). The caller executes the HTTP round-trip,
//! which keeps the core deterministic and testable.
//!
//! # Design
//! - `AccountsApiRouter` is stateless; it holds only the injected base URL.
//! - `Operation` is a closed enum; method, path and parameters are exhaustive
//!   matches over it.
//! - GET parameters travel in the query string, POST/PUT parameters in a JSON
//!   body.
//! - Parameter records are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod config;
pub mod encoding;
pub mod error;
pub mod http;
pub mod operation;
pub mod router;
pub mod types;

pub use config::{RouterConfig, DEFAULT_BASE_URL};
pub use error::RouterError;
pub use http::{HttpMethod, HttpRequest, ParameterEncoding};
pub use operation::Operation;
pub use router::AccountsApiRouter;
pub use types::{
    CardStatus, CreatePaymentCardRequest, DeliveryAddress, DeliveryType, Money, OrderDirection,
    PaymentCardsFilter, UpdatePaymentCardLimitRequest,
};
