//! Shared types and models for the restaurant back-office platform
//!
//! This crate contains types shared between the backend and the browser
//! bundle (via WASM): domain models, the order status state machine,
//! validation helpers, and the interactive order/template form state.

pub mod forms;
pub mod models;
pub mod validation;

pub use forms::*;
pub use models::*;
pub use validation::*;
