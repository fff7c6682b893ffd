//! HTTP handlers for the back-office server

pub mod dashboard;
pub mod health;
pub mod ingredient;
pub mod order;
pub mod supplier;
pub mod template;

pub use dashboard::*;
pub use health::*;
pub use ingredient::*;
pub use order::*;
pub use supplier::*;
pub use template::*;
