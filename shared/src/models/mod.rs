//! Domain models for the restaurant back-office platform

mod ingredient;
mod order;
mod supplier;
mod template;

pub use ingredient::*;
pub use order::*;
pub use supplier::*;
pub use template::*;
