//! Business logic services for the back-office server

pub mod dashboard;
pub mod ingredient;
pub mod order;
pub mod supplier;
pub mod template;

pub use dashboard::DashboardService;
pub use ingredient::IngredientService;
pub use order::OrderService;
pub use supplier::SupplierService;
pub use template::TemplateService;
