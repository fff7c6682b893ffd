//! Supplier models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A supplier that ingredients are purchased from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact_info: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating or updating a supplier
#[derive(Debug, Clone, Deserialize)]
pub struct SupplierInput {
    pub name: String,
    pub contact_info: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl SupplierInput {
    /// Normalize optional fields: blank strings become None, matching how
    /// the entry form submits untouched inputs.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Self {
            name: self.name.trim().to_string(),
            contact_info: clean(self.contact_info),
            email: clean(self.email),
            phone: clean(self.phone),
        }
    }
}
