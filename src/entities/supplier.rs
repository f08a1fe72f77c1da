//! Supplier entity

use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use crate::core::repository::Record;
use crate::core::validation::{optional_text, required_text, FormInput, ValidationError};

/// A supplier with optional contact details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Validated supplier fields, without the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierFields {
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Supplier form as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierInput {
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
}

impl FormInput for SupplierInput {
    type Fields = SupplierFields;

    // Only the name is checked; contact details are free text.
    fn validate(&self) -> Result<SupplierFields, ValidationError> {
        Ok(SupplierFields {
            name: required_text("supplier name", &self.name)?,
            contact_person: optional_text(&self.contact_person),
            email: optional_text(&self.email),
            phone: optional_text(&self.phone),
        })
    }
}

fn text_or_null(value: &Option<String>) -> Value {
    match value {
        Some(text) => Value::Text(text.clone()),
        None => Value::Null,
    }
}

impl Record for Supplier {
    type Fields = SupplierFields;
    type Input = SupplierInput;

    const TABLE: &'static str = "suppliers";
    const COLUMNS: &'static [&'static str] = &["name", "contact_person", "email", "phone"];
    const LABEL: &'static str = "supplier";

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Supplier {
            id: row.get(0)?,
            name: row.get(1)?,
            contact_person: row.get(2)?,
            email: row.get(3)?,
            phone: row.get(4)?,
        })
    }

    fn bind(fields: &SupplierFields) -> Vec<Value> {
        vec![
            Value::Text(fields.name.clone()),
            text_or_null(&fields.contact_person),
            text_or_null(&fields.email),
            text_or_null(&fields.phone),
        ]
    }

    fn to_input(&self) -> SupplierInput {
        SupplierInput {
            name: self.name.clone(),
            contact_person: self.contact_person.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            phone: self.phone.clone().unwrap_or_default(),
        }
    }
}
