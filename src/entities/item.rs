//! Inventory item entity

use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use crate::core::repository::Record;
use crate::core::validation::{
    non_negative_decimal, non_negative_integer, parse_decimal, parse_integer, required_text,
    FormInput, ValidationError,
};

/// A stocked item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

impl Item {
    /// Stock value of this line (quantity times unit price)
    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

/// Validated item fields, without the id
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

/// Item form as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemInput {
    pub name: String,
    pub quantity: String,
    pub price: String,
}

impl FormInput for ItemInput {
    type Fields = ItemFields;

    fn validate(&self) -> Result<ItemFields, ValidationError> {
        let name = required_text("name", &self.name)?;
        let quantity = parse_integer("quantity", &self.quantity)?;
        let price = parse_decimal("price", &self.price)?;

        Ok(ItemFields {
            name,
            quantity: non_negative_integer("quantity", quantity)?,
            price: non_negative_decimal("price", price)?,
        })
    }
}

impl Record for Item {
    type Fields = ItemFields;
    type Input = ItemInput;

    const TABLE: &'static str = "inventory";
    const COLUMNS: &'static [&'static str] = &["name", "quantity", "price"];
    const LABEL: &'static str = "item";

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Item {
            id: row.get(0)?,
            name: row.get(1)?,
            quantity: row.get(2)?,
            price: row.get(3)?,
        })
    }

    fn bind(fields: &ItemFields) -> Vec<Value> {
        vec![
            Value::Text(fields.name.clone()),
            Value::Integer(fields.quantity),
            Value::Real(fields.price),
        ]
    }

    fn to_input(&self) -> ItemInput {
        ItemInput {
            name: self.name.clone(),
            quantity: self.quantity.to_string(),
            price: self.price.to_string(),
        }
    }
}
