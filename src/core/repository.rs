//! Generic entity repository
//!
//! One repository serves every entity kind. A kind describes its table
//! through the [`Record`] trait and the repository derives the SQL from
//! that description; user data only ever travels as bound parameters.

use std::marker::PhantomData;

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row};

use crate::core::store::{Store, StoreError};
use crate::core::validation::FormInput;

/// A persisted entity kind with a store-assigned integer id
pub trait Record: Sized + Clone {
    /// Validated, id-less column values
    type Fields;

    /// Raw text form the fields are validated from
    type Input: FormInput<Fields = Self::Fields>;

    /// Table name
    const TABLE: &'static str;

    /// Non-id columns, in the order `bind` produces values
    const COLUMNS: &'static [&'static str];

    /// Human-readable kind name ("item", "supplier")
    const LABEL: &'static str;

    fn id(&self) -> i64;

    fn name(&self) -> &str;

    /// Build a record from a row laid out as `id, COLUMNS...`
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Column values for an insert or update
    fn bind(fields: &Self::Fields) -> Vec<Value>;

    /// Form pre-filled with this record's current values
    fn to_input(&self) -> Self::Input;
}

/// Repository over one entity kind
#[derive(Debug, Clone)]
pub struct Repository<R> {
    store: Store,
    _kind: PhantomData<R>,
}

impl<R: Record> Repository<R> {
    pub fn new(store: &Store) -> Self {
        Self {
            store: store.clone(),
            _kind: PhantomData,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", R::COLUMNS.join(", "), R::TABLE)
    }

    /// Every row of the table, in the order the store returns them
    pub fn list_all(&self) -> Result<Vec<R>, StoreError> {
        let rows = self.store.query(
            &format!("listing {}s", R::LABEL),
            &Self::select_sql(),
            [],
            R::from_row,
        )?;
        tracing::debug!(kind = R::LABEL, count = rows.len(), "listed");
        Ok(rows)
    }

    /// Look up a single record by id
    pub fn find(&self, id: i64) -> Result<Option<R>, StoreError> {
        let sql = format!("{} WHERE id = ?1", Self::select_sql());
        let mut rows = self.store.query(
            &format!("loading {} {}", R::LABEL, id),
            &sql,
            params![id],
            R::from_row,
        )?;
        Ok(rows.pop())
    }

    /// Insert validated fields; the new id is observed by listing again
    pub fn insert(&self, fields: &R::Fields) -> Result<(), StoreError> {
        let placeholders: Vec<String> = (1..=R::COLUMNS.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT INTO {}({}) VALUES ({})",
            R::TABLE,
            R::COLUMNS.join(", "),
            placeholders.join(", ")
        );

        self.store.execute(
            &format!("adding {}", R::LABEL),
            &sql,
            params_from_iter(R::bind(fields)),
        )?;
        Ok(())
    }

    /// Overwrite every non-id column of record `id`
    ///
    /// A missing id is not an error; nothing changes.
    pub fn update(&self, id: i64, fields: &R::Fields) -> Result<(), StoreError> {
        let assignments: Vec<String> = R::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{} = ?{}", col, i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            R::TABLE,
            assignments.join(", "),
            R::COLUMNS.len() + 1
        );

        let mut values = R::bind(fields);
        values.push(Value::Integer(id));

        let affected = self.store.execute(
            &format!("updating {} {}", R::LABEL, id),
            &sql,
            params_from_iter(values),
        )?;
        tracing::debug!(kind = R::LABEL, id, affected, "updated");
        Ok(())
    }

    /// Delete record `id`; a missing id is silently ignored
    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", R::TABLE);
        let affected = self.store.execute(
            &format!("deleting {} {}", R::LABEL, id),
            &sql,
            params![id],
        )?;
        tracing::debug!(kind = R::LABEL, id, affected, "deleted");
        Ok(())
    }
}
