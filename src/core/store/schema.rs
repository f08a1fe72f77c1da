//! Database schema initialization

use super::{Store, StoreError};

impl Store {
    /// Create the inventory and supplier tables if they are missing
    ///
    /// Safe to call at every process start; existing rows are untouched.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS inventory (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                price REAL NOT NULL
            );

            CREATE TABLE IF NOT EXISTS suppliers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                contact_person TEXT,
                email TEXT,
                phone TEXT
            );
            "#,
        )
        .map_err(|source| {
            tracing::error!(path = %self.path().display(), error = %source, "schema creation failed");
            StoreError::query("creating schema", source)
        })?;

        tracing::debug!(path = %self.path().display(), "schema ready");
        Ok(())
    }
}
