//! SQLite-backed persistence gateway
//!
//! The store owns nothing but the location of the database file:
//! - Every logical operation opens its own connection (no pooling)
//! - Statements always use positional placeholders (`?1`, `?2`, ...)
//! - Failures are logged here and handed back to the caller
//!
//! `ensure_schema` must run once at process start, before any repository
//! call touches the tables.

mod schema;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use miette::Diagnostic;
use rusqlite::{Connection, Params, Row};
use thiserror::Error;

/// How long a connection waits on a locked database before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors raised by the persistence gateway
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("could not open database at {}", path.display())]
    #[diagnostic(
        code(stockroom::store::connection),
        help("check that the path points to a writable SQLite file, or run `stockroom init`")
    )]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("could not create database directory {}", path.display())]
    #[diagnostic(code(stockroom::store::directory))]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{context} failed")]
    #[diagnostic(code(stockroom::store::query))]
    Query {
        context: String,
        #[source]
        source: rusqlite::Error,
    },
}

impl StoreError {
    pub(crate) fn query(context: impl Into<String>, source: rusqlite::Error) -> Self {
        StoreError::Query {
            context: context.into(),
            source,
        }
    }
}

/// Handle on the relational store
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Create a store handle for the database file at `path`
    ///
    /// Nothing is opened until the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection to the database
    pub fn connect(&self) -> Result<Connection, StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| {
                    tracing::error!(path = %parent.display(), error = %source, "cannot create database directory");
                    StoreError::Directory {
                        path: parent.to_path_buf(),
                        source,
                    }
                })?;
            }
        }

        let conn = Connection::open(&self.path)
            .and_then(|conn| conn.busy_timeout(BUSY_TIMEOUT).map(|()| conn))
            .map_err(|source| {
                tracing::error!(path = %self.path.display(), error = %source, "cannot open database");
                StoreError::Connection {
                    path: self.path.clone(),
                    source,
                }
            })?;

        Ok(conn)
    }

    /// Run a write statement, returning the number of affected rows
    pub fn execute<P: Params>(&self, context: &str, sql: &str, params: P) -> Result<usize, StoreError> {
        let conn = self.connect()?;
        tracing::debug!(context, sql, "execute");

        conn.execute(sql, params).map_err(|source| {
            tracing::error!(context, sql, error = %source, "statement failed");
            StoreError::query(context, source)
        })
    }

    /// Run a select statement and map every returned row
    pub fn query<T, P, F>(&self, context: &str, sql: &str, params: P, map: F) -> Result<Vec<T>, StoreError>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.connect()?;
        tracing::debug!(context, sql, "query");

        let rows = conn
            .prepare(sql)
            .and_then(|mut stmt| {
                let rows = stmt.query_map(params, map)?.collect::<rusqlite::Result<Vec<T>>>();
                rows
            })
            .map_err(|source| {
                tracing::error!(context, sql, error = %source, "query failed");
                StoreError::query(context, source)
            })?;

        Ok(rows)
    }
}
