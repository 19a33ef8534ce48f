#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Ferry Memory Database Driver
//!
//! In-memory table store implementing the [`ferry_db`] traits.
//!
//! Tables live in a `DashMap` shared by every connection the provider
//! opens, so a transport can read from one table and append to another
//! through separate commands on the same store.
//!
//! The command text grammar is deliberately tiny:
//!
//! 1. `read <table>` -- a query command; [`schema`](ferry_db::DbCommand::schema)
//!    and [`query`](ferry_db::DbCommand::query) work, `execute` does not
//! 2. `append <table>` -- a write command; `execute` appends one row
//!    built from the registered parameters, matched by column
//!
//! Suitable for tests and single-process pipelines where durability is
//! not required.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ferry_db::{DataProvider, DbCommand, DbConnection};
//! use ferry_db_memory::MemoryProvider;
//! use ferry_transport::RecordCursor;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = MemoryProvider::new();
//! provider.create_table("orders", ["id", "amount"]);
//!
//! let conn = provider.connect().await?;
//! let mut cmd = conn.command("read orders").await?;
//! let mut cursor = cmd.query().await?;
//! while let Some(_record) = cursor.next_record().await? {
//!     // move the record...
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use ferry_core::{Record, Schema};
use ferry_db::{
    ConnState, DataError, DataProvider, DbCommand, DbConnection, ParamSet, ParamStyle, Parameter,
};
use ferry_transport::{RecordCursor, TransportError};

/// A named table: fixed schema plus appendable rows.
#[derive(Debug, Clone)]
struct MemoryTable {
    schema: Schema,
    rows: Vec<Vec<Value>>,
}

/// What a parsed command text does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Read,
    Append,
}

fn parse_text(text: &str) -> Result<(Verb, String), DataError> {
    let mut parts = text.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("read"), Some(table), None) => Ok((Verb::Read, table.to_owned())),
        (Some("append"), Some(table), None) => Ok((Verb::Append, table.to_owned())),
        _ => Err(DataError::query(format!(
            "unsupported command text '{text}'"
        ))),
    }
}

fn no_such_table(table: &str) -> DataError {
    DataError::query(format!("no such table '{table}'"))
}

/// In-memory [`DataProvider`].
///
/// All connections opened by one provider share its tables. Parameter
/// names follow the provider's [`ParamStyle`], `@column` by default.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    tables: Arc<DashMap<String, MemoryTable>>,
    style: ParamStyle,
}

impl MemoryProvider {
    /// Creates an empty store with `@column` parameter naming.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches the parameter naming scheme.
    #[must_use]
    pub fn with_style(mut self, style: ParamStyle) -> Self {
        self.style = style;
        self
    }

    /// Creates (or replaces) a table with the given columns and no rows.
    pub fn create_table<I, S>(&self, name: impl Into<String>, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables.insert(
            name.into(),
            MemoryTable {
                schema: Schema::new(columns),
                rows: Vec::new(),
            },
        );
    }

    /// Appends pre-built rows to a table.
    ///
    /// # Errors
    ///
    /// Returns a query error when the table does not exist or a row's
    /// arity does not match the table schema.
    pub fn seed_rows(&self, table: &str, rows: Vec<Vec<Value>>) -> Result<(), DataError> {
        let mut entry = self.tables.get_mut(table).ok_or_else(|| no_such_table(table))?;
        let width = entry.schema.len();
        for row in rows {
            if row.len() != width {
                return Err(DataError::query(format!(
                    "row arity {} does not match schema arity {width}",
                    row.len()
                )));
            }
            entry.rows.push(row);
        }
        Ok(())
    }

    /// Snapshot of a table's rows, in insertion order.
    #[must_use]
    pub fn table_rows(&self, table: &str) -> Option<Vec<Vec<Value>>> {
        self.tables.get(table).map(|entry| entry.rows.clone())
    }
}

#[async_trait]
impl DataProvider for MemoryProvider {
    fn param_style(&self) -> ParamStyle {
        self.style
    }

    async fn connect(&self) -> Result<Box<dyn DbConnection>, DataError> {
        Ok(Box::new(MemoryConnection {
            tables: Arc::clone(&self.tables),
            open: Arc::new(AtomicBool::new(true)),
        }))
    }

    async fn connect_to(&self, dsn: &str) -> Result<Box<dyn DbConnection>, DataError> {
        if !dsn.starts_with("memory:") {
            return Err(DataError::connection(format!("unsupported dsn '{dsn}'")));
        }
        self.connect().await
    }
}

/// Connection into the provider's shared table store.
///
/// Closing flips a flag shared with the commands and cursors created
/// here, so work on a closed session fails instead of reading stale
/// state.
struct MemoryConnection {
    tables: Arc<DashMap<String, MemoryTable>>,
    open: Arc<AtomicBool>,
}

#[async_trait]
impl DbConnection for MemoryConnection {
    fn state(&self) -> ConnState {
        if self.open.load(Ordering::SeqCst) {
            ConnState::Open
        } else {
            ConnState::Closed
        }
    }

    async fn command(&self, text: &str) -> Result<Box<dyn DbCommand>, DataError> {
        if !self.open.load(Ordering::SeqCst) {
            return Err(DataError::Closed);
        }
        let (verb, table) = parse_text(text)?;
        Ok(Box::new(MemoryCommand {
            tables: Arc::clone(&self.tables),
            open: Arc::clone(&self.open),
            text: text.to_owned(),
            verb,
            table,
            params: ParamSet::new(),
        }))
    }

    async fn close(&mut self) -> Result<(), DataError> {
        self.open.store(false, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug)]
struct MemoryCommand {
    tables: Arc<DashMap<String, MemoryTable>>,
    open: Arc<AtomicBool>,
    text: String,
    verb: Verb,
    table: String,
    params: ParamSet,
}

impl MemoryCommand {
    fn ensure_open(&self) -> Result<(), DataError> {
        if self.open.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DataError::Closed)
        }
    }
}

#[async_trait]
impl DbCommand for MemoryCommand {
    fn text(&self) -> &str {
        &self.text
    }

    fn params(&self) -> &[Parameter] {
        self.params.as_slice()
    }

    fn add_param(&mut self, param: Parameter) -> Result<(), DataError> {
        self.params.add(param)
    }

    fn set_param(&mut self, name: &str, value: Value) -> Result<(), DataError> {
        self.params.set(name, value)
    }

    fn set_param_at(&mut self, index: usize, value: Value) -> Result<(), DataError> {
        self.params.set_at(index, value)
    }

    async fn schema(&mut self) -> Result<Schema, DataError> {
        self.ensure_open()?;
        let entry = self
            .tables
            .get(&self.table)
            .ok_or_else(|| no_such_table(&self.table))?;
        Ok(entry.schema.clone())
    }

    async fn query(&mut self) -> Result<Box<dyn RecordCursor>, DataError> {
        self.ensure_open()?;
        if self.verb != Verb::Read {
            return Err(DataError::query(format!("'{}' is not a query", self.text)));
        }
        let schema = {
            let entry = self
                .tables
                .get(&self.table)
                .ok_or_else(|| no_such_table(&self.table))?;
            Arc::new(entry.schema.clone())
        };
        Ok(Box::new(MemoryCursor {
            tables: Arc::clone(&self.tables),
            open: Arc::clone(&self.open),
            table: self.table.clone(),
            schema,
            index: 0,
        }))
    }

    async fn execute(&mut self) -> Result<u64, DataError> {
        self.ensure_open()?;
        if self.verb != Verb::Append {
            return Err(DataError::query(format!(
                "'{}' is not executable",
                self.text
            )));
        }
        let mut entry = self
            .tables
            .get_mut(&self.table)
            .ok_or_else(|| no_such_table(&self.table))?;

        // The row takes the table's column order, not registration order.
        let mut row = Vec::with_capacity(entry.schema.len());
        for column in entry.schema.columns() {
            let param = self
                .params
                .as_slice()
                .iter()
                .find(|p| p.column() == column)
                .ok_or_else(|| {
                    DataError::query(format!("no parameter bound for column '{column}'"))
                })?;
            row.push(param.value().clone());
        }
        entry.rows.push(row);
        Ok(1)
    }
}

/// Index-based cursor over a table's rows.
///
/// Rows are fetched one at a time, so appends racing the read extend
/// the iteration instead of invalidating it.
struct MemoryCursor {
    tables: Arc<DashMap<String, MemoryTable>>,
    open: Arc<AtomicBool>,
    table: String,
    schema: Arc<Schema>,
    index: usize,
}

#[async_trait]
impl RecordCursor for MemoryCursor {
    async fn next_record(&mut self) -> Result<Option<Record>, TransportError> {
        if !self.open.load(Ordering::SeqCst) {
            return Err(TransportError::source(DataError::Closed));
        }
        let entry = self
            .tables
            .get(&self.table)
            .ok_or_else(|| TransportError::source(no_such_table(&self.table)))?;
        let Some(row) = entry.rows.get(self.index) else {
            return Ok(None);
        };
        self.index += 1;
        let record =
            Record::new(Arc::clone(&self.schema), row.clone()).map_err(TransportError::source)?;
        Ok(Some(record))
    }
}
