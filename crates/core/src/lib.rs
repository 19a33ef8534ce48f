#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Ferry Core
//!
//! Core value types for the Ferry record-transport toolkit.
//!
//! This crate holds the vocabulary shared by every other Ferry crate and
//! nothing else: no I/O, no async, no orchestration.
//!
//! - [`ActionId`] — opaque validated identifier for one transport action
//! - [`Schema`] — ordered column names of one result set, shared by its rows
//! - [`Record`] — schema-tagged row of JSON values with named-column access

pub mod id;
pub mod record;

pub use id::{ActionId, ActionIdError};
pub use record::{Record, RecordError, Schema};
