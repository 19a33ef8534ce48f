#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Database access layer for ferry transports.
//!
//! The traits here ([`DataProvider`], [`DbConnection`], [`DbCommand`])
//! describe a store the way a transport needs to see it: connections
//! that hand out commands, commands with named parameters associated to
//! source columns, schema introspection without row materialisation.
//!
//! On top of the traits sit the transport adapters: [`DbRecordSource`]
//! streams a query's rows, [`DbRecordSink`] executes a write command per
//! record, and [`BindParametersHandler`] carries values from records onto
//! the destination command's parameters. [`standard_transport`] wires the
//! three into the usual move-shaped action.

pub mod binding;
pub mod command;
pub mod conn;
pub mod error;
pub mod param;
pub mod pipeline;
pub mod provider;
pub mod sink;
pub mod source;

pub use binding::BindParametersHandler;
pub use command::{DbCommand, SharedCommand, share};
pub use conn::{ConnState, DbConnection, close_quietly};
pub use error::DataError;
pub use param::{ParamSet, ParamStyle, ParamType, Parameter};
pub use pipeline::standard_transport;
pub use provider::DataProvider;
pub use sink::DbRecordSink;
pub use source::DbRecordSource;
