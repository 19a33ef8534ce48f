#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Ferry Transport
//!
//! Cancellable source-to-sink record transport actions.
//!
//! A [`TransportAction`] wires one [`RecordSource`], an ordered chain of
//! [`TransportHandler`]s, and one [`RecordSink`] into a single observable
//! unit of work: [`TransportAction::execute`] reports the initial status
//! through a [`Progress`] observer, pumps the stream on a spawned worker,
//! performs exactly one terminal transition, reports it, and resolves the
//! returned [`ActionHandle`].
//!
//! The endpoint traits follow the Ports & Drivers split: this crate defines
//! what a source, sink, and handler are; concrete endpoints (database-backed,
//! in-memory) live in driver crates.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ferry_transport::{Progress, TransportAction, TransportKind};
//!
//! let mut action = TransportAction::new(id, source, sink)
//!     .with_kind(TransportKind::Move)
//!     .with_handler(binder);
//! action.setup().await?;
//!
//! let handle = action.execute(Arc::new(|status| println!("{status:?}")));
//! let result = handle.join().await?;
//! ```

pub mod action;
pub mod context;
pub mod error;
pub mod handler;
pub mod kind;
pub mod progress;
pub mod sink;
pub mod source;
pub mod state;
pub mod status;
pub mod transition;

pub use action::{ActionHandle, TransportAction};
pub use context::TransportContext;
pub use error::{BoxError, TransportError};
pub use handler::TransportHandler;
pub use kind::TransportKind;
pub use progress::Progress;
pub use sink::RecordSink;
pub use source::{RecordCursor, RecordSource};
pub use state::ActionState;
pub use status::{ActionResult, ActionStatus, ResultCode, StatusCode};
pub use transition::{can_transition, validate_transition};
