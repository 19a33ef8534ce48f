//! The transport action: orchestrator and asynchronous handle.

use std::sync::Arc;

use ferry_core::ActionId;
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::context::TransportContext;
use crate::error::TransportError;
use crate::handler::TransportHandler;
use crate::kind::TransportKind;
use crate::progress::Progress;
use crate::sink::RecordSink;
use crate::source::RecordSource;
use crate::state::ActionState;
use crate::status::{ActionResult, ActionStatus, ResultCode, StatusCode};

/// One cancellable unit of work moving records from a source to a sink
/// through an ordered handler chain.
///
/// An action owns its source, sink, and handlers for exactly one execution.
/// The flow is:
///
/// 1. The owner builds the action and, when the chain needs preparation,
///    runs [`setup`](Self::setup); on a setup error the owner must not
///    proceed to execute.
/// 2. [`execute`](Self::execute) consumes the action: it reports the
///    `NotStarted` snapshot synchronously, spawns the worker task, and
///    returns an [`ActionHandle`] immediately.
/// 3. The worker pulls each record, folds it through the handler chain in
///    order, checks the cancellation token, and writes to the sink.
/// 4. Exactly one terminal transition follows: completion maps to
///    `(Done, Success)`, the cancellation signal to `(Cancelled, Cancelled)`,
///    any other error to `(Done, Failure)`. The terminal status is reported
///    before the handle resolves.
///
/// Consuming the action in `execute` is what enforces the single-use
/// contract: re-running a transport means rebuilding the action, which also
/// re-executes the source query.
pub struct TransportAction {
    id: ActionId,
    kind: TransportKind,
    context: TransportContext,
    source: Box<dyn RecordSource>,
    handlers: Vec<Box<dyn TransportHandler>>,
    sink: Box<dyn RecordSink>,
}

impl TransportAction {
    /// Create an action over a source and a sink, with an empty handler
    /// chain, a default context, and kind [`TransportKind::Empty`].
    #[must_use]
    pub fn new(id: ActionId, source: Box<dyn RecordSource>, sink: Box<dyn RecordSink>) -> Self {
        Self {
            id,
            kind: TransportKind::default(),
            context: TransportContext::new(),
            source,
            handlers: Vec::new(),
            sink,
        }
    }

    /// Set the action's kind tag.
    #[must_use]
    pub fn with_kind(mut self, kind: TransportKind) -> Self {
        self.kind = kind;
        self
    }

    /// Replace the runtime context (cancellation wiring).
    #[must_use]
    pub fn with_context(mut self, context: TransportContext) -> Self {
        self.context = context;
        self
    }

    /// Append a handler to the chain. Chain order is execution order.
    #[must_use]
    pub fn with_handler(mut self, handler: Box<dyn TransportHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// The action's id.
    #[must_use]
    pub fn id(&self) -> &ActionId {
        &self.id
    }

    /// The action's kind tag.
    #[must_use]
    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    /// The action's runtime context.
    #[must_use]
    pub fn context(&self) -> &TransportContext {
        &self.context
    }

    /// The handler chain, in execution order.
    #[must_use]
    pub fn handlers(&self) -> &[Box<dyn TransportHandler>] {
        &self.handlers
    }

    /// Run every handler's one-time setup, in chain order.
    ///
    /// Every handler is attempted even after a failure, so the returned
    /// error names all failed handlers rather than the first one. On an
    /// `Err` the owner must not call [`execute`](Self::execute); nothing has
    /// touched the source at that point.
    pub async fn setup(&mut self) -> Result<(), TransportError> {
        let mut failed: Vec<String> = Vec::new();
        for handler in &mut self.handlers {
            match handler.setup().await {
                Ok(()) => {
                    tracing::debug!(
                        action = %self.id,
                        handler = handler.name(),
                        "handler setup complete"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        action = %self.id,
                        handler = handler.name(),
                        error = %err,
                        "handler setup failed"
                    );
                    failed.push(format!("{}: {err}", handler.name()));
                }
            }
        }
        if failed.is_empty() {
            Ok(())
        } else {
            Err(TransportError::setup(failed.join("; ")))
        }
    }

    /// Start the transport and return its handle immediately.
    ///
    /// Synchronously creates the fresh lifecycle state (`NotStarted` status,
    /// `None` result) and reports the `NotStarted` snapshot through
    /// `progress`, then spawns the worker task. The caller is never blocked
    /// by the stream.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn execute(self, progress: Arc<dyn Progress>) -> ActionHandle {
        let Self {
            id,
            kind,
            context,
            source,
            handlers,
            sink,
        } = self;

        let state = Arc::new(Mutex::new(ActionState::new(id.clone())));
        let initial = state.lock().status();
        progress.report(initial);
        tracing::debug!(
            action = %id,
            kind = %kind,
            handlers = handlers.len(),
            "starting transport"
        );

        let task = tokio::spawn(run_worker(
            id.clone(),
            context,
            source,
            handlers,
            sink,
            Arc::clone(&state),
            progress,
        ));

        ActionHandle { id, state, task }
    }
}

/// Asynchronous handle to a running (or finished) transport action.
///
/// Status and result snapshots are readable at any time without blocking;
/// [`join`](Self::join) resolves once the worker has reported its terminal
/// status.
#[derive(Debug)]
pub struct ActionHandle {
    id: ActionId,
    state: Arc<Mutex<ActionState>>,
    task: JoinHandle<Result<ActionResult, TransportError>>,
}

impl ActionHandle {
    /// The action's id.
    #[must_use]
    pub fn id(&self) -> &ActionId {
        &self.id
    }

    /// Fresh status snapshot of the running action.
    #[must_use]
    pub fn status(&self) -> ActionStatus {
        self.state.lock().status()
    }

    /// Fresh result snapshot; code `None` until the terminal transition.
    #[must_use]
    pub fn result(&self) -> ActionResult {
        self.state.lock().result()
    }

    /// Returns `true` once the worker task has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the terminal transition and resolve the outcome.
    ///
    /// `Ok` carries the `Success` result snapshot; cancellation resolves as
    /// [`TransportError::Cancelled`]; a stream failure resolves as the
    /// triggering error. The terminal status has always been reported
    /// through the progress observer by the time this returns.
    pub async fn join(self) -> Result<ActionResult, TransportError> {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) => Err(TransportError::worker(err.to_string())),
        }
    }
}

/// Worker body: pump the stream, then perform and report the one terminal
/// transition before resolving.
async fn run_worker(
    id: ActionId,
    context: TransportContext,
    mut source: Box<dyn RecordSource>,
    mut handlers: Vec<Box<dyn TransportHandler>>,
    mut sink: Box<dyn RecordSink>,
    state: Arc<Mutex<ActionState>>,
    progress: Arc<dyn Progress>,
) -> Result<ActionResult, TransportError> {
    let outcome = pump_records(&context, source.as_mut(), &mut handlers, sink.as_mut()).await;

    let (status, result) = match &outcome {
        Ok(written) => {
            tracing::debug!(action = %id, records = written, "transport completed");
            (StatusCode::Done, ResultCode::Success)
        }
        Err(err) if err.is_cancelled() => {
            tracing::debug!(action = %id, "transport cancelled");
            (StatusCode::Cancelled, ResultCode::Cancelled)
        }
        Err(err) => {
            tracing::warn!(action = %id, error = %err, "transport failed");
            (StatusCode::Done, ResultCode::Failure)
        }
    };

    let (snapshot, final_result) = {
        let mut st = state.lock();
        let snapshot = match st.transition_to(status) {
            Ok(snapshot) => snapshot,
            // Unreachable from the worker's own edges; log and report the
            // state as it stands rather than losing the terminal report.
            Err(err) => {
                tracing::error!(action = %id, error = %err, "terminal transition rejected");
                st.status()
            }
        };
        let final_result = st.set_result(result);
        (snapshot, final_result)
    };
    progress.report(snapshot);

    outcome.map(|_| final_result)
}

/// Pull, transform, cancellation-check, write; strictly one record at a
/// time, in source order. Returns the number of records written.
async fn pump_records(
    context: &TransportContext,
    source: &mut dyn RecordSource,
    handlers: &mut [Box<dyn TransportHandler>],
    sink: &mut dyn RecordSink,
) -> Result<u64, TransportError> {
    let mut cursor = source.create().await?;
    let mut written: u64 = 0;
    while let Some(mut record) = cursor.next_record().await? {
        for handler in &mut *handlers {
            record = handler.handle(record).await?;
        }
        // The one cancellation poll per record sits between transform and
        // write: a record already written is never rolled back.
        context.check_cancelled()?;
        sink.write(&record).await?;
        written += 1;
    }
    Ok(written)
}
