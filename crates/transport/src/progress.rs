//! Progress reporting port.

use crate::status::ActionStatus;

/// Observer for status snapshots, invoked synchronously at each transition.
///
/// The orchestrator calls [`report`](Progress::report) from its own thread of
/// control: once before the worker starts (the `NotStarted` snapshot) and
/// once at the terminal transition, before the action's handle resolves.
/// Implementations must not block indefinitely; there is no backpressure
/// contract on the orchestrator's side.
///
/// Closures are observers too, via the blanket impl:
///
/// ```
/// use std::sync::Arc;
/// use ferry_transport::{ActionStatus, Progress};
///
/// let progress: Arc<dyn Progress> =
///     Arc::new(|status: ActionStatus| println!("{}: {}", status.action(), status.code()));
/// # let _ = progress;
/// ```
pub trait Progress: Send + Sync {
    /// Observe one status snapshot.
    fn report(&self, status: ActionStatus);
}

impl<F> Progress for F
where
    F: Fn(ActionStatus) + Send + Sync,
{
    fn report(&self, status: ActionStatus) {
        self(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusCode;
    use std::sync::Arc;

    use parking_lot::Mutex;

    #[test]
    fn closures_implement_progress() {
        let seen: Arc<Mutex<Vec<StatusCode>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let progress: Arc<dyn Progress> =
            Arc::new(move |status: ActionStatus| sink.lock().push(status.code()));

        let id = "move-1".parse().unwrap();
        progress.report(ActionStatus::new(id, StatusCode::NotStarted));

        assert_eq!(*seen.lock(), vec![StatusCode::NotStarted]);
    }
}
