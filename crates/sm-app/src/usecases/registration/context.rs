use std::sync::Arc;

use sm_core::registration::RegistrationState;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Shared registration context containing state, dispatch lock and the
/// outstanding submission task.
///
/// ## Lock Ordering
/// When acquiring several locks, acquire `dispatch_lock` first, then `state`,
/// then `submission`.
/// - `dispatch_lock`: serializes user events and submission outcomes.
/// - `state`: used for both reading (`get_state`) and writing.
#[derive(Clone)]
pub(crate) struct RegistrationContext {
    state: Arc<Mutex<RegistrationState>>,
    /// Ensures transition + state update + action execution run atomically.
    /// Not acquired by `get_state`.
    dispatch_lock: Arc<Mutex<()>>,
    submission: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl RegistrationContext {
    pub(crate) fn new(initial_state: RegistrationState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial_state)),
            dispatch_lock: Arc::new(Mutex::new(())),
            submission: Arc::new(Mutex::new(None)),
        }
    }

    pub(crate) fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub(crate) async fn get_state(&self) -> RegistrationState {
        self.state.lock().await.clone()
    }

    pub(crate) async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Only call after acquiring `dispatch_lock`.
    pub(crate) async fn set_state(&self, state: RegistrationState) {
        let mut guard = self.state.lock().await;
        *guard = state;
    }

    pub(crate) async fn track_submission(&self, handle: JoinHandle<()>) {
        let previous = self.submission.lock().await.replace(handle);
        if let Some(previous) = previous {
            // Earlier attempt already delivered its outcome.
            if !previous.is_finished() {
                tracing::warn!("replacing a submission task that is still running");
            }
        }
    }

    pub(crate) async fn take_submission(&self) -> Option<JoinHandle<()>> {
        self.submission.lock().await.take()
    }
}
