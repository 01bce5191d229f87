//! Cancellable task scope
//!
//! Every task spawned during a session runs inside a scope. Cancelling the
//! scope ends all of them at their next suspension point, which is how a page
//! reload tears down timers and in-flight requests.

use std::future::Future;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct TaskScope {
    token: CancellationToken,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A nested scope: cancelled with its parent, or on its own
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    /// Spawn a task that stops when the scope is cancelled
    pub fn spawn<F>(&self, task: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.token.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = task => {}
            }
        })
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the scope is cancelled
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}
