use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Отложенная одноразовая задача.
///
/// Отмена действует только до срабатывания: если тело уже выполняется,
/// оно доработает до конца.
pub struct Timer {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Timer {
    /// Запускает `task` через `delay`. Отмена `session` отменяет и этот таймер.
    pub fn after<F>(delay: Duration, session: &CancellationToken, task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = session.child_token();
        let fire_token = token.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = fire_token.cancelled() => {}
                _ = tokio::time::sleep(delay) => task.await,
            }
        });

        Self { token, handle }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Ещё не сработал и не отменён
    pub fn is_pending(&self) -> bool {
        !self.handle.is_finished() && !self.token.is_cancelled()
    }
}
