use crate::utils::error::{BookingError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// 可取消的背景工作；drop 時自動 abort，避免對已拆除的畫面寫入狀態
pub struct CancellableTask<T> {
    name: &'static str,
    handle: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> CancellableTask<T> {
    pub fn spawn<F>(name: &'static str, future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        tracing::debug!("Spawning task '{}'", name);
        Self {
            name,
            handle: Some(tokio::spawn(future)),
        }
    }

    /// 模擬延遲後再執行
    pub fn spawn_after<F>(name: &'static str, delay: Duration, future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self::spawn(name, async move {
            tokio::time::sleep(delay).await;
            future.await
        })
    }

    pub async fn join(mut self) -> Result<T> {
        let name = self.name;
        let handle = self
            .handle
            .take()
            .ok_or(BookingError::Cancelled { task: name })?;

        match handle.await {
            Ok(value) => Ok(value),
            Err(e) if e.is_cancelled() => Err(BookingError::Cancelled { task: name }),
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}

impl<T> CancellableTask<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("Cancelled task '{}'", self.name);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_none()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map(|h| h.is_finished()).unwrap_or(false)
    }
}

impl<T> Drop for CancellableTask<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
