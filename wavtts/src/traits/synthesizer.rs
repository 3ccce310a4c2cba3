use std::path::Path;

use auto_impl::auto_impl;

use crate::{error::Error, waits::WaitFuture};

#[auto_impl(Box, Arc)]
pub trait Synthesizer: Send + Sync {
    /// Starts rendering `text` into a WAV file at `path` and returns a future
    /// that waits until the file is completely written.
    ///
    /// The file is created, or truncated if it already exists.
    ///
    /// # Implementation
    ///
    /// The returned future is expected to behave similarly to
    /// [`std::thread::JoinHandle`] and [`tokio::task::JoinHandle`]:
    ///
    /// - Can wait for the operation to complete by `.await`.
    /// - The operation does not end even if it is dropped.
    ///
    /// Errors detected before any work is queued may be returned directly;
    /// errors raised by the engine while rendering are returned by the future.
    ///
    /// [`tokio::task::JoinHandle`]: https://docs.rs/tokio/1/tokio/task/struct.JoinHandle.html
    fn synthesize_to_file(&self, text: &str, path: &Path) -> Result<WaitFuture, Error>;
}
