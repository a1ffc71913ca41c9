//! Background execution: one merge per worker thread, with a completion
//! handle instead of a poll loop.

use std::thread::JoinHandle;

use sdif_directory::ClubDirectoryProvider;

use crate::engine::{MergeOptions, MergeOutcome, run_merge};
use crate::error::{MergeError, Result};

/// Handle to a merge running on its own thread.
///
/// There is no cancellation, no timeout, and no progress signal, only a
/// binary running/finished state and the final outcome.
pub struct MergeHandle {
    handle: JoinHandle<Result<MergeOutcome>>,
}

impl MergeHandle {
    /// Starts the merge on a new worker thread.
    #[must_use]
    pub fn spawn(
        options: MergeOptions,
        provider: Option<Box<dyn ClubDirectoryProvider + Send>>,
    ) -> Self {
        let handle = std::thread::spawn(move || {
            let provider_ref: Option<&dyn ClubDirectoryProvider> = match provider.as_deref() {
                Some(provider) => Some(provider),
                None => None,
            };
            run_merge(&options, provider_ref)
        });
        Self { handle }
    }

    /// True once the merge has finished, whether it succeeded or failed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the merge and returns its outcome.
    pub fn join(self) -> Result<MergeOutcome> {
        self.handle
            .join()
            .unwrap_or(Err(MergeError::WorkerPanicked))
    }
}
