//! Transfer progress reporting (bytes done out of an optional total).

/// Snapshot of a running transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProgress {
    /// Body bytes received so far.
    pub bytes_done: u64,
    /// Total size from `Content-Length`, when the server sent one.
    pub total_bytes: Option<u64>,
}

impl TransferProgress {
    /// Fraction complete in [0.0, 1.0]; None without a known total.
    pub fn fraction(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) => Some(1.0),
            Some(total) => Some((self.bytes_done as f64 / total as f64).min(1.0)),
            None => None,
        }
    }
}

/// Emits a `tracing` event every `step` bytes and once at completion.
#[derive(Debug, Clone)]
pub struct ProgressLogger {
    step: u64,
    last_logged: u64,
}

impl ProgressLogger {
    pub fn new(step: u64) -> Self {
        Self {
            step: step.max(1),
            last_logged: 0,
        }
    }

    /// Returns true when an event was emitted for `progress`.
    pub fn report(&mut self, progress: TransferProgress) -> bool {
        let done = Some(progress.bytes_done) == progress.total_bytes;
        if !done && progress.bytes_done.saturating_sub(self.last_logged) < self.step {
            return false;
        }
        self.last_logged = progress.bytes_done;
        tracing::info!(
            bytes_done = progress.bytes_done,
            total_bytes = progress.total_bytes,
            percent = progress.fraction().map(|f| (f * 100.0).round() as u64),
            "download progress"
        );
        true
    }
}
