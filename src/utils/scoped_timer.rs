use tokio::time::Instant;
use tracing::trace;

use crate::metrics::REMOTE_CALL_DURATION_MS;

/// Measures a remote call from construction to drop.
///
/// The elapsed time lands in the trace log and in the
/// `vote_remote_call_duration_ms` histogram under `name`.
pub(crate) struct ScopedTimer {
    start: Instant,
    name: &'static str,
}

impl ScopedTimer {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            name,
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        trace!(target: "timing", "[TIMING] {} took {} ms", self.name, elapsed.as_millis());
        REMOTE_CALL_DURATION_MS
            .with_label_values(&[self.name])
            .observe(elapsed.as_secs_f64() * 1000.0);
    }
}
