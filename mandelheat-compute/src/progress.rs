use std::sync::atomic::{AtomicU64, Ordering};

use indicatif::ProgressBar;

/// Receives sampling progress from workers.
///
/// Shared by reference across all worker threads.
pub trait ProgressSink: Sync {
    /// Record that `samples` more sample points have been evaluated.
    fn advance(&self, samples: u64);
}

/// Discards progress - for tests and library callers without a display
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn advance(&self, _samples: u64) {}
}

impl ProgressSink for ProgressBar {
    fn advance(&self, samples: u64) {
        self.inc(samples);
    }
}

/// Sums progress into an atomic counter
#[derive(Debug, Default)]
pub struct CountingProgress {
    samples: AtomicU64,
}

impl CountingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> u64 {
        self.samples.load(Ordering::Relaxed)
    }
}

impl ProgressSink for CountingProgress {
    fn advance(&self, samples: u64) {
        self.samples.fetch_add(samples, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_progress_accepts_anything() {
        let sink = NoProgress;
        sink.advance(0);
        sink.advance(u64::MAX);
    }

    #[test]
    fn test_counting_progress_sums() {
        let sink = CountingProgress::new();
        assert_eq!(sink.samples(), 0);

        sink.advance(8);
        sink.advance(16);
        assert_eq!(sink.samples(), 24);
    }

    #[test]
    fn test_counting_progress_across_threads() {
        let sink = CountingProgress::new();

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..100 {
                        sink.advance(2);
                    }
                });
            }
        });

        assert_eq!(sink.samples(), 800);
    }

    #[test]
    fn test_progress_bar_sink_increments_position() {
        let bar = ProgressBar::hidden();
        bar.set_length(100);

        bar.advance(40);
        bar.advance(2);
        assert_eq!(bar.position(), 42);
    }
}
