use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide identifier generator.
///
/// Starts at 1 and never hands out the same value twice, even when test
/// threads allocate concurrently.
#[derive(Debug)]
pub(crate) struct Sequence(AtomicU64);

impl Sequence {
    pub(crate) const fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    pub(crate) fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}
