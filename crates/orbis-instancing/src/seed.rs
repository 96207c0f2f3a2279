//! Choice of the instancing seed.

use std::time::{SystemTime, UNIX_EPOCH};

/// Holds a one-shot seed request for the next instancing pass.
///
/// A requested seed is used once and then cleared, so later passes fall back
/// to a wall-clock seed. Loading a preset requests its recorded seed to
/// replay the same forest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedControl {
    requested: Option<u64>,
}

impl SeedControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, seed: u64) {
        self.requested = Some(seed);
    }

    pub fn requested(&self) -> Option<u64> {
        self.requested
    }

    /// The requested seed if any, otherwise one derived from the clock.
    pub fn take(&mut self) -> u64 {
        self.requested.take().unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_seed_is_used_once() {
        let mut control = SeedControl::new();
        control.request(1234);
        assert_eq!(control.requested(), Some(1234));
        assert_eq!(control.take(), 1234);
        assert_eq!(control.requested(), None);
    }

    #[test]
    fn test_rerequest_replaces_seed() {
        let mut control = SeedControl::new();
        control.request(1);
        control.request(2);
        assert_eq!(control.take(), 2);
    }
}
