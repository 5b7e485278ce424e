// history.rs - Detects a grid returning to a recently seen generation

pub const HISTORY_LEN: usize = 10;

/// Circular buffer of the last `HISTORY_LEN` grid fingerprints.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    history: [Option<u64>; HISTORY_LEN],
    count: usize,
}

impl CycleDetector {
    /// Records `fingerprint`, returning true instead if it is already in the
    /// buffer.
    pub fn observe(&mut self, fingerprint: u64) -> bool {
        if self.history.contains(&Some(fingerprint)) {
            return true;
        }
        self.history[self.count % HISTORY_LEN] = Some(fingerprint);
        self.count += 1;
        false
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_fingerprint_is_a_cycle() {
        let mut detector = CycleDetector::default();
        assert!(!detector.observe(1));
        assert!(!detector.observe(2));
        assert!(detector.observe(1));
    }

    #[test]
    fn old_fingerprints_fall_out_of_the_window() {
        let mut detector = CycleDetector::default();
        for fingerprint in 0..=HISTORY_LEN as u64 {
            assert!(!detector.observe(fingerprint));
        }
        // 0 was overwritten by the eleventh entry.
        assert!(!detector.observe(0));
        assert!(detector.observe(HISTORY_LEN as u64));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut detector = CycleDetector::default();
        detector.observe(7);
        detector.clear();
        assert!(!detector.observe(7));
    }
}
