//! Best-score record
//!
//! Persisted between sessions as a single non-negative number.

/// The best score reached so far
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HighScore {
    best: f64,
}

impl HighScore {
    /// Invalid stored values (negative, NaN, infinite) reset to zero
    pub fn new(best: f64) -> Self {
        let best = if best.is_finite() && best > 0.0 { best } else { 0.0 };
        Self { best }
    }

    pub fn value(&self) -> f64 {
        self.best
    }

    /// Whole points, as shown on screen
    pub fn points(&self) -> u64 {
        self.best.floor() as u64
    }

    /// Whether there is anything worth displaying
    pub fn is_set(&self) -> bool {
        self.best > 0.0
    }

    /// Check if a score would beat the record
    pub fn qualifies(&self, score: f64) -> bool {
        score > self.best
    }

    /// Record a finished run. Returns true if it set a new record.
    pub fn record(&mut self, score: f64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_only_on_improvement() {
        let mut hs = HighScore::default();
        assert!(!hs.is_set());
        assert!(hs.record(12.3));
        assert!(!hs.record(12.3));
        assert!(!hs.record(5.0));
        assert_eq!(hs.value(), 12.3);
        assert_eq!(hs.points(), 12);
        assert!(hs.record(40.0));
    }

    #[test]
    fn test_invalid_values_reset() {
        assert_eq!(HighScore::new(-3.0).value(), 0.0);
        assert_eq!(HighScore::new(f64::NAN).value(), 0.0);
        assert_eq!(HighScore::new(f64::INFINITY).value(), 0.0);
        assert_eq!(HighScore::new(7.5).value(), 7.5);
    }
}
