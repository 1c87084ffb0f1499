use serde::Serialize;

/// A span of the source recording, in seconds.
///
/// Always satisfies `0 <= start_secs < end_secs`, both finite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TimeInterval {
    start_secs: f64,
    end_secs: f64,
}

impl TimeInterval {
    pub fn new(start_secs: f64, end_secs: f64) -> Option<Self> {
        let valid = start_secs.is_finite()
            && end_secs.is_finite()
            && start_secs >= 0.0
            && start_secs < end_secs;
        valid.then_some(Self {
            start_secs,
            end_secs,
        })
    }

    pub fn start_secs(&self) -> f64 {
        self.start_secs
    }

    pub fn end_secs(&self) -> f64 {
        self.end_secs
    }

    pub fn duration(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

impl std::fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}s-{:.2}s", self.start_secs, self.end_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_new_valid_interval() {
        let t = TimeInterval::new(0.5, 1.5).unwrap();
        assert_eq!(t.start_secs(), 0.5);
        assert_eq!(t.end_secs(), 1.5);
        assert_relative_eq!(t.duration(), 1.0);
    }

    #[rstest]
    #[case::empty(1.0, 1.0)]
    #[case::reversed(2.0, 1.0)]
    #[case::negative_start(-0.1, 1.0)]
    #[case::nan_start(f64::NAN, 1.0)]
    #[case::infinite_end(0.0, f64::INFINITY)]
    fn test_new_rejects_invalid(#[case] start: f64, #[case] end: f64) {
        assert!(TimeInterval::new(start, end).is_none());
    }

    #[test]
    fn test_display() {
        let t = TimeInterval::new(0.5, 1.25).unwrap();
        assert_eq!(t.to_string(), "0.50s-1.25s");
    }
}
