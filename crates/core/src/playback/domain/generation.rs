/// Identifies one playback request. Later requests have larger values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mints generations and answers whether one is still the latest.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: u64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a new generation, superseding every earlier one.
    pub fn advance(&mut self) -> Generation {
        self.current += 1;
        Generation(self.current)
    }

    pub fn current(&self) -> Option<Generation> {
        (self.current > 0).then_some(Generation(self.current))
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_counter_has_no_current() {
        let counter = GenerationCounter::new();
        assert_eq!(counter.current(), None);
    }

    #[test]
    fn test_advance_is_monotonic() {
        let mut counter = GenerationCounter::new();
        let a = counter.advance();
        let b = counter.advance();
        assert!(b > a);
        assert_eq!(b.value(), a.value() + 1);
        assert_eq!(counter.current(), Some(b));
    }

    #[test]
    fn test_only_latest_is_current() {
        let mut counter = GenerationCounter::new();
        let a = counter.advance();
        assert!(counter.is_current(a));
        let b = counter.advance();
        assert!(!counter.is_current(a));
        assert!(counter.is_current(b));
    }

    #[test]
    fn test_display() {
        let mut counter = GenerationCounter::new();
        assert_eq!(counter.advance().to_string(), "#1");
    }
}
