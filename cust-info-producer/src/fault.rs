use crate::attributes::AttributeSet;
use crate::error::GenerateError;
use crate::random::RandomSource;

/// Draws above this value (out of 100) corrupt the record.
pub const FAULT_THRESHOLD: u64 = 90;

/// Decides which records get corrupted metadata. Holds no per-call state;
/// the caller keeps the fault count.
#[derive(Debug, Clone, Copy)]
pub struct FaultInjector {
    enabled: bool,
}

impl FaultInjector {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Roughly one record in ten is faulted while enabled. A disabled
    /// injector consumes no draws.
    pub fn should_fault<R>(&self, random: &mut R) -> Result<bool, GenerateError>
    where
        R: RandomSource + ?Sized,
    {
        if !self.enabled {
            return Ok(false);
        }
        Ok(random.draw(1, 100)? > FAULT_THRESHOLD)
    }

    /// Only call for a record `should_fault` picked.
    pub fn apply_fault(&self, attrs: AttributeSet) -> AttributeSet {
        attrs.mark_bad()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeBuilder, BAD_MESSAGE, STORE_ID};
    use crate::random::RngSource;
    use crate::testing::{ScriptedClock, ScriptedRandom};

    #[test]
    fn test_threshold_boundary() {
        let injector = FaultInjector::new(true);
        let mut random = ScriptedRandom::new([90, 91, 1, 100]);
        assert!(!injector.should_fault(&mut random).unwrap());
        assert!(injector.should_fault(&mut random).unwrap());
        assert!(!injector.should_fault(&mut random).unwrap());
        assert!(injector.should_fault(&mut random).unwrap());
    }

    #[test]
    fn test_disabled_never_draws() {
        let injector = FaultInjector::new(false);
        // An empty script fails on any draw.
        let mut random = ScriptedRandom::new(Vec::new());
        for _ in 0..10 {
            assert!(!injector.should_fault(&mut random).unwrap());
        }
    }

    #[test]
    fn test_rate_is_about_ten_percent() {
        let injector = FaultInjector::new(true);
        let mut random = RngSource::seeded(1234);
        let faults = (0..10_000)
            .filter(|_| injector.should_fault(&mut random).unwrap())
            .count();
        assert!((800..1200).contains(&faults), "got {faults} faults");
    }

    #[test]
    fn test_apply_fault() {
        let clock = ScriptedClock::unbounded();
        let attrs = AttributeBuilder
            .build(&clock, &mut ScriptedRandom::new([2]))
            .unwrap();
        let faulted = FaultInjector::new(true).apply_fault(attrs);
        assert!(faulted.contains(BAD_MESSAGE));
        assert!(!faulted.contains(STORE_ID));
    }
}
