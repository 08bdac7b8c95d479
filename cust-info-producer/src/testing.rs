//! Deterministic collaborators for tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use chrono::{DateTime, TimeZone, Utc};

use crate::clock::Clock;
use crate::error::GenerateError;
use crate::random::RandomSource;

/// Clock returning a scripted sequence of remaining times. The last value
/// repeats once the script runs out.
pub struct ScriptedClock {
    remaining: RefCell<VecDeque<u64>>,
    last: RefCell<u64>,
    now: DateTime<Utc>,
    queries: RefCell<usize>,
}

impl ScriptedClock {
    pub fn new(remaining: impl IntoIterator<Item = u64>) -> Self {
        Self {
            remaining: RefCell::new(remaining.into_iter().collect()),
            last: RefCell::new(0),
            now: fixed_now(),
            queries: RefCell::new(0),
        }
    }

    /// A clock whose deadline never binds.
    pub fn unbounded() -> Self {
        Self::new([u64::MAX])
    }

    pub fn queries(&self) -> usize {
        *self.queries.borrow()
    }
}

impl Clock for ScriptedClock {
    fn remaining_millis(&self) -> u64 {
        *self.queries.borrow_mut() += 1;
        if let Some(next) = self.remaining.borrow_mut().pop_front() {
            *self.last.borrow_mut() = next;
        }
        *self.last.borrow()
    }

    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// 2021-02-07T12:00:00Z
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 2, 7, 12, 0, 0).unwrap()
}

/// Random source replaying scripted values, clamped into the requested
/// range. Fails with `GenerateError::Entropy` once the script is exhausted.
pub struct ScriptedRandom {
    values: VecDeque<u64>,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = u64>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn draw(&mut self, low: u64, high: u64) -> Result<u64, GenerateError> {
        self.values
            .pop_front()
            .map(|v| v.clamp(low, high))
            .ok_or_else(|| GenerateError::Entropy("scripted draws exhausted".to_string()))
    }
}
