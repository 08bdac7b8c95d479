use chrono::{DateTime, Utc};

/// Time source consulted by the generator.
pub trait Clock {
    /// Milliseconds left before the invocation's hard deadline.
    fn remaining_millis(&self) -> u64;

    /// Wall-clock instant at which a record is generated.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the deadline of a Lambda invocation.
#[derive(Debug, Clone, Copy)]
pub struct LambdaClock {
    /// Deadline in milliseconds since the Unix epoch, as carried by
    /// `lambda_runtime::Context::deadline`.
    deadline_ms: u64,
}

impl LambdaClock {
    pub fn new(deadline_ms: u64) -> Self {
        Self { deadline_ms }
    }
}

impl Clock for LambdaClock {
    fn remaining_millis(&self) -> u64 {
        let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.deadline_ms.saturating_sub(now_ms)
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
