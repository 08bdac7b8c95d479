use serde::Serialize;
use tracing::{debug, enabled, error, info, Level};

use crate::attributes::{AttributeBuilder, AttributeSet};
use crate::clock::Clock;
use crate::config::ProducerConfig;
use crate::error::GenerateError;
use crate::fault::FaultInjector;
use crate::random::RandomSource;
use crate::record::{CustomerRecord, RecordGenerator};

/// Generation stops once the invocation has this many milliseconds or fewer
/// left, leaving room to return the response.
pub const DEADLINE_MARGIN_MS: u64 = 100;

/// One message to publish: the record as payload, the attributes as
/// metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchItem {
    #[serde(rename = "msg_body")]
    pub body: CustomerRecord,
    #[serde(rename = "msg_attr")]
    pub attributes: AttributeSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Failed { error: String },
}

/// Messages produced by one invocation and how generation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    items: Vec<BatchItem>,
    bad_messages: usize,
    outcome: Outcome,
}

impl BatchResult {
    pub(crate) fn completed(items: Vec<BatchItem>, bad_messages: usize) -> Self {
        Self {
            items,
            bad_messages,
            outcome: Outcome::Completed,
        }
    }

    pub(crate) fn failed(items: Vec<BatchItem>, bad_messages: usize, err: &GenerateError) -> Self {
        Self {
            items,
            bad_messages,
            outcome: Outcome::Failed {
                error: err.to_string(),
            },
        }
    }

    pub fn items(&self) -> &[BatchItem] {
        &self.items
    }

    pub fn total_messages(&self) -> usize {
        self.items.len()
    }

    pub fn bad_messages(&self) -> usize {
        self.bad_messages
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, Outcome::Completed)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Completed => None,
            Outcome::Failed { error } => Some(error),
        }
    }
}

/// Runs the deadline-aware generation loop for one invocation.
#[derive(Debug, Clone, Copy)]
pub struct BatchAssembler {
    max_messages: usize,
    records: RecordGenerator,
    attributes: AttributeBuilder,
    faults: FaultInjector,
}

impl BatchAssembler {
    pub fn new(config: &ProducerConfig) -> Self {
        Self {
            max_messages: config.max_messages,
            records: RecordGenerator::new(config.max_age_years),
            attributes: AttributeBuilder,
            faults: FaultInjector::new(config.trigger_random_failures),
        }
    }

    /// Produce messages until the configured maximum is reached or the
    /// deadline gets too close. Generation errors end the batch early and
    /// are reported in the result, never returned.
    pub fn assemble<C, R>(&self, clock: &C, random: &mut R) -> BatchResult
    where
        C: Clock + ?Sized,
        R: RandomSource + ?Sized,
    {
        let mut items = Vec::new();
        let mut faulted = 0;

        match self.fill(clock, random, &mut items, &mut faulted) {
            Ok(()) => {
                info!(
                    tot_msgs = items.len(),
                    bad_msgs = faulted,
                    "Batch completed"
                );
                BatchResult::completed(items, faulted)
            }
            Err(e) => {
                error!(tot_msgs = items.len(), "Failed to generate message: {}", e);
                BatchResult::failed(items, faulted, &e)
            }
        }
    }

    fn fill<C, R>(
        &self,
        clock: &C,
        random: &mut R,
        items: &mut Vec<BatchItem>,
        faulted: &mut usize,
    ) -> Result<(), GenerateError>
    where
        C: Clock + ?Sized,
        R: RandomSource + ?Sized,
    {
        while items.len() < self.max_messages && clock.remaining_millis() > DEADLINE_MARGIN_MS {
            let body = self.records.generate(clock, random)?;
            let mut attributes = self.attributes.build(clock, random)?;

            if self.faults.should_fault(random)? {
                attributes = self.faults.apply_fault(attributes);
                *faulted += 1;
            }

            items.push(BatchItem { body, attributes });
            // Polls the clock, so only when the event would be recorded.
            if enabled!(Level::DEBUG) {
                debug!(
                    produced = items.len(),
                    bad = *faulted,
                    remaining_time = clock.remaining_millis(),
                    "Generated message"
                );
            }
        }
        Ok(())
    }
}
