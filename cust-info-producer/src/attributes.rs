use std::collections::BTreeMap;

use serde::Serialize;

use crate::clock::Clock;
use crate::error::GenerateError;
use crate::random::RandomSource;

pub const PROJECT: &str = "project";
pub const CONTACT_INFO: &str = "contact_me";
pub const TIMESTAMP: &str = "ts";
pub const STORE_ID: &str = "store_id";
pub const BAD_MESSAGE: &str = "bad_msg";

pub const PROJECT_DESCRIPTION: &str = "API Design Best Practice: Mutual TLS authentication for APIs";
pub const CONTACT_DESCRIPTION: &str = "github.com/miztiik";

const STORE_ID_MIN: u64 = 1;
const STORE_ID_MAX: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataType {
    String,
    Number,
}

/// A single message attribute in the queue's `DataType`/`StringValue` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageAttribute {
    pub data_type: DataType,
    pub string_value: String,
}

impl MessageAttribute {
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            data_type: DataType::String,
            string_value: value.into(),
        }
    }

    pub fn number(value: impl ToString) -> Self {
        Self {
            data_type: DataType::Number,
            string_value: value.to_string(),
        }
    }
}

/// Metadata attached to a record. Holds either a store id or the bad
/// message marker, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeSet {
    attributes: BTreeMap<&'static str, MessageAttribute>,
}

impl AttributeSet {
    pub fn get(&self, name: &str) -> Option<&MessageAttribute> {
        self.attributes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn is_faulted(&self) -> bool {
        self.contains(BAD_MESSAGE)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Swap the store id for the bad message marker.
    pub(crate) fn mark_bad(mut self) -> Self {
        self.attributes.remove(STORE_ID);
        self.attributes
            .insert(BAD_MESSAGE, MessageAttribute::string("True"));
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeBuilder;

impl AttributeBuilder {
    pub fn build<C, R>(&self, clock: &C, random: &mut R) -> Result<AttributeSet, GenerateError>
    where
        C: Clock + ?Sized,
        R: RandomSource + ?Sized,
    {
        let store_id = random.draw(STORE_ID_MIN, STORE_ID_MAX)?;

        let mut attributes = BTreeMap::new();
        attributes.insert(PROJECT, MessageAttribute::string(PROJECT_DESCRIPTION));
        attributes.insert(CONTACT_INFO, MessageAttribute::string(CONTACT_DESCRIPTION));
        attributes.insert(TIMESTAMP, MessageAttribute::number(clock.now().timestamp()));
        attributes.insert(STORE_ID, MessageAttribute::number(store_id));

        Ok(AttributeSet { attributes })
    }
}
