use chrono::{Days, SecondsFormat};
use serde::Serialize;

use crate::clock::Clock;
use crate::error::GenerateError;
use crate::random::RandomSource;

pub const NAMES: [&str; 18] = [
    "Aarakocra",
    "Aasimar",
    "Beholder",
    "Bugbear",
    "Centaur",
    "Changeling",
    "Deep Gnome",
    "Deva",
    "Lizardfolk",
    "Loxodon",
    "Mind Flayer",
    "Minotaur",
    "Orc",
    "Shardmind",
    "Shifter",
    "Simic Hybrid",
    "Tabaxi",
    "Yuan-Ti",
];

const NATIONAL_ID_MIN: u64 = 100_000_000;
const NATIONAL_ID_MAX: u64 = 999_999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

/// Fake customer record carried as a message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerRecord {
    pub name: String,
    /// `YYYY-MM-DD`
    #[serde(rename = "dob")]
    pub date_of_birth: String,
    pub gender: Gender,
    /// Nine decimal digits.
    #[serde(rename = "ssn_no")]
    pub national_id: String,
    pub data_share_consent: bool,
    /// RFC 3339 timestamp of the generation instant.
    #[serde(rename = "evnt_time")]
    pub event_time: String,
}

/// Produces independent customer records.
#[derive(Debug, Clone, Copy)]
pub struct RecordGenerator {
    max_age_years: u32,
}

impl RecordGenerator {
    pub fn new(max_age_years: u32) -> Self {
        Self { max_age_years }
    }

    pub fn generate<C, R>(&self, clock: &C, random: &mut R) -> Result<CustomerRecord, GenerateError>
    where
        C: Clock + ?Sized,
        R: RandomSource + ?Sized,
    {
        let now = clock.now();

        let name = NAMES[random.index(NAMES.len())?].to_string();

        let today = now.date_naive();
        let days_back = random.draw(0, u64::from(self.max_age_years) * 365)?;
        let date_of_birth = today
            .checked_sub_days(Days::new(days_back))
            .ok_or_else(|| GenerateError::DateOutOfRange {
                today: today.to_string(),
                days_back,
            })?
            .format("%Y-%m-%d")
            .to_string();

        let gender = if random.coin_flip()? {
            Gender::Female
        } else {
            Gender::Male
        };
        let national_id = random.draw(NATIONAL_ID_MIN, NATIONAL_ID_MAX)?.to_string();
        let data_share_consent = random.coin_flip()?;

        Ok(CustomerRecord {
            name,
            date_of_birth,
            gender,
            national_id,
            data_share_consent,
            event_time: now.to_rfc3339_opts(SecondsFormat::Micros, true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RngSource;
    use crate::testing::{fixed_now, ScriptedClock, ScriptedRandom};
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_scripted_record() {
        let clock = ScriptedClock::unbounded();
        // name, days back, gender, national id, consent
        let mut random = ScriptedRandom::new([2, 6, 0, 123_456_789, 1]);
        let record = RecordGenerator::new(99).generate(&clock, &mut random).unwrap();

        assert_eq!(record.name, "Beholder");
        assert_eq!(record.date_of_birth, "2021-02-01");
        assert_eq!(record.gender, Gender::Male);
        assert_eq!(record.national_id, "123456789");
        assert!(record.data_share_consent);
        assert_eq!(record.event_time, "2021-02-07T12:00:00.000000Z");
    }

    #[test]
    fn test_wire_keys() {
        let clock = ScriptedClock::unbounded();
        let mut random = ScriptedRandom::new([0, 0, 1, 0, 0]);
        let record = RecordGenerator::new(99).generate(&clock, &mut random).unwrap();

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "name": "Aarakocra",
                "dob": "2021-02-07",
                "gender": "F",
                "ssn_no": "100000000",
                "data_share_consent": false,
                "evnt_time": "2021-02-07T12:00:00.000000Z",
            })
        );
    }

    #[test]
    fn test_fields_within_bounds() {
        let clock = ScriptedClock::unbounded();
        let mut random = RngSource::seeded(42);
        let generator = RecordGenerator::new(30);
        let today = fixed_now().date_naive();
        let oldest = today - Days::new(30 * 365);

        for _ in 0..500 {
            let record = generator.generate(&clock, &mut random).unwrap();
            assert!(NAMES.contains(&record.name.as_str()));
            assert_eq!(record.national_id.len(), 9);
            assert!(record.national_id.chars().all(|c| c.is_ascii_digit()));

            let dob = NaiveDate::parse_from_str(&record.date_of_birth, "%Y-%m-%d").unwrap();
            assert!(dob >= oldest && dob <= today, "dob {dob} out of range");
        }
    }

    #[test]
    fn test_zero_max_age_is_today() {
        let clock = ScriptedClock::unbounded();
        let mut random = RngSource::seeded(1);
        let record = RecordGenerator::new(0).generate(&clock, &mut random).unwrap();
        assert_eq!(record.date_of_birth, "2021-02-07");
    }

    #[test]
    fn test_date_before_calendar_start() {
        let clock = ScriptedClock::unbounded();
        let mut random = ScriptedRandom::new([0, u64::MAX]);
        let err = RecordGenerator::new(u32::MAX)
            .generate(&clock, &mut random)
            .unwrap_err();
        assert!(matches!(err, GenerateError::DateOutOfRange { .. }));
    }

    #[test]
    fn test_random_failure_propagates() {
        let clock = ScriptedClock::unbounded();
        let mut random = ScriptedRandom::new([0, 0]);
        let err = RecordGenerator::new(99).generate(&clock, &mut random).unwrap_err();
        assert!(matches!(err, GenerateError::Entropy(_)));
    }
}
