use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// Self-rated mood, 1 (Awful) to 5 (Great). Serialized as the bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "u8", into = "u8")]
#[ts(export)]
pub struct MoodLevel(u8);

impl MoodLevel {
    pub const AWFUL: MoodLevel = MoodLevel(1);
    pub const BAD: MoodLevel = MoodLevel(2);
    pub const OKAY: MoodLevel = MoodLevel(3);
    pub const GOOD: MoodLevel = MoodLevel(4);
    pub const GREAT: MoodLevel = MoodLevel(5);

    pub fn new(level: u8) -> Result<Self, CoreError> {
        if (1..=5).contains(&level) {
            Ok(MoodLevel(level))
        } else {
            Err(CoreError::InvalidMoodLevel(level))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            5 => "Great",
            4 => "Good",
            3 => "Okay",
            2 => "Bad",
            _ => "Awful",
        }
    }
}

impl TryFrom<u8> for MoodLevel {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        MoodLevel::new(value)
    }
}

impl From<MoodLevel> for u8 {
    fn from(level: MoodLevel) -> Self {
        level.0
    }
}

/// A single mood journal row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MoodEntry {
    pub id: Uuid,
    pub date: jiff::Timestamp,
    pub mood_level: MoodLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub notes: Option<String>,
    #[serde(default)]
    pub activities: Vec<String>,
}

/// Split a comma-separated activity list, trimming and dropping blanks.
pub fn parse_activities(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_level_rejects_out_of_range() {
        assert!(MoodLevel::new(0).is_err());
        assert!(MoodLevel::new(6).is_err());
        assert_eq!(MoodLevel::new(4).unwrap().label(), "Good");
    }

    #[test]
    fn mood_entry_deserialization_validates_level() {
        let ok = r#"{"id":"5b0f3c5e-2d5a-4c55-8f0d-6cf5d4c7a1b2","date":"2025-02-02T09:30:00Z","moodLevel":5}"#;
        let entry: MoodEntry = serde_json::from_str(ok).unwrap();
        assert_eq!(entry.mood_level, MoodLevel::GREAT);
        assert!(entry.activities.is_empty());

        let bad = ok.replace("\"moodLevel\":5", "\"moodLevel\":9");
        assert!(serde_json::from_str::<MoodEntry>(&bad).is_err());
    }

    #[test]
    fn activities_are_trimmed_and_blanks_dropped() {
        assert_eq!(
            parse_activities(" work, exercise ,, social ,"),
            vec!["work", "exercise", "social"]
        );
        assert!(parse_activities("   ").is_empty());
    }
}
