use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::ids::ResourceId;

/// Public information about a quiz, shown before it is started.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizInfo {
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Server-local time the quiz opens at.
    pub start_time: NaiveDateTime,
    /// Server-local time the quiz closes at.
    pub end_time: NaiveDateTime,
    #[serde(default)]
    pub attempt_limit: Option<u32>,
    #[serde(default)]
    pub quiz_duration_in_minutes: Option<u32>,
}

impl QuizInfo {
    /// Whether the quiz window is open at `now`.
    pub fn can_start(&self, now: NaiveDateTime) -> bool {
        self.start_time < now && now < self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz() -> QuizInfo {
        serde_json::from_str(
            r#"{
                "id": 5,
                "title": "Ownership",
                "startTime": "2024-03-01T10:00:00",
                "endTime": "2024-03-01T12:00:00",
                "attemptLimit": 3
            }"#,
        )
        .unwrap()
    }

    fn at(value: &str) -> NaiveDateTime {
        value.parse().unwrap()
    }

    #[test]
    fn window_is_open_only_between_start_and_end() {
        let quiz = quiz();
        assert_eq!(quiz.id.as_str(), "5");
        assert!(!quiz.can_start(at("2024-03-01T09:59:59")));
        assert!(quiz.can_start(at("2024-03-01T11:00:00")));
        assert!(!quiz.can_start(at("2024-03-01T12:00:00")));
    }
}
