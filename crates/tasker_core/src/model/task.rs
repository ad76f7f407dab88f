use crate::model::TaskStatus;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub description: String,
    pub status: TaskStatus,
    #[serde(with = "timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(default, with = "optional_timestamp")]
    pub updated_at: Option<OffsetDateTime>,
    #[serde(default, with = "optional_timestamp")]
    pub completed_at: Option<OffsetDateTime>,
}

impl Task {
    pub fn new(id: u64, description: String, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            description,
            status: TaskStatus::ToDo,
            created_at,
            updated_at: None,
            completed_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratio {
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

impl Ratio {
    pub fn of(completed: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0
        } else {
            (completed as f64 / total as f64 * 100.0).round() as u32
        };
        Self {
            completed,
            total,
            percent,
        }
    }
}

mod timestamp {
    use serde::{Deserialize, Deserializer, Serializer, de, ser};
    use time::OffsetDateTime;
    use time::format_description::well_known::Rfc3339;

    pub fn serialize<S: Serializer>(
        value: &OffsetDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let formatted = value
            .format(&Rfc3339)
            .map_err(<S::Error as ser::Error>::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<OffsetDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        OffsetDateTime::parse(&raw, &Rfc3339)
            .map_err(|err| de::Error::custom(format!("invalid timestamp '{raw}': {err}")))
    }
}

// Older documents cleared timestamps with an empty string instead of null.
mod optional_timestamp {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use time::OffsetDateTime;
    use time::format_description::well_known::Rfc3339;

    pub fn serialize<S: Serializer>(
        value: &Option<OffsetDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => super::timestamp::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<OffsetDateTime>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => OffsetDateTime::parse(value, &Rfc3339)
                .map(Some)
                .map_err(|err| de::Error::custom(format!("invalid timestamp '{value}': {err}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Ratio, Task};
    use crate::model::TaskStatus;
    use time::macros::datetime;

    #[test]
    fn new_task_starts_in_to_do() {
        let task = Task::new(1, "demo".to_string(), datetime!(2025-12-20 00:00 UTC));

        assert_eq!(task.id, 1);
        assert_eq!(task.description, "demo");
        assert_eq!(task.status, TaskStatus::ToDo);
        assert_eq!(task.updated_at, None);
        assert_eq!(task.completed_at, None);
    }

    #[test]
    fn serializes_with_camel_case_keys_and_null_timestamps() {
        let task = Task::new(7, "demo".to_string(), datetime!(2025-12-20 08:30 UTC));
        let value = serde_json::to_value(&task).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["status"], "to-do");
        assert_eq!(value["createdAt"], "2025-12-20T08:30:00Z");
        assert!(value["updatedAt"].is_null());
        assert!(value["completedAt"].is_null());
    }

    #[test]
    fn accepts_empty_string_and_missing_timestamps() {
        let value = serde_json::json!({
            "id": 3,
            "description": "legacy",
            "status": "done",
            "createdAt": "2025-12-20T00:00:00.000Z",
            "completedAt": ""
        });

        let task: Task = serde_json::from_value(value).unwrap();

        assert_eq!(task.created_at, datetime!(2025-12-20 00:00 UTC));
        assert_eq!(task.updated_at, None);
        assert_eq!(task.completed_at, None);
    }

    #[test]
    fn rejects_malformed_timestamp() {
        let value = serde_json::json!({
            "id": 3,
            "description": "bad",
            "status": "to-do",
            "createdAt": "yesterday"
        });

        assert!(serde_json::from_value::<Task>(value).is_err());
    }

    #[test]
    fn ratio_of_empty_collection_is_zero() {
        assert_eq!(
            Ratio::of(0, 0),
            Ratio {
                completed: 0,
                total: 0,
                percent: 0
            }
        );
    }

    #[test]
    fn ratio_rounds_percent() {
        assert_eq!(Ratio::of(1, 2).percent, 50);
        assert_eq!(Ratio::of(1, 3).percent, 33);
        assert_eq!(Ratio::of(2, 3).percent, 67);
    }
}
