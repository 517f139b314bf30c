use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single task record. `id` is the stable storage id: dense `1..N`,
/// reassigned on every reindex.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
    #[serde(default, with = "lenient_ts")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_ts", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Case-insensitive substring match over title and description.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// Filtering mode that determines which records participate in display-id
/// numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    All,
    Incomplete,
}

impl View {
    pub fn from_show_all(show_all: bool) -> Self {
        if show_all { Self::All } else { Self::Incomplete }
    }

    pub fn contains(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Incomplete => !task.completed,
        }
    }
}

/// Timestamp field codec that tolerates legacy and damaged data: RFC 3339
/// parses normally, a naive ISO-8601 string is taken as UTC, and anything
/// else (missing, null, garbage) loads as `None` instead of failing the
/// whole file.
pub mod lenient_ts {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => ser.serialize_str(&ts.to_rfc3339()),
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(de: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(de)?;
        Ok(raw.as_deref().and_then(parse))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task(id: u64) -> Task {
        Task {
            id,
            title: format!("task-{id}"),
            description: String::new(),
            completed: false,
            created_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()),
            completed_at: None,
        }
    }

    #[test]
    fn task_round_trips_json() {
        let original = task(1);
        let json = serde_json::to_string_pretty(&original).unwrap();
        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn incomplete_task_omits_completed_at() {
        let json = serde_json::to_string(&task(1)).unwrap();
        assert!(!json.contains("completed_at"));
    }

    #[test]
    fn naive_timestamp_loads_as_utc() {
        let json =
            r#"{"id":1,"title":"t","completed":false,"created_at":"2024-01-01T10:00:00.500000"}"#;
        let parsed: Task = serde_json::from_str(json).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
            + chrono::Duration::milliseconds(500);
        assert_eq!(parsed.created_at, Some(expected));
    }

    #[test]
    fn unparseable_timestamp_loads_as_none() {
        let json = r#"{"id":1,"title":"t","completed":false,"created_at":"yesterday"}"#;
        let parsed: Task = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.created_at, None);
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        let json = r#"{"id":1,"title":"t","completed":false,"created_at":null}"#;
        let parsed: Task = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.description, "");
    }

    #[test]
    fn matches_is_case_insensitive_over_both_fields() {
        let mut t = task(1);
        t.title = "Buy groceries".into();
        t.description = "milk and EGGS".into();
        assert!(t.matches("GROC"));
        assert!(t.matches("eggs"));
        assert!(!t.matches("bread"));
    }

    #[test]
    fn view_membership() {
        let mut t = task(1);
        assert!(View::All.contains(&t));
        assert!(View::Incomplete.contains(&t));
        t.completed = true;
        assert!(View::All.contains(&t));
        assert!(!View::Incomplete.contains(&t));
    }
}
