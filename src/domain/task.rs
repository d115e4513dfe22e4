use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Server-assigned task identifier. The API may hand out numbers or strings.
///
/// Ids compare by their text form, so `12` and `"12"` name the same task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Number(n) => write!(f, "{}", n),
            TaskId::Text(s) => f.write_str(s),
        }
    }
}

impl PartialEq for TaskId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TaskId::Number(a), TaskId::Number(b)) => a == b,
            (TaskId::Text(a), TaskId::Text(b)) => a == b,
            (TaskId::Number(n), TaskId::Text(s)) | (TaskId::Text(s), TaskId::Number(n)) => {
                *s == n.to_string()
            }
        }
    }
}

impl Eq for TaskId {}

impl Hash for TaskId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            TaskId::Number(n) => n.to_string().hash(state),
            TaskId::Text(s) => s.hash(state),
        }
    }
}

impl FromStr for TaskId {
    type Err = std::convert::Infallible;

    /// Integers parse as `Number`, anything else is kept as `Text`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<i64>() {
            Ok(n) => TaskId::Number(n),
            Err(_) => TaskId::Text(s.to_string()),
        })
    }
}

/// A task record as held by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Passed through untouched (including `null`), the UI never edits it
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub deadline: DateTime<Utc>,
    /// Fields the client doesn't model (timestamps, owner, ...), sent back on update
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Task {
    /// Copy of this record with the completion flag flipped
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Deadline in the user's local timezone
    pub fn deadline_local(&self) -> DateTime<Local> {
        self.deadline.with_timezone(&Local)
    }
}

/// Body of a create call; the server assigns the id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub deadline: DateTime<Utc>,
}

impl NewTask {
    pub fn new(title: String, deadline: DateTime<Utc>) -> Self {
        Self {
            title,
            description: String::new(),
            completed: false,
            deadline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_task_id_accepts_numbers_and_strings() {
        let n: TaskId = serde_json::from_value(json!(7)).unwrap();
        let s: TaskId = serde_json::from_value(json!("a1b2")).unwrap();
        assert_eq!(n, TaskId::Number(7));
        assert_eq!(s, TaskId::Text("a1b2".to_string()));
        assert_eq!(n.to_string(), "7");
        assert_eq!(s.to_string(), "a1b2");
    }

    #[test]
    fn test_task_id_from_str() {
        assert_eq!("42".parse::<TaskId>().unwrap(), TaskId::Number(42));
        assert_eq!(" x9 ".parse::<TaskId>().unwrap(), TaskId::Text("x9".to_string()));
    }

    #[test]
    fn test_numeric_text_ids_are_the_same_task() {
        use std::collections::HashSet;

        let from_server: TaskId = serde_json::from_value(json!("12")).unwrap();
        let typed: TaskId = "12".parse().unwrap();
        assert_eq!(from_server, TaskId::Text("12".to_string()));
        assert_eq!(typed, TaskId::Number(12));
        assert_eq!(from_server, typed);

        let set: HashSet<TaskId> = [from_server, typed].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert_ne!(TaskId::Text("012".to_string()), TaskId::Number(12));
    }

    #[test]
    fn test_null_description_round_trips() {
        let wire = json!({
            "id": 4,
            "title": "Read",
            "description": null,
            "completed": false,
            "deadline": "2024-01-01T10:00:00Z"
        });
        let task: Task = serde_json::from_value(wire).unwrap();
        let sent = serde_json::to_value(&task.toggled()).unwrap();
        assert_eq!(sent["description"], serde_json::Value::Null);
    }

    #[test]
    fn test_task_decodes_wire_shape() {
        let task: Task = serde_json::from_value(json!({
            "id": 1,
            "title": "Buy milk",
            "description": null,
            "completed": false,
            "deadline": "2024-01-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(task.id, TaskId::Number(1));
        assert_eq!(task.description, None);
        assert_eq!(task.deadline, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
        assert!(task.extra.is_empty());
    }

    #[test]
    fn test_task_keeps_unknown_fields() {
        let wire = json!({
            "id": 3,
            "title": "Call mom",
            "description": "",
            "completed": true,
            "deadline": "2024-05-05T08:30:00Z",
            "created_at": "2024-05-01T00:00:00Z"
        });
        let task: Task = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(task.extra.get("created_at"), Some(&json!("2024-05-01T00:00:00Z")));
        let mut expected = wire;
        expected["deadline"] = serde_json::to_value(task.deadline).unwrap();
        assert_eq!(serde_json::to_value(&task).unwrap(), expected);
    }

    #[test]
    fn test_toggled_only_flips_completed() {
        let task: Task = serde_json::from_value(json!({
            "id": "t",
            "title": "Walk",
            "description": "park",
            "completed": false,
            "deadline": "2024-01-01T10:00:00Z"
        }))
        .unwrap();

        let flipped = task.toggled();
        assert!(flipped.completed);
        assert_eq!(flipped.title, task.title);
        assert_eq!(flipped.description.as_deref(), Some("park"));
        assert_eq!(flipped.toggled(), task);
    }

    #[test]
    fn test_new_task_body() {
        let deadline = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let body = serde_json::to_value(NewTask::new("Buy milk".to_string(), deadline)).unwrap();
        assert_eq!(
            body,
            json!({
                "title": "Buy milk",
                "description": "",
                "completed": false,
                "deadline": serde_json::to_value(deadline).unwrap(),
            })
        );
    }
}
