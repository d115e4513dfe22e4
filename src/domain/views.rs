use super::enums::FilterMode;
use super::task::Task;
use chrono::{DateTime, Local, Utc};

/// Visible subsequence of `tasks` for a filter mode, in store order
pub fn filter_tasks(tasks: &[Task], mode: FilterMode) -> Vec<&Task> {
    tasks.iter().filter(|task| mode.matches(task)).collect()
}

/// Number of tasks each filter tab would show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterCounts {
    pub all: usize,
    pub completed: usize,
    pub pending: usize,
}

impl FilterCounts {
    pub fn get(&self, mode: FilterMode) -> usize {
        match mode {
            FilterMode::All => self.all,
            FilterMode::Completed => self.completed,
            FilterMode::Pending => self.pending,
        }
    }
}

pub fn filter_counts(tasks: &[Task]) -> FilterCounts {
    let completed = tasks.iter().filter(|t| t.completed).count();
    FilterCounts {
        all: tasks.len(),
        completed,
        pending: tasks.len() - completed,
    }
}

/// Format a deadline for display, e.g. "Mon 01 Jan 2024 10:00"
pub fn format_deadline(deadline: DateTime<Utc>) -> String {
    format_local(deadline.with_timezone(&Local))
}

pub fn format_local(time: DateTime<Local>) -> String {
    time.format("%a %d %b %Y %H:%M").to_string()
}

/// Checkbox shown in front of a task row
pub fn completion_box(task: &Task) -> &'static str {
    if task.completed {
        "[x]"
    } else {
        "[ ]"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::TaskId;
    use chrono::TimeZone;

    fn task(id: i64, completed: bool) -> Task {
        Task {
            id: TaskId::Number(id),
            title: format!("Task {}", id),
            description: None,
            completed,
            deadline: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            extra: Default::default(),
        }
    }

    fn ids(tasks: &[&Task]) -> Vec<TaskId> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_filter_all_is_identity() {
        let tasks = vec![task(1, true), task(2, false), task(3, true)];
        let visible = filter_tasks(&tasks, FilterMode::All);
        assert_eq!(ids(&visible), vec![TaskId::Number(1), TaskId::Number(2), TaskId::Number(3)]);
    }

    #[test]
    fn test_filter_preserves_relative_order() {
        let tasks = vec![
            task(1, true),
            task(2, false),
            task(3, true),
            task(4, false),
            task(5, true),
        ];

        let completed = filter_tasks(&tasks, FilterMode::Completed);
        assert_eq!(ids(&completed), vec![TaskId::Number(1), TaskId::Number(3), TaskId::Number(5)]);

        let pending = filter_tasks(&tasks, FilterMode::Pending);
        assert_eq!(ids(&pending), vec![TaskId::Number(2), TaskId::Number(4)]);
    }

    #[test]
    fn test_filter_partitions_every_sequence() {
        // Every completion pattern of length 4
        for mask in 0u8..16 {
            let tasks: Vec<Task> = (0..4).map(|i| task(i, mask & (1u8 << i) != 0)).collect();
            let completed = filter_tasks(&tasks, FilterMode::Completed);
            let pending = filter_tasks(&tasks, FilterMode::Pending);

            assert!(completed.iter().all(|t| t.completed));
            assert!(pending.iter().all(|t| !t.completed));
            assert_eq!(completed.len() + pending.len(), tasks.len());

            let expected: Vec<TaskId> = tasks.iter().filter(|t| t.completed).map(|t| t.id.clone()).collect();
            assert_eq!(ids(&completed), expected);
        }
    }

    #[test]
    fn test_filter_empty_store() {
        assert!(filter_tasks(&[], FilterMode::Pending).is_empty());
    }

    #[test]
    fn test_filter_counts() {
        let tasks = vec![task(1, true), task(2, false), task(3, false)];
        let counts = filter_counts(&tasks);
        assert_eq!(counts.get(FilterMode::All), 3);
        assert_eq!(counts.get(FilterMode::Completed), 1);
        assert_eq!(counts.get(FilterMode::Pending), 2);
    }

    #[test]
    fn test_completion_box() {
        assert_eq!(completion_box(&task(1, true)), "[x]");
        assert_eq!(completion_box(&task(1, false)), "[ ]");
    }
}
