use crate::error::AppError;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Opaque task identifier, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("id is required"));
        }

        trimmed
            .parse::<u64>()
            .map(TaskId)
            .map_err(|_| AppError::invalid_input(format!("id must be a number, got '{trimmed}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
}

impl Task {
    pub fn new<D: Into<String>>(id: TaskId, description: D) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }

    /// Case-insensitive substring test. `needle_lower` must already be lowercased.
    fn matches_lowered(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty() || self.description.to_lowercase().contains(needle_lower)
    }

    pub fn matches(&self, term: &str) -> bool {
        self.matches_lowered(&term.to_lowercase())
    }
}

/// Ordered, immutable sequence of tasks.
///
/// Cloning shares the underlying slice. Every edit builds a new collection,
/// so two collections are the "same value" for caching purposes exactly when
/// [`TaskCollection::ptr_eq`] holds.
#[derive(Clone)]
pub struct TaskCollection {
    tasks: Rc<[Task]>,
}

impl TaskCollection {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Rc::from(tasks),
        }
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> HashSet<TaskId> {
        self.tasks.iter().map(|task| task.id).collect()
    }

    pub fn max_id(&self) -> Option<TaskId> {
        self.tasks.iter().map(|task| task.id).max()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tasks, &other.tasks)
    }

    pub fn key(&self) -> CollectionKey {
        CollectionKey(Rc::clone(&self.tasks))
    }

    pub fn appended(&self, task: Task) -> Self {
        let mut tasks = Vec::with_capacity(self.tasks.len() + 1);
        tasks.extend_from_slice(&self.tasks);
        tasks.push(task);
        Self::new(tasks)
    }

    /// Returns the collection without `id` and the removed task, or `None`
    /// when no task carries that id.
    pub fn without(&self, id: TaskId) -> Option<(Self, Task)> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        let removed = self.tasks[index].clone();
        let remaining = self
            .tasks
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        Some((Self::new(remaining), removed))
    }

    pub fn filtered(&self, term: &str) -> Self {
        let needle = term.to_lowercase();
        self.tasks
            .iter()
            .filter(|task| task.matches_lowered(&needle))
            .cloned()
            .collect()
    }
}

impl Default for TaskCollection {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FromIterator<Task> for TaskCollection {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TaskCollection {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for TaskCollection {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.tasks == other.tasks
    }
}

impl Eq for TaskCollection {}

impl PartialEq<[Task]> for TaskCollection {
    fn eq(&self, other: &[Task]) -> bool {
        &*self.tasks == other
    }
}

impl PartialEq<Vec<Task>> for TaskCollection {
    fn eq(&self, other: &Vec<Task>) -> bool {
        &*self.tasks == other.as_slice()
    }
}

impl fmt::Debug for TaskCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tasks.iter()).finish()
    }
}

impl Serialize for TaskCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.tasks.iter())
    }
}

/// Identity of a [`TaskCollection`] value.
///
/// Holds a reference to the slice so the allocation cannot be reused by a
/// later collection while the key is alive.
#[derive(Clone)]
pub struct CollectionKey(Rc<[Task]>);

impl PartialEq for CollectionKey {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for CollectionKey {}

impl fmt::Debug for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CollectionKey({:p}, len={})", Rc::as_ptr(&self.0), self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskCollection, TaskId};

    fn sample() -> TaskCollection {
        TaskCollection::new(vec![
            Task::new(TaskId::new(1), "Go shopping"),
            Task::new(TaskId::new(2), "Pay the electricity bill"),
        ])
    }

    #[test]
    fn appended_builds_new_collection_and_keeps_original() {
        let base = sample();
        let grown = base.appended(Task::new(TaskId::new(3), "Buy milk"));

        assert_eq!(base.len(), 2);
        assert_eq!(grown.len(), 3);
        assert!(!base.ptr_eq(&grown));
        assert_eq!(grown.as_slice()[2].description, "Buy milk");
    }

    #[test]
    fn without_reports_missing_id() {
        let base = sample();
        assert!(base.without(TaskId::new(999)).is_none());

        let (remaining, removed) = base.without(TaskId::new(1)).unwrap();
        assert_eq!(removed.description, "Go shopping");
        assert_eq!(
            remaining,
            vec![Task::new(TaskId::new(2), "Pay the electricity bill")]
        );
    }

    #[test]
    fn filtered_is_case_insensitive() {
        let base = sample();

        let matches = base.filtered("BILL");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches.as_slice()[0].id, TaskId::new(2));

        assert_eq!(base.filtered("").len(), 2);
        assert!(base.filtered("milk").is_empty());
    }

    #[test]
    fn keys_follow_identity_not_content() {
        let base = sample();
        let clone = base.clone();
        let rebuilt = TaskCollection::new(base.as_slice().to_vec());

        assert_eq!(base.key(), clone.key());
        assert_ne!(base.key(), rebuilt.key());
        assert_eq!(base, rebuilt);
    }

    #[test]
    fn task_id_parses_trimmed_numbers() {
        assert_eq!(" 42 ".parse::<TaskId>().unwrap(), TaskId::new(42));
        assert_eq!("abc".parse::<TaskId>().unwrap_err().code(), "invalid_input");
        assert_eq!("".parse::<TaskId>().unwrap_err().code(), "invalid_input");
    }

    #[test]
    fn task_serializes_with_flat_id() {
        let json = serde_json::to_value(Task::new(TaskId::new(7), "demo")).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 7, "description": "demo" }));
    }
}
