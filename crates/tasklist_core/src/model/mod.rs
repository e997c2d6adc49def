mod task;

pub use task::{CollectionKey, Task, TaskCollection, TaskId};
