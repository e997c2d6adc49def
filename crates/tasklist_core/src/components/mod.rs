//! Presentational components. Each one is a pure projection of its props
//! into a display tree and skips work when its props are unchanged.

mod task_item;
mod task_list;

pub use task_item::{ItemRow, TaskItem};
pub use task_list::{ListView, TaskList};

pub const APP: &str = "App";
pub const TASK_LIST: &str = "TaskList";
pub const TASK_ITEM: &str = "TaskItem";
