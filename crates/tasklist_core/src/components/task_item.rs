use super::TASK_ITEM;
use crate::memo::Handle;
use crate::model::{Task, TaskId};
use crate::observer::{LifecycleEvent, RenderObserver};
use std::rc::Rc;

/// One rendered row: the task text plus its delete affordance.
#[derive(Debug, Clone)]
pub struct ItemRow {
    pub id: TaskId,
    pub description: String,
    on_delete: Handle<TaskId>,
}

impl ItemRow {
    pub fn activate_delete(&self) {
        self.on_delete.call(self.id);
    }
}

struct RenderedItem {
    task: Task,
    on_delete: Handle<TaskId>,
    row: Rc<ItemRow>,
}

#[derive(Default)]
pub struct TaskItem {
    last: Option<RenderedItem>,
    renders: u64,
}

impl TaskItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        task: &Task,
        on_delete: &Handle<TaskId>,
        observer: &dyn RenderObserver,
    ) -> Rc<ItemRow> {
        if let Some(last) = &self.last
            && last.task == *task
            && last.on_delete.same(on_delete)
        {
            return Rc::clone(&last.row);
        }

        self.renders += 1;
        observer.on_event(&LifecycleEvent::Render {
            component: TASK_ITEM,
            detail: Some(task.description.clone()),
        });

        let row = Rc::new(ItemRow {
            id: task.id,
            description: task.description.clone(),
            on_delete: on_delete.clone(),
        });
        self.last = Some(RenderedItem {
            task: task.clone(),
            on_delete: on_delete.clone(),
            row: Rc::clone(&row),
        });
        row
    }

    pub fn renders(&self) -> u64 {
        self.renders
    }
}
