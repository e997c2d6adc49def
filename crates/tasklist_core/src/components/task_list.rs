use super::{ItemRow, TASK_LIST, TaskItem};
use crate::memo::Handle;
use crate::model::{CollectionKey, TaskCollection, TaskId};
use crate::observer::{LifecycleEvent, RenderObserver};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct ListView {
    pub rows: Vec<Rc<ItemRow>>,
}

impl ListView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, id: TaskId) -> Option<&ItemRow> {
        self.rows.iter().map(|row| &**row).find(|row| row.id == id)
    }
}

struct RenderedList {
    tasks: CollectionKey,
    on_delete: Handle<TaskId>,
    view: Rc<ListView>,
}

/// Renders one [`TaskItem`] per task, keyed by task id so an item keeps its
/// cached row across list renders.
#[derive(Default)]
pub struct TaskList {
    last: Option<RenderedList>,
    items: HashMap<TaskId, TaskItem>,
    renders: u64,
    item_renders: u64,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        tasks: &TaskCollection,
        on_delete: &Handle<TaskId>,
        observer: &dyn RenderObserver,
    ) -> Rc<ListView> {
        let key = tasks.key();
        if let Some(last) = &self.last
            && last.tasks == key
            && last.on_delete.same(on_delete)
        {
            return Rc::clone(&last.view);
        }

        self.renders += 1;
        observer.on_event(&LifecycleEvent::Render {
            component: TASK_LIST,
            detail: None,
        });

        let live = tasks.ids();
        self.items.retain(|id, _| live.contains(id));

        let mut rows = Vec::with_capacity(tasks.len());
        for task in tasks {
            let item = self.items.entry(task.id).or_default();
            let before = item.renders();
            rows.push(item.render(task, on_delete, observer));
            self.item_renders += item.renders() - before;
        }

        let view = Rc::new(ListView { rows });
        self.last = Some(RenderedList {
            tasks: key,
            on_delete: on_delete.clone(),
            view: Rc::clone(&view),
        });
        view
    }

    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Total item renders performed across every list render.
    pub fn item_renders(&self) -> u64 {
        self.item_renders
    }
}
