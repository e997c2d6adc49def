use crate::components::{APP, ListView, TaskList};
use crate::memo::{Handle, Memo};
use crate::model::{CollectionKey, Task, TaskCollection, TaskId};
use crate::observer::{LifecycleEvent, NoopObserver, RenderObserver, StateField};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

pub const FILTERED_VIEW: &str = "filtered_view";

/// Requests queued by handles given to child components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Delete(TaskId),
}

/// Output of one App render.
#[derive(Debug, Clone)]
pub struct AppView {
    pub draft: String,
    pub search_term: String,
    pub total: usize,
    pub list: Rc<ListView>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    pub app_renders: u64,
    pub filter_recomputes: u64,
    pub handle_creations: u64,
    pub list_renders: u64,
    pub item_renders: u64,
}

pub fn initial_tasks() -> Vec<Task> {
    vec![
        Task::new(TaskId::new(1), "Go shopping"),
        Task::new(TaskId::new(2), "Pay the electricity bill"),
    ]
}

/// Owns the task collection, the draft input and the search term.
///
/// Children receive derived data and a delete handle. They never touch the
/// state directly: invoking the handle queues an [`Action`] that
/// [`AppController::dispatch_pending`] applies.
pub struct AppController {
    tasks: TaskCollection,
    draft: String,
    search_term: String,
    /// `None` once every id up to `u64::MAX` has been handed out.
    next_id: Option<u64>,
    filtered: Memo<(CollectionKey, String), TaskCollection>,
    delete_handle: Memo<CollectionKey, Handle<TaskId>>,
    list: TaskList,
    pending: Rc<RefCell<VecDeque<Action>>>,
    observer: Rc<dyn RenderObserver>,
    app_renders: u64,
}

impl AppController {
    pub fn new() -> Self {
        Self::with_observer(Rc::new(NoopObserver))
    }

    pub fn with_observer(observer: Rc<dyn RenderObserver>) -> Self {
        Self::with_tasks(initial_tasks(), observer)
    }

    /// Starts from `tasks`. Later tasks reusing an earlier id are dropped.
    pub fn with_tasks(tasks: Vec<Task>, observer: Rc<dyn RenderObserver>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(tasks.len());
        for task in tasks {
            if seen.insert(task.id) {
                unique.push(task);
            } else {
                log::warn!("dropping task with duplicate id {}", task.id);
            }
        }

        let tasks = TaskCollection::new(unique);
        let next_id = tasks.max_id().map_or(Some(1), |id| id.get().checked_add(1));
        let controller = Self {
            tasks,
            draft: String::new(),
            search_term: String::new(),
            next_id,
            filtered: Memo::new(),
            delete_handle: Memo::new(),
            list: TaskList::new(),
            pending: Rc::new(RefCell::new(VecDeque::new())),
            observer,
            app_renders: 0,
        };

        controller
            .observer
            .on_event(&LifecycleEvent::Mount { component: APP });
        controller.notify_tasks_changed();
        controller
    }

    pub fn tasks(&self) -> &TaskCollection {
        &self.tasks
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_draft(&mut self, text: &str) {
        if self.draft == text {
            return;
        }
        self.draft = text.to_string();
        self.notify_state(StateField::Draft, self.draft.clone());
    }

    /// Appends the draft as a new task and clears the draft.
    ///
    /// An empty draft is a no-op. Any other text, whitespace included, is
    /// stored as typed. Returns `None` without touching state when the draft
    /// is empty or the id space is exhausted.
    pub fn create_task(&mut self) -> Option<Task> {
        if self.draft.is_empty() {
            log::debug!("ignoring create with empty draft");
            return None;
        }

        let Some(raw_id) = self.next_id else {
            log::warn!("no task ids left, ignoring create");
            return None;
        };
        self.next_id = raw_id.checked_add(1);
        let id = TaskId::new(raw_id);
        let task = Task::new(id, std::mem::take(&mut self.draft));

        let tasks = self.tasks.appended(task.clone());
        self.replace_tasks(tasks);
        self.notify_state(StateField::Draft, String::new());
        Some(task)
    }

    pub fn create_task_from(&mut self, text: &str) -> Option<Task> {
        self.set_draft(text);
        self.create_task()
    }

    /// Removes the task with `id`. Unknown ids leave the collection, and its
    /// identity, untouched.
    pub fn delete_task(&mut self, id: TaskId) -> Option<Task> {
        let Some((remaining, removed)) = self.tasks.without(id) else {
            log::debug!("ignoring delete of unknown task {id}");
            return None;
        };

        self.replace_tasks(remaining);
        Some(removed)
    }

    /// Commits the draft as the search term.
    pub fn search(&mut self) {
        if self.search_term == self.draft {
            return;
        }
        self.search_term = self.draft.clone();
        self.notify_state(StateField::SearchTerm, self.search_term.clone());
    }

    pub fn search_for(&mut self, text: &str) {
        self.set_draft(text);
        self.search();
    }

    /// Tasks whose description contains the search term, ignoring case.
    /// Recomputed only when the collection or the term changed.
    pub fn filtered_view(&mut self) -> TaskCollection {
        let key = (self.tasks.key(), self.search_term.clone());
        let tasks = &self.tasks;
        let observer = &self.observer;

        self.filtered.get_or_compute(key, |(_, term)| {
            let view = tasks.filtered(term);
            observer.on_event(&LifecycleEvent::DerivedRecompute {
                name: FILTERED_VIEW,
                inputs: tasks.len(),
                outputs: view.len(),
            });
            view
        })
    }

    /// Handle bound to the current collection. Its identity only changes
    /// when the collection does.
    pub fn delete_handle(&mut self) -> Handle<TaskId> {
        let pending = Rc::clone(&self.pending);
        self.delete_handle.get_or_compute(self.tasks.key(), move |_| {
            Handle::new(move |id| pending.borrow_mut().push_back(Action::Delete(id)))
        })
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.borrow().is_empty()
    }

    /// Applies queued actions in order and returns how many were applied.
    pub fn dispatch_pending(&mut self) -> usize {
        let mut applied = 0;
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(action) = next else {
                break;
            };

            match action {
                Action::Delete(id) => {
                    self.delete_task(id);
                }
            }
            applied += 1;
        }
        applied
    }

    pub fn render(&mut self) -> AppView {
        self.app_renders += 1;
        self.observer.on_event(&LifecycleEvent::Render {
            component: APP,
            detail: None,
        });

        let visible = self.filtered_view();
        let on_delete = self.delete_handle();
        let list = self
            .list
            .render(&visible, &on_delete, self.observer.as_ref());

        AppView {
            draft: self.draft.clone(),
            search_term: self.search_term.clone(),
            total: self.tasks.len(),
            list,
        }
    }

    pub fn stats(&self) -> RenderStats {
        RenderStats {
            app_renders: self.app_renders,
            filter_recomputes: self.filtered.recomputes(),
            handle_creations: self.delete_handle.recomputes(),
            list_renders: self.list.renders(),
            item_renders: self.list.item_renders(),
        }
    }

    fn replace_tasks(&mut self, tasks: TaskCollection) {
        self.tasks = tasks;
        self.notify_tasks_changed();
    }

    fn notify_tasks_changed(&self) {
        self.notify_state(StateField::Tasks, format!("{} tasks", self.tasks.len()));
    }

    fn notify_state(&self, field: StateField, summary: String) {
        self.observer
            .on_event(&LifecycleEvent::StateChange { field, summary });
    }
}

impl Default for AppController {
    fn default() -> Self {
        Self::new()
    }
}
