use crate::cli::Command;
use crate::output;
use std::rc::Rc;
use tasklist_core::config::{Config, Palette};
use tasklist_core::controller::{AppController, AppView, initial_tasks};
use tasklist_core::error::AppError;
use tasklist_core::model::TaskId;
use tasklist_core::observer::{LogObserver, NoopObserver, RenderObserver};

/// Drives one controller: applies commands as UI events, renders after
/// each one and prints the result.
pub struct Session {
    controller: AppController,
    palette: Palette,
    /// What the user currently sees; deletes act on its rows.
    last_view: Option<AppView>,
}

impl Session {
    pub fn from_config(config: &Config) -> Self {
        let observer: Rc<dyn RenderObserver> = if config.trace_renders {
            Rc::new(LogObserver)
        } else {
            Rc::new(NoopObserver)
        };
        let tasks = if config.seed_initial_tasks {
            initial_tasks()
        } else {
            Vec::new()
        };

        Self {
            controller: AppController::with_tasks(tasks, observer),
            palette: config.theme.palette(),
            last_view: None,
        }
    }

    pub fn controller(&self) -> &AppController {
        &self.controller
    }

    pub fn execute(&mut self, command: Command, json: bool) -> Result<(), AppError> {
        log::debug!("executing {command:?}");
        let message = match command {
            Command::Type { text } => {
                self.controller.set_draft(&text);
                Some(format!("Draft: {text}"))
            }
            Command::Create { text } => {
                if let Some(text) = text {
                    self.controller.set_draft(&text);
                }
                match self.controller.create_task() {
                    Some(task) => Some(format!("Created task: {} ({})", task.description, task.id)),
                    None if self.controller.draft().is_empty() => {
                        Some("Nothing to create: draft is empty".to_string())
                    }
                    None => Some("Nothing to create: no task ids left".to_string()),
                }
            }
            Command::Delete { id } => {
                let id: TaskId = id.parse()?;
                Some(self.delete(id))
            }
            Command::Search { text } => {
                if let Some(text) = text {
                    self.controller.set_draft(&text);
                }
                self.controller.search();
                None
            }
            Command::List => None,
            Command::Stats => {
                let stats = self.controller.stats();
                if json {
                    println!("{}", serde_json::to_string(&stats)?);
                } else {
                    output::print_stats_plain(&stats);
                }
                return Ok(());
            }
        };

        let view = self.controller.render();
        if json {
            output::print_view_json(&view);
        } else {
            if let Some(message) = message {
                println!("{message}");
            }
            output::print_view_plain(&view, &self.palette);
        }
        self.last_view = Some(view);

        Ok(())
    }

    /// Deletes through the row's affordance when the task is on screen, the
    /// way a click would. Hidden or unknown ids go straight to the controller.
    fn delete(&mut self, id: TaskId) -> String {
        if self.last_view.is_none() {
            self.last_view = Some(self.controller.render());
        }
        if let Some(view) = &self.last_view
            && let Some(row) = view.list.row(id)
        {
            let description = row.description.clone();
            row.activate_delete();
            self.controller.dispatch_pending();
            return format!("Deleted task: {description} ({id})");
        }

        match self.controller.delete_task(id) {
            Some(task) => format!("Deleted task: {} ({})", task.description, task.id),
            None => format!("No task with id {id}"),
        }
    }
}
