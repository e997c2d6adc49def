use std::cell::RefCell;
use std::fmt;

pub const LOG_TARGET: &str = "tasklist::render";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateField {
    Tasks,
    Draft,
    SearchTerm,
}

impl StateField {
    pub fn name(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Draft => "draft",
            Self::SearchTerm => "search_term",
        }
    }
}

/// Points in the component lifecycle reported to a [`RenderObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Mount {
        component: &'static str,
    },
    StateChange {
        field: StateField,
        summary: String,
    },
    DerivedRecompute {
        name: &'static str,
        inputs: usize,
        outputs: usize,
    },
    Render {
        component: &'static str,
        detail: Option<String>,
    },
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mount { component } => write!(f, "Mounted <{component} />"),
            Self::StateChange { field, summary } => {
                write!(f, "Changing {}: {}", field.name(), summary)
            }
            Self::DerivedRecompute {
                name,
                inputs,
                outputs,
            } => write!(f, "Recomputing {name}: {inputs} in, {outputs} out"),
            Self::Render {
                component,
                detail: Some(detail),
            } => write!(f, "Rendering <{component} /> {detail}"),
            Self::Render {
                component,
                detail: None,
            } => write!(f, "Rendering <{component} />"),
        }
    }
}

pub trait RenderObserver {
    fn on_event(&self, event: &LifecycleEvent);
}

pub struct NoopObserver;

impl RenderObserver for NoopObserver {
    fn on_event(&self, _event: &LifecycleEvent) {}
}

/// Forwards every event to the `log` facade under [`LOG_TARGET`].
pub struct LogObserver;

impl RenderObserver for LogObserver {
    fn on_event(&self, event: &LifecycleEvent) {
        match event {
            LifecycleEvent::DerivedRecompute { .. } => log::debug!(target: LOG_TARGET, "{event}"),
            _ => log::info!(target: LOG_TARGET, "{event}"),
        }
    }
}

/// Keeps every event in memory. Used by tests and by hosts that want to
/// inspect render activity after the fact.
#[derive(Default)]
pub struct RecordingObserver {
    events: RefCell<Vec<LifecycleEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn renders_of(&self, component: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| {
                matches!(event, LifecycleEvent::Render { component: rendered, .. } if *rendered == component)
            })
            .count()
    }

    pub fn recomputes_of(&self, derived: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| {
                matches!(event, LifecycleEvent::DerivedRecompute { name, .. } if *name == derived)
            })
            .count()
    }
}

impl RenderObserver for RecordingObserver {
    fn on_event(&self, event: &LifecycleEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
