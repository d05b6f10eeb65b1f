//! # Task SDK
//!
//! Values, run context, and error taxonomy for observed tasks. The wrapper
//! itself lives in [`observed`]; block detection in [`detect`]; the
//! name-to-task registration seam in [`registry`].

pub mod detect;
pub mod observed;
pub mod registry;

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::block::ConfigBlock;

/// Parameter or result value for a task invocation.
///
/// Plain data travels as JSON; configuration blocks travel by handle so
/// detection can test for the [`ConfigBlock`] capability on top-level values.
#[derive(Clone)]
pub enum TaskValue {
    Json(serde_json::Value),
    Block(Arc<dyn ConfigBlock>),
}

impl TaskValue {
    pub fn json(value: impl Into<serde_json::Value>) -> Self {
        TaskValue::Json(value.into())
    }

    pub fn block(block: Arc<dyn ConfigBlock>) -> Self {
        TaskValue::Block(block)
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            TaskValue::Json(v) => Some(v),
            TaskValue::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&Arc<dyn ConfigBlock>> {
        match self {
            TaskValue::Json(_) => None,
            TaskValue::Block(b) => Some(b),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_json().and_then(|v| v.as_i64())
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_json().and_then(|v| v.as_str())
    }
}

impl fmt::Display for TaskValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskValue::Json(v) => write!(f, "{}", v),
            TaskValue::Block(b) => write!(f, "<{} slug={}>", b.type_name(), b.slug_or_missing()),
        }
    }
}

impl fmt::Debug for TaskValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskValue::Json(v) => f.debug_tuple("Json").field(v).finish(),
            TaskValue::Block(b) => write!(f, "Block(<{} slug={}>)", b.type_name(), b.slug_or_missing()),
        }
    }
}

impl From<serde_json::Value> for TaskValue {
    fn from(value: serde_json::Value) -> Self {
        TaskValue::Json(value)
    }
}

impl From<i64> for TaskValue {
    fn from(value: i64) -> Self {
        TaskValue::Json(value.into())
    }
}

impl From<&str> for TaskValue {
    fn from(value: &str) -> Self {
        TaskValue::Json(value.into())
    }
}

impl From<String> for TaskValue {
    fn from(value: String) -> Self {
        TaskValue::Json(value.into())
    }
}

impl From<Arc<dyn ConfigBlock>> for TaskValue {
    fn from(block: Arc<dyn ConfigBlock>) -> Self {
        TaskValue::Block(block)
    }
}

/// Run context resolved for one invocation: run id, task name, and the ordered
/// parameter mapping. Read-only during the call; dropped afterward.
#[derive(Clone)]
pub struct TaskRun {
    run_id: Uuid,
    task_name: String,
    parameters: Vec<(String, TaskValue)>,
}

impl TaskRun {
    pub fn new(task_name: impl Into<String>, parameters: Vec<(String, TaskValue)>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            task_name: task_name.into(),
            parameters,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    /// Resolved parameters in declaration order.
    pub fn parameters(&self) -> &[(String, TaskValue)] {
        &self.parameters
    }

    pub fn get(&self, name: &str) -> Option<&TaskValue> {
        self.parameters
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// `{x: 15, y: 30}`-style rendering for log lines.
    pub fn render_parameters(&self) -> String {
        let fields: Vec<String> = self
            .parameters
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect();
        format!("{{{}}}", fields.join(", "))
    }
}

/// Task error taxonomy. The wrapper logs a [`TaskError::Failed`] and returns it
/// unchanged; it never converts one kind into another and never swallows one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// The wrapped function failed.
    #[error("{0}")]
    Failed(String),
    /// A task body rejected one of its resolved parameters.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter { name: String, message: String },
    /// Registry lookup miss.
    #[error("unknown task: {0}")]
    UnknownTask(String),
}
