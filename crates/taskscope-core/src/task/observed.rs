//! The observable wrapper: log parameters, detect blocks, run the body exactly
//! once, log the outcome, return it unchanged.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::block::scope::BlockScope;
use crate::task::detect::{DetectedBlock, detect_blocks};
use crate::task::{TaskError, TaskRun, TaskValue};

/// Boxed task body. Receives the resolved run context; returns a value or fails.
pub type TaskBody = Box<dyn Fn(&TaskRun) -> Result<TaskValue, TaskError> + Send + Sync>;

/// Outcome of one observed invocation, as logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// Completed; carries the rendered output.
    Completed(String),
    Failed(TaskError),
}

/// Ephemeral record of one invocation. Built alongside the log lines so tests
/// can assert on what was observed; dropped after the call, never persisted.
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub run_id: Uuid,
    pub task_name: String,
    /// Rendered parameter mapping, e.g. `{x: 15, y: 30}`.
    pub parameters: String,
    pub detected_blocks: Vec<DetectedBlock>,
    pub outcome: CallOutcome,
}

/// A function registered as an observable unit of work. Carries the display
/// name of the original function and a shared handle to its block scope.
pub struct ObservedTask {
    name: String,
    scope: Arc<BlockScope>,
    body: TaskBody,
}

/// Wrap `body` as an observable task named `name`, with `scope` as its
/// enclosing block scope. Explicit composition in place of decorator machinery.
pub fn observed(
    name: impl Into<String>,
    scope: Arc<BlockScope>,
    body: impl Fn(&TaskRun) -> Result<TaskValue, TaskError> + Send + Sync + 'static,
) -> ObservedTask {
    ObservedTask {
        name: name.into(),
        scope,
        body: Box::new(body),
    }
}

impl ObservedTask {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the task with resolved parameters. Logging and detection are pure
    /// side effects: the returned value or error is exactly what the body
    /// produced, with no retry and no suppression.
    pub fn call(&self, parameters: Vec<(String, TaskValue)>) -> Result<TaskValue, TaskError> {
        self.call_recorded(parameters).0
    }

    /// Invoke the task and also return the invocation's [`CallRecord`].
    ///
    /// All bookkeeping is local to this call, so concurrent invocations of the
    /// same task are independent.
    pub fn call_recorded(
        &self,
        parameters: Vec<(String, TaskValue)>,
    ) -> (Result<TaskValue, TaskError>, CallRecord) {
        let run = TaskRun::new(self.name.clone(), parameters);
        let rendered = run.render_parameters();
        info!(
            task = %self.name,
            run_id = %run.run_id(),
            "called with parameters: {}",
            rendered
        );

        let detected = detect_blocks(&run, &self.scope);
        if detected.is_empty() {
            info!(task = %self.name, "did not detect any blocks");
        } else {
            let listing =
                serde_json::to_string(&detected).unwrap_or_else(|_| format!("{:?}", detected));
            info!(task = %self.name, "is using the following blocks: {}", listing);
        }

        let result = (self.body)(&run);
        let outcome = match &result {
            Ok(value) => {
                info!(task = %self.name, "completed successfully with output: {}", value);
                CallOutcome::Completed(value.to_string())
            }
            Err(err) => {
                error!(task = %self.name, error = ?err, "failed with exception: {}", err);
                CallOutcome::Failed(err.clone())
            }
        };

        let record = CallRecord {
            run_id: run.run_id(),
            task_name: self.name.clone(),
            parameters: rendered,
            detected_blocks: detected,
            outcome,
        };
        (result, record)
    }
}
