//! Task registry: name -> observed task, the registration seam the surrounding
//! orchestration tooling schedules through. No scheduler lives here; callers
//! decide when and from where registered tasks run.

use std::collections::HashMap;

use crate::task::observed::ObservedTask;
use crate::task::{TaskError, TaskValue};

/// Registry of observed tasks keyed by task name. The key is taken from the
/// task itself so the display name always matches the wrapped function.
#[derive(Default)]
pub struct TaskRegistry {
    tasks: HashMap<String, ObservedTask>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task under its own name. Re-registering a name replaces the
    /// previous task.
    pub fn register(&mut self, task: ObservedTask) {
        self.tasks.insert(task.name().to_string(), task);
    }

    pub fn get(&self, name: &str) -> Option<&ObservedTask> {
        self.tasks.get(name)
    }

    /// Invoke a registered task by name. Unknown names fail with
    /// [`TaskError::UnknownTask`].
    pub fn call(
        &self,
        name: &str,
        parameters: Vec<(String, TaskValue)>,
    ) -> Result<TaskValue, TaskError> {
        let task = self
            .tasks
            .get(name)
            .ok_or_else(|| TaskError::UnknownTask(name.to_string()))?;
        task.call(parameters)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::block::scope::BlockScope;
    use crate::task::observed::observed;

    #[test]
    fn unknown_task_returns_error() {
        let registry = TaskRegistry::new();
        let err = registry.call("nope", vec![]).unwrap_err();
        assert_eq!(err, TaskError::UnknownTask("nope".into()));
    }

    #[test]
    fn registered_task_is_callable_by_name() {
        let mut registry = TaskRegistry::new();
        registry.register(observed("shout", Arc::new(BlockScope::new()), |run| {
            let text = run.get("text").and_then(TaskValue::as_str).unwrap_or("");
            Ok(TaskValue::from(text.to_uppercase()))
        }));
        let out = registry
            .call("shout", vec![("text".into(), "hello".into())])
            .unwrap();
        assert_eq!(out.as_str(), Some("HELLO"));
        assert_eq!(registry.get("shout").unwrap().name(), "shout");
    }

    #[test]
    fn re_registering_replaces_the_task() {
        let scope = Arc::new(BlockScope::new());
        let mut registry = TaskRegistry::new();
        registry.register(observed("t", scope.clone(), |_| Ok(TaskValue::from(1))));
        registry.register(observed("t", scope, |_| Ok(TaskValue::from(2))));
        let out = registry.call("t", vec![]).unwrap();
        assert_eq!(out.as_i64(), Some(2));
    }
}
