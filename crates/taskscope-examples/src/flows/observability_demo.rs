//! Demo flow with three observed tasks: plain arithmetic, a block consumer, and
//! a task that always fails. The flow catches the designed failure itself; the
//! wrapper only logs it.

use std::sync::Arc;

use taskscope_core::{BlockScope, TaskError, TaskRegistry, TaskValue, observed};
use tracing::info;

use crate::milvus::MilvusBlock;

fn register_tasks(scope: Arc<BlockScope>, milvus: &MilvusBlock) -> TaskRegistry {
    let mut registry = TaskRegistry::new();

    registry.register(observed("add_numbers", scope.clone(), |run| {
        let x = run
            .get("x")
            .and_then(TaskValue::as_i64)
            .ok_or_else(|| TaskError::InvalidParameter {
                name: "x".into(),
                message: "integer required".into(),
            })?;
        let y = run
            .get("y")
            .and_then(TaskValue::as_i64)
            .ok_or_else(|| TaskError::InvalidParameter {
                name: "y".into(),
                message: "integer required".into(),
            })?;
        Ok(TaskValue::from(x + y))
    }));

    // Detection sees the block handle in the `milvus_block` parameter; the body
    // reads connection details through a typed copy.
    let milvus = milvus.clone();
    registry.register(observed("process_with_milvus", scope.clone(), move |run| {
        run.get("milvus_block")
            .and_then(TaskValue::as_block)
            .ok_or_else(|| TaskError::InvalidParameter {
                name: "milvus_block".into(),
                message: "milvus block required".into(),
            })?;
        Ok(TaskValue::from(format!(
            "Processed data using Milvus config for host {}",
            milvus.host
        )))
    }));

    registry.register(observed("failing_task", scope, |_| {
        Err(TaskError::Failed("This task is designed to fail.".into()))
    }));

    registry
}

/// Run the demo flow: `add_numbers(15, 30)`, `process_with_milvus(milvus)`,
/// then the failing task, whose error is caught here.
pub fn observability_demo_flow() -> Result<String, TaskError> {
    let milvus = MilvusBlock::load("milvus");
    let milvus_handle: Arc<MilvusBlock> = Arc::new(milvus.clone());

    let mut scope = BlockScope::new();
    scope.bind("my_milvus_block", milvus_handle.clone());
    let registry = register_tasks(Arc::new(scope), &milvus);

    let sum = registry.call(
        "add_numbers",
        vec![("x".into(), 15.into()), ("y".into(), 30.into())],
    )?;
    info!("add_numbers produced {}", sum);

    let processed = registry.call(
        "process_with_milvus",
        vec![("milvus_block".into(), TaskValue::block(milvus_handle))],
    )?;
    info!("process_with_milvus produced {}", processed);

    match registry.call("failing_task", vec![]) {
        Ok(_) => Ok("flow completed without the designed failure".into()),
        Err(err) => Ok(format!("flow caught failure: {}", err)),
    }
}

#[cfg(test)]
mod tests {
    use taskscope_core::{BlockSource, CallOutcome};

    use super::*;

    fn demo_registry() -> (TaskRegistry, Arc<MilvusBlock>) {
        let milvus = MilvusBlock::load("milvus");
        let handle: Arc<MilvusBlock> = Arc::new(milvus.clone());
        let mut scope = BlockScope::new();
        scope.bind("my_milvus_block", handle.clone());
        (register_tasks(Arc::new(scope), &milvus), handle)
    }

    #[test]
    fn add_numbers_returns_sum() {
        let (registry, _) = demo_registry();
        let out = registry
            .call(
                "add_numbers",
                vec![("x".into(), 15.into()), ("y".into(), 30.into())],
            )
            .unwrap();
        assert_eq!(out.as_i64(), Some(45));
    }

    #[test]
    fn add_numbers_detects_the_scope_block() {
        let (registry, _) = demo_registry();
        let (_, record) = registry
            .get("add_numbers")
            .unwrap()
            .call_recorded(vec![("x".into(), 1.into()), ("y".into(), 2.into())]);
        assert_eq!(record.detected_blocks.len(), 1);
        assert_eq!(record.detected_blocks[0].source, BlockSource::ScopeVariable);
        assert_eq!(
            record.detected_blocks[0].variable_name.as_deref(),
            Some("my_milvus_block")
        );
        assert_eq!(record.detected_blocks[0].block_slug, "milvus");
    }

    #[test]
    fn milvus_passed_as_argument_is_reported_once_as_argument() {
        let (registry, handle) = demo_registry();
        let (result, record) = registry
            .get("process_with_milvus")
            .unwrap()
            .call_recorded(vec![("milvus_block".into(), TaskValue::block(handle))]);
        let out = result.unwrap();
        assert_eq!(
            out.as_str(),
            Some("Processed data using Milvus config for host milvus.internal")
        );
        assert_eq!(record.detected_blocks.len(), 1);
        assert_eq!(record.detected_blocks[0].source, BlockSource::Argument);
        assert_eq!(record.detected_blocks[0].block_type, "MilvusBlock");
    }

    #[test]
    fn failing_task_error_is_logged_then_propagated() {
        let (registry, _) = demo_registry();
        let (result, record) = registry.get("failing_task").unwrap().call_recorded(vec![]);
        let err = result.unwrap_err();
        assert_eq!(err, TaskError::Failed("This task is designed to fail.".into()));
        assert_eq!(record.outcome, CallOutcome::Failed(err));
    }

    #[test]
    fn flow_catches_the_designed_failure() {
        let outcome = observability_demo_flow().unwrap();
        assert!(outcome.contains("caught failure"));
        assert!(outcome.contains("designed to fail"));
    }
}
