//! Configuration-block detection for one task invocation.
//!
//! Arguments are scanned first, then the task's block scope. Entries are deduped
//! by slug and the first discovery wins, so a block passed as an argument is
//! never re-reported as a scope binding. Only top-level parameter values are
//! inspected: a JSON container is not searched for nested blocks (shallow
//! detection, precision over recall).

use std::collections::HashSet;

use serde::Serialize;

use crate::block::scope::BlockScope;
use crate::task::{TaskRun, TaskValue};

/// Where a block was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockSource {
    Argument,
    ScopeVariable,
}

/// One detected block. Serialized into the "is using the following blocks" log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedBlock {
    pub source: BlockSource,
    /// Binding name for scope discoveries; absent for arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,
    pub block_type: String,
    pub block_slug: String,
}

/// Scan the run's resolved parameters, then the scope bindings, for
/// configuration blocks. Never fails: a block without a slug is reported under
/// the `N/A` sentinel, and that sentinel participates in dedup like any slug.
pub fn detect_blocks(run: &TaskRun, scope: &BlockScope) -> Vec<DetectedBlock> {
    let mut detected = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (_, value) in run.parameters() {
        if let TaskValue::Block(block) = value {
            let slug = block.slug_or_missing();
            if seen.insert(slug.to_string()) {
                detected.push(DetectedBlock {
                    source: BlockSource::Argument,
                    variable_name: None,
                    block_type: block.type_name().to_string(),
                    block_slug: slug.to_string(),
                });
            }
        }
    }

    for (name, block) in scope.iter() {
        let slug = block.slug_or_missing();
        if seen.insert(slug.to_string()) {
            detected.push(DetectedBlock {
                source: BlockSource::ScopeVariable,
                variable_name: Some(name.to_string()),
                block_type: block.type_name().to_string(),
                block_slug: slug.to_string(),
            });
        }
    }

    detected
}
