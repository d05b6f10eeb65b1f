//! Explicit block scope: named block bindings visible to a task.
//!
//! A dynamic runtime can discover blocks by introspecting a function's enclosing
//! scope; here callers bind blocks by name into a [`BlockScope`] and each task
//! carries a shared handle to it. Discovery becomes explicit while the dedup and
//! logging contract stays the same.
//!
//! Scopes are built once and shared read-only via `Arc`; per-invocation
//! bookkeeping (dedup sets, detected lists) lives in the call, never here.

use std::sync::Arc;

use super::ConfigBlock;

/// Ordered name -> block bindings. Scan order is insertion order.
#[derive(Default, Clone)]
pub struct BlockScope {
    bindings: Vec<(String, Arc<dyn ConfigBlock>)>,
}

impl BlockScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a block under `name`. Rebinding an existing name replaces the block
    /// in place, keeping its original scan position.
    pub fn bind(&mut self, name: impl Into<String>, block: Arc<dyn ConfigBlock>) {
        let name = name.into();
        if let Some(entry) = self.bindings.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = block;
        } else {
            self.bindings.push((name, block));
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ConfigBlock>> {
        self.bindings
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, b)| b)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn ConfigBlock>)> {
        self.bindings.iter().map(|(n, b)| (n.as_str(), b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NamedBlock(&'static str);

    impl ConfigBlock for NamedBlock {
        fn type_name(&self) -> &str {
            "NamedBlock"
        }

        fn slug(&self) -> Option<&str> {
            Some(self.0)
        }
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut scope = BlockScope::new();
        scope.bind("b", Arc::new(NamedBlock("beta")));
        scope.bind("a", Arc::new(NamedBlock("alpha")));
        scope.bind("c", Arc::new(NamedBlock("gamma")));
        let names: Vec<&str> = scope.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn rebinding_replaces_in_place() {
        let mut scope = BlockScope::new();
        scope.bind("db", Arc::new(NamedBlock("old")));
        scope.bind("cache", Arc::new(NamedBlock("cache")));
        scope.bind("db", Arc::new(NamedBlock("new")));
        assert_eq!(scope.len(), 2);
        let names: Vec<&str> = scope.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["db", "cache"]);
        assert_eq!(scope.get("db").unwrap().slug(), Some("new"));
    }

    #[test]
    fn get_missing_returns_none() {
        let scope = BlockScope::new();
        assert!(scope.is_empty());
        assert!(scope.get("anything").is_none());
    }
}
