//! # Configuration blocks
//!
//! A configuration block is a credential/config holder owned by the surrounding
//! orchestration tooling; this crate only reads blocks, never mutates or stores
//! them. Concrete block types implement [`ConfigBlock`]; detection tests for the
//! trait object, never for a concrete type.
//!
//! Sensitive block fields should be wrapped in [`Secret`] so that parameter and
//! block logging cannot leak them.

pub mod scope;

use std::fmt;

use serde::{Serialize, Serializer};

/// Slug reported for blocks that expose no slug. Detection never skips a block
/// for lacking a slug; it degrades to this sentinel.
pub const MISSING_SLUG: &str = "N/A";

/// Capability marking a value as a configuration block.
pub trait ConfigBlock: Send + Sync {
    /// Block type name for display (e.g. `MilvusBlock`).
    fn type_name(&self) -> &str;

    /// Stable identifier of the stored block document, if the block has one.
    fn slug(&self) -> Option<&str> {
        None
    }
}

impl dyn ConfigBlock {
    /// Slug for logging: the block's slug, or [`MISSING_SLUG`] when absent.
    pub fn slug_or_missing(&self) -> &str {
        self.slug().unwrap_or(MISSING_SLUG)
    }
}

/// Wrapper for sensitive values. `Debug`, `Display`, and `Serialize` all render
/// `[REDACTED]`; the value is only reachable through [`Secret::expose`].
#[derive(Clone, PartialEq, Eq)]
pub struct Secret<T>(T);

impl<T> Secret<T> {
    pub fn new(value: T) -> Self {
        Secret(value)
    }

    /// Read the protected value. Call sites exposing a secret stay easy to audit.
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Secret(value)
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T> Serialize for Secret<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SluglessBlock;

    impl ConfigBlock for SluglessBlock {
        fn type_name(&self) -> &str {
            "SluglessBlock"
        }
    }

    #[test]
    fn slug_or_missing_falls_back_to_sentinel() {
        let block: &dyn ConfigBlock = &SluglessBlock;
        assert_eq!(block.slug(), None);
        assert_eq!(block.slug_or_missing(), MISSING_SLUG);
    }

    #[test]
    fn secret_redacts_in_debug_display_and_json() {
        let secret = Secret::new("hunter2".to_string());
        assert_eq!(format!("{:?}", secret), "[REDACTED]");
        assert_eq!(format!("{}", secret), "[REDACTED]");
        let json = serde_json::to_string(&secret).unwrap();
        assert_eq!(json, "\"[REDACTED]\"");
        assert_eq!(secret.expose(), "hunter2");
    }
}
