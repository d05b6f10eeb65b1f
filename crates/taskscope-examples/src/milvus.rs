//! Milvus connection block: host and credentials for a Milvus collection,
//! stored by the orchestration tooling under a slug.

use serde::Serialize;
use taskscope_core::{ConfigBlock, Secret};

/// Connection details for a Milvus instance. The password never renders in
/// logs or serialized output.
#[derive(Debug, Clone, Serialize)]
pub struct MilvusBlock {
    pub slug: String,
    pub collections: String,
    pub host: String,
    pub user: String,
    pub password: Secret<String>,
    pub port: u16,
}

impl MilvusBlock {
    /// Stand-in for loading the stored block document named `slug`.
    pub fn load(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            collections: "documents".into(),
            host: "milvus.internal".into(),
            user: "svc-milvus".into(),
            password: Secret::new("demo-password".into()),
            port: 19530,
        }
    }
}

impl ConfigBlock for MilvusBlock {
    fn type_name(&self) -> &str {
        "MilvusBlock"
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_reports_type_and_slug() {
        let block = MilvusBlock::load("milvus");
        assert_eq!(block.type_name(), "MilvusBlock");
        assert_eq!(ConfigBlock::slug(&block), Some("milvus"));
    }

    #[test]
    fn password_is_redacted_in_serialized_form() {
        let block = MilvusBlock::load("milvus");
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["password"], "[REDACTED]");
        assert_eq!(json["host"], "milvus.internal");
        assert_eq!(block.password.expose(), "demo-password");
    }
}
