use anyhow::Context;
use ask_config::{AskConfig, DatabaseConfig};
use ask_db::retry::RetryConfig;
use ask_db::service::AskService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: AskService,
    pub retry: RetryConfig,
}

impl AppContext {
    /// Open the configured store and derive the caller-side retry policy.
    pub async fn init(config: &AskConfig) -> anyhow::Result<Self> {
        let db = &config.database;
        if !db.is_in_memory() {
            ensure_parent_dir(&db.path)?;
        }

        let service = AskService::new_local(&db.path, db.query_timeout())
            .await
            .with_context(|| format!("failed to open question store at {}", db.path))?;
        tracing::debug!(path = %db.path, "question store ready");

        Ok(Self {
            service,
            retry: retry_config(db),
        })
    }
}

#[must_use]
pub const fn retry_config(db: &DatabaseConfig) -> RetryConfig {
    RetryConfig {
        max_attempts: db.retry_attempts,
        base_delay: db.retry_base_delay(),
        max_delay: db.retry_max_delay(),
    }
}

fn ensure_parent_dir(path: &str) -> anyhow::Result<()> {
    match std::path::Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display())),
        _ => Ok(()),
    }
}
