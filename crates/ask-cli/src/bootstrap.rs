use anyhow::Context;
use ask_config::AskConfig;

/// Load layered configuration (with `.env`), then apply the `--db` override.
pub fn load_config(db_override: Option<&str>) -> anyhow::Result<AskConfig> {
    let mut config = AskConfig::load_with_dotenv().context("failed to load askboard config")?;
    if let Some(path) = db_override {
        config.database.path = path.to_string();
    }
    config.validate().context("invalid askboard config")?;
    Ok(config)
}
