use anyhow::{Result, bail};

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    match cfg.database.as_ref() {
        None => errors.push(
            "database.path is required (set APP_DATABASE__PATH or DATABASE_PATH)".to_string(),
        ),
        Some(database) => {
            if database.path.trim().is_empty() {
                errors.push("database.path must not be empty".to_string());
            }

            if database.max_connections == 0 {
                errors.push("database.max_connections must be > 0".to_string());
            }

            if database.min_idle > database.max_connections {
                errors.push(format!(
                    "database.min_idle ({}) must be <= database.max_connections ({})",
                    database.min_idle, database.max_connections
                ));
            }
        }
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}
