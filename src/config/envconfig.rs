use std::path::Path;

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Loads a config struct from `.env` plus the process environment.
///
/// Keys are `APP_<SECTION>__<FIELD>`, e.g. `APP_DATABASE__PATH=items.db` or
/// `APP_GENERAL__PORT=9000`. After deserializing, `apply_legacy_env` gets a
/// chance to read older unprefixed variables (the items service maps
/// `DATABASE_PATH` onto the database section), then `validate` runs.
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";

    fn load_dotenv() {
        // .env next to Cargo.toml wins; otherwise the working directory's.
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        let _ = dotenvy::from_filename(manifest_dir.join(".env")).or_else(|_| dotenvy::dotenv());
    }

    /// Fills gaps from variables outside the `APP_` namespace. Values already
    /// set through `APP_*` take precedence.
    fn apply_legacy_env(&mut self) {}

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env() -> Result<Self> {
        Self::load_dotenv();

        let settings = config_rs::Config::builder()
            .add_source(
                config_rs::Environment::with_prefix(Self::PREFIX)
                    .prefix_separator("_")
                    .separator(Self::SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .context("failed to read APP_* environment variables")?;

        let mut cfg = settings
            .try_deserialize::<Self>()
            .context("APP_* environment does not match the config layout")?;

        cfg.apply_legacy_env();
        cfg.validate()?;
        Ok(cfg)
    }
}
