use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, Environment, File, Map};
use psq_domain::EngineConfig;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize)]
pub struct Log {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub log: Log,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Settings {
    /// Loads the `RUN_MODE` profile (`development` when unset) from
    /// `APP_CONFIG_DIR`, or from the workspace `config/` directory when that
    /// is unset, with `APP_*` environment overrides.
    pub fn new() -> psq_error::Result<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let dir = config_dir(
            env::var("APP_CONFIG_DIR").ok(),
            env::var("CARGO_MANIFEST_DIR").ok(),
        )?;

        Self::load(&dir, &run_mode, None)
    }

    /// Layers `default`, `{run_mode}` and `local` files from `dir`, then the
    /// environment. `env_source` replaces the process environment when given.
    ///
    /// Nested keys use `__`: `APP_LOG__LEVEL`, `APP_ENGINE__STRICT_FEE_COMBO`.
    pub fn load(
        dir: &Utf8Path,
        run_mode: &str,
        env_source: Option<Map<String, String>>,
    ) -> psq_error::Result<Self> {
        let environment = Environment::with_prefix("app")
            .prefix_separator("_")
            .separator("__")
            .source(env_source);

        let s = Config::builder()
            .add_source(File::with_name(dir.join("default").as_str()))
            .add_source(File::with_name(dir.join(run_mode).as_str()).required(false))
            .add_source(File::with_name(dir.join("local").as_str()).required(false))
            .add_source(environment)
            .build()
            .map_err(|e| psq_error::Error::Config(e.to_string()))?;

        s.try_deserialize()
            .map_err(|e| psq_error::Error::Config(e.to_string()))
    }
}

/// The explicit directory when given, otherwise `config/` at the workspace
/// root three levels above the crate manifest.
fn config_dir(
    explicit: Option<String>,
    cargo_manifest_dir: Option<String>,
) -> psq_error::Result<Utf8PathBuf> {
    if let Some(dir) = explicit.filter(|dir| !dir.trim().is_empty()) {
        return Ok(Utf8PathBuf::from(dir));
    }

    let cargo_manifest_dir = cargo_manifest_dir.ok_or_else(|| {
        psq_error::Error::Config(
            "set APP_CONFIG_DIR to the directory holding default.toml".into(),
        )
    })?;
    let mut path = Utf8PathBuf::from(cargo_manifest_dir);
    path.pop();
    path.pop();
    path.pop();
    Ok(path.join("config"))
}
