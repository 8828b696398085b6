//! Settings for the application, layered as defaults, an optional TOML file,
//! `TALLY_*` environment variables and finally command line flags.
use std::path::PathBuf;

use engine::{Currency, storage::DEFAULT_KEY};
use serde::Deserialize;

use crate::{cli::Cli, error::Result};

const DEFAULT_CONFIG_PATH: &str = "config/tally.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub key: String,
    pub currency: Currency,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".tally"),
            key: DEFAULT_KEY.to_string(),
            currency: Currency::default(),
            level: "info".to_string(),
        }
    }
}

pub fn load(cli: &Cli) -> Result<AppConfig> {
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let settings = from_sources(
        config::File::with_name(config_path).required(false),
        config::Environment::with_prefix("TALLY"),
    )?;

    Ok(apply_overrides(settings, cli))
}

fn from_sources<F>(file: F, env: config::Environment) -> Result<AppConfig>
where
    F: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?
        .try_deserialize()?;
    Ok(settings)
}

fn apply_overrides(mut settings: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(data_dir) = &cli.data_dir {
        settings.data_dir = data_dir.clone();
    }
    if let Some(currency) = cli.currency {
        settings.currency = currency;
    }
    if let Some(level) = &cli.level {
        settings.level = level.clone();
    }
    settings
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn flags_override_file_values() {
        let cli = Cli::try_parse_from([
            "tally",
            "totals",
            "--data-dir",
            "elsewhere",
            "--level",
            "debug",
        ])
        .unwrap();
        let settings = apply_overrides(AppConfig::default(), &cli);
        assert_eq!(settings.data_dir, PathBuf::from("elsewhere"));
        assert_eq!(settings.level, "debug");
        assert_eq!(settings.currency, Currency::Usd);
        assert_eq!(settings.key, "transactions");
    }

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        config::Environment::with_prefix("TALLY").source(Some(
            vars.iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn environment_overrides_file() {
        let file = config::File::from_str(
            "data_dir = \"/from/file\"\ncurrency = \"eur\"\nlevel = \"warn\"\n",
            config::FileFormat::Toml,
        );
        let settings = from_sources(
            file,
            env(&[("TALLY_DATA_DIR", "/from/env"), ("TALLY_KEY", "budget")]),
        )
        .unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/from/env"));
        assert_eq!(settings.key, "budget");
        assert_eq!(settings.currency, Currency::Eur);
        assert_eq!(settings.level, "warn");
    }

    #[test]
    fn environment_currency_is_case_insensitive() {
        let file = config::File::from_str("", config::FileFormat::Toml);
        let settings = from_sources(file, env(&[("TALLY_CURRENCY", "eur")])).unwrap();
        assert_eq!(settings.currency, Currency::Eur);

        let file = config::File::from_str("", config::FileFormat::Toml);
        assert!(from_sources(file, env(&[("TALLY_CURRENCY", "gbp")])).is_err());
    }

    #[test]
    fn config_flag_selects_the_file() {
        let dir = PathBuf::from("target/test_configs").join(Uuid::new_v4().to_string());
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tally.toml");
        std::fs::write(&path, "data_dir = \"/srv/tally\"\nlevel = \"debug\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "tally",
            "totals",
            "--config",
            path.to_str().unwrap(),
            "--level",
            "trace",
        ])
        .unwrap();
        let settings = load(&cli).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/srv/tally"));
        assert_eq!(settings.level, "trace");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let cli = Cli::try_parse_from(["tally", "totals", "--config", "does/not/exist.toml"])
            .unwrap();
        let settings = load(&cli).unwrap();
        assert_eq!(settings.key, AppConfig::default().key);
    }

    #[test]
    fn toml_file_is_read() {
        let toml = "data_dir = \"/var/lib/tally\"\ncurrency = \"EUR\"\n";
        let settings: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/var/lib/tally"));
        assert_eq!(settings.currency, Currency::Eur);
        assert_eq!(settings.level, "info");
    }
}
