use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub simulation: SimulationConfig,
    pub noise: NoiseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Hourly history CSV the bounds registry is computed from.
    pub reference_csv: PathBuf,
}

/// Default simulation window used when the caller does not supply one.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    pub total_days: u32,
    pub total_hours: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoiseConfig {
    /// Disable to make every run exactly reproducible from its inputs.
    pub enabled: bool,
    /// Fixed RNG seed; random when absent.
    pub seed: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("TWIN__").split("__"));
        Ok(figment.extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_toml_string() {
        let config: Config = Figment::new()
            .merge(Toml::string(
                r#"
                [data]
                reference_csv = "data/reference_hourly.csv"

                [simulation]
                total_days = 1
                total_hours = 0

                [noise]
                enabled = true
                seed = 42
                "#,
            ))
            .extract()
            .unwrap();

        assert_eq!(config.simulation.total_days, 1);
        assert_eq!(config.simulation.total_hours, 0);
        assert!(config.noise.enabled);
        assert_eq!(config.noise.seed, Some(42));
    }
}
