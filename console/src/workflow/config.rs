use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use vesselcore::prelude::AnalysisConfig;

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// AIS CSV export to load; the demo dataset is used when absent.
    pub dataset: Option<PathBuf>,
    pub bind: SocketAddr,
    pub analysis: AnalysisConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            bind: default_bind(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl ConsoleConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading console config {}", path_ref.display()))?;
        let config: ConsoleConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing console config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        dataset: Option<PathBuf>,
        bind: Option<SocketAddr>,
        fuzzy_threshold: Option<u8>,
    ) -> Self {
        let mut config = Self {
            dataset,
            ..Default::default()
        };
        if let Some(bind) = bind {
            config.bind = bind;
        }
        if let Some(threshold) = fuzzy_threshold {
            config.analysis.fuzzy_threshold = threshold;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_keeps_defaults() {
        let cfg = ConsoleConfig::from_args(Some(PathBuf::from("ais.csv")), None, Some(80));
        assert_eq!(cfg.analysis.fuzzy_threshold, 80);
        assert_eq!(cfg.analysis.analysis_window, 3);
        assert_eq!(cfg.bind, default_bind());
    }

    #[test]
    fn config_load_reads_partial_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"dataset: data/ais.csv\n\
              bind: 0.0.0.0:8080\n\
              analysis:\n  speed_threshold_knots: 30.0\n  analysis_window: 5\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = ConsoleConfig::load(&path).unwrap();
        assert_eq!(cfg.dataset, Some(PathBuf::from("data/ais.csv")));
        assert_eq!(cfg.bind.port(), 8080);
        assert_eq!(cfg.analysis.speed_threshold_knots, 30.0);
        assert_eq!(cfg.analysis.analysis_window, 5);
        assert_eq!(cfg.analysis.fuzzy_threshold, 75);
        assert_eq!(cfg.analysis.earth_radius_km, 6371.0);
    }

    #[test]
    fn config_load_reports_missing_file() {
        let err = ConsoleConfig::load("/nonexistent/console.yaml").unwrap_err();
        assert!(err.to_string().contains("reading console config"));
    }
}
