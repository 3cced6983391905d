use crate::generator::profile::build_demo_dataset;
use crate::workflow::config::ConsoleConfig;
use anyhow::Context;
use log::info;
use std::sync::Arc;
use vesselcore::analysis::{QueryReport, QueryRouter};
use vesselcore::dataset::{load_csv, TrackDataset};
use vesselcore::telemetry::QueryMetrics;

/// Loaded dataset plus the router that answers queries against it.
pub struct Runner {
    router: QueryRouter,
}

impl Runner {
    pub fn new(config: &ConsoleConfig) -> anyhow::Result<Self> {
        let dataset = match config.dataset.as_ref() {
            Some(path) => load_csv(path)
                .with_context(|| format!("loading AIS dataset {}", path.display()))?,
            None => {
                info!("no dataset configured, using generated demo tracks");
                build_demo_dataset().context("building demo dataset")?
            }
        };
        Ok(Self::from_dataset(dataset, config))
    }

    pub fn from_dataset(dataset: TrackDataset, config: &ConsoleConfig) -> Self {
        Self {
            router: QueryRouter::new(Arc::new(dataset), config.analysis.clone()),
        }
    }

    pub fn execute(&self, text: &str) -> QueryReport {
        let report = self.router.run(text);
        info!(
            "query '{}' -> intent {} vessel {:?}",
            text, report.parsed.intent, report.parsed.vessel_name
        );
        report
    }

    pub fn vessel_names(&self) -> Vec<String> {
        self.router.registry().all_names().iter().cloned().collect()
    }

    pub fn metrics(&self) -> QueryMetrics {
        self.router.metrics()
    }
}
