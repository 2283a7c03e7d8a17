//! Daily scan runner: drives one scan from collection through dispatch.
//!
//! Any failure after collection (e.g. the report cannot be persisted)
//! triggers a best-effort error notice before the error is returned.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{error, info};

use super::coordinator::{PipelineStats, ScanPipeline};
use super::source::AnnouncementSource;
use crate::acquisition::collect_all;
use crate::config::ScannerConfig;
use crate::dispatch::Dispatcher;
use crate::registry::CompanyRegistry;
use crate::report::ReportBuilder;
use crate::types::Report;

/// Result of a completed scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub report: Report,
    pub report_path: PathBuf,
    pub delivered: bool,
    pub stats: PipelineStats,
}

/// Everything one scan needs, assembled once in `main`.
pub struct DailyScan {
    sources: Vec<Box<dyn AnnouncementSource>>,
    pipeline: ScanPipeline,
    builder: ReportBuilder,
    registry: Arc<CompanyRegistry>,
    dispatcher: Dispatcher,
}

impl DailyScan {
    pub fn new(
        config: &ScannerConfig,
        registry: Arc<CompanyRegistry>,
        sources: Vec<Box<dyn AnnouncementSource>>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            sources,
            pipeline: ScanPipeline::new(&config.scanning),
            builder: ReportBuilder::new(&config.report),
            registry,
            dispatcher,
        }
    }

    /// Run the scan. On failure an error notice is attempted, then the
    /// original error is returned.
    pub async fn run(&self) -> Result<ScanOutcome> {
        info!(sources = self.sources.len(), "Starting daily mining announcement scan");

        match self.run_stages().await {
            Ok(outcome) => {
                info!(
                    path = %outcome.report_path.display(),
                    announcements = outcome.report.announcement_count(),
                    delivered = outcome.delivered,
                    "✓ Daily scan completed"
                );
                Ok(outcome)
            }
            Err(e) => {
                let message = format!("{e:#}");
                error!(error = %message, "Daily scan failed");
                self.dispatcher.notify_failure(&message, Utc::now()).await;
                Err(e)
            }
        }
    }

    async fn run_stages(&self) -> Result<ScanOutcome> {
        // STAGE 1: Collection
        let batch = collect_all(&self.sources).await;

        // STAGES 2-4: Deduplicate, classify, quality gate
        let (announcements, stats) = self.pipeline.process(batch);

        // STAGE 5: Report
        let report = self.builder.build(
            &announcements,
            &self.registry,
            self.registry.len(),
            Utc::now(),
        );

        // STAGE 6: Dispatch
        let receipt = self
            .dispatcher
            .dispatch(&report)
            .await
            .context("Failed to dispatch daily report")?;

        Ok(ScanOutcome {
            report,
            report_path: receipt.path,
            delivered: receipt.delivered,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::ReportStore;
    use crate::pipeline::source::{SourceBatch, SourceError};
    use crate::types::RawRecord;
    use async_trait::async_trait;

    struct Fixed(Vec<RawRecord>);

    #[async_trait]
    impl AnnouncementSource for Fixed {
        async fn fetch(&self) -> Result<SourceBatch, SourceError> {
            Ok(SourceBatch::new(self.0.clone()))
        }

        fn source_name(&self) -> &str {
            "fixed"
        }
    }

    fn record(code: &str, title: &str) -> RawRecord {
        RawRecord {
            company_code: code.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_scan_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = ScannerConfig::default();
        config.report.output_dir = tmp.path().to_path_buf();
        config.report.echo_to_console = false;

        let registry = Arc::new(CompanyRegistry::builtin());
        let sources: Vec<Box<dyn AnnouncementSource>> = vec![Box::new(Fixed(vec![
            record("NST", "Record gold production at Jundee operation"),
            record("NST", "Record gold production at Jundee operation"),
            record("EVN", "Short"),
        ]))];
        let dispatcher = Dispatcher::from_config(&config, false);

        let outcome = DailyScan::new(&config, registry, sources, dispatcher)
            .run()
            .await
            .unwrap();

        assert_eq!(outcome.stats.kept, 1);
        assert_eq!(outcome.stats.duplicates, 1);
        assert!(!outcome.delivered);
        let saved = std::fs::read_to_string(&outcome.report_path).unwrap();
        assert_eq!(saved, outcome.report.text);
        assert!(saved.contains("Found 1 significant announcements"));
    }

    #[tokio::test]
    async fn test_persist_failure_propagates() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = ScannerConfig::default();
        let dispatcher = Dispatcher::new(
            ReportStore::new(file.path().join("reports"), "mining_report"),
            None,
            "ASX Mining Daily Report",
            false,
        );
        let scan = DailyScan::new(
            &config,
            Arc::new(CompanyRegistry::builtin()),
            Vec::new(),
            dispatcher,
        );
        let err = scan.run().await.unwrap_err();
        assert!(format!("{err:#}").contains("Failed to dispatch daily report"));
    }
}
