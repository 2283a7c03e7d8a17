//! Report dispatch: persist, echo and deliver a finished report.
//!
//! Persisting is the only step that can fail a run. Delivery problems are
//! logged and reported back in [`DispatchReceipt::delivered`].

pub mod notifier;
pub mod store;

pub use notifier::{Message, Notifier, NotifyError, WebhookNotifier};
pub use store::ReportStore;

use crate::config::{defaults, ScannerConfig};
use crate::report::render_error_report;
use crate::types::Report;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to persist report to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What happened to a dispatched report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReceipt {
    pub path: PathBuf,
    pub delivered: bool,
}

pub struct Dispatcher {
    store: ReportStore,
    notifier: Option<Box<dyn Notifier>>,
    subject_title: String,
    echo_to_console: bool,
}

impl Dispatcher {
    pub fn new(
        store: ReportStore,
        notifier: Option<Box<dyn Notifier>>,
        subject_title: impl Into<String>,
        echo_to_console: bool,
    ) -> Self {
        Self {
            store,
            notifier,
            subject_title: subject_title.into(),
            echo_to_console,
        }
    }

    /// Build from config. `deliver = false` disables delivery for this run.
    ///
    /// Incomplete delivery settings log an error and disable delivery; they
    /// never stop the scan.
    pub fn from_config(config: &ScannerConfig, deliver: bool) -> Self {
        let notifier: Option<Box<dyn Notifier>> = if !deliver {
            info!("Delivery disabled for this run");
            None
        } else if !config.delivery.enabled {
            info!("Delivery disabled in config");
            None
        } else {
            match WebhookNotifier::from_config(&config.delivery) {
                Ok(n) => {
                    info!(recipient = n.recipient(), "Webhook delivery configured");
                    Some(Box::new(n))
                }
                Err(e) => {
                    error!(error = %e, "Delivery configuration incomplete, skipping delivery");
                    None
                }
            }
        };

        Self::new(
            ReportStore::new(&config.report.output_dir, &config.report.file_prefix),
            notifier,
            &config.report.title,
            config.report.echo_to_console,
        )
    }

    pub fn store(&self) -> &ReportStore {
        &self.store
    }

    /// Subject line for a report generated at `at`.
    pub fn subject_for(&self, at: DateTime<Utc>) -> String {
        format!("{} - {}", self.subject_title, at.format("%Y-%m-%d"))
    }

    /// Persist, echo, then deliver.
    pub async fn dispatch(&self, report: &Report) -> Result<DispatchReceipt, DispatchError> {
        let path = self.store.save(&report.text, report.generated_at).await?;

        if self.echo_to_console {
            let rule = "=".repeat(defaults::CONSOLE_RULE_WIDTH);
            println!("{rule}");
            println!("{}", report.text);
            println!("{rule}");
        }

        let delivered = match self.notifier {
            None => false,
            Some(ref notifier) => {
                let message = Message {
                    subject: self.subject_for(report.generated_at),
                    body: report.text.clone(),
                };
                match notifier.send(&message).await {
                    Ok(()) => true,
                    Err(e) => {
                        error!(notifier = notifier.name(), error = %e, "Report delivery failed");
                        self.notify_failure(&format!("report delivery failed: {e}"), Utc::now())
                            .await;
                        false
                    }
                }
            }
        };

        Ok(DispatchReceipt { path, delivered })
    }

    /// Best-effort error notice. Never fails; returns whether it was sent.
    pub async fn notify_failure(&self, error: &str, at: DateTime<Utc>) -> bool {
        let Some(ref notifier) = self.notifier else {
            return false;
        };
        let message = Message {
            subject: format!("{} - {}", defaults::ERROR_REPORT_TITLE, at.format("%Y-%m-%d")),
            body: render_error_report(error, at),
        };
        match notifier.send(&message).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Could not send error notification");
                false
            }
        }
    }
}
