//! Notification Module
//!
//! User-facing notices raised outside the normal re-render, e.g. when a
//! generation completes.

use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use std::io::Write;
use std::sync::Arc;
use tracing::{info, warn};

/// Trait for notification sinks
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Show the given text to the user
    async fn notify(&self, text: &str) -> Result<()>;

    /// Get the notifier name
    fn name(&self) -> &str;
}

/// Writes notices to the tracing log
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, text: &str) -> Result<()> {
        info!("🔔 {}", text);
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

/// Prints notices on stdout
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "🔔 {}", text)?;
        stdout.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Factory for the configured notifier
pub fn create_notifier(config: &Config) -> Arc<dyn Notifier> {
    let notifier: Arc<dyn Notifier> = match config.notifier.as_str() {
        "log" => Arc::new(LogNotifier),
        "console" => Arc::new(ConsoleNotifier),
        other => {
            warn!("  - Unknown notifier '{}', falling back to log", other);
            Arc::new(LogNotifier)
        }
    };
    info!("🔔 Notifier '{}' initialized", notifier.name());
    notifier
}
