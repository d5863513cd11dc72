//! Mock Notifier for Testing
//!
//! Records every notice for verification.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Mock notifier that records shown notices
#[derive(Debug, Clone)]
pub struct MockNotifier {
    /// All notices that were "shown"
    pub notices: Arc<Mutex<Vec<String>>>,
    /// Simulate failure on notify
    pub should_fail: Arc<Mutex<bool>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            notices: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn get_notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn fail_next(&self) {
        *self.should_fail.lock().unwrap() = true;
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl content_studio::notify::Notifier for MockNotifier {
    async fn notify(&self, text: &str) -> Result<()> {
        let mut fail = self.should_fail.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(anyhow::anyhow!("Mock notifier failure"));
        }
        drop(fail);
        self.notices.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
