//! Simulated generation
//!
//! No backend exists; a generation is a timed placeholder that resolves to a
//! completion message for the controller.

use std::time::Duration;

use super::messages::Message;

/// Handle for one scheduled generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicket {
    pub id: u64,
    pub delay: Duration,
}

impl GenerationTicket {
    /// Wait out the delay, then report completion for this ticket
    pub async fn run(self) -> Message {
        tokio::time::sleep(self.delay).await;
        Message::GenerationFinished(self.id)
    }
}
