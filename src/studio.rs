//! Studio event loop
//!
//! Runs a `SessionController` on a single task. Messages from the
//! presentation surface and generation completions are applied one at a time,
//! and a fresh `StudioView` is published after each one.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::controller::{Effect, GenerationTicket, Message, SessionController, StudioView};
use crate::error::{StudioError, StudioResult};
use crate::model::Catalog;
use crate::notify::Notifier;

pub struct Studio;

/// A message plus an optional slot for its outcome
struct Envelope {
    message: Message,
    reply: Option<oneshot::Sender<StudioResult<()>>>,
}

/// Handle held by the presentation surface
pub struct StudioHandle {
    tx: mpsc::UnboundedSender<Envelope>,
    view_rx: watch::Receiver<StudioView>,
    catalog: Arc<Catalog>,
    join: JoinHandle<SessionController>,
}

impl Studio {
    /// Start the event loop on the current tokio runtime
    pub fn spawn(controller: SessionController, notifier: Arc<dyn Notifier>) -> StudioHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(controller.snapshot());
        let catalog = controller.catalog().clone();

        let join = tokio::spawn(run_loop(controller, notifier, rx, view_tx));

        StudioHandle {
            tx,
            view_rx,
            catalog,
            join,
        }
    }
}

impl StudioHandle {
    /// Queue a message without waiting for it to be applied
    pub fn send(&self, message: Message) -> StudioResult<()> {
        self.tx
            .send(Envelope {
                message,
                reply: None,
            })
            .map_err(|_| StudioError::Closed)
    }

    /// Queue a message and wait for the outcome of that exact message
    pub async fn request(&self, message: Message) -> StudioResult<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Envelope {
                message,
                reply: Some(reply_tx),
            })
            .map_err(|_| StudioError::Closed)?;
        reply_rx.await.map_err(|_| StudioError::Closed)?
    }

    pub fn subscribe(&self) -> watch::Receiver<StudioView> {
        self.view_rx.clone()
    }

    /// Latest published view
    pub fn current(&self) -> StudioView {
        self.view_rx.borrow().clone()
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Stop the loop and hand back the controller
    pub async fn shutdown(self) -> StudioResult<SessionController> {
        drop(self.tx);
        self.join
            .await
            .map_err(|e| StudioError::Other(anyhow::anyhow!("studio loop failed: {}", e)))
    }
}

async fn run_loop(
    mut controller: SessionController,
    notifier: Arc<dyn Notifier>,
    mut rx: mpsc::UnboundedReceiver<Envelope>,
    view_tx: watch::Sender<StudioView>,
) -> SessionController {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Message>();
    let mut pending: Option<JoinHandle<()>> = None;
    let mut last_notice: Option<String> = None;

    info!("▶️ Studio loop started");

    loop {
        let Envelope { message, reply } = tokio::select! {
            Some(done) = done_rx.recv() => Envelope { message: done, reply: None },
            incoming = rx.recv() => match incoming {
                Some(envelope) => envelope,
                None => break,
            },
        };

        let kind = message.kind();
        let mut last_error = None;
        let mut outcome = Ok(());

        match controller.update(message) {
            Ok(Effect::None) => {}
            Ok(Effect::Schedule(ticket)) => {
                if let Some(previous) = pending.take() {
                    previous.abort();
                }
                pending = Some(schedule(ticket, done_tx.clone()));
            }
            Ok(Effect::Cancelled(id)) => {
                if let Some(previous) = pending.take() {
                    previous.abort();
                }
                debug!("Aborted timer for generation #{}", id);
            }
            Ok(Effect::Notify(text)) => {
                pending = None;
                if let Err(e) = notifier.notify(&text).await {
                    warn!("⚠️ Notifier '{}' failed: {}", notifier.name(), e);
                }
                last_notice = Some(text);
            }
            Err(e) => {
                warn!("⚠️ {} rejected: {}", kind, e);
                last_error = Some(e.to_string());
                outcome = Err(e);
            }
        }

        let mut view = controller.snapshot();
        view.last_notice = last_notice.clone();
        view.last_error = last_error;
        view_tx.send_replace(view);

        if let Some(reply) = reply {
            let _ = reply.send(outcome);
        }
    }

    if let Some(task) = pending.take() {
        task.abort();
    }
    info!("⏹️ Studio loop stopped");
    controller
}

fn schedule(ticket: GenerationTicket, done_tx: mpsc::UnboundedSender<Message>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let message = ticket.run().await;
        let _ = done_tx.send(message);
    })
}
