//! Tick loop hosting a controller on a tokio task.
//!
//! The task owns the [`AnimatorController`] outright. Ticks fire on the
//! configured interval; commands arrive over a bounded channel and are
//! applied between ticks, so an edit is never observed half-applied.
//!
//! ```text
//! AnimatorHandle ──Request──► loop ─┬─► cancelled? stop, teardown
//!                                   ├─► apply command / answer query
//!                                   └─► interval tick ─► FiredTransition broadcast
//! ```

use crate::checkpoint::ControllerCheckpoint;
use crate::controller::{AnimatorController, Command, CommandOutcome};
use crate::core::FiredTransition;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const FIRED_CAPACITY: usize = 64;

/// Errors talking to a running loop.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Animator loop has stopped")]
    Closed,

    #[error("Animator task failed: {0}")]
    Join(#[from] JoinError),
}

type Inspect = Box<dyn FnOnce(&AnimatorController) + Send>;

enum Request {
    Apply {
        command: Command,
        reply: oneshot::Sender<CommandOutcome>,
    },
    Checkpoint {
        reply: oneshot::Sender<ControllerCheckpoint>,
    },
    Inspect(Inspect),
}

/// Handle to a controller running on its own task.
pub struct AnimatorHandle {
    requests: mpsc::Sender<Request>,
    fired: broadcast::Sender<FiredTransition>,
    cancel: CancellationToken,
    task: JoinHandle<AnimatorController>,
}

/// Move `controller` onto a new task and start ticking.
///
/// Must be called from within a tokio runtime.
pub fn spawn(controller: AnimatorController) -> AnimatorHandle {
    spawn_with_token(controller, CancellationToken::new())
}

/// Like [`spawn`], stopping when `cancel` (or a parent of it) is cancelled.
pub fn spawn_with_token(controller: AnimatorController, cancel: CancellationToken) -> AnimatorHandle {
    let (requests, receiver) = mpsc::channel(controller.config().command_buffer.max(1));
    let (fired, _) = broadcast::channel(FIRED_CAPACITY);
    let task = tokio::spawn(run(controller, receiver, cancel.clone(), fired.clone()));
    AnimatorHandle {
        requests,
        fired,
        cancel,
        task,
    }
}

impl AnimatorHandle {
    /// Apply a command between ticks and wait for its outcome.
    pub async fn send(&self, command: Command) -> Result<CommandOutcome, RuntimeError> {
        let (reply, outcome) = oneshot::channel();
        self.requests
            .send(Request::Apply { command, reply })
            .await
            .map_err(|_| RuntimeError::Closed)?;
        outcome.await.map_err(|_| RuntimeError::Closed)
    }

    pub async fn checkpoint(&self) -> Result<ControllerCheckpoint, RuntimeError> {
        let (reply, checkpoint) = oneshot::channel();
        self.requests
            .send(Request::Checkpoint { reply })
            .await
            .map_err(|_| RuntimeError::Closed)?;
        checkpoint.await.map_err(|_| RuntimeError::Closed)
    }

    /// Read from the controller without leaving the loop.
    pub async fn inspect<F, R>(&self, read: F) -> Result<R, RuntimeError>
    where
        F: FnOnce(&AnimatorController) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply, value) = oneshot::channel();
        let inspect: Inspect = Box::new(move |controller| {
            let _ = reply.send(read(controller));
        });
        self.requests
            .send(Request::Inspect(inspect))
            .await
            .map_err(|_| RuntimeError::Closed)?;
        value.await.map_err(|_| RuntimeError::Closed)
    }

    /// Receive every transition fired from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<FiredTransition> {
        self.fired.subscribe()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the loop and take the controller back.
    pub async fn shutdown(self) -> Result<AnimatorController, RuntimeError> {
        self.cancel.cancel();
        Ok(self.task.await?)
    }
}

async fn run(
    mut controller: AnimatorController,
    mut requests: mpsc::Receiver<Request>,
    cancel: CancellationToken,
    fired: broadcast::Sender<FiredTransition>,
) -> AnimatorController {
    let period = controller.config().tick_interval().max(Duration::from_millis(1));
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(period_ms = period.as_millis() as u64, "animator loop started");

    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                debug!("animator loop cancelled");
                break;
            }

            _ = interval.tick() => {
                if let Some(transition) = controller.tick() {
                    // No subscribers is fine.
                    let _ = fired.send(transition);
                }
            }

            request = requests.recv() => match request {
                Some(request) => handle(&mut controller, request),
                None => {
                    debug!("all animator handles dropped");
                    break;
                }
            },
        }
    }

    controller.teardown();
    info!("animator loop stopped");
    controller
}

fn handle(controller: &mut AnimatorController, request: Request) {
    match request {
        Request::Apply { command, reply } => {
            let _ = reply.send(controller.apply(command));
        }
        Request::Checkpoint { reply } => {
            let _ = reply.send(controller.checkpoint());
        }
        Request::Inspect(inspect) => inspect(controller),
    }
}
