use std::future::pending;
use std::pin::Pin;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Duration, Instant, Interval, MissedTickBehavior, Sleep};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::clock::Clock;
use super::engine::AmbianceEngine;
use super::event::AmbianceEvent;
use super::lifecycle::EngineState;
use super::profile::AudienceProfile;
use super::trigger::{SpeechMetricsSample, TriggerKind};
use crate::error::{CoachError, Result};

/// Requests a host sends to a running engine.
#[derive(Debug, Clone)]
pub enum AmbianceCommand {
    Start(AudienceProfile),
    SetProfile(AudienceProfile),
    Metrics(SpeechMetricsSample),
    Trigger(TriggerKind),
    Recover(f32),
    Stop,
}

/// Host-side handle. Dropping it closes the command channel, which ends
/// the driver task.
pub struct AmbianceHandle {
    commands: mpsc::Sender<AmbianceCommand>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl AmbianceHandle {
    pub async fn send(&self, command: AmbianceCommand) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| CoachError::RuntimeClosed)
    }

    pub async fn start(&self, profile: AudienceProfile) -> Result<()> {
        self.send(AmbianceCommand::Start(profile)).await
    }

    pub async fn set_profile(&self, profile: AudienceProfile) -> Result<()> {
        self.send(AmbianceCommand::SetProfile(profile)).await
    }

    pub async fn process_metrics(&self, sample: SpeechMetricsSample) -> Result<()> {
        self.send(AmbianceCommand::Metrics(sample)).await
    }

    pub async fn fire(&self, trigger: TriggerKind) -> Result<()> {
        self.send(AmbianceCommand::Trigger(trigger)).await
    }

    pub async fn stop(&self) -> Result<()> {
        self.send(AmbianceCommand::Stop).await
    }

    /// Cancels the driver without playing any closing reaction and waits
    /// for it to exit. Timers die with the task.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            warn!("Ambiance driver ended abnormally: {}", e);
        }
    }
}

/// Async driver owning one engine: the decay cadence and the stop grace
/// delay live here, the engine itself never waits.
pub struct AmbianceRuntime<C: Clock> {
    engine: AmbianceEngine<C>,
    commands: mpsc::Receiver<AmbianceCommand>,
    events: mpsc::Sender<AmbianceEvent>,
    cancel: CancellationToken,
    decay: Option<Interval>,
    halt_at: Option<Pin<Box<Sleep>>>,
    session: Option<Uuid>,
}

impl<C: Clock + 'static> AmbianceRuntime<C> {
    /// Spawns the driver on the current tokio runtime. Returns the command
    /// handle and the stream of engine notifications.
    pub fn spawn(engine: AmbianceEngine<C>) -> (AmbianceHandle, mpsc::Receiver<AmbianceEvent>) {
        let buffer = engine.config().event_buffer.max(1);
        let (command_tx, command_rx) = mpsc::channel(buffer);
        let (event_tx, event_rx) = mpsc::channel(buffer);
        let cancel = CancellationToken::new();

        let runtime = Self {
            engine,
            commands: command_rx,
            events: event_tx,
            cancel: cancel.clone(),
            decay: None,
            halt_at: None,
            session: None,
        };
        let task = tokio::spawn(runtime.run());

        (
            AmbianceHandle {
                commands: command_tx,
                cancel,
                task,
            },
            event_rx,
        )
    }

    async fn run(mut self) {
        info!("Ambiance driver started");

        loop {
            let events = tokio::select! {
                _ = self.cancel.cancelled() => break,
                command = self.commands.recv() => match command {
                    Some(command) => self.apply(command),
                    None => break,
                },
                _ = next_decay(&mut self.decay) => self.engine.decay_tick(),
                _ = grace_elapsed(&mut self.halt_at) => {
                    self.finish_drain();
                    Vec::new()
                }
            };
            self.publish(events).await;
        }

        self.decay = None;
        self.halt_at = None;
        info!(session = ?self.session, "Ambiance driver exited");
    }

    fn apply(&mut self, command: AmbianceCommand) -> Vec<AmbianceEvent> {
        match command {
            AmbianceCommand::Start(profile) => {
                let events = self.engine.start(profile);
                let period = Duration::from_millis(self.engine.config().decay_interval_ms.max(1));
                let mut decay = interval_at(Instant::now() + period, period);
                decay.set_missed_tick_behavior(MissedTickBehavior::Skip);
                // Replacing the interval drops the previous one: a restart never leaks a timer.
                self.decay = Some(decay);
                self.halt_at = None;
                let session = Uuid::new_v4();
                self.session = Some(session);
                info!(%session, %profile, "Exercise session opened");
                events
            }
            AmbianceCommand::SetProfile(profile) => self.engine.set_profile(profile),
            AmbianceCommand::Metrics(sample) => self.engine.process_metrics(&sample),
            AmbianceCommand::Trigger(trigger) => self.engine.fire(trigger),
            AmbianceCommand::Recover(amount) => self.engine.recover_attention(amount),
            AmbianceCommand::Stop => {
                let before = self.engine.state();
                let events = self.engine.stop();
                if before == EngineState::Running && self.engine.state() == EngineState::Draining {
                    let grace = Duration::from_millis(self.engine.config().stop_grace_ms);
                    self.halt_at = Some(Box::pin(sleep(grace)));
                }
                events
            }
        }
    }

    fn finish_drain(&mut self) {
        self.halt_at = None;
        if self.engine.halt() {
            self.decay = None;
            info!(session = ?self.session, "Exercise session closed");
        }
    }

    async fn publish(&mut self, events: Vec<AmbianceEvent>) {
        for event in events {
            if self.events.send(event).await.is_err() {
                debug!("Event receiver dropped; notification discarded");
                return;
            }
        }
    }
}

async fn next_decay(decay: &mut Option<Interval>) {
    match decay {
        Some(interval) => {
            interval.tick().await;
        }
        None => pending::<()>().await,
    }
}

async fn grace_elapsed(halt_at: &mut Option<Pin<Box<Sleep>>>) {
    match halt_at {
        Some(sleep) => sleep.as_mut().await,
        None => pending::<()>().await,
    }
}
