use super::{
    route::RouteBook,
    scheduler::{AnimationScheduler, Frame},
};
use crate::{error, event, info, log};
use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

/// Raw input delivered by the host application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverInput {
    /// A key-down event carrying the host's key identifier.
    Key(String),
    /// Switch to the route of another city, resetting the avatar.
    SelectCity(String),
    CancelJourney,
}

/// Cooperative frame loop hosting an [`AnimationScheduler`].
///
/// Ticks at `refresh_interval`, applies input events between frames and publishes
/// the latest [`Frame`] on a watch channel. Every mutation happens on the task
/// running [`FrameDriver::run`], so the scheduler needs no locking.
pub struct FrameDriver {
    scheduler: AnimationScheduler,
    routes: RouteBook,
    input_rx: mpsc::Receiver<DriverInput>,
    frame_tx: watch::Sender<Frame>,
    c_tok: CancellationToken,
}

impl FrameDriver {
    const INPUT_BUFFER: usize = 64;

    pub fn new(
        mut scheduler: AnimationScheduler,
        routes: RouteBook,
    ) -> (Self, mpsc::Sender<DriverInput>, watch::Receiver<Frame>) {
        let (input_tx, input_rx) = mpsc::channel(Self::INPUT_BUFFER);
        let (frame_tx, frame_rx) = watch::channel(scheduler.tick(Utc::now()));
        (
            Self {
                scheduler,
                routes,
                input_rx,
                frame_tx,
                c_tok: CancellationToken::new(),
            },
            input_tx,
            frame_rx,
        )
    }

    /// Token stopping [`FrameDriver::run`] when cancelled.
    pub fn cancel_token(&self) -> CancellationToken { self.c_tok.clone() }

    /// Runs until cancelled and hands the scheduler back for inspection.
    ///
    /// A closed input channel does not stop the loop; frames keep flowing so a
    /// running journey can finish.
    pub async fn run(mut self) -> AnimationScheduler {
        let mut refresh = interval(self.scheduler.config().refresh_interval);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut input_open = true;
        loop {
            tokio::select! {
                biased;
                () = self.c_tok.cancelled() => {
                    info!("Frame driver cancelled.");
                    break;
                }
                maybe_input = self.input_rx.recv(), if input_open => {
                    match maybe_input {
                        Some(input) => self.apply_input(input),
                        None => {
                            log!("Input source closed, continuing without input.");
                            input_open = false;
                        }
                    }
                }
                _ = refresh.tick() => {
                    let frame = self.scheduler.tick(Utc::now());
                    for ev in &frame.events {
                        info!("Navigation event: {ev}");
                    }
                    event!("Frame: {}", frame.pose);
                    self.frame_tx.send_replace(frame);
                }
            }
        }
        self.scheduler
    }

    fn apply_input(&mut self, input: DriverInput) {
        match input {
            DriverInput::Key(key) => {
                if let Err(e) = self.scheduler.handle_key(&key, Utc::now()) {
                    error!("Key {key:?} rejected: {e}");
                }
            }
            DriverInput::SelectCity(city) => match self.routes.route(&city) {
                Ok(route) => self.scheduler.select_route(route.clone()),
                Err(e) => error!("Cannot select city: {e}"),
            },
            DriverInput::CancelJourney => self.scheduler.cancel_journey(),
        }
    }
}
