use super::{
    camera_follow::{CameraFollow, CameraMode, CameraState},
    input_mapper::{ControlIntent, InputMapper},
    jump_controller::{JumpController, JumpStep},
    nav_config::{ConfigError, NavConfig},
    pose::Pose,
    route::{Route, RouteError},
    traversal::{RouteTraversal, TraversalState, TraversalStep},
};
use crate::{event, info, warn};
use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::Display;

/// Notable transitions observed while handling input or ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum NavEvent {
    JourneyStarted,
    WaypointReached(usize),
    JourneyComplete,
    JumpStarted,
    JumpLanded,
}

/// Everything a renderer needs after one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub timestamp: DateTime<Utc>,
    pub pose: Pose,
    pub camera: CameraState,
    pub camera_mode: CameraMode,
    pub traversal: TraversalState,
    pub events: Vec<NavEvent>,
}

/// Single driver advancing traversal, jump and camera in a fixed order per tick.
///
/// Owns the pose exclusively; input intents and clock samples are the only way to
/// mutate it.
#[derive(Debug)]
pub struct AnimationScheduler {
    cfg: NavConfig,
    route: Option<Route>,
    pose: Pose,
    traversal: RouteTraversal,
    jump: JumpController,
    camera: CameraFollow,
    last_tick: Option<DateTime<Utc>>,
    pending_events: Vec<NavEvent>,
}

impl AnimationScheduler {
    /// Creates an idle scheduler without a route.
    ///
    /// # Errors
    /// Propagates [`NavConfig::validate`] failures.
    pub fn new(cfg: NavConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let pose = Pose::default();
        Ok(Self {
            camera: CameraFollow::new(&pose, &cfg),
            cfg,
            route: None,
            pose,
            traversal: RouteTraversal::new(),
            jump: JumpController::new(),
            last_tick: None,
            pending_events: Vec::new(),
        })
    }

    pub fn config(&self) -> &NavConfig { &self.cfg }
    pub fn pose(&self) -> &Pose { &self.pose }
    pub fn camera(&self) -> CameraState { self.camera.state() }
    pub fn camera_mode(&self) -> CameraMode { self.camera.mode() }
    pub fn traversal_state(&self) -> TraversalState { self.traversal.state() }
    pub fn route(&self) -> Option<&Route> { self.route.as_ref() }

    /// Selects a new city route, discarding the previous pose, journey and hop.
    ///
    /// A hop in flight belongs to the discarded pose, so it ends here instead of
    /// running to completion on the fresh one.
    pub fn select_route(&mut self, route: Route) {
        info!("Selected route {} with {} waypoints.", route.city(), route.len());
        self.traversal.cancel();
        self.traversal = RouteTraversal::new();
        self.jump.reset();
        self.pose = Pose::anchored_at(route.origin());
        self.camera.reset(&self.pose, &self.cfg);
        self.route = Some(route);
        self.pending_events.clear();
    }

    /// Stops the running journey, the avatar stays where it is.
    pub fn cancel_journey(&mut self) {
        self.traversal.cancel();
        self.camera.sync_mode(false);
    }

    /// Maps a raw key identifier and applies the resulting intent.
    ///
    /// # Errors
    /// See [`AnimationScheduler::handle_intent`].
    pub fn handle_key(&mut self, key: &str, now: DateTime<Utc>) -> Result<bool, RouteError> {
        self.handle_intent(InputMapper::map_key(key), now)
    }

    /// Applies one control intent. Returns whether it changed any state.
    ///
    /// Manual translation is ignored while a journey is running; unrecognized
    /// intents and repeated jumps are ignored too.
    ///
    /// # Errors
    /// `RouteError::NoRouteSelected` when a journey is requested before a route was selected.
    pub fn handle_intent(&mut self, intent: ControlIntent, now: DateTime<Utc>) -> Result<bool, RouteError> {
        let applied = match intent {
            ControlIntent::StartJourney => {
                let route = self.route.as_ref().ok_or(RouteError::NoRouteSelected)?;
                self.traversal.start(route, &mut self.pose)?;
                self.camera.sync_mode(true);
                self.pending_events.push(NavEvent::JourneyStarted);
                true
            }
            ControlIntent::Jump => {
                let started = self.jump.trigger(&mut self.pose, now);
                if started {
                    self.pending_events.push(NavEvent::JumpStarted);
                }
                started
            }
            i if i.is_translation() => self.apply_manual_move(i),
            i if i.is_avatar_yaw() => match InputMapper::avatar_yaw_delta(i, &self.cfg) {
                Some(delta) => {
                    self.pose.orientation.add_yaw(delta);
                    true
                }
                None => false,
            },
            i if i.is_camera_yaw() => self.camera.apply_intent(i, &self.cfg),
            _ => false,
        };
        event!("Intent {intent} applied: {applied}.");
        Ok(applied)
    }

    fn apply_manual_move(&mut self, intent: ControlIntent) -> bool {
        if self.traversal.is_active() {
            return false;
        }
        let Some(delta) = InputMapper::movement_vector(intent, self.pose.orientation.yaw(), &self.cfg)
        else {
            return false;
        };
        let moved = self.pose.position.planar() + delta;
        self.pose.position.set_planar(moved);
        self.camera.recenter(&self.pose);
        true
    }

    /// Elapsed seconds since the previous sample, zero for the first one.
    ///
    /// A sample earlier than the previous one counts as zero elapsed time and does
    /// not move the reference point backwards.
    #[allow(clippy::cast_precision_loss)]
    fn delta_secs(&mut self, now: DateTime<Utc>) -> f64 {
        let dt = match self.last_tick {
            None => 0.0,
            Some(prev) if now < prev => {
                warn!("Clock went backwards by {}ms, treating tick as zero elapsed.", (prev - now).num_milliseconds());
                return 0.0;
            }
            Some(prev) => (now - prev).num_microseconds().unwrap_or(i64::MAX) as f64 / 1e6,
        };
        self.last_tick = Some(now);
        dt
    }

    /// Advances traversal, then the hop, then the camera, and returns the resulting frame.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Frame {
        let dt = self.delta_secs(now);

        match self.traversal.tick(dt, &mut self.pose, &self.cfg) {
            TraversalStep::Reached(i) => self.pending_events.push(NavEvent::WaypointReached(i)),
            TraversalStep::Completed => self.pending_events.push(NavEvent::JourneyComplete),
            TraversalStep::Idle | TraversalStep::Moved => (),
        }

        if self.jump.tick(now, &mut self.pose, &self.cfg) == JumpStep::Landed {
            self.pending_events.push(NavEvent::JumpLanded);
        }

        self.camera.sync_mode(self.traversal.is_active());
        let bearing = self
            .traversal
            .current_target()
            .and_then(|target| self.pose.position.planar().to(&target.as_vec()).bearing_deg());
        self.camera.follow(&self.pose, bearing, &self.cfg);

        Frame {
            timestamp: now,
            pose: self.pose,
            camera: self.camera.state(),
            camera_mode: self.camera.mode(),
            traversal: self.traversal.state(),
            events: std::mem::take(&mut self.pending_events),
        }
    }
}
