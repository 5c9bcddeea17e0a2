use super::nav_config::NavConfig;
use super::pose::Pose;
use super::route::{Route, RouteError, Waypoint};
use crate::{event, nav};
use serde::Serialize;
use strum_macros::Display;

/// Progress along the active route.
///
/// `target_index` starts at 1 since the avatar is anchored at waypoint 0; it equals
/// the route length exactly when the journey is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TraversalState {
    target_index: usize,
    active: bool,
}

impl TraversalState {
    pub fn target_index(&self) -> usize { self.target_index }
    pub fn is_active(&self) -> bool { self.active }
}

/// Outcome of a single traversal tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TraversalStep {
    Idle,
    Moved,
    Reached(usize),
    Completed,
}

/// Constant-speed, waypoint-by-waypoint motion along a [`Route`].
#[derive(Debug, Default)]
pub struct RouteTraversal {
    route: Option<Route>,
    state: TraversalState,
}

impl RouteTraversal {
    pub fn new() -> Self { Self::default() }

    pub fn state(&self) -> TraversalState { self.state }
    pub fn is_active(&self) -> bool { self.state.active }
    pub fn route(&self) -> Option<&Route> { self.route.as_ref() }

    /// The waypoint currently steered towards, if a journey is running.
    pub fn current_target(&self) -> Option<&Waypoint> {
        if !self.state.active {
            return None;
        }
        self.route.as_ref()?.get(self.state.target_index)
    }

    /// Starts a journey: anchors the pose at the route origin and targets waypoint 1.
    ///
    /// # Errors
    /// `RouteError::TooFewWaypoints` if the route cannot describe a journey.
    pub fn start(&mut self, route: &Route, pose: &mut Pose) -> Result<(), RouteError> {
        if route.len() < Route::MIN_WAYPOINTS {
            return Err(RouteError::TooFewWaypoints {
                city: route.city().to_string(),
                count: route.len(),
            });
        }
        let origin = route.origin();
        pose.position.lat = origin.latitude();
        pose.position.lng = origin.longitude();
        self.route = Some(route.clone());
        self.state = TraversalState { target_index: 1, active: true };
        nav!("Journey through {} started with {} waypoints.", route.city(), route.len());
        Ok(())
    }

    /// Deactivates the journey, leaving the pose wherever it currently is.
    pub fn cancel(&mut self) {
        if self.state.active {
            nav!("Journey cancelled at target {}.", self.state.target_index);
        }
        self.state.active = false;
    }

    /// Advances the pose towards the current target by `speed * dt_secs`.
    ///
    /// Arrival within `arrival_epsilon_deg` advances the target instead of moving.
    /// After the last waypoint the traversal turns inactive and further ticks are no-ops.
    pub fn tick(&mut self, dt_secs: f64, pose: &mut Pose, cfg: &NavConfig) -> TraversalStep {
        if !self.state.active {
            return TraversalStep::Idle;
        }
        let Some(route) = self.route.as_ref() else {
            self.state.active = false;
            return TraversalStep::Idle;
        };
        let Some(target_wp) = route.get(self.state.target_index) else {
            self.state.active = false;
            return TraversalStep::Completed;
        };

        let current = pose.position.planar();
        let target = target_wp.as_vec();
        let distance = current.euclid_distance(&target);

        if distance < cfg.arrival_epsilon_deg {
            let reached = self.state.target_index;
            self.state.target_index += 1;
            if self.state.target_index == route.len() {
                self.state.active = false;
                nav!("Reached final waypoint {reached} of {}, journey complete.", route.city());
                return TraversalStep::Completed;
            }
            nav!("Reached waypoint {reached}, heading to {}.", self.state.target_index);
            return TraversalStep::Reached(reached);
        }

        let step = cfg.speed_deg_per_s * dt_secs.max(0.0);
        let progress = (step / distance).min(1.0);
        let next = current.lerp_towards(&target, progress);
        pose.position.set_planar(next);
        event!("Traversal moved to {next}, {:.7} deg from target.", distance - step);
        TraversalStep::Moved
    }
}
