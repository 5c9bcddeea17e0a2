use super::nav_config::NavConfig;
use super::pose::Pose;
use crate::{event, nav};
use chrono::{DateTime, TimeDelta, Utc};
use std::f64::consts::PI;
use strum_macros::Display;

/// Outcome of a single jump tick.
#[derive(Debug, Clone, Copy, PartialEq, Display)]
pub enum JumpStep {
    Grounded,
    Airborne,
    Landed,
}

/// A single symmetric hop keyed on elapsed time.
///
/// Only touches the altitude-related fields of [`Pose`], so it composes with
/// route traversal which owns latitude and longitude.
#[derive(Debug, Default)]
pub struct JumpController {
    started_at: Option<DateTime<Utc>>,
}

impl JumpController {
    pub fn new() -> Self { Self::default() }

    /// Starts a hop at `now`. Returns `false` without touching the pose if one is
    /// already in flight.
    pub fn trigger(&mut self, pose: &mut Pose, now: DateTime<Utc>) -> bool {
        if self.started_at.is_some() || pose.is_jumping {
            return false;
        }
        pose.base_altitude = pose.position.altitude;
        pose.is_jumping = true;
        self.started_at = Some(now);
        nav!("Jump started from altitude {:.2}m.", pose.base_altitude);
        true
    }

    /// Sets the altitude for `now`: `base + amplitude * sin(progress * PI)`.
    ///
    /// Once the duration has elapsed the altitude is reset exactly to the base
    /// altitude captured at trigger time and the jump ends.
    #[allow(clippy::cast_precision_loss)]
    pub fn tick(&mut self, now: DateTime<Utc>, pose: &mut Pose, cfg: &NavConfig) -> JumpStep {
        let Some(start) = self.started_at else {
            return JumpStep::Grounded;
        };
        let elapsed = (now - start).max(TimeDelta::zero());
        let elapsed_us = elapsed.num_microseconds().unwrap_or(i64::MAX) as f64;
        let duration_us = cfg.jump_duration.num_microseconds().unwrap_or(i64::MAX).max(1) as f64;
        let progress = (elapsed_us / duration_us).min(1.0);

        if progress >= 1.0 {
            self.land(pose);
            return JumpStep::Landed;
        }
        pose.position.altitude = pose.base_altitude + cfg.jump_amplitude * (progress * PI).sin();
        event!("Jump at {:.0}%, altitude {:.2}m.", progress * 100.0, pose.position.altitude);
        JumpStep::Airborne
    }

    /// Drops a hop without animating it, e.g. when the pose it belonged to is discarded.
    pub fn reset(&mut self) { self.started_at = None; }

    fn land(&mut self, pose: &mut Pose) {
        pose.position.altitude = pose.base_altitude;
        pose.is_jumping = false;
        self.started_at = None;
        nav!("Jump landed at altitude {:.2}m.", pose.base_altitude);
    }
}
