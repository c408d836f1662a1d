//! Camera tour over a list of targets, advanced by explicit clock ticks
//!
//! For every target the camera turns toward it, flies to a point just short of
//! it, then holds before moving on. Nothing here reads a clock: callers pass
//! elapsed seconds to [`CameraTour::tick`].

use crate::camera::{look_rotation, CameraPose};
use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Most clock ticks a whole tour may be split into
pub const MAX_TOUR_TICKS: usize = 10_000_000;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TourError {
    #[error("Invalid tour timing: {0}")]
    InvalidTiming(String),
}

/// Phase durations (seconds) and how far short of each star the camera stops
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourTiming {
    pub rotate_secs: f64,
    pub translate_secs: f64,
    pub hold_secs: f64,
    /// Render-space distance left between the camera and the star on arrival
    pub approach_offset: f64,
}

impl Default for TourTiming {
    fn default() -> Self {
        Self {
            rotate_secs: 3.0,
            translate_secs: 3.0,
            hold_secs: 1.0,
            approach_offset: 2.0,
        }
    }
}

impl TourTiming {
    pub fn validate(&self) -> Result<(), TourError> {
        let fields = [
            ("rotate_secs", self.rotate_secs),
            ("translate_secs", self.translate_secs),
            ("hold_secs", self.hold_secs),
            ("approach_offset", self.approach_offset),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(TourError::InvalidTiming(format!("{name} must be non-negative, got {value}")));
            }
        }
        Ok(())
    }

    /// Time spent on one target
    pub fn leg_secs(&self) -> f64 {
        self.rotate_secs + self.translate_secs + self.hold_secs
    }

    /// Ticks of `dt` needed to visit `stops` targets, with one spare per leg.
    ///
    /// Fails when `dt` is not positive or is so small that the tour would take
    /// more than [`MAX_TOUR_TICKS`] ticks.
    pub fn tick_budget(&self, dt: f64, stops: usize) -> Result<usize, TourError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(TourError::InvalidTiming(format!("tick must be positive, got {dt}")));
        }
        let ticks = (self.leg_secs() * stops as f64 / dt).ceil() + stops as f64 + 1.0;
        if !(ticks <= MAX_TOUR_TICKS as f64) {
            return Err(TourError::InvalidTiming(format!(
                "tick of {dt}s needs more than {MAX_TOUR_TICKS} ticks for {stops} stops"
            )));
        }
        Ok(ticks as usize)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TourState {
    /// Created, not started
    Idle,
    RotatingToTarget,
    TranslatingToTarget,
    Holding,
    /// Every target visited
    Finished,
}

/// Transitions reported by [`CameraTour::tick`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TourEvent {
    /// Began the leg toward target `i`
    Started(usize),
    /// Reached the approach point of target `i`
    Arrived(usize),
    Finished,
}

/// One target's motion, fixed when the leg starts
#[derive(Clone, Copy, Debug)]
struct Leg {
    index: usize,
    from: CameraPose,
    approach: DVec3,
    rotation: DQuat,
}

/// Camera tour state machine
pub struct CameraTour {
    targets: Vec<DVec3>,
    timing: TourTiming,
    pose: CameraPose,
    state: TourState,
    leg: Option<Leg>,
    /// Seconds spent in the current phase
    elapsed: f64,
    paused: bool,
}

impl CameraTour {
    pub fn new(targets: Vec<DVec3>, start: CameraPose, timing: TourTiming) -> Result<Self, TourError> {
        timing.validate()?;
        Ok(Self {
            targets,
            timing,
            pose: start,
            state: TourState::Idle,
            leg: None,
            elapsed: 0.0,
            paused: false,
        })
    }

    /// Tour with default timing, starting at the origin
    pub fn from_targets(targets: Vec<DVec3>) -> Self {
        Self {
            targets,
            timing: TourTiming::default(),
            pose: CameraPose::default(),
            state: TourState::Idle,
            leg: None,
            elapsed: 0.0,
            paused: false,
        }
    }

    pub fn state(&self) -> TourState {
        self.state
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn timing(&self) -> &TourTiming {
        &self.timing
    }

    pub fn targets(&self) -> &[DVec3] {
        &self.targets
    }

    /// Index of the target being approached or held at
    pub fn current_target(&self) -> Option<usize> {
        self.leg.map(|leg| leg.index)
    }

    /// Approach point of the current leg
    pub fn current_approach(&self) -> Option<DVec3> {
        self.leg.map(|leg| leg.approach)
    }

    pub fn is_finished(&self) -> bool {
        self.state == TourState::Finished
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Leave `Idle` and begin the first leg. No-op in any other state.
    pub fn start(&mut self) -> Option<TourEvent> {
        if self.state != TourState::Idle {
            return None;
        }
        Some(self.begin_leg(0))
    }

    /// Advance by `dt` seconds. Time left over at the end of a phase carries
    /// into the next, so one large tick may cross several transitions.
    pub fn tick(&mut self, dt: f64) -> Vec<TourEvent> {
        let mut events = Vec::new();
        if self.paused || !dt.is_finite() || dt < 0.0 {
            return events;
        }

        let mut remaining = dt;
        loop {
            let Some(leg) = self.leg else { break };

            match self.state {
                TourState::RotatingToTarget => {
                    let duration = self.timing.rotate_secs;
                    self.elapsed += remaining;
                    if self.elapsed < duration {
                        let t = self.elapsed / duration;
                        self.pose.orientation = leg.from.orientation.slerp(leg.rotation, t);
                        break;
                    }
                    remaining = self.elapsed - duration;
                    self.pose.orientation = leg.rotation;
                    self.enter(TourState::TranslatingToTarget);
                }
                TourState::TranslatingToTarget => {
                    let duration = self.timing.translate_secs;
                    self.elapsed += remaining;
                    if self.elapsed < duration {
                        let t = self.elapsed / duration;
                        self.pose.position = leg.from.position.lerp(leg.approach, t);
                        break;
                    }
                    remaining = self.elapsed - duration;
                    self.pose = CameraPose::new(leg.approach, leg.rotation);
                    self.enter(TourState::Holding);
                    tracing::debug!("Arrived at target {}", leg.index);
                    events.push(TourEvent::Arrived(leg.index));
                }
                TourState::Holding => {
                    self.elapsed += remaining;
                    if self.elapsed < self.timing.hold_secs {
                        break;
                    }
                    remaining = self.elapsed - self.timing.hold_secs;
                    let event = self.begin_leg(leg.index + 1);
                    events.push(event);
                }
                TourState::Idle | TourState::Finished => break,
            }
        }
        events
    }

    /// Run ticks of `dt` until the tour finishes or `max_ticks` is reached
    pub fn run_to_end(&mut self, dt: f64, max_ticks: usize) -> Vec<TourEvent> {
        let mut events: Vec<TourEvent> = self.start().into_iter().collect();
        for _ in 0..max_ticks {
            if self.is_finished() || dt <= 0.0 {
                break;
            }
            events.extend(self.tick(dt));
        }
        events
    }

    fn enter(&mut self, state: TourState) {
        self.state = state;
        self.elapsed = 0.0;
    }

    fn begin_leg(&mut self, index: usize) -> TourEvent {
        let Some(&target) = self.targets.get(index) else {
            self.leg = None;
            self.enter(TourState::Finished);
            tracing::info!("Tour finished after {} targets", self.targets.len());
            return TourEvent::Finished;
        };

        let from = self.pose;
        let to_target = target - from.position;
        let distance = to_target.length();
        let approach = if distance > 0.0 {
            from.position + to_target / distance * (distance - self.timing.approach_offset)
        } else {
            from.position
        };
        let rotation = look_rotation(target - approach).unwrap_or(from.orientation);

        tracing::debug!("Leg {} toward {:?} (distance {:.3})", index, target, distance);
        self.leg = Some(Leg { index, from, approach, rotation });
        self.enter(TourState::RotatingToTarget);
        TourEvent::Started(index)
    }
}
