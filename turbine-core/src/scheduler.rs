/// Per-frame animation of the driven joint
use log::{debug, trace};

use crate::error::Result;
use crate::joint::{JointId, JointModel};

/// Lowest speed the scheduler accepts, in degrees per tick
pub const MIN_SPEED: f32 = 1.0;

/// Highest speed: one full turn per tick
pub const MAX_SPEED: f32 = 360.0;

/// Spin direction of the driven joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Reverse => -1.0,
        }
    }

    /// `true` selects forward
    pub fn from_forward(forward: bool) -> Self {
        if forward {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }
}

/// Scheduler lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Paused,
    /// Terminal; entered on teardown
    Stopped,
}

/// Advances one joint by `speed * direction` on every running tick.
#[derive(Debug, Clone)]
pub struct AnimationScheduler {
    driven: JointId,
    state: SchedulerState,
    speed: f32,
    direction: Direction,
    default_speed: f32,
    default_direction: Direction,
    ticks: u64,
}

impl AnimationScheduler {
    pub fn new(driven: JointId, speed: f32, direction: Direction) -> Self {
        let speed = clamp_speed(speed);
        Self {
            driven,
            state: SchedulerState::Running,
            speed,
            direction,
            default_speed: speed,
            default_direction: direction,
            ticks: 0,
        }
    }

    pub fn driven(&self) -> JointId {
        self.driven
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of ticks that advanced the driven joint
    pub fn advanced_ticks(&self) -> u64 {
        self.ticks
    }

    /// Angle change the next running tick applies
    pub fn step(&self) -> f32 {
        self.speed * self.direction.sign()
    }

    /// Running ↔ Paused; a stopped scheduler stays stopped
    pub fn toggle(&mut self) {
        self.state = match self.state {
            SchedulerState::Running => SchedulerState::Paused,
            SchedulerState::Paused => SchedulerState::Running,
            SchedulerState::Stopped => SchedulerState::Stopped,
        };
        debug!("animation {:?}", self.state);
    }

    pub fn pause(&mut self) {
        if self.state == SchedulerState::Running {
            self.state = SchedulerState::Paused;
        }
    }

    pub fn stop(&mut self) {
        self.state = SchedulerState::Stopped;
        debug!("animation stopped after {} ticks", self.ticks);
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Add `delta` to the speed, clamped to [`MIN_SPEED`, `MAX_SPEED`]
    pub fn adjust_speed(&mut self, delta: f32) {
        self.speed = clamp_speed(self.speed + delta);
        trace!("speed now {}", self.speed);
    }

    pub fn reset_speed_and_direction(&mut self) {
        self.speed = self.default_speed;
        self.direction = self.default_direction;
    }

    /// Advance the driven joint if running. Returns whether it moved.
    ///
    /// The joint is updated in a single call, so no partial state is ever
    /// visible to the render that follows.
    pub fn tick(&mut self, joints: &mut JointModel) -> Result<bool> {
        if self.state != SchedulerState::Running {
            return Ok(false);
        }
        joints.adjust_angle(self.driven, self.step())?;
        self.ticks += 1;
        Ok(true)
    }
}

/// Keep the speed finite within [`MIN_SPEED`, `MAX_SPEED`]; NaN falls to the floor
fn clamp_speed(speed: f32) -> f32 {
    if speed.is_nan() {
        MIN_SPEED
    } else {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joint::{Articulation, Joint};
    use nalgebra::Vector3;
    use test_case::test_case;

    fn rotor_only() -> JointModel {
        JointModel::new().with_joint(Joint::new(
            JointId::Rotor,
            Articulation::revolute(Vector3::zeros(), Vector3::x_axis()),
        ))
    }

    #[test_case(1.0, -5.0, 1.0 ; "clamps below floor")]
    #[test_case(3.0, -2.0, 1.0 ; "lands on floor")]
    #[test_case(3.0, 2.5, 5.5 ; "increases")]
    #[test_case(2.0, f32::NAN, 1.0 ; "nan falls to floor")]
    #[test_case(2.0, f32::INFINITY, MAX_SPEED ; "infinity stops at ceiling")]
    #[test_case(2.0, f32::NEG_INFINITY, 1.0 ; "negative infinity falls to floor")]
    fn test_adjust_speed(start: f32, delta: f32, expected: f32) {
        let mut scheduler = AnimationScheduler::new(JointId::Rotor, start, Direction::Forward);
        scheduler.adjust_speed(delta);
        assert_eq!(scheduler.speed(), expected);
    }

    #[test]
    fn test_initial_speed_is_clamped() {
        let scheduler = AnimationScheduler::new(JointId::Rotor, 0.0, Direction::Forward);
        assert_eq!(scheduler.speed(), MIN_SPEED);
    }

    #[test]
    fn test_infinite_initial_speed_keeps_joint_finite() {
        let mut joints = rotor_only();
        let mut scheduler =
            AnimationScheduler::new(JointId::Rotor, f32::INFINITY, Direction::Forward);
        assert_eq!(scheduler.speed(), MAX_SPEED);

        scheduler.tick(&mut joints).unwrap();
        assert!(joints.angle(JointId::Rotor).unwrap().is_finite());
    }

    #[test]
    fn test_direction_flips_tick_delta() {
        let mut joints = rotor_only();
        let mut scheduler = AnimationScheduler::new(JointId::Rotor, 3.0, Direction::Forward);

        scheduler.tick(&mut joints).unwrap();
        assert_eq!(joints.angle(JointId::Rotor).unwrap(), 3.0);

        scheduler.set_direction(Direction::Reverse);
        scheduler.tick(&mut joints).unwrap();
        assert_eq!(joints.angle(JointId::Rotor).unwrap(), 0.0);
        scheduler.tick(&mut joints).unwrap();
        assert_eq!(joints.angle(JointId::Rotor).unwrap(), -3.0);
    }

    #[test]
    fn test_paused_ticks_are_noops() {
        let mut joints = rotor_only();
        let mut scheduler = AnimationScheduler::new(JointId::Rotor, 2.0, Direction::Reverse);
        scheduler.toggle();
        for _ in 0..10 {
            assert!(!scheduler.tick(&mut joints).unwrap());
        }
        assert_eq!(joints.angle(JointId::Rotor).unwrap(), 0.0);

        scheduler.toggle();
        assert!(scheduler.tick(&mut joints).unwrap());
        assert_eq!(joints.angle(JointId::Rotor).unwrap(), -2.0);
        assert_eq!(scheduler.advanced_ticks(), 1);
    }

    #[test]
    fn test_stop_is_terminal() {
        let mut joints = rotor_only();
        let mut scheduler = AnimationScheduler::new(JointId::Rotor, 1.0, Direction::Forward);
        scheduler.tick(&mut joints).unwrap();
        scheduler.stop();
        scheduler.toggle();
        assert_eq!(scheduler.state(), SchedulerState::Stopped);
        assert!(!scheduler.tick(&mut joints).unwrap());
        assert_eq!(joints.angle(JointId::Rotor).unwrap(), 1.0);
    }

    #[test]
    fn test_reset_restores_configured_defaults() {
        let mut scheduler = AnimationScheduler::new(JointId::Rotor, 4.0, Direction::Forward);
        scheduler.adjust_speed(6.0);
        scheduler.set_direction(Direction::Reverse);
        scheduler.reset_speed_and_direction();
        assert_eq!(scheduler.speed(), 4.0);
        assert_eq!(scheduler.direction(), Direction::Forward);
    }

    #[test]
    fn test_tick_on_missing_joint_fails_without_counting() {
        let mut joints = JointModel::new();
        let mut scheduler = AnimationScheduler::new(JointId::Rotor, 1.0, Direction::Forward);
        assert!(scheduler.tick(&mut joints).is_err());
        assert_eq!(scheduler.advanced_ticks(), 0);
    }
}
