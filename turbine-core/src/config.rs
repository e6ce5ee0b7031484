/// Startup configuration for a scene
use crate::joint::JointId;
use crate::scheduler::Direction;

/// Initial joint angles in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialPose {
    pub turbine: f32,
    pub shoulder: f32,
    pub arm: f32,
    pub rotor: f32,
}

impl InitialPose {
    pub fn zero() -> Self {
        Self {
            turbine: 0.0,
            shoulder: 0.0,
            arm: 0.0,
            rotor: 0.0,
        }
    }

    pub fn angle(&self, joint: JointId) -> f32 {
        match joint {
            JointId::Turbine => self.turbine,
            JointId::Shoulder => self.shoulder,
            JointId::Arm => self.arm,
            JointId::Rotor => self.rotor,
        }
    }
}

impl Default for InitialPose {
    fn default() -> Self {
        Self {
            shoulder: 45.0,
            arm: 45.0,
            ..Self::zero()
        }
    }
}

/// Scene settings
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub pose: InitialPose,
    /// Joint advanced by the animation scheduler
    pub driven_joint: JointId,
    /// Degrees per tick; values below 1 are raised to 1
    pub speed: f32,
    pub direction: Direction,
    pub start_paused: bool,
    /// Uniform scale folded into the scene root
    pub assembly_scale: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            pose: InitialPose::default(),
            driven_joint: JointId::Rotor,
            speed: 1.0,
            direction: Direction::Forward,
            start_paused: false,
            assembly_scale: 1.0,
        }
    }
}
