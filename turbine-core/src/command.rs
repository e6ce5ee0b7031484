/// Typed input commands consumed by the scene
use std::fmt;

use crate::joint::JointId;

/// Discrete command produced by an input-translation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Add `delta` degrees to a joint
    AdjustJoint { joint: JointId, delta: f32 },
    /// `true` spins the driven joint forward
    SetDirection(bool),
    /// Add to the animation speed; never drops below the floor
    AdjustSpeed(f32),
    ResetSpeedAndDirection,
    ToggleAnimation,
    /// Multiply the assembly scale
    ScaleAssembly(f32),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::AdjustJoint { joint, delta } => write!(f, "adjust {joint} by {delta:+}"),
            Command::SetDirection(true) => f.write_str("direction forward"),
            Command::SetDirection(false) => f.write_str("direction reverse"),
            Command::AdjustSpeed(delta) => write!(f, "speed {delta:+}"),
            Command::ResetSpeedAndDirection => f.write_str("reset speed and direction"),
            Command::ToggleAnimation => f.write_str("toggle animation"),
            Command::ScaleAssembly(factor) => write!(f, "scale x{factor}"),
        }
    }
}
