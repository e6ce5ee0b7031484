/// Error types for transform composition, joints and rendering
use thiserror::Error;

use crate::joint::JointId;

/// Failure reported by a renderer for a single draw call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The composed model matrix contains NaN or infinite entries
    #[error("Degenerate transform for {0}")]
    DegenerateTransform(String),

    /// The renderer has no geometry registered for the requested mesh
    #[error("Missing mesh: {0}")]
    MissingMesh(String),

    #[error("Render backend error: {0}")]
    Backend(String),
}

/// Errors raised by the scene core
///
/// None of these are fatal: the traversal skips a draw, the frame loop skips
/// a frame, and rendering resumes on the next tick.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// `top` or `pop` was called on an empty transform stack
    #[error("Transform stack underflow during {operation}")]
    StackUnderflow { operation: &'static str },

    /// The stack was not empty at the end of a full traversal pass
    #[error("Transform stack imbalance: {depth} frame(s) left after traversal")]
    StackImbalance { depth: usize },

    /// A node (or command) refers to a joint the model does not hold
    #[error("Unknown joint {joint:?} referenced by {node}")]
    UnknownJoint { joint: JointId, node: String },

    /// An angle or angle change that is NaN or infinite
    #[error("Non-finite angle {degrees} for joint {joint}")]
    NonFiniteAngle { joint: JointId, degrees: f32 },

    #[error("Invalid assembly scale factor: {factor}")]
    InvalidScale { factor: f32 },

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result type using SceneError
pub type Result<T> = std::result::Result<T, SceneError>;
