/// Turbine Core Library - articulated transform composition
///
/// This library provides the hierarchical transform stack, the joint model,
/// the depth-first hierarchy traversal and the animation scheduler that drive
/// an articulated wind turbine. Drawing is delegated through [`Renderer`].

pub mod assembly;
pub mod command;
pub mod config;
pub mod error;
pub mod geometry;
pub mod hierarchy;
pub mod joint;
pub mod projection;
pub mod render;
pub mod scene;
pub mod scheduler;
pub mod stack;
pub mod transform;

// Re-export commonly used types
pub use command::Command;
pub use config::{InitialPose, SceneConfig};
pub use error::{RenderError, Result, SceneError};
pub use geometry::{Mesh, MeshId, MeshLibrary, Triangle, Vertex};
pub use hierarchy::{Attachment, HierarchyNode, HierarchyTraversal, PassReport};
pub use joint::{Articulation, Joint, JointId, JointModel};
pub use projection::{Camera, ProjectionMode};
pub use render::Renderer;
pub use scene::{FrameReport, SceneState};
pub use scheduler::{AnimationScheduler, Direction, SchedulerState};
pub use stack::{StackStats, TransformStack};
pub use transform::{Transform, Transform4};
