/// Interface to the drawing backend
use crate::error::RenderError;
use crate::geometry::MeshId;
use crate::transform::Transform4;

/// Drawing backend invoked once per visited hierarchy node.
///
/// `world` is the accumulated joint transform of the node (scene root
/// included); `shape` is the node's own extent, applied after `world`.
/// View and projection belong to the implementor.
///
/// A returned error is logged by the traversal and the pass carries on.
pub trait Renderer {
    fn draw(
        &mut self,
        world: &Transform4,
        shape: &Transform4,
        mesh: MeshId,
    ) -> Result<(), RenderError>;
}
