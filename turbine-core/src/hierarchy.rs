/// Static part hierarchy and the depth-first pass that draws it.
///
/// A pass pushes `top * joint_local(node)` before visiting a node, draws the
/// node with the new top, visits the children in declaration order and pops
/// on the way back up. The stack is created for the pass and must be empty
/// again when the pass ends.
use log::{debug, error, warn};

use crate::error::{Result, SceneError};
use crate::geometry::MeshId;
use crate::joint::{JointId, JointModel};
use crate::render::Renderer;
use crate::stack::{StackStats, TransformStack};
use crate::transform::Transform4;

/// How a node hangs off its parent's frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    /// Attached through a joint's local transform
    Joint(JointId),
    /// Shares the parent's accumulated frame (decorative geometry)
    Anchored,
}

/// One body part
#[derive(Debug, Clone)]
pub struct HierarchyNode {
    pub name: &'static str,
    pub mesh: MeshId,
    pub attachment: Attachment,
    /// Extent of the part, independent of articulation
    pub shape: Transform4,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub fn new(
        name: &'static str,
        mesh: MeshId,
        attachment: Attachment,
        shape: Transform4,
    ) -> Self {
        Self {
            name,
            mesh,
            attachment,
            shape,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: HierarchyNode) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, self included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(HierarchyNode::node_count).sum::<usize>()
    }

    /// Pre-order search by part name
    pub fn find(&self, name: &str) -> Option<&HierarchyNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Joints referenced by this subtree, in visiting order
    pub fn joint_refs(&self) -> Vec<(&'static str, JointId)> {
        let mut refs = Vec::new();
        self.collect_joint_refs(&mut refs);
        refs
    }

    fn collect_joint_refs(&self, refs: &mut Vec<(&'static str, JointId)>) {
        if let Attachment::Joint(id) = self.attachment {
            refs.push((self.name, id));
        }
        for child in &self.children {
            child.collect_joint_refs(refs);
        }
    }
}

/// Outcome of one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Draw calls the renderer accepted
    pub draws: usize,
    /// Draw calls the renderer rejected
    pub failed: usize,
    pub stack: StackStats,
}

/// Depth-first walk of a validated hierarchy
pub struct HierarchyTraversal<'a> {
    root: &'a HierarchyNode,
    joints: &'a JointModel,
}

impl<'a> HierarchyTraversal<'a> {
    /// Check every referenced joint before anything is drawn
    pub fn new(root: &'a HierarchyNode, joints: &'a JointModel) -> Result<Self> {
        validate(root, joints)?;
        Ok(Self { root, joints })
    }

    /// Run one full pass under `scene_root`
    pub fn run<R: Renderer>(&self, scene_root: &Transform4, renderer: &mut R) -> Result<PassReport> {
        let mut stack = TransformStack::with_capacity(8);
        let mut report = PassReport::default();

        self.visit(self.root, scene_root, &mut stack, renderer, &mut report)?;

        report.stack = stack.finish()?;
        debug!(
            "pass complete: {} draws, {} failed",
            report.draws, report.failed
        );
        Ok(report)
    }

    fn visit<R: Renderer>(
        &self,
        node: &HierarchyNode,
        parent: &Transform4,
        stack: &mut TransformStack,
        renderer: &mut R,
        report: &mut PassReport,
    ) -> Result<()> {
        let frame = match node.attachment {
            Attachment::Joint(id) => parent * self.joints.local_transform(id)?,
            // Snapshot by value: popping this frame cannot touch the parent's
            Attachment::Anchored => *parent,
        };
        stack.push(frame);

        let world = *stack.top()?;
        match renderer.draw(&world, &node.shape, node.mesh) {
            Ok(()) => report.draws += 1,
            Err(e) => {
                warn!("draw of {} failed: {}", node.name, e);
                report.failed += 1;
            }
        }

        for child in &node.children {
            self.visit(child, &world, stack, renderer, report)?;
        }

        stack.pop()?;
        Ok(())
    }
}

/// Every joint the tree references must exist in the model
pub fn validate(root: &HierarchyNode, joints: &JointModel) -> Result<()> {
    for (node, joint) in root.joint_refs() {
        if !joints.contains(joint) {
            error!("node {} references unknown joint {}", node, joint);
            return Err(SceneError::UnknownJoint {
                joint,
                node: node.to_string(),
            });
        }
    }
    Ok(())
}
