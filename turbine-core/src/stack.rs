/// LIFO of accumulated transforms for one traversal pass
use log::{error, warn};

use crate::error::{Result, SceneError};
use crate::transform::Transform4;

/// Push/pop counters collected over a pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StackStats {
    pub pushes: usize,
    pub pops: usize,
}

/// Stack of accumulated ancestor-to-world transforms.
///
/// Frames are stored by value: `push` takes ownership of a matrix, so a later
/// `pop` can never invalidate a transform that was already handed out.
/// Create one per render pass and close it with [`TransformStack::finish`].
#[derive(Debug, Default)]
pub struct TransformStack {
    frames: Vec<Transform4>,
    stats: StackStats,
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
            stats: StackStats::default(),
        }
    }

    pub fn push(&mut self, transform: Transform4) {
        self.frames.push(transform);
        self.stats.pushes += 1;
    }

    /// Current accumulated transform.
    ///
    /// An empty stack is reported as [`SceneError::StackUnderflow`] and logged.
    pub fn top(&self) -> Result<&Transform4> {
        self.frames.last().ok_or_else(|| underflow("top"))
    }

    pub fn pop(&mut self) -> Result<Transform4> {
        let frame = self.frames.pop().ok_or_else(|| underflow("pop"))?;
        self.stats.pops += 1;
        Ok(frame)
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn stats(&self) -> StackStats {
        self.stats
    }

    /// Close the pass; the stack must be empty again.
    pub fn finish(self) -> Result<StackStats> {
        if self.frames.is_empty() {
            Ok(self.stats)
        } else {
            let depth = self.frames.len();
            error!(
                "transform stack imbalance: {} frame(s) left ({} pushes, {} pops)",
                depth, self.stats.pushes, self.stats.pops
            );
            Err(SceneError::StackImbalance { depth })
        }
    }
}

fn underflow(operation: &'static str) -> SceneError {
    warn!("transform stack underflow on {operation}");
    SceneError::StackUnderflow { operation }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transform;

    #[test]
    fn test_balanced_sequence_returns_to_empty() {
        let mut stack = TransformStack::new();
        assert!(stack.is_empty());

        stack.push(Transform::identity());
        stack.push(Transform::translation_matrix(1.0, 0.0, 0.0));
        assert_eq!(stack.depth(), 2);
        stack.pop().unwrap();
        stack.push(Transform::scale_matrix(2.0, 2.0, 2.0));
        stack.pop().unwrap();
        stack.pop().unwrap();

        assert!(stack.is_empty());
        let stats = stack.finish().unwrap();
        assert_eq!(stats, StackStats { pushes: 3, pops: 3 });
    }

    #[test]
    fn test_top_and_pop_on_empty_report_underflow() {
        let mut stack = TransformStack::new();
        assert_eq!(
            stack.top().unwrap_err(),
            SceneError::StackUnderflow { operation: "top" }
        );
        assert_eq!(
            stack.pop().unwrap_err(),
            SceneError::StackUnderflow { operation: "pop" }
        );
        // Failed pops are not counted
        assert_eq!(stack.stats().pops, 0);
        assert!(stack.finish().is_ok());
    }

    #[test]
    fn test_leftover_frames_are_an_imbalance() {
        let mut stack = TransformStack::new();
        stack.push(Transform::identity());
        stack.push(Transform::identity());
        stack.pop().unwrap();
        assert_eq!(
            stack.finish().unwrap_err(),
            SceneError::StackImbalance { depth: 1 }
        );
    }

    #[test]
    fn test_push_then_pop_restores_exact_top() {
        let mut stack = TransformStack::new();
        stack.push(Transform::translation_matrix(0.5, 1.5, -2.0));
        let before = *stack.top().unwrap();

        let child = Transform::pivot_rotation(
            33.0,
            &nalgebra::Vector3::x_axis(),
            &nalgebra::Point3::new(0.0, 1.0, 0.0),
        );
        stack.push(before * child);
        stack.pop().unwrap();

        assert_eq!(*stack.top().unwrap(), before);
    }

    #[test]
    fn test_popped_frame_is_independent_snapshot() {
        let mut stack = TransformStack::new();
        let parent = Transform::translation_matrix(1.0, 2.0, 3.0);
        stack.push(parent);
        let shared = *stack.top().unwrap();
        stack.push(shared);

        let mut popped = stack.pop().unwrap();
        popped[(0, 3)] = 99.0;

        assert_eq!(*stack.top().unwrap(), parent);
    }
}
