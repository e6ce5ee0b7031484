/// Scene state: the one owner of joints, scheduler and hierarchy.
///
/// A frame is `apply` for every pending command, then one `tick`, which
/// advances the scheduler and runs exactly one traversal pass.
use log::{debug, warn};

use crate::assembly;
use crate::command::Command;
use crate::config::SceneConfig;
use crate::error::{Result, SceneError};
use crate::hierarchy::{validate, HierarchyNode, HierarchyTraversal, PassReport};
use crate::joint::JointModel;
use crate::render::Renderer;
use crate::scheduler::{AnimationScheduler, Direction};
use crate::transform::{Transform, Transform4};

/// Result of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Whether the scheduler moved the driven joint this frame
    pub advanced: bool,
    pub pass: PassReport,
}

#[derive(Debug, Clone)]
pub struct SceneState {
    hierarchy: HierarchyNode,
    joints: JointModel,
    scheduler: AnimationScheduler,
    placement: Transform4,
    assembly_scale: f32,
}

impl SceneState {
    /// The compiled-in turbine, posed and scheduled per `config`
    pub fn new(config: &SceneConfig) -> Result<Self> {
        Self::from_parts(assembly::hierarchy(), assembly::joints(), config)
    }

    pub fn from_parts(
        hierarchy: HierarchyNode,
        mut joints: JointModel,
        config: &SceneConfig,
    ) -> Result<Self> {
        validate(&hierarchy, &joints)?;
        check_scale(config.assembly_scale)?;

        let ids: Vec<_> = joints.iter().map(|joint| joint.id).collect();
        for id in ids {
            joints.set_angle(id, config.pose.angle(id))?;
        }
        if !joints.contains(config.driven_joint) {
            return Err(SceneError::UnknownJoint {
                joint: config.driven_joint,
                node: "scheduler".to_string(),
            });
        }

        let mut scheduler =
            AnimationScheduler::new(config.driven_joint, config.speed, config.direction);
        if config.start_paused {
            scheduler.pause();
        }

        Ok(Self {
            hierarchy,
            joints,
            scheduler,
            placement: Transform::identity(),
            assembly_scale: config.assembly_scale,
        })
    }

    /// Place the assembly in the world
    pub fn with_placement(mut self, placement: Transform4) -> Self {
        self.placement = placement;
        self
    }

    pub fn joints(&self) -> &JointModel {
        &self.joints
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn hierarchy(&self) -> &HierarchyNode {
        &self.hierarchy
    }

    pub fn assembly_scale(&self) -> f32 {
        self.assembly_scale
    }

    /// Placement with the assembly scale folded in
    pub fn scene_root(&self) -> Transform4 {
        let s = self.assembly_scale;
        self.placement * Transform::scale_matrix(s, s, s)
    }

    /// Apply one command to completion.
    ///
    /// Joint commands apply whether or not the animation is running.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        debug!("command: {command}");
        match command {
            Command::AdjustJoint { joint, delta } => self.joints.adjust_angle(joint, delta)?,
            Command::SetDirection(forward) => {
                self.scheduler.set_direction(Direction::from_forward(forward))
            }
            Command::AdjustSpeed(delta) => self.scheduler.adjust_speed(delta),
            Command::ResetSpeedAndDirection => self.scheduler.reset_speed_and_direction(),
            Command::ToggleAnimation => self.scheduler.toggle(),
            Command::ScaleAssembly(factor) => {
                check_scale(factor)?;
                let scaled = self.assembly_scale * factor;
                check_scale(scaled)?;
                self.assembly_scale = scaled;
            }
        }
        Ok(())
    }

    /// Advance the scheduler, then draw one pass
    pub fn tick<R: Renderer>(&mut self, renderer: &mut R) -> Result<FrameReport> {
        let advanced = match self.scheduler.tick(&mut self.joints) {
            Ok(advanced) => advanced,
            Err(e) => {
                warn!("animation tick skipped: {e}");
                false
            }
        };
        let pass = self.render(renderer)?;
        Ok(FrameReport { advanced, pass })
    }

    /// Draw one pass from the current joint state
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> Result<PassReport> {
        HierarchyTraversal::new(&self.hierarchy, &self.joints)?.run(&self.scene_root(), renderer)
    }

    /// Stop animating; joints keep their last applied angles
    pub fn stop(&mut self) {
        self.scheduler.stop();
    }
}

fn check_scale(factor: f32) -> Result<()> {
    if factor.is_finite() && factor > 0.0 {
        Ok(())
    } else {
        Err(SceneError::InvalidScale { factor })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::geometry::MeshId;
    use crate::joint::JointId;
    use crate::scheduler::SchedulerState;

    struct CountingRenderer {
        draws: usize,
    }

    impl Renderer for CountingRenderer {
        fn draw(
            &mut self,
            _world: &Transform4,
            _shape: &Transform4,
            _mesh: MeshId,
        ) -> std::result::Result<(), RenderError> {
            self.draws += 1;
            Ok(())
        }
    }

    #[test]
    fn test_new_scene_applies_pose() {
        let scene = SceneState::new(&SceneConfig::default()).unwrap();
        let joints = scene.joints();
        assert_eq!(joints.angle(JointId::Turbine).unwrap(), 0.0);
        assert_eq!(joints.angle(JointId::Shoulder).unwrap(), 45.0);
        assert_eq!(joints.angle(JointId::Arm).unwrap(), 45.0);
        assert_eq!(joints.angle(JointId::Rotor).unwrap(), 0.0);
        assert_eq!(scene.scheduler().state(), SchedulerState::Running);
    }

    #[test]
    fn test_start_paused() {
        let config = SceneConfig {
            start_paused: true,
            ..SceneConfig::default()
        };
        let scene = SceneState::new(&config).unwrap();
        assert_eq!(scene.scheduler().state(), SchedulerState::Paused);
    }

    #[test]
    fn test_tick_advances_then_draws_every_part() {
        let mut scene = SceneState::new(&SceneConfig::default()).unwrap();
        let mut renderer = CountingRenderer { draws: 0 };

        let frame = scene.tick(&mut renderer).unwrap();

        assert!(frame.advanced);
        assert_eq!(frame.pass.draws, 6);
        assert_eq!(renderer.draws, 6);
        assert_eq!(scene.joints().angle(JointId::Rotor).unwrap(), 1.0);
    }

    #[test]
    fn test_scale_assembly_multiplies_and_rejects_bad_factors() {
        let mut scene = SceneState::new(&SceneConfig::default()).unwrap();
        scene.apply(Command::ScaleAssembly(2.0)).unwrap();
        scene.apply(Command::ScaleAssembly(0.5)).unwrap();
        scene.apply(Command::ScaleAssembly(0.5)).unwrap();
        assert_eq!(scene.assembly_scale(), 0.5);

        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                scene.apply(Command::ScaleAssembly(bad)),
                Err(SceneError::InvalidScale { .. })
            ));
        }
        assert_eq!(scene.assembly_scale(), 0.5);
    }

    #[test]
    fn test_non_finite_pose_is_rejected() {
        let mut config = SceneConfig::default();
        config.pose.arm = f32::INFINITY;
        assert!(matches!(
            SceneState::new(&config),
            Err(SceneError::NonFiniteAngle {
                joint: JointId::Arm,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_configured_scale_is_rejected() {
        let config = SceneConfig {
            assembly_scale: 0.0,
            ..SceneConfig::default()
        };
        assert!(SceneState::new(&config).is_err());
    }

    #[test]
    fn test_direction_and_speed_commands() {
        let mut scene = SceneState::new(&SceneConfig::default()).unwrap();
        scene.apply(Command::AdjustSpeed(2.0)).unwrap();
        scene.apply(Command::SetDirection(false)).unwrap();
        assert_eq!(scene.scheduler().step(), -3.0);

        scene.apply(Command::ResetSpeedAndDirection).unwrap();
        assert_eq!(scene.scheduler().step(), 1.0);
    }

    #[test]
    fn test_stop_keeps_last_state() {
        let mut scene = SceneState::new(&SceneConfig::default()).unwrap();
        let mut renderer = CountingRenderer { draws: 0 };
        scene.tick(&mut renderer).unwrap();
        scene.stop();

        let frame = scene.tick(&mut renderer).unwrap();
        assert!(!frame.advanced);
        assert_eq!(scene.joints().angle(JointId::Rotor).unwrap(), 1.0);
        // Manual adjustments still apply after stop
        scene
            .apply(Command::AdjustJoint {
                joint: JointId::Arm,
                delta: 5.0,
            })
            .unwrap();
        assert_eq!(scene.joints().angle(JointId::Arm).unwrap(), 50.0);
    }
}
