/// Named joints and the angle-to-local-transform rule
use std::collections::BTreeMap;
use std::fmt;

use log::{trace, warn};
use nalgebra::{Point3, Unit, Vector3};

use crate::error::{Result, SceneError};
use crate::transform::{Transform, Transform4};

/// Articulation points of the turbine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JointId {
    /// Whole-assembly yaw at the foot of the base
    Turbine,
    /// Generator yaw on top of the base
    Shoulder,
    /// Blade pitch at the hub
    Arm,
    /// Rotor spin, the animated joint
    Rotor,
}

impl JointId {
    pub fn name(self) -> &'static str {
        match self {
            JointId::Turbine => "turbine",
            JointId::Shoulder => "shoulder",
            JointId::Arm => "arm",
            JointId::Rotor => "rotor",
        }
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed geometry a joint applies around its angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Articulation {
    /// `translate(offset) * rotate(angle, axis)`
    Revolute {
        offset: Vector3<f32>,
        axis: Unit<Vector3<f32>>,
    },
    /// `translate(offset) * translate(pivot) * rotate(angle, axis) * translate(-pivot)`
    Pivot {
        offset: Vector3<f32>,
        pivot: Point3<f32>,
        axis: Unit<Vector3<f32>>,
    },
}

impl Articulation {
    pub fn revolute(offset: Vector3<f32>, axis: Unit<Vector3<f32>>) -> Self {
        Articulation::Revolute { offset, axis }
    }

    pub fn pivot(offset: Vector3<f32>, pivot: Point3<f32>, axis: Unit<Vector3<f32>>) -> Self {
        Articulation::Pivot {
            offset,
            pivot,
            axis,
        }
    }

    /// Local transform for `degrees`, rebuilt from the base geometry every call
    pub fn local_transform(&self, degrees: f32) -> Transform4 {
        match self {
            Articulation::Revolute { offset, axis } => {
                Transform::translation_matrix(offset.x, offset.y, offset.z)
                    * Transform::rotation_degrees(degrees, axis)
            }
            Articulation::Pivot {
                offset,
                pivot,
                axis,
            } => {
                Transform::translation_matrix(offset.x, offset.y, offset.z)
                    * Transform::pivot_rotation(degrees, axis, pivot)
            }
        }
    }
}

/// Current state of one joint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub id: JointId,
    pub articulation: Articulation,
    /// Degrees
    angle: f32,
    /// Keep the angle in [0, 360)
    wraps: bool,
}

impl Joint {
    pub fn new(id: JointId, articulation: Articulation) -> Self {
        Self {
            id,
            articulation,
            angle: 0.0,
            wraps: false,
        }
    }

    /// Normalize the angle into [0, 360) after every change
    pub fn wrapping(mut self) -> Self {
        self.wraps = true;
        self.angle = normalize_degrees(self.angle);
        self
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn wraps(&self) -> bool {
        self.wraps
    }

    fn set(&mut self, degrees: f32) {
        self.angle = if self.wraps {
            normalize_degrees(degrees)
        } else {
            degrees
        };
    }

    pub fn local_transform(&self) -> Transform4 {
        self.articulation.local_transform(self.angle)
    }
}

/// Wrap into [0, 360). `rem_euclid` keeps the magnitude bounded so float
/// precision does not decay over long runs.
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Set of joints that drive the assembly
#[derive(Debug, Clone, Default)]
pub struct JointModel {
    joints: BTreeMap<JointId, Joint>,
}

impl JointModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a joint, replacing any previous one with the same id
    pub fn insert(&mut self, joint: Joint) {
        self.joints.insert(joint.id, joint);
    }

    pub fn with_joint(mut self, joint: Joint) -> Self {
        self.insert(joint);
        self
    }

    pub fn contains(&self, id: JointId) -> bool {
        self.joints.contains_key(&id)
    }

    pub fn get(&self, id: JointId) -> Option<&Joint> {
        self.joints.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Joint> {
        self.joints.values()
    }

    pub fn angle(&self, id: JointId) -> Result<f32> {
        self.lookup(id).map(Joint::angle)
    }

    /// Rejects NaN and infinite angles, leaving the joint untouched
    pub fn set_angle(&mut self, id: JointId, degrees: f32) -> Result<()> {
        let joint = self.lookup_mut(id)?;
        check_finite(id, degrees)?;
        joint.set(degrees);
        trace!("joint {} set to {:.3}", id, joint.angle);
        Ok(())
    }

    pub fn adjust_angle(&mut self, id: JointId, delta: f32) -> Result<()> {
        let joint = self.lookup_mut(id)?;
        check_finite(id, delta)?;
        check_finite(id, joint.angle + delta)?;
        joint.set(joint.angle + delta);
        trace!("joint {} adjusted by {:+.3} to {:.3}", id, delta, joint.angle);
        Ok(())
    }

    /// Local transform from the joint's current angle
    pub fn local_transform(&self, id: JointId) -> Result<Transform4> {
        self.lookup(id).map(Joint::local_transform)
    }

    fn lookup(&self, id: JointId) -> Result<&Joint> {
        self.joints.get(&id).ok_or_else(|| unknown(id))
    }

    fn lookup_mut(&mut self, id: JointId) -> Result<&mut Joint> {
        self.joints.get_mut(&id).ok_or_else(|| unknown(id))
    }
}

fn check_finite(joint: JointId, degrees: f32) -> Result<()> {
    if degrees.is_finite() {
        Ok(())
    } else {
        warn!("rejected non-finite angle {} for joint {}", degrees, joint);
        Err(SceneError::NonFiniteAngle { joint, degrees })
    }
}

fn unknown(joint: JointId) -> SceneError {
    SceneError::UnknownJoint {
        joint,
        node: "joint model".to_string(),
    }
}
