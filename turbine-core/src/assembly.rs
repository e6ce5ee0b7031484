/// Compiled-in turbine: joint set and part hierarchy
use nalgebra::{Point3, Vector3};

use crate::geometry::MeshId;
use crate::hierarchy::{Attachment, HierarchyNode};
use crate::joint::{Articulation, Joint, JointId, JointModel};
use crate::transform::{Transform, Transform4};

pub const BASE_HEIGHT: f32 = 4.0;
pub const BASE_WIDTH: f32 = 0.6;
pub const GENERATOR_LENGTH: f32 = 1.6;
pub const GENERATOR_HEIGHT: f32 = 0.7;
pub const HUB_SIZE: f32 = 0.4;
pub const BLADE_LENGTH: f32 = 2.4;
pub const BLADE_WIDTH: f32 = 0.25;
pub const BLADE_THICKNESS: f32 = 0.06;

/// Angular spacing between the three blades
const BLADE_SPACING: f32 = 120.0;

/// Joint set driving the turbine, all angles at zero.
///
/// The rotor spins through its own centre, so it wraps into [0, 360).
pub fn joints() -> JointModel {
    JointModel::new()
        .with_joint(Joint::new(
            JointId::Turbine,
            Articulation::revolute(Vector3::zeros(), Vector3::y_axis()),
        ))
        .with_joint(Joint::new(
            JointId::Shoulder,
            Articulation::revolute(Vector3::new(0.0, BASE_HEIGHT, 0.0), Vector3::y_axis()),
        ))
        .with_joint(
            Joint::new(
                JointId::Rotor,
                Articulation::pivot(
                    Vector3::new(0.5 * GENERATOR_LENGTH, 0.0, 0.0),
                    Point3::new(0.0, 0.5 * GENERATOR_HEIGHT, 0.0),
                    Vector3::x_axis(),
                ),
            )
            .wrapping(),
        )
        .with_joint(Joint::new(
            JointId::Arm,
            Articulation::revolute(
                Vector3::new(HUB_SIZE, 0.5 * GENERATOR_HEIGHT, 0.0),
                Vector3::y_axis(),
            ),
        ))
}

/// Part tree: base → generator → rotor → blades
pub fn hierarchy() -> HierarchyNode {
    let base_shape = Transform::translation_matrix(0.0, 0.5 * BASE_HEIGHT, 0.0)
        * Transform::scale_matrix(BASE_WIDTH, BASE_HEIGHT, BASE_WIDTH);
    let generator_shape = Transform::translation_matrix(0.0, 0.5 * GENERATOR_HEIGHT, 0.0)
        * Transform::scale_matrix(GENERATOR_LENGTH, GENERATOR_HEIGHT, GENERATOR_HEIGHT);
    let hub_shape = Transform::translation_matrix(0.5 * HUB_SIZE, 0.5 * GENERATOR_HEIGHT, 0.0)
        * Transform::scale_matrix(HUB_SIZE, HUB_SIZE, HUB_SIZE);

    let rotor = HierarchyNode::new("rotor", MeshId::Hub, Attachment::Joint(JointId::Rotor), hub_shape)
        .with_child(HierarchyNode::new(
            "blade",
            MeshId::Blade,
            Attachment::Joint(JointId::Arm),
            blade_shape(0.0),
        ))
        .with_child(HierarchyNode::new(
            "blade_b",
            MeshId::Blade,
            Attachment::Anchored,
            hub_offset() * blade_shape(BLADE_SPACING),
        ))
        .with_child(HierarchyNode::new(
            "blade_c",
            MeshId::Blade,
            Attachment::Anchored,
            hub_offset() * blade_shape(2.0 * BLADE_SPACING),
        ));

    let generator = HierarchyNode::new(
        "generator",
        MeshId::Nacelle,
        Attachment::Joint(JointId::Shoulder),
        generator_shape,
    )
    .with_child(rotor);

    HierarchyNode::new("base", MeshId::Tower, Attachment::Joint(JointId::Turbine), base_shape)
        .with_child(generator)
}

/// Blade extent, spun `degrees` around the rotor axis
fn blade_shape(degrees: f32) -> Transform4 {
    Transform::rotation_degrees(degrees, &Vector3::x_axis())
        * Transform::translation_matrix(0.0, 0.5 * BLADE_LENGTH, 0.0)
        * Transform::scale_matrix(BLADE_THICKNESS, BLADE_LENGTH, BLADE_WIDTH)
}

/// Anchored blades sit in the rotor frame, so they carry the hub offset the
/// pitched blade gets from its joint
fn hub_offset() -> Transform4 {
    Transform::translation_matrix(HUB_SIZE, 0.5 * GENERATOR_HEIGHT, 0.0)
}
