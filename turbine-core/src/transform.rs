/// 4x4 homogeneous transform builders
///
/// Every builder is a pure function returning a fresh matrix. Composition is
/// plain matrix multiplication (`parent * child`), so no shared instance is
/// ever mutated in place.
use nalgebra::{Matrix4, Point3, Unit, Vector3};

/// Homogeneous transform used throughout the scene
pub type Transform4 = Matrix4<f32>;

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    pub fn identity() -> Transform4 {
        Matrix4::identity()
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Transform4 {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Transform4 {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Rotation of `degrees` about a unit axis through the origin
    pub fn rotation_degrees(degrees: f32, axis: &Unit<Vector3<f32>>) -> Transform4 {
        Matrix4::from_axis_angle(axis, degrees.to_radians())
    }

    /// Rotation about an axis passing through `pivot`:
    /// translate to the pivot, rotate, translate back.
    pub fn pivot_rotation(
        degrees: f32,
        axis: &Unit<Vector3<f32>>,
        pivot: &Point3<f32>,
    ) -> Transform4 {
        let to_pivot = Matrix4::new_translation(&pivot.coords);
        let from_pivot = Matrix4::new_translation(&-pivot.coords);
        to_pivot * Self::rotation_degrees(degrees, axis) * from_pivot
    }

    /// True when every entry is finite
    pub fn is_finite(matrix: &Transform4) -> bool {
        matrix.iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rotation_is_identity() {
        let matrix = Transform::rotation_degrees(0.0, &Vector3::y_axis());
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_quarter_turn_about_y() {
        let matrix = Transform::rotation_degrees(90.0, &Vector3::y_axis());
        let p = matrix.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!((p - Point3::new(0.0, 0.0, -1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_pivot_rotation_keeps_pivot_fixed() {
        let pivot = Point3::new(0.0, 2.0, 0.0);
        let matrix = Transform::pivot_rotation(73.0, &Vector3::x_axis(), &pivot);
        let moved = matrix.transform_point(&pivot);
        assert!((moved - pivot).norm() < 1e-6);
    }

    #[test]
    fn test_translation_then_scale() {
        let model = Transform::translation_matrix(1.0, 2.0, 3.0) * Transform::scale_matrix(2.0, 2.0, 2.0);
        let p = model.transform_point(&Point3::new(1.0, 1.0, 1.0));
        assert!((p - Point3::new(3.0, 4.0, 5.0)).norm() < 1e-6);
    }

    #[test]
    fn test_non_finite_detection() {
        let mut matrix = Transform::identity();
        assert!(Transform::is_finite(&matrix));
        matrix[(0, 3)] = f32::NAN;
        assert!(!Transform::is_finite(&matrix));
    }
}
