/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::transform::Transform4;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    /// Camera framing the turbine from the front-left, slightly above the hub
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(7.0, 4.5, 9.0),
            target: Point3::new(0.0, 3.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Adjust the aspect ratio for cells that are `cell_aspect` times taller than wide
    pub fn with_cell_aspect(mut self, cell_aspect: f32) -> Self {
        self.aspect /= cell_aspect;
        self
    }

    pub fn with_mode(mut self, mode: ProjectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Transform4 {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Transform4 {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = (self.position - self.target).norm() * (self.fov / 2.0).tan() * 2.0;
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Combined projection * view
    pub fn view_projection(&self) -> Transform4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a model-space point to screen space: `(x, y, depth)`.
    ///
    /// `view_projection` comes from [`Camera::view_projection`], computed once
    /// per frame by the caller.
    pub fn project_to_screen(
        view_projection: &Transform4,
        point: &Point3<f32>,
        model_matrix: &Transform4,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let clip = view_projection * model_matrix * point.to_homogeneous();

        // Behind the camera or degenerate
        if clip.w <= 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        if !(-1.0..=1.0).contains(&depth) {
            return None;
        }

        // Convert to screen space; x/y outside the viewport are clipped by the rasterizer
        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_cell_aspect_halves_ratio() {
        let camera = Camera::new(80, 40).with_cell_aspect(2.0);
        assert!((camera.aspect - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_target_projects_to_screen_centre() {
        let camera = Camera::new(100, 50);
        let vp = camera.view_projection();
        let (x, y, depth) =
            Camera::project_to_screen(&vp, &camera.target, &Matrix4::identity(), 100, 50).unwrap();
        assert!((x - 50.0).abs() < 1e-3);
        assert!((y - 25.0).abs() < 1e-3);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_point_behind_camera_is_rejected() {
        let camera = Camera::new(100, 50);
        let vp = camera.view_projection();
        let behind = camera.position + (camera.position - camera.target);
        assert!(Camera::project_to_screen(&vp, &behind, &Matrix4::identity(), 100, 50).is_none());
    }

    #[test]
    fn test_orthographic_projection_is_finite() {
        let camera = Camera::new(80, 40).with_mode(ProjectionMode::Orthographic);
        assert!(camera.projection_matrix().iter().all(|v| v.is_finite()));
    }
}
