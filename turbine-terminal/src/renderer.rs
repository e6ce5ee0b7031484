/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Point3, Vector3};
use std::io::Write;
use turbine_core::{
    Camera, Mesh, MeshId, MeshLibrary, RenderError, Renderer, Transform, Transform4, Triangle,
};

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as they are wide
pub const CELL_ASPECT: f32 = 2.0;

/// ASCII renderer that converts the turbine parts to terminal characters
pub struct AsciiRenderer {
    target: RasterTarget,
    camera: Camera,
    meshes: MeshLibrary,
}

/// Depth, glyph and colour buffers plus the per-frame view-projection
struct RasterTarget {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
    view_projection: Transform4,
    light_dir: Vector3<f32>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize, camera: Camera) -> Self {
        let size = width * height;
        Self {
            target: RasterTarget {
                width,
                height,
                depth_buffer: vec![f32::INFINITY; size],
                char_buffer: vec![' '; size],
                color_buffer: vec![Color::Reset; size],
                view_projection: camera.view_projection(),
                light_dir: Vector3::new(0.5, 0.8, 0.6).normalize(),
            },
            camera,
            meshes: MeshLibrary::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.target.width
    }

    pub fn height(&self) -> usize {
        self.target.height
    }

    /// Reallocate buffers and refit the camera after a terminal resize
    pub fn resize(&mut self, width: usize, height: usize) {
        let size = width * height;
        let target = &mut self.target;
        target.width = width;
        target.height = height;
        target.depth_buffer = vec![f32::INFINITY; size];
        target.char_buffer = vec![' '; size];
        target.color_buffer = vec![Color::Reset; size];
        self.camera.aspect = width as f32 / height.max(1) as f32 / CELL_ASPECT;
        target.view_projection = self.camera.view_projection();
    }

    /// Start a new frame
    pub fn clear(&mut self) {
        self.target.depth_buffer.fill(f32::INFINITY);
        self.target.char_buffer.fill(' ');
        self.target.color_buffer.fill(Color::Reset);
    }

    /// Number of cells covered by geometry this frame
    pub fn covered_cells(&self) -> usize {
        self.target.char_buffer.iter().filter(|&&c| c != ' ').count()
    }

    /// Queue the frame buffer to `writer`; the caller flushes
    pub fn present<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let target = &self.target;
        for y in 0..target.height {
            for x in 0..target.width {
                let idx = y * target.width + x;
                writer.queue(SetForegroundColor(target.color_buffer[idx]))?;
                writer.queue(Print(target.char_buffer[idx]))?;
            }
            if y + 1 < target.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl RasterTarget {
    fn render_mesh(&mut self, mesh: &Mesh, model_matrix: &Transform4, color: Color) {
        for triangle in &mesh.triangles {
            self.render_triangle(triangle, model_matrix, color);
        }
    }

    fn render_triangle(&mut self, triangle: &Triangle, model_matrix: &Transform4, color: Color) {
        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        let mut world = [Point3::origin(); 3];
        for (i, vertex) in triangle.vertices.iter().enumerate() {
            match Camera::project_to_screen(
                &self.view_projection,
                &vertex.position,
                model_matrix,
                self.width as u32,
                self.height as u32,
            ) {
                Some(coords) => screen_coords[i] = coords,
                None => return, // Triangle is clipped
            }
            world[i] = model_matrix.transform_point(&vertex.position);
        }

        // Face normal in world space; shapes are non-uniformly scaled
        let normal = (world[1] - world[0]).cross(&(world[2] - world[0]));
        let Some(normal) = normal.try_normalize(1e-12) else {
            return;
        };
        let brightness = normal.dot(&self.light_dir).abs();

        // Map brightness to character, never blank so every face stays visible
        let steps = (LUMINOSITY_RAMP.len() - 2) as f32;
        let char_index = 1 + (brightness * steps) as usize;
        let char_index = char_index.min(LUMINOSITY_RAMP.len() - 1);
        let character = LUMINOSITY_RAMP[char_index];

        // Rasterize triangle using scanline algorithm
        self.rasterize_triangle(&screen_coords, character, color);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char, color: Color) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric coordinates
                if let Some((w0, w1, w2)) = barycentric(
                    (v0.0, v0.1),
                    (v1.0, v1.1),
                    (v2.0, v2.1),
                    (px, py),
                ) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.char_buffer[idx] = character;
                            self.color_buffer[idx] = color;
                        }
                    }
                }
            }
        }
    }
}

impl Renderer for AsciiRenderer {
    fn draw(
        &mut self,
        world: &Transform4,
        shape: &Transform4,
        mesh: MeshId,
    ) -> Result<(), RenderError> {
        let model = world * shape;
        if !Transform::is_finite(&model) {
            return Err(RenderError::DegenerateTransform(mesh.name().to_string()));
        }
        let geometry = self
            .meshes
            .get(mesh)
            .ok_or_else(|| RenderError::MissingMesh(mesh.name().to_string()))?;
        self.target.render_mesh(geometry, &model, part_color(mesh));
        Ok(())
    }
}

/// Tint per part
fn part_color(mesh: MeshId) -> Color {
    match mesh {
        MeshId::Tower => Color::Grey,
        MeshId::Nacelle => Color::White,
        MeshId::Hub => Color::Yellow,
        MeshId::Blade => Color::Cyan,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
