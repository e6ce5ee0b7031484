/// Mesh data for the turbine parts
use std::collections::HashMap;

use nalgebra::{Point3, Vector3};

/// A 3D vertex in mesh space.
///
/// Shading normals are taken from the transformed face, so none is stored.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>) -> Self {
        Self { position }
    }
}

/// A triangle face, counter-clockwise when seen from outside
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let [v0, v1, v2] = self.vertices.map(|v| v.position);
        (v1 - v0).cross(&(v2 - v0)).normalize()
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Axis-aligned cube centred on the origin.
    ///
    /// Every part is drawn as a unit cube stretched by its shape transform.
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let x = Vector3::x();
        let y = Vector3::y();
        let z = Vector3::z();
        // (outward normal, u, v) with u x v == normal
        let faces = [(z, x, y), (-z, y, x), (y, z, x), (-y, x, z), (x, y, z), (-x, z, y)];

        let mut mesh = Self::with_capacity(faces.len() * 2);
        for (normal, u, v) in faces {
            let corner = |su: f32, sv: f32| {
                Vertex::new(Point3::from((normal + u * su + v * sv) * half))
            };
            let quad = [
                corner(-1.0, -1.0),
                corner(1.0, -1.0),
                corner(1.0, 1.0),
                corner(-1.0, 1.0),
            ];
            mesh.add_triangle(Triangle::new(quad[0], quad[1], quad[2]));
            mesh.add_triangle(Triangle::new(quad[0], quad[2], quad[3]));
        }
        mesh
    }
}

/// Geometry a hierarchy node asks the renderer to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshId {
    Tower,
    Nacelle,
    Hub,
    Blade,
}

impl MeshId {
    pub const ALL: [MeshId; 4] = [MeshId::Tower, MeshId::Nacelle, MeshId::Hub, MeshId::Blade];

    pub fn name(self) -> &'static str {
        match self {
            MeshId::Tower => "tower",
            MeshId::Nacelle => "nacelle",
            MeshId::Hub => "hub",
            MeshId::Blade => "blade",
        }
    }
}

/// Immutable mesh data, built once at startup
#[derive(Debug, Clone)]
pub struct MeshLibrary {
    meshes: HashMap<MeshId, Mesh>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        let meshes = MeshId::ALL
            .iter()
            .map(|&id| (id, Mesh::cube(1.0)))
            .collect();
        Self { meshes }
    }

    pub fn get(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(&id)
    }
}

impl Default for MeshLibrary {
    fn default() -> Self {
        Self::new()
    }
}
