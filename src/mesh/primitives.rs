//! Unit shapes for the instanced ornaments and the star

use std::f32::consts::PI;

use crate::math::Vec3;
use super::geometry::{Mesh, Vertex};

/// Axis-aligned unit cube centred on the origin (gifts)
pub fn cube(size: f32) -> Mesh {
    let mut mesh = Mesh::new();
    let h = size * 0.5;

    // (normal, u axis, v axis) per face, u x v == normal
    let faces = [
        (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
        (Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
        (Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(0.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
    ];

    for (normal, u, v) in faces {
        let center = normal.scale(h);
        let corners = [
            center - u.scale(h) - v.scale(h),
            center + u.scale(h) - v.scale(h),
            center + u.scale(h) + v.scale(h),
            center - u.scale(h) + v.scale(h),
        ];
        let start = mesh.add_vertices(corners.iter().map(|&p| Vertex::new(p, normal)));
        mesh.add_quad(start, start + 1, start + 2, start + 3);
    }

    mesh
}

/// Smooth UV sphere (baubles)
pub fn uv_sphere(radius: f32, width_segments: usize, height_segments: usize) -> Mesh {
    let mut mesh = Mesh::new();
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let theta = v * PI;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = u * 2.0 * PI;
            let normal = Vec3::new(-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin());
            mesh.vertices.push(Vertex::new(normal.scale(radius), normal));
        }
    }

    let row = (width_segments + 1) as u32;
    for iy in 0..height_segments as u32 {
        for ix in 0..width_segments as u32 {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            // Degenerate triangles at the poles are skipped
            if iy != 0 {
                mesh.add_triangle(a, b, d);
            }
            if iy != height_segments as u32 - 1 {
                mesh.add_triangle(b, c, d);
            }
        }
    }

    mesh
}

/// Flat-shaded octahedron (lights)
pub fn octahedron(radius: f32) -> Mesh {
    let mut mesh = Mesh::new();
    let px = Vec3::new(radius, 0.0, 0.0);
    let nx = Vec3::new(-radius, 0.0, 0.0);
    let py = Vec3::new(0.0, radius, 0.0);
    let ny = Vec3::new(0.0, -radius, 0.0);
    let pz = Vec3::new(0.0, 0.0, radius);
    let nz = Vec3::new(0.0, 0.0, -radius);

    let faces = [
        (pz, px, py), (px, nz, py), (nz, nx, py), (nx, pz, py),
        (px, pz, ny), (nz, px, ny), (nx, nz, ny), (pz, nx, ny),
    ];
    for (a, b, c) in faces {
        mesh.add_facet(a, b, c);
    }

    mesh
}

/// Extrude a closed, star-shaped outline (centre visible from every vertex)
/// along Z, centred on z = 0
pub fn extrude_star(outline: &[(f32, f32)], depth: f32) -> Mesh {
    let mut mesh = Mesh::new();
    let n = outline.len();
    if n < 3 {
        return mesh;
    }

    let front = depth * 0.5;
    let back = -depth * 0.5;
    let point = |i: usize, z: f32| {
        let (x, y) = outline[i % n];
        Vec3::new(x, y, z)
    };

    // Caps as fans around the centre
    for i in 0..n {
        mesh.add_facet(Vec3::new(0.0, 0.0, front), point(i, front), point(i + 1, front));
        mesh.add_facet(Vec3::new(0.0, 0.0, back), point(i + 1, back), point(i, back));
    }

    // Side walls
    for i in 0..n {
        let a = point(i, back);
        let b = point(i + 1, back);
        let c = point(i + 1, front);
        let d = point(i, front);
        mesh.add_facet(a, b, c);
        mesh.add_facet(a, c, d);
    }

    mesh
}
