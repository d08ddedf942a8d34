//! # Primitive Shape Generation
//!
//! Functions to generate the primitive shapes used by the demo scene.
//! All shapes come with outward-facing normals.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a unit cube centered at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes and one normal
/// per face corner.
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::new();

    let positions = [
        // Front face
        [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
        // Back face
        [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5],
        // Left face
        [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
        // Right face
        [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
        // Top face
        [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
        // Bottom face
        [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
    ];

    let normals = [
        [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    data.normals = normals.to_vec();

    // 2 triangles per face, counter-clockwise
    data.indices = vec![
        0, 1, 2, 2, 3, 0, // front
        4, 5, 6, 6, 7, 4, // back
        8, 9, 10, 10, 11, 8, // left
        12, 13, 14, 14, 15, 12, // right
        16, 17, 18, 18, 19, 16, // top
        20, 21, 22, 22, 23, 20, // bottom
    ];

    data
}

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere of radius 1.0 centered at the origin.
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let sin_phi = phi.sin();
            let cos_phi = phi.cos();

            let x = sin_theta * cos_phi;
            let y = cos_theta;
            let z = sin_theta * sin_phi;

            data.vertices.push([x, y, z]);
            // Normal equals position on a unit sphere
            data.normals.push([x, y, z]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.push(first);
            data.indices.push(second);
            data.indices.push(first + 1);

            data.indices.push(second);
            data.indices.push(second + 1);
            data.indices.push(first + 1);
        }
    }

    data
}

/// Generate a flat plane in the XZ plane at y = 0
///
/// # Arguments
/// * `width` - Extent along the X axis
/// * `depth` - Extent along the Z axis
///
/// The plane is centered at the origin with its normal pointing up (+Y).
pub fn generate_plane(width: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let hw = width / 2.0;
    let hd = depth / 2.0;

    data.vertices = vec![
        [-hw, 0.0, -hd],
        [-hw, 0.0, hd],
        [hw, 0.0, hd],
        [hw, 0.0, -hd],
    ];
    data.normals = vec![[0.0, 1.0, 0.0]; 4];

    // Counter-clockwise when seen from above
    data.indices = vec![0, 1, 2, 2, 3, 0];

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_shape() {
        let cube = generate_cube();
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        for v in &cube.vertices {
            for c in v {
                assert!(c.abs() <= 0.5);
            }
        }
    }

    #[test]
    fn test_sphere_vertices_on_unit_radius() {
        let sphere = generate_sphere(16, 8);
        for v in &sphere.vertices {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 1.0).abs() < 1e-5);
        }
        assert!(sphere.triangle_count() > 0);
    }

    #[test]
    fn test_plane_is_flat_and_sized() {
        let plane = generate_plane(30.0, 30.0);
        assert_eq!(plane.vertex_count(), 4);
        assert_eq!(plane.triangle_count(), 2);
        for v in &plane.vertices {
            assert_eq!(v[1], 0.0);
            assert_eq!(v[0].abs(), 15.0);
            assert_eq!(v[2].abs(), 15.0);
        }
    }
}
