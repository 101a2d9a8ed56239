/// 扇形三角化
///
/// 所有三角形共用最後一個頂點（原點）。360 度時首尾之間沒有自然的邊，需要補一個接縫三角形。
use vek::{Rgba, Vec2};

use super::mesh_data::MeshData;
use crate::vision::VisibilityPolygon;

/// UV：把可見多邊形映射到以光源為中心的單位貼圖
pub fn vertex_uv(vertex: Vec2<f32>, radius: f32) -> Vec2<f32> {
    if radius > 0.0 {
        (vertex / radius) * 0.5 + Vec2::new(0.5, 0.5)
    } else {
        Vec2::new(0.5, 0.5)
    }
}

/// 扇形索引，原點為 `vertex_count - 1`
pub fn fan_indices(vertex_count: usize, full_circle: bool) -> Vec<u32> {
    let mut indices = Vec::new();
    if vertex_count < 3 {
        return indices;
    }

    let center = (vertex_count - 1) as u32;
    for i in 0..(vertex_count - 2) as u32 {
        // 原點 -> 頂點 i -> 頂點 i+1
        indices.extend_from_slice(&[center, i, i + 1]);
    }

    if full_circle {
        indices.extend_from_slice(&[center, center - 1, 0]);
    }
    indices
}

pub fn triangulate(
    polygon: &VisibilityPolygon,
    radius: f32,
    full_circle: bool,
    color: Rgba<f32>,
) -> MeshData {
    let vertices = polygon.vertices();
    let uvs = vertices.iter().map(|&v| vertex_uv(v, radius)).collect();
    let triangles = fan_indices(vertices.len(), full_circle);
    let colors = vec![color; vertices.len()];

    let mut mesh = MeshData {
        name: None,
        vertices,
        uvs,
        triangles,
        colors,
        normals: Vec::new(),
    };
    mesh.recalculate_normals();
    mesh
}
