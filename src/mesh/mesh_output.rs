/// 網格輸出
///
/// JSON 匯出文件（給外部渲染器）與 Wavefront OBJ
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use vek::{Rgba, Vec2, Vec3};

use super::mesh_data::MeshData;
use crate::config::RenderSetting;

/// 匯出文件
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeshExport {
    /// 輸出格式標識
    pub format_type: String,
    pub light_name: String,
    pub generated_at: NaiveDateTime,
    pub render: RenderSetting,
    pub vertices: Vec<Vec2<f32>>,
    pub uvs: Vec<Vec2<f32>>,
    pub triangles: Vec<u32>,
    pub colors: Vec<Rgba<f32>>,
    pub normals: Vec<Vec3<f32>>,
}

impl MeshExport {
    pub fn new(light_name: &str, render: &RenderSetting, mesh: &MeshData) -> Self {
        Self {
            format_type: "cone_light_mesh".to_string(),
            light_name: light_name.to_string(),
            generated_at: Local::now().naive_local(),
            render: render.clone(),
            vertices: mesh.vertices.clone(),
            uvs: mesh.uvs.clone(),
            triangles: mesh.triangles.clone(),
            colors: mesh.colors.clone(),
            normals: mesh.normals.clone(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// 以 OBJ 格式寫出，z 固定為 0，索引從 1 開始
pub fn write_obj<W: Write>(mesh: &MeshData, out: &mut W) -> io::Result<()> {
    if let Some(name) = &mesh.name {
        writeln!(out, "o {}", name)?;
    }
    for v in &mesh.vertices {
        writeln!(out, "v {} {} 0", v.x, v.y)?;
    }
    for uv in &mesh.uvs {
        writeln!(out, "vt {} {}", uv.x, uv.y)?;
    }
    for n in &mesh.normals {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for [a, b, c] in mesh.triangle_iter() {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }
    Ok(())
}
