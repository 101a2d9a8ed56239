/// 網格資料
use serde::{Deserialize, Serialize};
use vek::{Rgba, Vec2, Vec3};

/// 光錐網格：頂點、UV、三角形索引、頂點色與法線
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub name: Option<String>,
    pub vertices: Vec<Vec2<f32>>,
    pub uvs: Vec<Vec2<f32>>,
    /// 每三個一組
    pub triangles: Vec<u32>,
    pub colors: Vec<Rgba<f32>>,
    pub normals: Vec<Vec3<f32>>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// 逐一取出三角形
    pub fn triangle_iter(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.triangles.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// 檢查索引範圍與各陣列長度是否一致
    pub fn is_valid(&self) -> bool {
        let count = self.vertices.len();
        self.triangles.len() % 3 == 0
            && self.triangles.iter().all(|&i| (i as usize) < count)
            && self.uvs.len() == count
            && self.colors.len() == count
            && self.normals.len() == count
    }

    /// 依三角形繞序重新計算頂點法線，未被任何三角形使用的頂點朝向 -Z
    pub fn recalculate_normals(&mut self) {
        let mut accumulated = vec![Vec3::<f32>::zero(); self.vertices.len()];
        let lift = |v: Vec2<f32>| Vec3::new(v.x, v.y, 0.0);
        for [a, b, c] in self.triangle_iter() {
            let pa = lift(self.vertices[a as usize]);
            let pb = lift(self.vertices[b as usize]);
            let pc = lift(self.vertices[c as usize]);
            let face = (pb - pa).cross(pc - pa);
            for index in [a, b, c] {
                accumulated[index as usize] += face;
            }
        }

        self.normals = accumulated
            .into_iter()
            .map(|n| {
                let length = n.magnitude();
                if length > f32::EPSILON {
                    n / length
                } else {
                    -Vec3::unit_z()
                }
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clockwise_triangle_faces_negative_z() {
        let mut mesh = MeshData {
            vertices: vec![Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0), Vec2::zero()],
            uvs: vec![Vec2::zero(); 3],
            triangles: vec![2, 0, 1],
            colors: vec![Rgba::white(); 3],
            ..MeshData::default()
        };
        mesh.recalculate_normals();
        assert!(mesh.is_valid());
        for normal in &mesh.normals {
            assert!((normal.z + 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_invalid_index_detected() {
        let mesh = MeshData {
            vertices: vec![Vec2::zero()],
            uvs: vec![Vec2::zero()],
            triangles: vec![0, 1, 2],
            colors: vec![Rgba::white()],
            normals: vec![-Vec3::unit_z()],
            name: None,
        };
        assert!(!mesh.is_valid());
    }
}
