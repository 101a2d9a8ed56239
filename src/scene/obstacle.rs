/// 遮擋物定義
///
/// 方塊與多邊形兩種碰撞形狀，以及其世界變換
use serde::{Deserialize, Serialize};
use vek::Vec2;

use super::layer::Layer;
use crate::vision::geometry_utils::GeometryUtils;

/// 碰撞體識別碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColliderId(pub u32);

/// 世界變換：位置、旋轉（度，逆時針）、縮放
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub position: Vec2<f32>,
    pub rotation: f32,
    pub scale: Vec2<f32>,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            rotation: 0.0,
            scale: Vec2::one(),
        }
    }
}

impl Transform2D {
    pub fn new(position: Vec2<f32>, rotation: f32, scale: Vec2<f32>) -> Self {
        Self { position, rotation, scale }
    }

    pub fn from_position(position: Vec2<f32>) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// 局部座標轉世界座標（縮放 → 旋轉 → 平移）
    pub fn transform_point(&self, local: Vec2<f32>) -> Vec2<f32> {
        GeometryUtils::rotate_degrees(local * self.scale, self.rotation) + self.position
    }
}

/// 碰撞形狀
#[derive(Debug, Clone, PartialEq)]
pub enum ObstacleShape {
    /// 方塊：尺寸與局部偏移
    Box { size: Vec2<f32>, offset: Vec2<f32> },
    /// 多邊形：一條或多條封閉路徑（局部座標）
    Polygon { paths: Vec<Vec<Vec2<f32>>> },
}

/// 遮擋物
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: ColliderId,
    pub layer: Layer,
    pub transform: Transform2D,
    pub shape: ObstacleShape,
}

impl Obstacle {
    pub fn new_box(id: ColliderId, layer: Layer, transform: Transform2D, size: Vec2<f32>) -> Self {
        Self {
            id,
            layer,
            transform,
            shape: ObstacleShape::Box {
                size,
                offset: Vec2::zero(),
            },
        }
    }

    pub fn new_polygon(
        id: ColliderId,
        layer: Layer,
        transform: Transform2D,
        paths: Vec<Vec<Vec2<f32>>>,
    ) -> Self {
        Self {
            id,
            layer,
            transform,
            shape: ObstacleShape::Polygon { paths },
        }
    }

    /// 設定方塊偏移，多邊形則無作用
    pub fn with_offset(mut self, new_offset: Vec2<f32>) -> Self {
        if let ObstacleShape::Box { offset, .. } = &mut self.shape {
            *offset = new_offset;
        }
        self
    }

    /// 方塊在局部空間的四個角（左上、右上、左下、右下）
    pub fn box_local_corners(size: Vec2<f32>, offset: Vec2<f32>) -> [Vec2<f32>; 4] {
        [
            Vec2::new(-size.x, size.y) * 0.5 + offset,
            Vec2::new(size.x, size.y) * 0.5 + offset,
            Vec2::new(-size.x, -size.y) * 0.5 + offset,
            Vec2::new(size.x, -size.y) * 0.5 + offset,
        ]
    }

    /// 世界空間的封閉輪廓（含完整旋轉），供射線檢測使用
    pub fn world_outlines(&self) -> Vec<Vec<Vec2<f32>>> {
        match &self.shape {
            ObstacleShape::Box { size, offset } => {
                let [top_left, top_right, bottom_left, bottom_right] =
                    Self::box_local_corners(*size, *offset);
                // 依外框順序排列
                vec![[top_left, top_right, bottom_right, bottom_left]
                    .iter()
                    .map(|&corner| self.transform.transform_point(corner))
                    .collect()]
            }
            ObstacleShape::Polygon { paths } => paths
                .iter()
                .map(|path| {
                    path.iter()
                        .map(|&vertex| self.transform.transform_point(vertex))
                        .collect()
                })
                .collect(),
        }
    }
}
