/// 光錐參數與光源姿態
use log::warn;
use serde::{Deserialize, Serialize};
use vek::{Rgba, Vec2};

use super::geometry_utils::GeometryUtils;
use crate::scene::LayerMask;

/// 多邊形碰撞體頂點轉到世界座標的方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolygonVertexMode {
    /// 只乘上縮放，不旋轉也不平移（舊行為）
    ScaleOnly,
    /// 完整套用世界變換
    FullTransform,
}

impl Default for PolygonVertexMode {
    fn default() -> Self {
        PolygonVertexMode::ScaleOnly
    }
}

/// 光源在世界中的姿態，正面為旋轉後的 +X
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightPose {
    pub position: Vec2<f32>,
    /// 旋轉角度（度，逆時針）
    pub rotation: f32,
}

impl LightPose {
    pub fn new(position: Vec2<f32>, rotation: f32) -> Self {
        Self { position, rotation }
    }

    /// 2D 上的正面
    pub fn forward(&self) -> Vec2<f32> {
        GeometryUtils::direction_from_degrees(self.rotation)
    }
}

impl Default for LightPose {
    fn default() -> Self {
        Self::new(Vec2::zero(), 0.0)
    }
}

/// 單次重建使用的光錐參數
#[derive(Debug, Clone, PartialEq)]
pub struct ConeConfig {
    /// 光錐角度 [0, 360]
    pub aperture_degrees: f32,
    /// 半徑
    pub radius: f32,
    /// 基本扇形的取樣間隔（度），越小越平滑但越耗時
    pub angular_step_degrees: f32,
    /// 頂點顏色
    pub color: Rgba<f32>,
    /// 正面方向（單位向量）
    pub forward: Vec2<f32>,
    /// 射線檢測的層遮罩
    pub ray_layers: LayerMask,
    pub polygon_vertex_mode: PolygonVertexMode,
}

impl Default for ConeConfig {
    fn default() -> Self {
        Self {
            aperture_degrees: 360.0,
            radius: 10.0,
            angular_step_degrees: 20.0,
            color: Rgba::white(),
            forward: Vec2::unit_x(),
            ray_layers: LayerMask::default(),
            polygon_vertex_mode: PolygonVertexMode::default(),
        }
    }
}

impl ConeConfig {
    pub fn new(aperture_degrees: f32, radius: f32, angular_step_degrees: f32) -> Self {
        Self {
            aperture_degrees,
            radius,
            angular_step_degrees,
            ..Self::default()
        }
    }

    pub fn with_forward(mut self, forward: Vec2<f32>) -> Self {
        self.forward = forward;
        self
    }

    pub fn with_color(mut self, color: Rgba<f32>) -> Self {
        self.color = color;
        self
    }

    pub fn with_ray_layers(mut self, ray_layers: LayerMask) -> Self {
        self.ray_layers = ray_layers;
        self
    }

    pub fn with_polygon_vertex_mode(mut self, mode: PolygonVertexMode) -> Self {
        self.polygon_vertex_mode = mode;
        self
    }

    /// 超出範圍的參數一律夾住而非拒絕
    pub fn clamped(&self) -> ConeConfig {
        let mut config = self.clone();

        let aperture = if self.aperture_degrees.is_nan() {
            0.0
        } else {
            self.aperture_degrees.max(0.0).min(360.0)
        };
        if aperture != self.aperture_degrees {
            warn!("aperture {} clamped to {}", self.aperture_degrees, aperture);
        }
        config.aperture_degrees = aperture;

        let radius = if self.radius.is_finite() { self.radius.max(0.0) } else { 0.0 };
        if radius != self.radius {
            warn!("radius {} clamped to {}", self.radius, radius);
        }
        config.radius = radius;

        let step = if self.angular_step_degrees.is_nan() {
            1.0
        } else {
            self.angular_step_degrees.max(1.0)
        };
        if step != self.angular_step_degrees {
            warn!("angular step {} clamped to {}", self.angular_step_degrees, step);
        }
        config.angular_step_degrees = step;

        let forward = GeometryUtils::safe_normalized(self.forward);
        config.forward = if forward == Vec2::zero() { Vec2::unit_x() } else { forward };

        config
    }

    pub fn half_aperture(&self) -> f32 {
        self.aperture_degrees * 0.5
    }

    /// 是否為完整一圈（需要手動補上接縫三角形）
    pub fn is_full_circle(&self) -> bool {
        self.aperture_degrees >= 360.0
    }
}
