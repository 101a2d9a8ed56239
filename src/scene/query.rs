/// 幾何查詢服務介面
///
/// 光源核心只透過這裡定義的 trait 存取場景：列舉遮擋物、射線檢測、開關自身碰撞體
use thiserror::Error;
use vek::Vec2;

use super::layer::LayerMask;
use super::obstacle::{ColliderId, Obstacle};

/// 幾何查詢錯誤
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    #[error("ray contains non-finite values: origin {origin:?}, direction {direction:?}")]
    NonFiniteRay {
        origin: Vec2<f32>,
        direction: Vec2<f32>,
    },
    #[error("unknown layer `{0}`")]
    UnknownLayer(String),
    #[error("layer table already holds 32 layers")]
    LayerTableFull,
    #[error("geometry query service unavailable: {0}")]
    Unavailable(String),
}

/// 射線命中結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub collider: ColliderId,
    pub distance: f32,
    pub point: Vec2<f32>,
}

/// 幾何查詢服務
pub trait SceneQuery {
    /// 列舉場景中所有遮擋物
    fn obstacles(&self) -> Result<Vec<Obstacle>, QueryError>;

    /// 射線檢測，回傳最近的命中
    fn raycast(
        &self,
        origin: Vec2<f32>,
        direction: Vec2<f32>,
        max_distance: f32,
        layers: LayerMask,
    ) -> Result<Option<RaycastHit>, QueryError>;
}

/// 可暫時停用的碰撞體（光源自身的邊界碰撞體）
pub trait ColliderToggle {
    fn id(&self) -> ColliderId;
    fn is_enabled(&self) -> bool;
    fn enable(&self);
    fn disable(&self);
}
