/// 場景模組
///
/// 遮擋物、碰撞層、幾何查詢介面與記憶體內實作
pub mod layer;
pub mod obstacle;
pub mod query;
pub mod scene_file;
pub mod world;

pub use self::{
    layer::{Layer, LayerMask, LayerTable},
    obstacle::{ColliderId, Obstacle, ObstacleShape, Transform2D},
    query::{ColliderToggle, QueryError, RaycastHit, SceneQuery},
    scene_file::SceneFile,
    world::{ObstacleWorld, WorldColliderRef},
};
