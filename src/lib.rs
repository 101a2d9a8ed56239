/// vl2d
///
/// 2D 體積光：依場景遮擋物計算光錐可見多邊形並產生扇形網格

pub mod comp;
pub mod config;
pub mod error;
pub mod mesh;
pub mod scene;
pub mod vision;

// Re-export commonly used types
pub use crate::comp::VolumetricLight;
pub use crate::config::{LightSetting, RenderSetting};
pub use crate::error::{ConfigError, LightError};
pub use crate::mesh::{MeshConsumer, MeshData, MeshExport, MeshSlot};
pub use crate::scene::{ObstacleWorld, SceneFile, SceneQuery};
pub use crate::vision::{ConeConfig, ConeLightBuilder, LightPose};
