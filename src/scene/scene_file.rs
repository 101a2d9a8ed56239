/// 場景描述檔（JSON / YAML）
///
/// 供命令列工具建立 `ObstacleWorld` 與光源姿態
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use vek::Vec2;

use super::layer::Layer;
use super::obstacle::{ColliderId, Obstacle, ObstacleShape, Transform2D};
use super::world::ObstacleWorld;
use crate::error::ConfigError;
use crate::vision::LightPose;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct LightDesc {
    pub name: String,
    pub position: [f32; 2],
    /// 度
    pub rotation: f32,
    pub self_collider: Option<u32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDesc {
    Box {
        size: [f32; 2],
        #[serde(default)]
        offset: [f32; 2],
    },
    Polygon {
        paths: Vec<Vec<[f32; 2]>>,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ObstacleDesc {
    pub id: u32,
    #[serde(default = "default_layer")]
    pub layer: String,
    #[serde(default)]
    pub position: [f32; 2],
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "default_scale")]
    pub scale: [f32; 2],
    pub shape: ShapeDesc,
}

fn default_layer() -> String {
    "Map".to_string()
}

fn default_scale() -> [f32; 2] {
    [1.0, 1.0]
}

fn vec2(v: [f32; 2]) -> Vec2<f32> {
    Vec2::new(v[0], v[1])
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SceneFile {
    pub light: LightDesc,
    /// 額外的自訂層，接在 Default / Map / Character 之後
    pub layers: Vec<String>,
    pub obstacles: Vec<ObstacleDesc>,
}

impl SceneFile {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string())),
        }
    }

    pub fn light_pose(&self) -> LightPose {
        LightPose::new(vec2(self.light.position), self.light.rotation)
    }

    pub fn self_collider(&self) -> Option<ColliderId> {
        self.light.self_collider.map(ColliderId)
    }

    /// 建立遮擋物世界
    pub fn build_world(&self) -> Result<ObstacleWorld, ConfigError> {
        let mut world = ObstacleWorld::new();
        for name in &self.layers {
            world
                .layers_mut()
                .register(name)
                .map_err(|e| ConfigError::UnknownLayer(e.to_string()))?;
        }

        for desc in &self.obstacles {
            let layer: Layer = world
                .layers()
                .layer(&desc.layer)
                .ok_or_else(|| ConfigError::UnknownLayer(desc.layer.clone()))?;
            let shape = match &desc.shape {
                ShapeDesc::Box { size, offset } => ObstacleShape::Box {
                    size: vec2(*size),
                    offset: vec2(*offset),
                },
                ShapeDesc::Polygon { paths } => ObstacleShape::Polygon {
                    paths: paths
                        .iter()
                        .map(|path| path.iter().map(|&p| vec2(p)).collect())
                        .collect(),
                },
            };
            world.insert(Obstacle {
                id: ColliderId(desc.id),
                layer,
                transform: Transform2D::new(vec2(desc.position), desc.rotation, vec2(desc.scale)),
                shape,
            });
        }
        Ok(world)
    }
}
