/// 錯誤型別
use thiserror::Error;

use crate::scene::{ColliderId, QueryError};

/// 光源重建錯誤
#[derive(Debug, Error)]
pub enum LightError {
    #[error("geometry query failed: {0}")]
    Query(#[from] QueryError),
    #[error("self collider {0:?} is not registered in the scene")]
    MissingSelfCollider(ColliderId),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// 設定檔錯誤
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported file format `{0}`")]
    UnsupportedFormat(String),
    #[error("unknown layer `{0}`")]
    UnknownLayer(String),
}
