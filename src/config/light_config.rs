use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use vek::{Rgba, Vec2};

use crate::error::ConfigError;
use crate::scene::LayerTable;
use crate::vision::{ConeConfig, PolygonVertexMode};

/// 光源參數（對應設定檔的 [light]）
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LightSection {
    /// 光錐角度
    pub degree: f32,
    /// 半徑
    pub radius: f32,
    /// 基本扇形的刻度
    pub split_degree: f32,
    /// 頂點色 RGBA
    pub color: [f32; 4],
    /// 每次 tick 自動重建
    pub auto_update: bool,
    pub ray_layers: Vec<String>,
    pub polygon_vertex_mode: PolygonVertexMode,
}

impl Default for LightSection {
    fn default() -> Self {
        Self {
            degree: 360.0,
            radius: 10.0,
            split_degree: 20.0,
            color: [1.0, 1.0, 1.0, 1.0],
            auto_update: true,
            ray_layers: vec!["Map".to_string(), "Character".to_string()],
            polygon_vertex_mode: PolygonVertexMode::ScaleOnly,
        }
    }
}

/// 渲染參數，核心不使用，只轉交給渲染端
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RenderSetting {
    pub sorting_layer_name: String,
    pub sorting_order: i32,
    pub mesh_name: String,
}

impl Default for RenderSetting {
    fn default() -> Self {
        Self {
            sorting_layer_name: "Back".to_string(),
            sorting_order: 1,
            mesh_name: "VolumetricLight2DMesh".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct LightSetting {
    pub light: LightSection,
    pub render: RenderSetting,
}

impl LightSetting {
    /// 依副檔名選擇格式載入
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string())),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn color(&self) -> Rgba<f32> {
        let [r, g, b, a] = self.light.color;
        Rgba::new(r, g, b, a)
    }

    /// 組出單次重建用的光錐參數（已夾住範圍）
    pub fn cone_config(
        &self,
        forward: Vec2<f32>,
        layers: &LayerTable,
    ) -> Result<ConeConfig, ConfigError> {
        let ray_layers = layers.mask(&self.light.ray_layers).map_err(|e| match e {
            crate::scene::QueryError::UnknownLayer(name) => ConfigError::UnknownLayer(name),
            other => ConfigError::UnknownLayer(other.to_string()),
        })?;

        Ok(ConeConfig::new(self.light.degree, self.light.radius, self.light.split_degree)
            .with_forward(forward)
            .with_color(self.color())
            .with_ray_layers(ray_layers)
            .with_polygon_vertex_mode(self.light.polygon_vertex_mode)
            .clamped())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Layer, LayerMask};

    #[test]
    fn test_defaults_match_component_defaults() {
        let setting = LightSetting::default();
        assert_eq!(setting.light.degree, 360.0);
        assert_eq!(setting.light.radius, 10.0);
        assert_eq!(setting.light.split_degree, 20.0);
        assert!(setting.light.auto_update);
        assert_eq!(setting.render.sorting_layer_name, "Back");
        assert_eq!(setting.render.sorting_order, 1);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let setting = LightSetting::from_toml_str(
            r#"
            [light]
            degree = 90
            radius = 5.0
            color = [1.0, 0.5, 0.0, 0.8]
            polygon_vertex_mode = "full_transform"

            [render]
            sorting_order = 3
            "#,
        )
        .unwrap();
        assert_eq!(setting.light.degree, 90.0);
        assert_eq!(setting.light.split_degree, 20.0);
        assert_eq!(setting.light.polygon_vertex_mode, PolygonVertexMode::FullTransform);
        assert_eq!(setting.render.sorting_order, 3);
        assert_eq!(setting.render.sorting_layer_name, "Back");
        assert_eq!(setting.color(), Rgba::new(1.0, 0.5, 0.0, 0.8));
    }

    #[test]
    fn test_yaml_and_json_formats() {
        let yaml =
            LightSetting::from_yaml_str("light:\n  degree: 45\n  auto_update: false\n").unwrap();
        assert_eq!(yaml.light.degree, 45.0);
        assert!(!yaml.light.auto_update);

        let json = LightSetting::from_json_str(r#"{"light": {"radius": 2.5}}"#).unwrap();
        assert_eq!(json.light.radius, 2.5);
    }

    #[test]
    fn test_cone_config_is_clamped() {
        let mut setting = LightSetting::default();
        setting.light.degree = 500.0;
        setting.light.radius = -1.0;
        setting.light.split_degree = 0.0;
        let config = setting.cone_config(Vec2::unit_x(), &LayerTable::default()).unwrap();
        assert_eq!(config.aperture_degrees, 360.0);
        assert_eq!(config.radius, 0.0);
        assert_eq!(config.angular_step_degrees, 1.0);
        assert_eq!(config.ray_layers, LayerMask::default());
    }

    #[test]
    fn test_unknown_ray_layer() {
        let mut setting = LightSetting::default();
        setting.light.ray_layers = vec!["Map".to_string(), "Sky".to_string()];
        let err = setting
            .cone_config(Vec2::unit_x(), &LayerTable::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownLayer(name) if name == "Sky"));

        setting.light.ray_layers = vec!["Default".to_string()];
        let config = setting.cone_config(Vec2::unit_x(), &LayerTable::default()).unwrap();
        assert_eq!(config.ray_layers, Layer::DEFAULT.mask());
    }

    #[test]
    fn test_unsupported_extension() {
        let path = std::env::temp_dir().join("vl2d_light_setting_test.ini");
        fs::write(&path, "degree = 1").unwrap();
        let err = LightSetting::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ext) if ext == "ini"));
        let _ = fs::remove_file(&path);
    }
}
