/// 設定模組
///
/// 光源設定檔（TOML / YAML / JSON）
pub mod light_config;

pub use self::light_config::{LightSection, LightSetting, RenderSetting};
