/// 碰撞層與層遮罩
use serde::{Deserialize, Serialize};
use std::ops::BitOr;

use super::query::QueryError;

/// 碰撞層（0..32）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layer(pub u8);

impl Layer {
    pub const DEFAULT: Layer = Layer(0);
    pub const MAP: Layer = Layer(1);
    pub const CHARACTER: Layer = Layer(2);

    pub fn mask(self) -> LayerMask {
        LayerMask(1u32 << (self.0 as u32 % 32))
    }
}

/// 層遮罩
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub fn contains(self, layer: Layer) -> bool {
        self.0 & layer.mask().0 != 0
    }
}

impl Default for LayerMask {
    /// 光線預設只打 Map 與 Character
    fn default() -> Self {
        Layer::MAP.mask() | Layer::CHARACTER.mask()
    }
}

impl BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: LayerMask) -> LayerMask {
        LayerMask(self.0 | rhs.0)
    }
}

/// 層名稱表
#[derive(Debug, Clone)]
pub struct LayerTable {
    names: Vec<String>,
}

impl Default for LayerTable {
    fn default() -> Self {
        Self {
            names: vec!["Default".to_string(), "Map".to_string(), "Character".to_string()],
        }
    }
}

impl LayerTable {
    /// 註冊新層，已存在則回傳原本的層
    pub fn register(&mut self, name: &str) -> Result<Layer, QueryError> {
        if let Some(layer) = self.layer(name) {
            return Ok(layer);
        }
        if self.names.len() >= 32 {
            return Err(QueryError::LayerTableFull);
        }
        self.names.push(name.to_string());
        Ok(Layer((self.names.len() - 1) as u8))
    }

    pub fn layer(&self, name: &str) -> Option<Layer> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|index| Layer(index as u8))
    }

    pub fn name(&self, layer: Layer) -> Option<&str> {
        self.names.get(layer.0 as usize).map(|s| s.as_str())
    }

    /// 由層名稱組出遮罩
    pub fn mask<S: AsRef<str>>(&self, names: &[S]) -> Result<LayerMask, QueryError> {
        let mut mask = LayerMask::NONE;
        for name in names {
            let layer = self
                .layer(name.as_ref())
                .ok_or_else(|| QueryError::UnknownLayer(name.as_ref().to_string()))?;
            mask = mask | layer.mask();
        }
        Ok(mask)
    }
}
