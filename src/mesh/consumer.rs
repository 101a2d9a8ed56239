/// 網格接收端
///
/// 接收新網格即代表釋放前一個，避免每次重建都殘留舊網格
use log::debug;

use super::mesh_data::MeshData;

pub trait MeshConsumer {
    /// 接收新網格，同時釋放先前持有的網格
    fn accept(&mut self, mesh: MeshData);
}

/// 只保留最新一份網格的接收端
#[derive(Debug, Default)]
pub struct MeshSlot {
    current: Option<MeshData>,
    released: usize,
}

impl MeshSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&MeshData> {
        self.current.as_ref()
    }

    pub fn take(&mut self) -> Option<MeshData> {
        self.current.take()
    }

    /// 已釋放的舊網格數
    pub fn released(&self) -> usize {
        self.released
    }
}

impl MeshConsumer for MeshSlot {
    fn accept(&mut self, mesh: MeshData) {
        if let Some(previous) = self.current.replace(mesh) {
            self.released += 1;
            debug!(
                "released mesh {:?} ({} vertices)",
                previous.name,
                previous.vertex_count()
            );
        }
    }
}
