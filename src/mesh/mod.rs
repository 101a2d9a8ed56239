/// 網格模組
///
/// 三角化、網格接收端與輸出格式
pub mod consumer;
pub mod mesh_data;
pub mod mesh_output;
pub mod triangulator;

pub use self::{
    consumer::{MeshConsumer, MeshSlot},
    mesh_data::MeshData,
    mesh_output::{write_obj, MeshExport},
    triangulator::triangulate,
};
