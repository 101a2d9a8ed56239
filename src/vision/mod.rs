/// 光錐可見性模組
///
/// 取樣、射線投射、可見多邊形組裝
pub mod collider_guard;
pub mod cone_builder;
pub mod cone_config;
pub mod cone_sampler;
pub mod geometry_utils;
pub mod obstacle_extractor;
pub mod polygon_assembler;
pub mod ray_caster;
pub mod rim_detector;

pub use self::{
    collider_guard::ColliderSuppression,
    cone_builder::ConeLightBuilder,
    cone_config::{ConeConfig, LightPose, PolygonVertexMode},
    geometry_utils::GeometryUtils,
    polygon_assembler::{BoundaryKind, BoundaryPoint, VisibilityPolygon},
};
