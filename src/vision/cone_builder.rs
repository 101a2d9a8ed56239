/// 光錐重建核心
///
/// 流程：基本扇形取樣 + 障礙物角點 → 外緣截斷偵測 → 主要射線 + 角點精修射線
/// → 依角度排序組成可見多邊形 → 扇形三角化
use log::debug;
use vek::Vec2;

use super::collider_guard::ColliderSuppression;
use super::cone_config::ConeConfig;
use super::cone_sampler::sample_targets;
use super::obstacle_extractor::extract_corners;
use super::polygon_assembler::{assemble, VisibilityPolygon};
use super::ray_caster::ConeRayCaster;
use super::rim_detector::detect_rim_hits;
use crate::error::LightError;
use crate::mesh::{triangulate, MeshData};
use crate::scene::{ColliderToggle, Obstacle, SceneQuery};

pub struct ConeLightBuilder;

impl ConeLightBuilder {
    /// 計算可見多邊形（光源局部座標）
    ///
    /// 自身碰撞體在投射射線期間停用，無論成功或失敗都會恢復原狀。
    pub fn build_polygon<Q: SceneQuery + ?Sized>(
        config: &ConeConfig,
        origin: Vec2<f32>,
        obstacles: &[Obstacle],
        query: &Q,
        self_collider: Option<&dyn ColliderToggle>,
    ) -> Result<VisibilityPolygon, LightError> {
        Self::cast_polygon(&config.clamped(), origin, obstacles, query, self_collider)
    }

    fn cast_polygon<Q: SceneQuery + ?Sized>(
        config: &ConeConfig,
        origin: Vec2<f32>,
        obstacles: &[Obstacle],
        query: &Q,
        self_collider: Option<&dyn ColliderToggle>,
    ) -> Result<VisibilityPolygon, LightError> {
        if config.radius <= 0.0 {
            return Ok(VisibilityPolygon::default());
        }

        let targets = sample_targets(config, origin);
        let corners = extract_corners(config, origin, obstacles, self_collider.map(|c| c.id()));

        let suppression = ColliderSuppression::new(self_collider);

        let rim_hits = detect_rim_hits(query, &targets, config.ray_layers)?;

        let caster = ConeRayCaster::new(
            query,
            origin,
            config.radius,
            config.ray_layers,
            config.forward,
            config.aperture_degrees,
        );
        let mut points = caster.cast_targets(&targets, &rim_hits)?;
        points.extend(caster.cast_corner_pairs(&corners)?);

        suppression.restore();

        debug!(
            "cone rebuilt: {} rim samples, {} rim hits, {} corners -> {} boundary points",
            targets.len(),
            rim_hits.len(),
            corners.len(),
            points.len()
        );
        Ok(assemble(points))
    }

    /// 重建光錐網格
    pub fn rebuild<Q: SceneQuery + ?Sized>(
        config: &ConeConfig,
        origin: Vec2<f32>,
        obstacles: &[Obstacle],
        query: &Q,
        self_collider: Option<&dyn ColliderToggle>,
    ) -> Result<MeshData, LightError> {
        let config = config.clamped();
        let polygon = Self::cast_polygon(&config, origin, obstacles, query, self_collider)?;
        Ok(triangulate(
            &polygon,
            config.radius,
            config.is_full_circle(),
            config.color,
        ))
    }
}
