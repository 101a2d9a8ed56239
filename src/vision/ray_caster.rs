/// 光錐射線投射
///
/// 主要射線：朝每個目標點投射一條長度為半徑的射線。
/// 角點精修：朝障礙物角點兩側 ±0.1 度各投射一條，避免射線剛好擦過角點時的浮點誤差。
use hashbrown::HashSet;
use log::trace;
use ordered_float::OrderedFloat;
use vek::Vec2;

use super::geometry_utils::GeometryUtils;
use super::polygon_assembler::{reference_direction, BoundaryKind, BoundaryPoint};
use crate::scene::{LayerMask, QueryError, SceneQuery};

/// 角點精修射線的偏移角度（度）
pub const CORNER_OFFSET_DEGREES: f32 = 0.1;

pub struct ConeRayCaster<'a, Q: SceneQuery + ?Sized> {
    query: &'a Q,
    origin: Vec2<f32>,
    radius: f32,
    layers: LayerMask,
    forward: Vec2<f32>,
    half_aperture: f32,
    /// 將世界方向轉回光源朝右的角度
    inverse_angle: f32,
    reference: Vec2<f32>,
}

impl<'a, Q: SceneQuery + ?Sized> ConeRayCaster<'a, Q> {
    pub fn new(
        query: &'a Q,
        origin: Vec2<f32>,
        radius: f32,
        layers: LayerMask,
        forward: Vec2<f32>,
        aperture_degrees: f32,
    ) -> Self {
        Self {
            query,
            origin,
            radius,
            layers,
            forward,
            half_aperture: aperture_degrees * 0.5,
            inverse_angle: GeometryUtils::heading_degrees(forward),
            reference: reference_direction(aperture_degrees),
        }
    }

    /// 沿單一方向投射，回傳局部座標的邊界點
    pub fn cast(
        &self,
        direction: Vec2<f32>,
        kind: BoundaryKind,
    ) -> Result<BoundaryPoint, QueryError> {
        let distance = match self.query.raycast(self.origin, direction, self.radius, self.layers)? {
            Some(hit) => hit.distance,
            None => self.radius,
        };
        let local = GeometryUtils::rotate_degrees(direction * distance, -self.inverse_angle);
        trace!("{:?} ray -> local ({:.3}, {:.3})", kind, local.x, local.y);
        Ok(BoundaryPoint::new(local, self.reference, kind))
    }

    /// 朝所有目標點投射，完全相同的目標只投射一次
    pub fn cast_targets(
        &self,
        samples: &[Vec2<f32>],
        rim_hits: &[Vec2<f32>],
    ) -> Result<Vec<BoundaryPoint>, QueryError> {
        let mut seen = HashSet::new();
        let mut points = Vec::with_capacity(samples.len() + rim_hits.len());

        let targets = samples
            .iter()
            .map(|&t| (t, BoundaryKind::RimSample))
            .chain(rim_hits.iter().map(|&t| (t, BoundaryKind::RimHit)));

        for (target, kind) in targets {
            if !seen.insert((OrderedFloat(target.x), OrderedFloat(target.y))) {
                continue;
            }
            let direction = GeometryUtils::safe_normalized(target - self.origin);
            if direction == Vec2::zero() {
                continue;
            }
            // 步進過大時弦會穿過光錐外側，截斷點必須通過角度過濾
            if kind == BoundaryKind::RimHit
                && !GeometryUtils::is_within_degrees(self.forward, direction, self.half_aperture)
            {
                trace!("rim hit ({:.3}, {:.3}) outside aperture", target.x, target.y);
                continue;
            }
            points.push(self.cast(direction, kind)?);
        }
        Ok(points)
    }

    /// 朝每個角點兩側各投射一次，落在光錐外的偏移射線略過
    pub fn cast_corner_pairs(
        &self,
        corners: &[Vec2<f32>],
    ) -> Result<Vec<BoundaryPoint>, QueryError> {
        let mut points = Vec::with_capacity(corners.len() * 2);
        for &corner in corners {
            let direction = GeometryUtils::safe_normalized(corner - self.origin);
            if direction == Vec2::zero() {
                continue;
            }

            for offset in [CORNER_OFFSET_DEGREES, -CORNER_OFFSET_DEGREES] {
                let ray = GeometryUtils::rotate_degrees(direction, offset);
                if GeometryUtils::is_within_degrees(self.forward, ray, self.half_aperture) {
                    points.push(self.cast(ray, BoundaryKind::CornerRefinement)?);
                }
            }
        }
        Ok(points)
    }
}
