/// 可見多邊形組裝
///
/// 依與基準邊的順時針夾角排序所有邊界點，最後補上原點作為扇形中心
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use vek::Vec2;

use super::geometry_utils::GeometryUtils;

/// 接縫附近（接近 360 度）的角度視為 0
pub const SEAM_EPSILON_DEGREES: f32 = 1e-3;

/// 邊界點來源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryKind {
    /// 基本扇形取樣
    RimSample,
    /// 外緣被障礙物截斷的點
    RimHit,
    /// 障礙物角點兩側的精修射線
    CornerRefinement,
}

/// 邊界點（光源局部座標）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryPoint {
    pub position: Vec2<f32>,
    /// 與基準邊的順時針夾角（度），[0, 360)
    pub angle: f32,
    pub kind: BoundaryKind,
}

impl BoundaryPoint {
    pub fn new(position: Vec2<f32>, reference: Vec2<f32>, kind: BoundaryKind) -> Self {
        let mut angle = GeometryUtils::clockwise_degrees(reference, position);
        if angle >= 360.0 - SEAM_EPSILON_DEGREES {
            angle = 0.0;
        }
        Self { position, angle, kind }
    }

    pub fn distance(&self) -> f32 {
        self.position.magnitude()
    }
}

/// 排序完成的可見多邊形，原點隱含於最後
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibilityPolygon {
    pub points: Vec<BoundaryPoint>,
}

impl VisibilityPolygon {
    /// 含原點的頂點數
    pub fn vertex_count(&self) -> usize {
        self.points.len() + 1
    }

    /// 依序輸出頂點，原點在最後
    pub fn vertices(&self) -> Vec<Vec2<f32>> {
        let mut vertices: Vec<Vec2<f32>> = self.points.iter().map(|p| p.position).collect();
        vertices.push(Vec2::zero());
        vertices
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// 局部座標中的基準方向：+X 旋轉 `+aperture/2`
pub fn reference_direction(aperture_degrees: f32) -> Vec2<f32> {
    GeometryUtils::rotate_degrees(Vec2::unit_x(), aperture_degrees * 0.5)
}

/// 依角度排序；角度相同時保留原本順序
pub fn assemble(mut points: Vec<BoundaryPoint>) -> VisibilityPolygon {
    points.sort_by_key(|p| OrderedFloat(p.angle));
    VisibilityPolygon { points }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_points_sorted_clockwise_from_reference() {
        let reference = reference_direction(90.0);
        let at = |deg: f32, kind| {
            BoundaryPoint::new(GeometryUtils::direction_from_degrees(deg) * 2.0, reference, kind)
        };
        let polygon = assemble(vec![
            at(-45.0, BoundaryKind::RimSample),
            at(10.0, BoundaryKind::CornerRefinement),
            at(45.0, BoundaryKind::RimSample),
            at(-20.0, BoundaryKind::RimHit),
        ]);
        let angles: Vec<f32> = polygon.points.iter().map(|p| p.angle).collect();
        assert!(angles[0].abs() < EPSILON);
        assert!((angles[1] - 35.0).abs() < EPSILON);
        assert!((angles[2] - 65.0).abs() < EPSILON);
        assert!((angles[3] - 90.0).abs() < EPSILON);
        assert_eq!(polygon.points[3].kind, BoundaryKind::RimSample);
    }

    #[test]
    fn test_seam_angle_snaps_to_zero() {
        let reference = Vec2::unit_x();
        // 稍微逆時針一點點，原本會落在 359.9999 度
        let point = BoundaryPoint::new(
            GeometryUtils::direction_from_degrees(0.0001),
            reference,
            BoundaryKind::RimSample,
        );
        assert_eq!(point.angle, 0.0);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let reference = Vec2::unit_x();
        let first = BoundaryPoint::new(Vec2::new(0.0, -1.0), reference, BoundaryKind::RimHit);
        let second = BoundaryPoint::new(Vec2::new(0.0, -3.0), reference, BoundaryKind::RimSample);
        let polygon = assemble(vec![first, second]);
        assert_eq!(polygon.points[0], first);
        assert_eq!(polygon.points[1], second);
    }

    #[test]
    fn test_origin_is_last_vertex() {
        let reference = Vec2::unit_x();
        let polygon = assemble(vec![BoundaryPoint::new(
            Vec2::new(1.0, 0.0),
            reference,
            BoundaryKind::RimSample,
        )]);
        let vertices = polygon.vertices();
        assert_eq!(polygon.vertex_count(), 2);
        assert_eq!(vertices[1], Vec2::zero());
    }
}
