/// 障礙物頂點擷取
///
/// 取出落在光錐角度與半徑內的方塊角點與多邊形頂點，供角點精修射線使用
use vek::Vec2;

use super::cone_config::{ConeConfig, PolygonVertexMode};
use super::geometry_utils::GeometryUtils;
use crate::scene::{ColliderId, Obstacle, ObstacleShape};

/// 多邊形相鄰保留頂點的最小間距
pub const POLYGON_THINNING_DISTANCE: f32 = 0.1;

/// 點是否在光錐範圍（半徑與角度）內
fn in_cone(config: &ConeConfig, origin: Vec2<f32>, point: Vec2<f32>) -> bool {
    let offset = point - origin;
    offset.magnitude() <= config.radius
        && GeometryUtils::is_within_degrees(config.forward, offset, config.half_aperture())
}

/// 擷取所有障礙物的候選頂點（世界座標），略過光源自身的碰撞體
pub fn extract_corners(
    config: &ConeConfig,
    origin: Vec2<f32>,
    obstacles: &[Obstacle],
    self_collider: Option<ColliderId>,
) -> Vec<Vec2<f32>> {
    let mut corners = Vec::new();
    for obstacle in obstacles {
        if Some(obstacle.id) == self_collider {
            continue;
        }
        match &obstacle.shape {
            ObstacleShape::Box { .. } => {
                corners.extend(box_corners(config, origin, obstacle));
            }
            ObstacleShape::Polygon { .. } => {
                corners.extend(polygon_vertices(config, origin, obstacle));
            }
        }
    }
    corners
}

/// 方塊的世界角點（偏移後再套用世界變換）
pub fn box_corners(config: &ConeConfig, origin: Vec2<f32>, obstacle: &Obstacle) -> Vec<Vec2<f32>> {
    let (size, offset) = match &obstacle.shape {
        ObstacleShape::Box { size, offset } => (*size, *offset),
        _ => return Vec::new(),
    };

    Obstacle::box_local_corners(size, offset)
        .iter()
        .map(|&corner| obstacle.transform.transform_point(corner))
        .filter(|&corner| in_cone(config, origin, corner))
        .collect()
}

/// 多邊形頂點，每條路徑內與上一個保留頂點過近者略過
pub fn polygon_vertices(
    config: &ConeConfig,
    origin: Vec2<f32>,
    obstacle: &Obstacle,
) -> Vec<Vec2<f32>> {
    let paths = match &obstacle.shape {
        ObstacleShape::Polygon { paths } => paths,
        _ => return Vec::new(),
    };

    let mut vertices = Vec::new();
    for path in paths {
        let mut last_kept: Option<Vec2<f32>> = None;
        for &local in path {
            let vertex = match config.polygon_vertex_mode {
                PolygonVertexMode::ScaleOnly => local * obstacle.transform.scale,
                PolygonVertexMode::FullTransform => obstacle.transform.transform_point(local),
            };

            if !in_cone(config, origin, vertex) {
                continue;
            }

            if let Some(previous) = last_kept {
                if (previous - vertex).magnitude() < POLYGON_THINNING_DISTANCE {
                    continue;
                }
            }

            last_kept = Some(vertex);
            vertices.push(vertex);
        }
    }
    vertices
}
