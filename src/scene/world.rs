/// 記憶體內的幾何查詢服務
///
/// 以精確的射線-線段相交實作 `SceneQuery`，碰撞體開關以 `Cell` 保存，
/// 因此同一個世界只能在單一執行緒內重建光源
use log::trace;
use std::cell::Cell;
use vek::Vec2;

use super::layer::{LayerMask, LayerTable};
use super::obstacle::{ColliderId, Obstacle};
use super::query::{ColliderToggle, QueryError, RaycastHit, SceneQuery};
use crate::vision::geometry_utils::GeometryUtils;

/// 世界中的碰撞體
#[derive(Debug)]
struct WorldCollider {
    obstacle: Obstacle,
    /// 世界空間輪廓，加入時計算一次
    outlines: Vec<Vec<Vec2<f32>>>,
    enabled: Cell<bool>,
}

/// 遮擋物世界
#[derive(Debug, Default)]
pub struct ObstacleWorld {
    colliders: Vec<WorldCollider>,
    layers: LayerTable,
}

impl ObstacleWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layers(layers: LayerTable) -> Self {
        Self {
            colliders: Vec::new(),
            layers,
        }
    }

    pub fn layers(&self) -> &LayerTable {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerTable {
        &mut self.layers
    }

    /// 加入遮擋物，同 id 者會被取代
    pub fn insert(&mut self, obstacle: Obstacle) {
        let outlines = obstacle.world_outlines();
        let collider = WorldCollider {
            obstacle,
            outlines,
            enabled: Cell::new(true),
        };
        match self
            .colliders
            .iter_mut()
            .find(|c| c.obstacle.id == collider.obstacle.id)
        {
            Some(existing) => *existing = collider,
            None => self.colliders.push(collider),
        }
    }

    pub fn remove(&mut self, id: ColliderId) -> Option<Obstacle> {
        let index = self.colliders.iter().position(|c| c.obstacle.id == id)?;
        Some(self.colliders.remove(index).obstacle)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// 取得碰撞體開關
    pub fn collider(&self, id: ColliderId) -> Option<WorldColliderRef<'_>> {
        self.colliders
            .iter()
            .find(|c| c.obstacle.id == id)
            .map(|collider| WorldColliderRef { collider })
    }

    /// 單一碰撞體與射線的最近命中距離
    fn collider_hit(
        collider: &WorldCollider,
        origin: Vec2<f32>,
        direction: Vec2<f32>,
        max_distance: f32,
    ) -> Option<f32> {
        // 起點在碰撞體內部時視為距離 0 命中
        if collider
            .outlines
            .iter()
            .any(|outline| GeometryUtils::point_in_polygon(origin, outline))
        {
            return Some(0.0);
        }

        let mut closest: Option<f32> = None;
        for outline in &collider.outlines {
            let count = outline.len();
            if count < 2 {
                continue;
            }
            for i in 0..count {
                let start = outline[i];
                let end = outline[(i + 1) % count];
                if let Some(distance) =
                    GeometryUtils::ray_line_intersection(origin, direction, start, end)
                {
                    if distance <= max_distance && closest.map_or(true, |c| distance < c) {
                        closest = Some(distance);
                    }
                }
            }
        }
        closest
    }
}

impl SceneQuery for ObstacleWorld {
    fn obstacles(&self) -> Result<Vec<Obstacle>, QueryError> {
        Ok(self.colliders.iter().map(|c| c.obstacle.clone()).collect())
    }

    fn raycast(
        &self,
        origin: Vec2<f32>,
        direction: Vec2<f32>,
        max_distance: f32,
        layers: LayerMask,
    ) -> Result<Option<RaycastHit>, QueryError> {
        if !(origin.x.is_finite()
            && origin.y.is_finite()
            && direction.x.is_finite()
            && direction.y.is_finite()
            && max_distance.is_finite())
        {
            return Err(QueryError::NonFiniteRay { origin, direction });
        }

        let direction = GeometryUtils::safe_normalized(direction);
        if direction == Vec2::zero() {
            return Ok(None);
        }

        let mut best: Option<RaycastHit> = None;
        for collider in &self.colliders {
            if !collider.enabled.get() || !layers.contains(collider.obstacle.layer) {
                continue;
            }
            if let Some(distance) = Self::collider_hit(collider, origin, direction, max_distance) {
                if best.map_or(true, |hit| distance < hit.distance) {
                    best = Some(RaycastHit {
                        collider: collider.obstacle.id,
                        distance,
                        point: origin + direction * distance,
                    });
                }
            }
        }

        trace!(
            "raycast from ({:.3}, {:.3}) dir ({:.3}, {:.3}) max {:.3} -> {:?}",
            origin.x, origin.y, direction.x, direction.y, max_distance, best
        );
        Ok(best)
    }
}

/// 世界碰撞體的開關把手
#[derive(Debug, Clone, Copy)]
pub struct WorldColliderRef<'a> {
    collider: &'a WorldCollider,
}

impl<'a> ColliderToggle for WorldColliderRef<'a> {
    fn id(&self) -> ColliderId {
        self.collider.obstacle.id
    }

    fn is_enabled(&self) -> bool {
        self.collider.enabled.get()
    }

    fn enable(&self) {
        self.collider.enabled.set(true);
    }

    fn disable(&self) {
        self.collider.enabled.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::layer::Layer;
    use crate::scene::obstacle::Transform2D;

    const EPSILON: f32 = 1e-4;

    fn wall_world() -> ObstacleWorld {
        let mut world = ObstacleWorld::new();
        world.insert(Obstacle::new_box(
            ColliderId(1),
            Layer::MAP,
            Transform2D::from_position(Vec2::new(5.0, 0.0)),
            Vec2::new(2.0, 2.0),
        ));
        world
    }

    #[test]
    fn test_raycast_hits_box_face() {
        let world = wall_world();
        let hit = world
            .raycast(Vec2::zero(), Vec2::new(1.0, 0.0), 10.0, LayerMask::default())
            .unwrap()
            .expect("應該命中");
        assert_eq!(hit.collider, ColliderId(1));
        assert!((hit.distance - 4.0).abs() < EPSILON);
        assert!((hit.point - Vec2::new(4.0, 0.0)).magnitude() < EPSILON);
    }

    #[test]
    fn test_raycast_respects_max_distance_and_layers() {
        let world = wall_world();
        let short = world
            .raycast(Vec2::zero(), Vec2::new(1.0, 0.0), 3.0, LayerMask::default())
            .unwrap();
        assert!(short.is_none());

        let other_layer = world
            .raycast(Vec2::zero(), Vec2::new(1.0, 0.0), 10.0, Layer::CHARACTER.mask())
            .unwrap();
        assert!(other_layer.is_none());
    }

    #[test]
    fn test_raycast_rotated_box() {
        let mut world = ObstacleWorld::new();
        // 旋轉 45 度的方塊成為菱形，左上邊為 x = 5 - √2 + y
        world.insert(Obstacle::new_box(
            ColliderId(7),
            Layer::MAP,
            Transform2D::new(Vec2::new(5.0, 0.0), 45.0, Vec2::one()),
            Vec2::new(2.0, 2.0),
        ));
        let hit = world
            .raycast(Vec2::new(0.0, 0.3), Vec2::new(1.0, 0.0), 10.0, LayerMask::default())
            .unwrap()
            .unwrap();
        assert!((hit.distance - (5.0 - 2f32.sqrt() + 0.3)).abs() < EPSILON);
    }

    #[test]
    fn test_raycast_polygon_uses_full_transform() {
        let mut world = ObstacleWorld::new();
        let triangle = vec![
            Vec2::new(0.0, -1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ];
        world.insert(Obstacle::new_polygon(
            ColliderId(3),
            Layer::CHARACTER,
            Transform2D::new(Vec2::new(3.0, 0.0), 180.0, Vec2::new(2.0, 2.0)),
            vec![triangle],
        ));
        // 旋轉 180 度後尖端朝向原點，位於 x = 1
        let hit = world
            .raycast(Vec2::zero(), Vec2::new(1.0, 0.0), 10.0, LayerMask::default())
            .unwrap()
            .unwrap();
        assert!((hit.distance - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_raycast_starting_inside_collider() {
        let world = wall_world();
        let hit = world
            .raycast(Vec2::new(5.0, 0.0), Vec2::new(0.0, 1.0), 10.0, LayerMask::default())
            .unwrap()
            .unwrap();
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_disabled_collider_is_ignored() {
        let world = wall_world();
        let toggle = world.collider(ColliderId(1)).unwrap();
        toggle.disable();
        assert!(!toggle.is_enabled());
        let hit = world
            .raycast(Vec2::zero(), Vec2::new(1.0, 0.0), 10.0, LayerMask::default())
            .unwrap();
        assert!(hit.is_none());
        toggle.enable();
        assert!(world
            .raycast(Vec2::zero(), Vec2::new(1.0, 0.0), 10.0, LayerMask::default())
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_non_finite_ray_is_error() {
        let world = wall_world();
        let err = world
            .raycast(Vec2::new(f32::NAN, 0.0), Vec2::new(1.0, 0.0), 10.0, LayerMask::ALL)
            .unwrap_err();
        assert!(matches!(err, QueryError::NonFiniteRay { .. }));
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let mut world = wall_world();
        world.insert(Obstacle::new_box(
            ColliderId(1),
            Layer::MAP,
            Transform2D::from_position(Vec2::new(8.0, 0.0)),
            Vec2::new(2.0, 2.0),
        ));
        assert_eq!(world.len(), 1);
        let hit = world
            .raycast(Vec2::zero(), Vec2::new(1.0, 0.0), 10.0, LayerMask::default())
            .unwrap()
            .unwrap();
        assert!((hit.distance - 7.0).abs() < EPSILON);
        assert!(world.remove(ColliderId(1)).is_some());
        assert!(world.is_empty());
    }
}
