/// 體積光源元件
///
/// 持有設定與姿態，每次更新時重建光錐網格並交給接收端
use log::debug;

use crate::config::{LightSetting, RenderSetting};
use crate::error::LightError;
use crate::mesh::{MeshConsumer, MeshData};
use crate::scene::{ColliderId, ColliderToggle, ObstacleWorld, SceneQuery};
use crate::vision::{ConeLightBuilder, LightPose};

#[derive(Debug, Clone)]
pub struct VolumetricLight {
    pub name: String,
    pub setting: LightSetting,
    pub pose: LightPose,
    /// 光源自身的碰撞體，重建期間暫時停用
    pub self_collider: Option<ColliderId>,
}

impl VolumetricLight {
    pub fn new(name: impl Into<String>, setting: LightSetting, pose: LightPose) -> Self {
        Self {
            name: name.into(),
            setting,
            pose,
            self_collider: None,
        }
    }

    pub fn set_self_collider(&mut self, id: Option<ColliderId>) {
        self.self_collider = id;
    }

    pub fn render_settings(&self) -> &RenderSetting {
        &self.setting.render
    }

    /// 只計算網格，不交給接收端
    pub fn build_mesh(&self, world: &ObstacleWorld) -> Result<MeshData, LightError> {
        let config = self.setting.cone_config(self.pose.forward(), world.layers())?;
        let obstacles = world.obstacles()?;

        let toggle = match self.self_collider {
            Some(id) => Some(world.collider(id).ok_or(LightError::MissingSelfCollider(id))?),
            None => None,
        };
        let self_collider = toggle.as_ref().map(|t| t as &dyn ColliderToggle);

        let mut mesh = ConeLightBuilder::rebuild(
            &config,
            self.pose.position,
            &obstacles,
            world,
            self_collider,
        )?;
        if cfg!(debug_assertions) {
            mesh.name = Some(format!("{}_{}", self.name, self.setting.render.mesh_name));
        }
        Ok(mesh)
    }

    /// 重建網格，新網格交出後舊網格由接收端釋放
    pub fn update_mesh<C: MeshConsumer + ?Sized>(
        &self,
        world: &ObstacleWorld,
        consumer: &mut C,
    ) -> Result<(), LightError> {
        let mesh = self.build_mesh(world)?;
        debug!(
            "light {} updated: {} vertices, {} triangles",
            self.name,
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        consumer.accept(mesh);
        Ok(())
    }

    /// 每幀結尾呼叫，關閉 auto_update 時不做事。回傳是否有重建
    pub fn late_update<C: MeshConsumer + ?Sized>(
        &self,
        world: &ObstacleWorld,
        consumer: &mut C,
    ) -> Result<bool, LightError> {
        if !self.setting.light.auto_update {
            return Ok(false);
        }
        self.update_mesh(world, consumer)?;
        Ok(true)
    }
}

impl Default for VolumetricLight {
    fn default() -> Self {
        Self::new("VolumetricLight2D", LightSetting::default(), LightPose::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshSlot;
    use crate::scene::{Layer, Obstacle, Transform2D};
    use vek::Vec2;

    fn world_with_self_collider() -> ObstacleWorld {
        let mut world = ObstacleWorld::new();
        // 光源本身的碰撞體，包住原點
        world.insert(Obstacle::new_box(
            ColliderId(7),
            Layer::CHARACTER,
            Transform2D::default(),
            Vec2::new(0.5, 0.5),
        ));
        world
    }

    fn light(radius: f32) -> VolumetricLight {
        let mut setting = LightSetting::default();
        setting.light.radius = radius;
        let mut light = VolumetricLight::new("lamp", setting, LightPose::default());
        light.set_self_collider(Some(ColliderId(7)));
        light
    }

    #[test]
    fn test_update_mesh_ignores_own_collider() {
        let world = world_with_self_collider();
        let mut slot = MeshSlot::new();
        light(4.0).update_mesh(&world, &mut slot).unwrap();

        let mesh = slot.current().unwrap();
        // 沒有其他遮擋物，所有外緣點都落在半徑上
        let rim = &mesh.vertices[..mesh.vertex_count() - 1];
        assert!(!rim.is_empty());
        for v in rim {
            assert!((v.magnitude() - 4.0).abs() < 1e-3, "{:?}", v);
        }
        assert!(world.collider(ColliderId(7)).unwrap().is_enabled());
    }

    #[test]
    fn test_mesh_name_in_debug_builds() {
        let world = world_with_self_collider();
        let mesh = light(2.0).build_mesh(&world).unwrap();
        if cfg!(debug_assertions) {
            assert_eq!(mesh.name.as_deref(), Some("lamp_VolumetricLight2DMesh"));
        } else {
            assert!(mesh.name.is_none());
        }
    }

    #[test]
    fn test_late_update_respects_auto_update() {
        let world = world_with_self_collider();
        let mut slot = MeshSlot::new();
        let mut light = light(2.0);

        assert!(light.late_update(&world, &mut slot).unwrap());
        assert!(light.late_update(&world, &mut slot).unwrap());
        assert_eq!(slot.released(), 1);

        light.setting.light.auto_update = false;
        assert!(!light.late_update(&world, &mut slot).unwrap());
        assert_eq!(slot.released(), 1);
    }

    #[test]
    fn test_missing_self_collider() {
        let world = ObstacleWorld::new();
        let err = light(2.0).build_mesh(&world).unwrap_err();
        assert!(matches!(err, LightError::MissingSelfCollider(ColliderId(7))));
    }

    #[test]
    fn test_render_settings_passthrough() {
        let light = VolumetricLight::default();
        assert_eq!(light.render_settings().sorting_layer_name, "Back");
        assert_eq!(light.render_settings().sorting_order, 1);
    }
}
