/// 自身碰撞體暫停
///
/// 投射射線期間停用光源自己的碰撞體，離開作用域時（含錯誤提早返回）恢復原狀，且只恢復一次
use log::{debug, warn};

use crate::scene::ColliderToggle;

pub struct ColliderSuppression<'a> {
    collider: Option<&'a dyn ColliderToggle>,
    was_enabled: bool,
}

impl<'a> ColliderSuppression<'a> {
    pub fn new(collider: Option<&'a dyn ColliderToggle>) -> Self {
        let was_enabled = match collider {
            Some(c) => {
                let enabled = c.is_enabled();
                c.disable();
                debug!("self collider {:?} suppressed (was enabled: {})", c.id(), enabled);
                enabled
            }
            None => false,
        };
        Self { collider, was_enabled }
    }

    /// 立即恢復；之後的 drop 不會再做任何事
    pub fn restore(mut self) {
        self.restore_once();
    }

    fn restore_once(&mut self) {
        if let Some(collider) = self.collider.take() {
            if self.was_enabled {
                collider.enable();
                if !collider.is_enabled() {
                    warn!("self collider {:?} did not re-enable", collider.id());
                }
            }
        }
    }
}

impl<'a> Drop for ColliderSuppression<'a> {
    fn drop(&mut self) {
        self.restore_once();
    }
}
