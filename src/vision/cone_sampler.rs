/// 基本扇形取樣
use vek::Vec2;

use super::cone_config::ConeConfig;
use super::geometry_utils::GeometryUtils;

/// 基本扇形外緣的取樣方向
///
/// 從 `forward` 旋轉 `+aperture/2` 開始，每次 `-step`，最後一步夾在 `-aperture/2`，
/// 兩側邊緣必定包含在內。長度為 `ceil(aperture / step) + 1`。
pub fn sample_directions(config: &ConeConfig) -> Vec<Vec2<f32>> {
    let aperture = config.aperture_degrees;
    let step = config.angular_step_degrees.max(1.0);
    let start = GeometryUtils::rotate_degrees(config.forward, aperture * 0.5);

    let mut directions = Vec::with_capacity((aperture / step).ceil() as usize + 1);
    let mut current = 0.0_f32;
    loop {
        directions.push(GeometryUtils::rotate_degrees(start, -current));

        if current >= aperture {
            break;
        }
        current = (current + step).min(aperture);
    }
    directions
}

/// 取樣方向乘上半徑並放到光源位置，作為射線檢測的目標點（並非最終頂點）
pub fn sample_targets(config: &ConeConfig, origin: Vec2<f32>) -> Vec<Vec2<f32>> {
    sample_directions(config)
        .into_iter()
        .map(|direction| direction * config.radius + origin)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_two_samples_at_aperture_edges() {
        let config = ConeConfig::new(90.0, 5.0, 90.0);
        let directions = sample_directions(&config);
        assert_eq!(directions.len(), 2);
        let half = 45f32.to_radians();
        assert!((directions[0] - Vec2::new(half.cos(), half.sin())).magnitude() < EPSILON);
        assert!((directions[1] - Vec2::new(half.cos(), -half.sin())).magnitude() < EPSILON);
    }

    #[test]
    fn test_sample_count_and_last_step_clamped() {
        for (aperture, step) in [(360.0, 20.0), (100.0, 30.0), (45.0, 60.0), (7.0, 1.0)] {
            let config = ConeConfig::new(aperture, 1.0, step);
            let directions = sample_directions(&config);
            let expected = (aperture / step).ceil() as usize + 1;
            assert_eq!(directions.len(), expected, "aperture {} step {}", aperture, step);

            let end = GeometryUtils::rotate_degrees(config.forward, -aperture * 0.5);
            let last = *directions.last().unwrap();
            assert!((last - end).magnitude() < 1e-4, "最後一個方向應落在邊緣");
        }
    }

    #[test]
    fn test_zero_aperture_is_single_forward_sample() {
        let config = ConeConfig::new(0.0, 5.0, 20.0);
        let directions = sample_directions(&config);
        assert_eq!(directions.len(), 1);
        assert!((directions[0] - Vec2::unit_x()).magnitude() < EPSILON);
    }

    #[test]
    fn test_targets_are_offset_by_origin() {
        let config = ConeConfig::new(90.0, 2.0, 90.0);
        let origin = Vec2::new(3.0, -1.0);
        for target in sample_targets(&config, origin) {
            assert!(((target - origin).magnitude() - 2.0).abs() < EPSILON);
        }
    }
}
