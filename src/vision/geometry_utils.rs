use vek::Vec2;

/// 長度小於此值的向量視為零向量
pub const NORMALIZE_EPSILON: f32 = 1e-5;

pub struct GeometryUtils;

impl GeometryUtils {
    /// 安全的正規化，零向量回傳零向量而非 NaN
    pub fn safe_normalized(v: Vec2<f32>) -> Vec2<f32> {
        let magnitude = v.magnitude();
        if magnitude > NORMALIZE_EPSILON {
            v / magnitude
        } else {
            Vec2::zero()
        }
    }

    /// 兩向量的夾角（弧度），內積先夾在 [-1, 1] 避免 acos 得到 NaN
    pub fn angle_between(a: Vec2<f32>, b: Vec2<f32>) -> f32 {
        let dot = Self::safe_normalized(a).dot(Self::safe_normalized(b));
        dot.max(-1.0).min(1.0).acos()
    }

    /// 檢查兩向量夾角是否在指定弧度內
    pub fn is_within_radians(a: Vec2<f32>, b: Vec2<f32>, radians: f32) -> bool {
        Self::angle_between(a, b) <= radians
    }

    /// 檢查兩向量夾角是否在指定角度（度）內
    pub fn is_within_degrees(a: Vec2<f32>, b: Vec2<f32>, degrees: f32) -> bool {
        Self::angle_between(a, b).to_degrees() <= degrees
    }

    /// 繞 Z 軸逆時針旋轉（度）
    pub fn rotate_degrees(v: Vec2<f32>, degrees: f32) -> Vec2<f32> {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
    }

    /// 由角度（度）得到單位方向
    pub fn direction_from_degrees(degrees: f32) -> Vec2<f32> {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Vec2::new(cos, sin)
    }

    /// 方向向量的角度（度），+X 為 0
    pub fn heading_degrees(v: Vec2<f32>) -> f32 {
        v.y.atan2(v.x).to_degrees()
    }

    /// 二維外積（Z 分量）
    pub fn cross(a: Vec2<f32>, b: Vec2<f32>) -> f32 {
        a.x * b.y - a.y * b.x
    }

    /// 從 `from` 順時針量到 `to` 的角度（度），落在 [0, 360)
    pub fn clockwise_degrees(from: Vec2<f32>, to: Vec2<f32>) -> f32 {
        let from = Self::safe_normalized(from);
        let to = Self::safe_normalized(to);
        let counter_clockwise = Self::cross(from, to).atan2(from.dot(to)).to_degrees();
        Self::repeat_degrees(-counter_clockwise)
    }

    /// 標準化角度到 [0, 360) 範圍
    pub fn repeat_degrees(angle: f32) -> f32 {
        let wrapped = angle.rem_euclid(360.0);
        // rem_euclid 對極小負數會回傳 360.0
        if wrapped >= 360.0 {
            0.0
        } else {
            wrapped
        }
    }

    /// 射線與線段相交檢測，回傳沿射線的距離
    pub fn ray_line_intersection(
        ray_origin: Vec2<f32>,
        ray_direction: Vec2<f32>,
        line_start: Vec2<f32>,
        line_end: Vec2<f32>,
    ) -> Option<f32> {
        let line_direction = line_end - line_start;
        let cross = Self::cross(ray_direction, line_direction);

        if cross.abs() < 1e-9 {
            return None; // 平行
        }

        let to_line_start = line_start - ray_origin;
        let t = Self::cross(to_line_start, line_direction) / cross;
        let u = Self::cross(to_line_start, ray_direction) / cross;

        if t >= 0.0 && u >= 0.0 && u <= 1.0 {
            Some(t)
        } else {
            None
        }
    }

    /// 點是否在多邊形內（射線交叉法），邊界視為內部不保證
    pub fn point_in_polygon(point: Vec2<f32>, vertices: &[Vec2<f32>]) -> bool {
        if vertices.len() < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = vertices.len() - 1;
        for i in 0..vertices.len() {
            let vi = vertices[i];
            let vj = vertices[j];
            if (vi.y > point.y) != (vj.y > point.y) {
                let x_cross = (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
                if point.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}
