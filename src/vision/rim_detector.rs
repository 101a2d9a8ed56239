/// 外緣截斷偵測
///
/// 長牆可能橫跨光錐外緣卻沒有任何角點落在光錐內，
/// 沿相鄰取樣點之間的弦雙向投射射線，把命中點加入射線目標
use log::debug;
use vek::Vec2;

use crate::scene::{LayerMask, QueryError, SceneQuery};

pub fn detect_rim_hits<Q: SceneQuery + ?Sized>(
    query: &Q,
    targets: &[Vec2<f32>],
    layers: LayerMask,
) -> Result<Vec<Vec2<f32>>, QueryError> {
    let mut hits = Vec::new();
    for pair in targets.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        let chord = p2 - p1;
        let length = chord.magnitude();
        if length <= f32::EPSILON {
            continue;
        }
        let ray = chord / length;

        if let Some(hit) = query.raycast(p1, ray, length, layers)? {
            hits.push(hit.point);
        }

        // 逆向
        if let Some(hit) = query.raycast(p2, -ray, length, layers)? {
            hits.push(hit.point);
        }
    }

    if !hits.is_empty() {
        debug!("rim probe found {} clip points", hits.len());
    }
    Ok(hits)
}
