use super::{Vec3, nearest_point};
use crate::entity::EntityView;

/// Squared distance from `eye` to the nearest point of the entity's padded box.
///
/// Use this when only comparing distances; it skips the square root.
pub fn squared_boxed_distance(eye: Vec3, entity: &EntityView) -> f64 {
    let nearest = nearest_point(eye, &entity.targeting_box());
    eye.distance_squared_to(nearest)
}

/// Distance from `eye` to the nearest point of the entity's padded box.
///
/// Zero when the eye is inside the box.
pub fn boxed_distance(eye: Vec3, entity: &EntityView) -> f64 {
    squared_boxed_distance(eye, entity).sqrt()
}

/// Position between the last rendered and the current simulation step.
///
/// `tick_delta` is the frame's progress through the tick, normally in
/// `[0, 1]`; values outside extrapolate along the same line.
pub fn interpolate_position(entity: &EntityView, tick_delta: f32) -> Vec3 {
    entity
        .previous_position
        .lerp(entity.position, f64::from(tick_delta))
}

/// Whether `blocker`'s block would stop a hit coming from `source`.
///
/// Only the horizontal direction counts: the hit is blocked when the
/// blocker faces the attacker (the direction from source to blocker points
/// against the facing vector).
pub fn would_block_hit(blocker: &EntityView, source: &EntityView) -> bool {
    if !blocker.blocking {
        return false;
    }

    let facing = blocker.rotation.direction();
    let incoming = (blocker.position - source.position)
        .normalize_or_zero()
        .with_y(0.0);

    incoming.dot(facing) < 0.0
}
