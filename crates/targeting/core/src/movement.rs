//! Movement-vector math.
//!
//! Pure functions over velocities, rotations and pressed keys. Nothing here
//! writes back to the host; callers decide whether to apply the results.
//!
//! Angles are in degrees with the host's convention: yaw 0 faces +z and
//! grows clockwise seen from above, so yaw 90 faces -x.

use crate::geometry::Vec3;

bitflags::bitflags! {
    /// Movement keys held during the current tick.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MovementKeys: u8 {
        const FORWARD = 1 << 0;
        const BACK = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const JUMP = 1 << 4;
        const SNEAK = 1 << 5;

        const HORIZONTAL = Self::FORWARD.bits() | Self::BACK.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

impl MovementKeys {
    /// True while any horizontal movement key is held.
    pub fn is_moving(self) -> bool {
        self.intersects(Self::HORIZONTAL)
    }
}

/// Look direction of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Rotation {
    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Unit vector the entity is looking along.
    pub fn direction(self) -> Vec3 {
        let yaw = f64::from(self.yaw).to_radians();
        let pitch = f64::from(self.pitch).to_radians();

        Vec3::new(
            -yaw.sin() * pitch.cos(),
            -pitch.sin(),
            yaw.cos() * pitch.cos(),
        )
    }
}

/// Yaw the player is actually walking towards given the held keys.
///
/// Walking backwards turns the heading around; strafing adds a quarter turn,
/// or an eighth when combined with forward or back.
pub fn direction_yaw(yaw: f32, keys: MovementKeys) -> f32 {
    let mut heading = yaw;
    let mut forward = 1.0_f32;

    if keys.contains(MovementKeys::BACK) {
        heading += 180.0;
        forward = -0.5;
    } else if keys.contains(MovementKeys::FORWARD) {
        forward = 0.5;
    }

    if keys.contains(MovementKeys::LEFT) {
        heading -= 90.0 * forward;
    }
    if keys.contains(MovementKeys::RIGHT) {
        heading += 90.0 * forward;
    }

    heading
}

/// Speed in the horizontal plane; vertical velocity is ignored.
pub fn horizontal_speed(velocity: Vec3) -> f64 {
    velocity.with_y(0.0).length()
}

/// Redirects the horizontal part of `velocity` along `yaw`.
///
/// `strength` blends between the current heading (0) and a full redirect
/// (1). The vertical component is kept as is.
pub fn strafe(velocity: Vec3, yaw: f32, speed: f64, strength: f64) -> Vec3 {
    let keep = 1.0 - strength;
    let speed = speed * strength;
    let angle = f64::from(yaw).to_radians();

    Vec3::new(
        -angle.sin() * speed + velocity.x * keep,
        velocity.y,
        angle.cos() * speed + velocity.z * keep,
    )
}

/// [`strafe`] that stops horizontal motion when no key is held.
///
/// With `keyboard_check` off the keys are ignored entirely.
pub fn strafe_with_keys(
    velocity: Vec3,
    keys: MovementKeys,
    yaw: f32,
    speed: f64,
    strength: f64,
    keyboard_check: bool,
) -> Vec3 {
    if keyboard_check && !keys.is_moving() {
        return Vec3::new(0.0, velocity.y, 0.0);
    }
    strafe(velocity, yaw, speed, strength)
}

/// Vertical input axis: +1 jumping, -1 sneaking, 0 otherwise.
pub fn vertical_axis(keys: MovementKeys) -> f32 {
    if keys.contains(MovementKeys::JUMP) {
        1.0
    } else if keys.contains(MovementKeys::SNEAK) {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn direction_yaw_combinations() {
        assert_eq!(direction_yaw(0.0, MovementKeys::FORWARD), 0.0);
        assert_eq!(direction_yaw(0.0, MovementKeys::BACK), 180.0);
        assert_eq!(direction_yaw(0.0, MovementKeys::LEFT), -90.0);
        assert_eq!(direction_yaw(0.0, MovementKeys::RIGHT), 90.0);
        assert_eq!(direction_yaw(0.0, MovementKeys::FORWARD | MovementKeys::RIGHT), 45.0);
        assert_eq!(direction_yaw(0.0, MovementKeys::BACK | MovementKeys::RIGHT), 135.0);
    }

    #[test]
    fn strafe_full_strength_points_along_yaw() {
        let velocity = Vec3::new(3.0, -0.08, 3.0);

        let north = strafe(velocity, 0.0, 0.2, 1.0);
        assert!(close(north.x, 0.0));
        assert!(close(north.z, 0.2));
        assert_eq!(north.y, -0.08);

        let west = strafe(velocity, 90.0, 0.2, 1.0);
        assert!(close(west.x, -0.2));
        assert!(close(west.z, 0.0));
    }

    #[test]
    fn strafe_zero_strength_keeps_velocity() {
        let velocity = Vec3::new(0.1, 0.0, -0.3);
        assert_eq!(strafe(velocity, 45.0, 5.0, 0.0), velocity);
    }

    #[test]
    fn keyboard_check_stops_idle_player() {
        let velocity = Vec3::new(0.2, 0.4, 0.2);
        let stopped = strafe_with_keys(velocity, MovementKeys::JUMP, 0.0, 0.3, 1.0, true);
        assert_eq!(stopped, Vec3::new(0.0, 0.4, 0.0));

        let unchecked = strafe_with_keys(velocity, MovementKeys::empty(), 0.0, 0.3, 1.0, false);
        assert!(close(unchecked.z, 0.3));
    }

    #[test]
    fn horizontal_speed_ignores_vertical() {
        assert!(close(horizontal_speed(Vec3::new(3.0, 100.0, 4.0)), 5.0));
    }

    #[test]
    fn vertical_axis_prefers_jump() {
        assert_eq!(vertical_axis(MovementKeys::JUMP | MovementKeys::SNEAK), 1.0);
        assert_eq!(vertical_axis(MovementKeys::SNEAK), -1.0);
        assert_eq!(vertical_axis(MovementKeys::FORWARD), 0.0);
    }

    #[test]
    fn facing_vector_is_unit_length() {
        let direction = Rotation::new(37.0, -12.0).direction();
        assert!(close(direction.length(), 1.0));
        assert!(close(Rotation::new(0.0, 0.0).direction().z, 1.0));
    }
}
