// Math utilities and helper functions

use glam::Vec2;

/// Interpolate between two vectors, clamping `t` to [0, 1]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a.lerp(b, t.clamp(0.0, 1.0))
}

/// Wrap an angle in degrees into (-180, 180]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Interpolate between two angles in degrees along the shortest arc.
/// `t` is clamped to [0, 1]. The result is wrapped into (-180, 180].
pub fn lerp_angle_degrees(from: f32, to: f32, t: f32) -> f32 {
    let delta = wrap_degrees(to - from);
    wrap_degrees(from + delta * t.clamp(0.0, 1.0))
}

/// Angle of a 2D vector in degrees, measured counter-clockwise from +X
pub fn angle_degrees(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}
