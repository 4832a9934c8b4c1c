//! Wheel speed helpers for drivetrains fed from stick input

/// Scales `speeds` down so no component exceeds 1.0 in magnitude
///
/// Ratios between components are preserved. Slices already within range are
/// left untouched.
pub fn normalize(speeds: &mut [f32]) {
    let max_magnitude = speeds.iter().fold(0.0_f32, |max, speed| max.max(speed.abs()));
    if max_magnitude > 1.0 {
        for speed in speeds.iter_mut() {
            *speed /= max_magnitude;
        }
    }
}

/// Robot-centric mecanum wheel speeds `[front_left, front_right, back_left,
/// back_right]` from strafe, forward and turn commands, normalized.
pub fn mecanum(strafe: f32, forward: f32, turn: f32) -> [f32; 4] {
    let mut speeds = [
        forward + strafe + turn,
        forward - strafe - turn,
        forward - strafe + turn,
        forward + strafe - turn,
    ];
    normalize(&mut speeds);
    speeds
}
