use glam::{EulerRot, Mat4, Vec3};
use std::f32::consts::PI;

/// Per-frame smoothing factor. The motion is frame-rate dependent on
/// purpose: each rendered frame moves a tenth of the remaining distance.
pub const SMOOTHING: f32 = 0.1;

/// Instantaneous rest values the pose is easing toward, as a function of
/// elapsed time and the open flag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseTargets {
    pub tilt: f32,
    pub roll: f32,
    pub bob: f32,
    pub yaw: f32,
}

/// Computes the pose targets for a given elapsed time.
///
/// Closed, the phone idles face-down with a faster wobble; open, it flips
/// a half turn and sways the other way on a slower beat.
pub fn pose_targets(t: f32, open: bool) -> PoseTargets {
    let tilt = if open {
        (t / 2.0).cos() / 8.0 + 0.25
    } else {
        t.cos() / 8.0 - 0.25
    };

    let roll = if open {
        -0.5 + (t / 4.0).sin() / 4.0
    } else {
        0.5 + (t / 4.0).sin() / 4.0
    };

    // The configured rest offset never takes over here; the bob keeps
    // oscillating even when closed (see DESIGN.md)
    let bob = t.sin() / 5.0;

    let yaw = if open { PI } else { 0.0 };

    PoseTargets { tilt, roll, bob, yaw }
}

/// Smoothed phone pose, stepped once per rendered frame.
/// Pure state; knows nothing about the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhonePose {
    pub tilt: f32,
    pub roll: f32,
    pub bob: f32,
    pub yaw: f32,
}

impl PhonePose {
    /// Move each field a fixed fraction of the way toward its target.
    /// `offset` is the configured model position; only its X and Z survive
    /// into the transform, the Y is shadowed by the bob.
    pub fn update(&mut self, t: f32, open: bool, _offset: Vec3) {
        let targets = pose_targets(t, open);
        self.tilt += SMOOTHING * (targets.tilt - self.tilt);
        self.roll += SMOOTHING * (targets.roll - self.roll);
        self.bob += SMOOTHING * (targets.bob - self.bob);
        self.yaw += SMOOTHING * (targets.yaw - self.yaw);
    }

    /// World transform of the posed group: translation from the configured
    /// offset (Y replaced by the bob), then tilt/yaw/roll applied in XYZ
    /// order
    pub fn transform(&self, offset: Vec3) -> Mat4 {
        Mat4::from_translation(Vec3::new(offset.x, self.bob, offset.z))
            * Mat4::from_euler(EulerRot::XYZ, self.tilt, self.yaw, self.roll)
    }
}
