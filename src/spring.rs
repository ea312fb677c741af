/// Damped spring driving the open/closed progress scalar.
///
/// The scalar eases toward its target instead of jumping, and retargeting
/// mid-flight keeps the current position and velocity. Constants match the
/// stiffness/damping most UI spring engines ship as defaults.
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
}

const MASS: f32 = 1.0;
const TENSION: f32 = 170.0;
const FRICTION: f32 = 26.0;

/// Fixed integration substep in seconds; frame deltas are split into
/// substeps so a slow frame cannot blow up the integration
const SUBSTEP: f32 = 0.001;

impl Spring {
    pub fn new(initial: f32) -> Self {
        let initial = initial.clamp(0.0, 1.0);
        Self {
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    /// Retarget the spring; unconditional, rapid retargets just redirect
    /// the motion in flight
    pub fn set_target(&mut self, target: f32) {
        self.target = target.clamp(0.0, 1.0);
    }

    /// Advance the spring by a frame delta (seconds).
    /// The value is kept within [0, 1] at every step.
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(SUBSTEP);
            let force = -TENSION * (self.value - self.target) - FRICTION * self.velocity;
            self.velocity += force / MASS * h;
            self.value += self.velocity * h;
            remaining -= h;
        }

        self.value = self.value.clamp(0.0, 1.0);
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// True once the spring has effectively come to rest on its target
    pub fn settled(&self) -> bool {
        (self.value - self.target).abs() < 1e-3 && self.velocity.abs() < 1e-3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spring: &mut Spring, seconds: f32) {
        // 60 Hz frames, like the render loop delivers
        let frames = (seconds * 60.0) as usize;
        for _ in 0..frames {
            spring.step(1.0 / 60.0);
        }
    }

    #[test]
    fn spring_starts_at_rest() {
        let spring = Spring::new(0.0);
        assert_eq!(spring.value(), 0.0);
        assert!(spring.settled());
    }

    #[test]
    fn spring_converges_to_target() {
        let mut spring = Spring::new(0.0);
        spring.set_target(1.0);
        run(&mut spring, 3.0);
        assert!(spring.settled());
        assert!((spring.value() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn spring_converges_back_down() {
        let mut spring = Spring::new(1.0);
        spring.set_target(0.0);
        run(&mut spring, 3.0);
        assert!((spring.value() - 0.0).abs() < 1e-3);
    }

    #[test]
    fn spring_stays_in_unit_interval() {
        let mut spring = Spring::new(0.0);
        spring.set_target(1.0);
        for _ in 0..600 {
            spring.step(1.0 / 60.0);
            assert!(spring.value() >= 0.0 && spring.value() <= 1.0);
        }
    }

    #[test]
    fn spring_retargets_mid_flight() {
        let mut spring = Spring::new(0.0);
        spring.set_target(1.0);
        run(&mut spring, 0.1);
        let part_way = spring.value();
        assert!(part_way > 0.0 && part_way < 1.0);

        // Flip back before settling; it should head toward 0 again
        spring.set_target(0.0);
        run(&mut spring, 3.0);
        assert!((spring.value() - 0.0).abs() < 1e-3);
    }

    #[test]
    fn spring_survives_large_frame_delta() {
        let mut spring = Spring::new(0.0);
        spring.set_target(1.0);
        spring.step(5.0);
        assert!(spring.value() >= 0.0 && spring.value() <= 1.0);
        assert!((spring.value() - 1.0).abs() < 1e-2);
    }

    #[test]
    fn spring_ignores_zero_delta() {
        let mut spring = Spring::new(0.5);
        spring.set_target(1.0);
        spring.step(0.0);
        assert_eq!(spring.value(), 0.5);
    }
}
