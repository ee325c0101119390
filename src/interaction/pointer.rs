use crate::math::Vec3;

/// Pointer position as seen by the foliage program.
///
/// `target` is written by pointer events; `current` follows it each frame
/// and is what gets pushed as the uniform. Moves to or from the sentinel
/// snap, so the repulsion never sweeps across the scene.
#[derive(Debug, Clone, Copy)]
pub struct PointerTracker {
    target: Vec3,
    current: Vec3,
    sentinel: Vec3,
    follow_rate: f32,
}

impl PointerTracker {
    pub fn new(sentinel: Vec3, follow_rate: f32) -> Self {
        Self {
            target: sentinel,
            current: sentinel,
            sentinel,
            follow_rate,
        }
    }

    /// Record a world-space hit on the pointer collider
    pub fn on_move(&mut self, point: Vec3) {
        self.target = point;
    }

    /// The pointer left the collider
    pub fn on_leave(&mut self) {
        self.target = self.sentinel;
    }

    pub fn update(&mut self, dt: f32) -> Vec3 {
        if self.target == self.sentinel || self.current == self.sentinel {
            self.current = self.target;
        } else {
            let t = (dt * self.follow_rate).clamp(0.0, 1.0);
            self.current = self.current.lerp(&self.target, t);
        }
        self.current
    }

    pub fn current(&self) -> Vec3 {
        self.current
    }

    pub fn is_active(&self) -> bool {
        self.target != self.sentinel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENTINEL: Vec3 = Vec3::splat(9999.0);

    #[test]
    fn test_starts_at_sentinel() {
        let tracker = PointerTracker::new(SENTINEL, 10.0);
        assert_eq!(tracker.current(), SENTINEL);
        assert!(!tracker.is_active());
    }

    #[test]
    fn test_first_move_snaps() {
        let mut tracker = PointerTracker::new(SENTINEL, 10.0);
        tracker.on_move(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(tracker.update(0.016), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_follows_smoothly_between_hits() {
        let mut tracker = PointerTracker::new(SENTINEL, 10.0);
        tracker.on_move(Vec3::ZERO);
        tracker.update(0.016);

        tracker.on_move(Vec3::new(1.0, 0.0, 0.0));
        let p = tracker.update(0.05);
        assert!((p.x - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_leave_resets_to_sentinel() {
        let mut tracker = PointerTracker::new(SENTINEL, 10.0);
        tracker.on_move(Vec3::ZERO);
        tracker.update(0.016);
        tracker.on_leave();
        assert_eq!(tracker.update(0.016), SENTINEL);
        assert!(!tracker.is_active());
    }
}
