//! Exponential approach of a morph progress scalar toward its target
//!
//! Each frame closes a fraction `min(1, dt * rate)` of the remaining gap.
//! The value never overshoots, and flipping the target mid-transition just
//! turns the approach around from wherever the value currently is.

/// A smoothed scalar in [0, 1] driven toward 0 or 1
#[derive(Debug, Clone, Copy)]
pub struct MorphProgress {
    value: f32,
    /// Fraction of the gap closed per second
    pub rate: f32,
    /// Snap to the target once the gap is at most this wide
    pub snap_epsilon: Option<f32>,
}

impl MorphProgress {
    pub fn new(rate: f32) -> Self {
        Self {
            value: 0.0,
            rate,
            snap_epsilon: None,
        }
    }

    pub fn with_snap(mut self, epsilon: f32) -> Self {
        self.snap_epsilon = Some(epsilon);
        self
    }

    /// Advance one frame toward `target` and return the new value
    pub fn advance(&mut self, target: f32, dt: f32) -> f32 {
        let gap = target - self.value;

        match self.snap_epsilon {
            Some(epsilon) if gap.abs() <= epsilon => self.value = target,
            _ => {
                let step = (dt * self.rate).clamp(0.0, 1.0);
                self.value += gap * step;
            }
        }

        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Force a progress value, e.g. to restore a frozen frame
    pub fn set(&mut self, value: f32) {
        self.value = value.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_converges_to_tree_without_overshoot() {
        let mut progress = MorphProgress::new(2.0);
        let mut prev = progress.value();

        for _ in 0..600 {
            let v = progress.advance(1.0, FRAME);
            assert!(v >= 0.0 && v <= 1.0, "progress left [0, 1]: {}", v);
            assert!(v >= prev, "progress should rise monotonically");
            prev = v;
        }

        assert!((progress.value() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_large_step_clamps_to_target() {
        let mut progress = MorphProgress::new(2.0);
        assert_eq!(progress.advance(1.0, 10.0), 1.0);
        assert_eq!(progress.advance(0.0, 10.0), 0.0);
    }

    #[test]
    fn test_reversal_has_no_jump() {
        let mut progress = MorphProgress::new(2.0);
        progress.set(0.5);

        let before = progress.value();
        let after = progress.advance(0.0, FRAME);
        assert!(after < before);
        assert!(before - after <= FRAME * 2.0 + 1e-6);

        // Keeps heading back toward zero
        for _ in 0..600 {
            progress.advance(0.0, FRAME);
        }
        assert!(progress.value() < 1e-3);
        assert!(progress.value() >= 0.0);
    }

    #[test]
    fn test_snap_epsilon() {
        let mut progress = MorphProgress::new(2.0).with_snap(0.001);
        progress.set(0.9995);
        assert_eq!(progress.advance(1.0, FRAME), 1.0);

        let mut plain = MorphProgress::new(2.0);
        plain.set(0.9995);
        assert!(plain.advance(1.0, FRAME) < 1.0);
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut progress = MorphProgress::new(2.0);
        progress.set(0.3);
        assert_eq!(progress.advance(1.0, -1.0), 0.3);
    }
}
