/// Progress remapping applied to every timeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Circular ease-in-out; the shape every transition track uses.
    #[default]
    CircInOut,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        let clamped = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => clamped,
            Easing::CircInOut => {
                if clamped < 0.5 {
                    let x = 2.0 * clamped;
                    (1.0 - (1.0 - x * x).max(0.0).sqrt()) * 0.5
                } else {
                    let x = -2.0 * clamped + 2.0;
                    ((1.0 - x * x).max(0.0).sqrt() + 1.0) * 0.5
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_curve_increases_monotonically() {
        let curve = Easing::Linear;
        let mut last = 0.0;
        for step in 0..=10 {
            let sample = curve.sample(step as f32 / 10.0);
            assert!(sample >= last - f32::EPSILON);
            last = sample;
        }
    }

    #[test]
    fn circ_in_out_is_symmetric_about_midpoint() {
        let curve = Easing::CircInOut;
        assert!((curve.sample(0.0)).abs() < 1e-6);
        assert!((curve.sample(0.5) - 0.5).abs() < 1e-6);
        assert!((curve.sample(1.0) - 1.0).abs() < 1e-6);
        for step in 1..10 {
            let t = step as f32 / 20.0;
            let low = curve.sample(t);
            let high = curve.sample(1.0 - t);
            assert!((low + high - 1.0).abs() < 1e-5, "t={t} low={low} high={high}");
        }
    }

    #[test]
    fn circ_in_out_starts_and_ends_slowly() {
        let curve = Easing::CircInOut;
        assert!(curve.sample(0.1) < 0.1);
        assert!(curve.sample(0.9) > 0.9);
    }

    #[test]
    fn samples_clamp_out_of_range_progress() {
        for curve in [Easing::Linear, Easing::CircInOut] {
            assert_eq!(curve.sample(-1.0), curve.sample(0.0));
            assert_eq!(curve.sample(3.0), curve.sample(1.0));
        }
    }
}
