/// Easing curves applied to a timing transition's progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,

    /// Slow start and end; the default for timing transitions.
    #[default]
    InOutQuad,

    /// Bounces against the target before settling.
    Bounce,
}

impl Easing {
    /// Apply the easing curve to progress `t` in `0.0..=1.0`.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Self::Bounce => {
                const N1: f32 = 7.5625;
                const D1: f32 = 2.75;

                if t < 1.0 / D1 {
                    N1 * t * t
                } else if t < 2.0 / D1 {
                    let t = t - 1.5 / D1;
                    N1 * t * t + 0.75
                } else if t < 2.5 / D1 {
                    let t = t - 2.25 / D1;
                    N1 * t * t + 0.9375
                } else {
                    let t = t - 2.625 / D1;
                    N1 * t * t + 0.984_375
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [Easing::Linear, Easing::InOutQuad, Easing::Bounce] {
            assert!(easing.apply(0.0).abs() < 1e-6, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn test_in_out_quad_is_symmetric() {
        let a = Easing::InOutQuad.apply(0.25);
        let b = Easing::InOutQuad.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_touches_target_early() {
        assert!((Easing::Bounce.apply(1.0 / 2.75) - 1.0).abs() < 1e-4);
        assert!(Easing::Bounce.apply(0.5) < 1.0);
    }
}
