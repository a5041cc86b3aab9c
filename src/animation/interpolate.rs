#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Extrapolation {
    /// Keep following the nearest segment's slope outside the input range.
    #[default]
    Extend,
    /// Hold the edge output value outside the input range.
    Clamp,
}

/// Piecewise-linear mapping of `x` from `input` to `output`.
///
/// `input` must be monotonic (either direction) and the same length as
/// `output`, with at least two points.
pub fn interpolate(x: f32, input: &[f32], output: &[f32], extrapolation: Extrapolation) -> f32 {
    debug_assert!(input.len() >= 2 && input.len() == output.len());

    let last = input.len() - 1;
    // Index into the points in ascending input order.
    let descending = input[0] > input[last];
    let at = |i: usize| {
        let i = if descending { last - i } else { i };
        (input[i], output[i])
    };

    let (first_x, first_y) = at(0);
    let (last_x, last_y) = at(last);
    if extrapolation == Extrapolation::Clamp {
        if x <= first_x {
            return first_y;
        }
        if x >= last_x {
            return last_y;
        }
    }

    let segment = if x <= first_x {
        0
    } else if x >= last_x {
        last - 1
    } else {
        (0..last)
            .find(|&i| x >= at(i).0 && x <= at(i + 1).0)
            .unwrap_or(last - 1)
    };

    let (x0, y0) = at(segment);
    let (x1, y1) = at(segment + 1);
    if (x1 - x0).abs() < f32::EPSILON {
        return y0;
    }
    y0 + (x - x0) / (x1 - x0) * (y1 - y0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_linear_inside_range() {
        assert!(close(interpolate(70.0, &[50.0, 90.0], &[0.0, 1.0], Extrapolation::Clamp), 0.5));
    }

    #[test]
    fn test_clamp_outside_range() {
        assert_eq!(interpolate(0.0, &[50.0, 90.0], &[0.0, 1.0], Extrapolation::Clamp), 0.0);
        assert_eq!(interpolate(500.0, &[50.0, 90.0], &[0.0, 1.0], Extrapolation::Clamp), 1.0);
    }

    #[test]
    fn test_extend_outside_range() {
        assert!(close(interpolate(-450.0, &[0.0, -300.0], &[1.0, 0.0], Extrapolation::Extend), -0.5));
        assert!(close(interpolate(30.0, &[0.0, -300.0], &[1.0, 0.0], Extrapolation::Extend), 1.1));
    }

    #[test]
    fn test_descending_input() {
        assert!(close(interpolate(-150.0, &[0.0, -300.0], &[1.0, 0.0], Extrapolation::Extend), 0.5));
    }

    #[test]
    fn test_descending_multi_segment() {
        let input = [100.0, 50.0, 0.0];
        let output = [2.0, 1.0, -1.0];
        assert!(close(interpolate(75.0, &input, &output, Extrapolation::Clamp), 1.5));
        assert!(close(interpolate(25.0, &input, &output, Extrapolation::Clamp), 0.0));
        assert_eq!(interpolate(-10.0, &input, &output, Extrapolation::Clamp), -1.0);
        assert_eq!(interpolate(500.0, &input, &output, Extrapolation::Clamp), 2.0);
    }

    #[test]
    fn test_multi_segment() {
        let input = [0.0, 1.5, 3.0];
        let output = [0.0, -15.0, 15.0];
        assert!(close(interpolate(0.75, &input, &output, Extrapolation::Extend), -7.5));
        assert!(close(interpolate(1.5, &input, &output, Extrapolation::Extend), -15.0));
        assert!(close(interpolate(2.25, &input, &output, Extrapolation::Extend), 0.0));
        assert!(close(interpolate(3.0, &input, &output, Extrapolation::Extend), 15.0));
    }
}
