//! Parametric numeric ranges and their expansion into candidate points.

/// A parametric description of evenly spaced numeric candidates.
#[derive(Clone, Debug, PartialEq)]
pub enum Range {
    /// `num` points evenly spaced between `start` and `stop`, inclusive.
    Linear {
        /// First point.
        start: f64,
        /// Last point.
        stop: f64,
        /// Number of points.
        num: usize,
    },
    /// `num` points evenly spaced in log10 space between `start` and `stop`, inclusive.
    ///
    /// Both bounds are raw values, not exponents: `start: 0.0001` is the
    /// first candidate.
    Logarithmic {
        /// First point, must be positive.
        start: f64,
        /// Last point, must be positive.
        stop: f64,
        /// Number of points.
        num: usize,
    },
}

impl Range {
    /// Expands the range into its `num` points, in ascending index order.
    ///
    /// The first and last points are exactly `start` and `stop`, so casting
    /// to integers never drops a declared bound to rounding error.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyro_hparams::distribution::Range;
    ///
    /// let points = Range::Linear { start: 10.0, stop: 50.0, num: 5 }.points();
    /// assert_eq!(points, vec![10.0, 20.0, 30.0, 40.0, 50.0]);
    /// ```
    #[must_use]
    pub fn points(&self) -> Vec<f64> {
        match *self {
            Self::Linear { start, stop, num } => linspace(start, stop, num),
            Self::Logarithmic { start, stop, num } => logspace(start, stop, num),
        }
    }

    /// Returns the number of points the range expands to.
    #[must_use]
    pub fn len(&self) -> usize {
        match *self {
            Self::Linear { num, .. } | Self::Logarithmic { num, .. } => num,
        }
    }

    /// Returns `true` if the range expands to no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Generates `n` evenly spaced floats from `start` to `stop` (linear scale).
#[allow(clippy::cast_precision_loss)]
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return vec![];
    }
    if n == 1 {
        return vec![start];
    }

    let step = (stop - start) / (n - 1) as f64;
    let mut result = Vec::with_capacity(n);
    for i in 0..n - 1 {
        result.push(start + i as f64 * step);
    }
    result.push(stop);
    result
}

/// Generates `n` floats evenly spaced in log10 space from `start` to `stop`.
#[allow(clippy::cast_precision_loss)]
fn logspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    debug_assert!(start > 0.0 && stop > 0.0, "log scale requires positive bounds");

    if n == 0 {
        return vec![];
    }
    if n == 1 {
        return vec![start];
    }

    let log_start = start.log10();
    let log_stop = stop.log10();
    let step = (log_stop - log_start) / (n - 1) as f64;
    let mut result = Vec::with_capacity(n);
    result.push(start);
    for i in 1..n - 1 {
        result.push(10f64.powf(log_start + i as f64 * step));
    }
    result.push(stop);
    result
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn linear_points() {
        let range = Range::Linear {
            start: 0.0,
            stop: 0.4,
            num: 5,
        };
        let points = range.points();
        assert_eq!(points.len(), 5);
        for (p, expected) in points.iter().zip([0.0, 0.1, 0.2, 0.3, 0.4]) {
            assert!((p - expected).abs() < 1e-12, "{p} != {expected}");
        }
        assert_eq!(points[4], 0.4);
    }

    #[test]
    fn linear_single_point_is_start() {
        let range = Range::Linear {
            start: 3.0,
            stop: 9.0,
            num: 1,
        };
        assert_eq!(range.points(), vec![3.0]);
    }

    #[test]
    fn linear_descending() {
        let range = Range::Linear {
            start: 1.0,
            stop: 0.0,
            num: 3,
        };
        assert_eq!(range.points(), vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn empty_range() {
        let range = Range::Linear {
            start: 0.0,
            stop: 1.0,
            num: 0,
        };
        assert!(range.is_empty());
        assert!(range.points().is_empty());
    }

    #[test]
    fn log_points_are_log_even() {
        let range = Range::Logarithmic {
            start: 0.001,
            stop: 10.0,
            num: 5,
        };
        let points = range.points();
        for (p, expected) in points.iter().zip([0.001, 0.01, 0.1, 1.0, 10.0]) {
            assert!((p / expected - 1.0).abs() < 1e-12, "{p} != {expected}");
        }
    }

    #[test]
    fn log_endpoints_are_exact() {
        let range = Range::Logarithmic {
            start: 0.0001,
            stop: 0.03,
            num: 50,
        };
        let points = range.points();
        assert_eq!(points.len(), 50);
        assert_eq!(points[0], 0.0001);
        assert_eq!(points[49], 0.03);
        assert!(points.windows(2).all(|w| w[0] < w[1]));
    }
}
