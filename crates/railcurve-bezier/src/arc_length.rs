//! Cumulative arc-length lookup table.

use railcurve_math::Point3;

/// Cumulative chord lengths at uniform parameter steps `i / N`.
///
/// `distances[0] == 0`, `distances[N]` is the total length, and the sequence is
/// non-decreasing.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLengthTable {
    distances: Vec<f64>,
}

impl ArcLengthTable {
    /// Accumulate distances between consecutive samples.
    pub fn from_positions(positions: &[Point3]) -> Self {
        let mut distances = Vec::with_capacity(positions.len().max(1));
        distances.push(0.0);
        let mut total = 0.0;
        for pair in positions.windows(2) {
            total += pair[1].distance(pair[0]);
            distances.push(total);
        }
        Self { distances }
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Number of parameter steps N (one less than the number of entries).
    pub fn steps(&self) -> usize {
        self.distances.len() - 1
    }

    pub fn total_length(&self) -> f64 {
        self.distances[self.distances.len() - 1]
    }

    /// Distance travelled from the start to parameter `t`, linearly
    /// interpolated between the bracketing entries. `t` is clamped to `[0, 1]`.
    pub fn distance_at(&self, t: f64) -> f64 {
        let n = self.steps();
        if n == 0 {
            return 0.0;
        }
        let x = t.clamp(0.0, 1.0) * n as f64;
        let i = (x.floor() as usize).min(n - 1);
        let frac = x - i as f64;
        let d0 = self.distances[i];
        d0 + (self.distances[i + 1] - d0) * frac
    }

    /// Parameter at which the curve has travelled `distance`.
    ///
    /// Distances at or below `epsilon` map to 0 and distances at or beyond the
    /// total length map to 1. The bracket search stops after `max_iterations`
    /// halvings; the result is interpolated within whatever bracket remains.
    pub fn parameter_at(&self, distance: f64, epsilon: f64, max_iterations: u32) -> f64 {
        if distance <= epsilon {
            return 0.0;
        }
        if distance >= self.total_length() {
            return 1.0;
        }

        let (low, high) = self.bracket(distance, max_iterations);
        let d_low = self.distances[low];
        let span = self.distances[high] - d_low;
        let m = if span > epsilon {
            ((distance - d_low) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (low as f64 + m * (high - low) as f64) / self.steps() as f64
    }

    /// Indices with `distances[low] <= distance < distances[high]`.
    fn bracket(&self, distance: f64, max_iterations: u32) -> (usize, usize) {
        let mut low = 0;
        let mut high = self.steps();
        for _ in 0..max_iterations {
            if high - low <= 1 {
                break;
            }
            let mid = (low + high) / 2;
            if self.distances[mid] <= distance {
                low = mid;
            } else {
                high = mid;
            }
        }
        (low, high)
    }

    pub fn is_monotonic(&self) -> bool {
        self.distances.windows(2).all(|w| w[0] <= w[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use railcurve_math::dvec3;

    fn line_table(steps: usize, length: f64) -> ArcLengthTable {
        let positions: Vec<_> = (0..=steps)
            .map(|i| dvec3(length * i as f64 / steps as f64, 0.0, 0.0))
            .collect();
        ArcLengthTable::from_positions(&positions)
    }

    #[test]
    fn test_accumulates_distances() {
        let table = ArcLengthTable::from_positions(&[
            dvec3(0.0, 0.0, 0.0),
            dvec3(3.0, 4.0, 0.0),
            dvec3(3.0, 4.0, 12.0),
        ]);
        assert_eq!(table.distances(), &[0.0, 5.0, 17.0]);
        assert_eq!(table.steps(), 2);
        assert_eq!(table.total_length(), 17.0);
        assert!(table.is_monotonic());
    }

    #[test]
    fn test_distance_at_interpolates() {
        let table = line_table(100, 10.0);
        assert_abs_diff_eq!(table.distance_at(0.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(table.distance_at(0.255), 2.55, epsilon = 1e-9);
        assert_abs_diff_eq!(table.distance_at(1.0), 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(table.distance_at(7.0), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parameter_at_clamps() {
        let table = line_table(100, 10.0);
        assert_eq!(table.parameter_at(0.0, 1e-9, 7), 0.0);
        assert_eq!(table.parameter_at(-3.0, 1e-9, 7), 0.0);
        assert_eq!(table.parameter_at(10.0, 1e-9, 7), 1.0);
        assert_eq!(table.parameter_at(500.0, 1e-9, 7), 1.0);
    }

    #[test]
    fn test_parameter_at_inverts_distance_at() {
        let table = line_table(100, 10.0);
        for i in 1..100 {
            let t = i as f64 / 100.0 + 0.0037;
            let d = table.distance_at(t);
            assert_abs_diff_eq!(table.parameter_at(d, 1e-9, 7), t, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_capped_search_still_interpolates() {
        // One iteration leaves a wide bracket; a straight line is still exact
        let table = line_table(100, 10.0);
        assert_abs_diff_eq!(table.parameter_at(2.5, 1e-9, 1), 0.25, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_length_table() {
        let table = ArcLengthTable::from_positions(&[dvec3(1.0, 1.0, 1.0); 5]);
        assert_eq!(table.total_length(), 0.0);
        assert_eq!(table.parameter_at(0.5, 1e-9, 7), 1.0);
        assert_eq!(table.distance_at(0.5), 0.0);
    }
}
