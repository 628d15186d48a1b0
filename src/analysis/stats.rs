//! Small numeric kernels shared by the projection and relationship passes.

/// Ordinary least-squares line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearFit {
    /// Fit over paired samples using the centred normal equations.
    ///
    /// Returns `None` for fewer than two points. When every `x` is equal the
    /// slope is 0 and the line sits at the mean of `y`.
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }

        let n = points.len() as f64;
        let x_mean = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let y_mean = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let (numerator, denominator) = points.iter().fold((0.0, 0.0), |(num, den), (x, y)| {
            let dx = x - x_mean;
            (num + dx * (y - y_mean), den + dx * dx)
        });

        let slope = if denominator == 0.0 {
            0.0
        } else {
            numerator / denominator
        };

        Some(LinearFit {
            intercept: y_mean - slope * x_mean,
            slope,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Residual sum of squares over the given points.
    pub fn rss(&self, points: &[(f64, f64)]) -> f64 {
        points
            .iter()
            .map(|&(x, y)| (y - self.predict(x)).powi(2))
            .sum()
    }
}

/// Pearson correlation of paired samples.
///
/// `NaN` when fewer than two pairs exist or either side has zero variance.
pub fn pearson(pairs: &[(f64, f64)]) -> f64 {
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let x_mean = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let y_mean = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (sxy, sxx, syy) = pairs.iter().fold((0.0, 0.0, 0.0), |(sxy, sxx, syy), (x, y)| {
        let dx = x - x_mean;
        let dy = y - y_mean;
        (sxy + dx * dy, sxx + dx * dx, syy + dy * dy)
    });

    let denominator = (sxx * syy).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return f64::NAN;
    }
    (sxy / denominator).clamp(-1.0, 1.0)
}

/// Round to two decimals for display. Non-finite values pass through.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
