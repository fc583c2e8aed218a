use crate::error::{GoesError, Result};

/// Exact interpolating cubic spline through a set of tabulated knots.
///
/// End conditions are not-a-knot (continuous third derivative at the second
/// and penultimate knots), which is what a zero-smoothing cubic B-spline fit
/// produces. Knots are sorted on construction, so tables tabulated in
/// decreasing order are accepted.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    m: Vec<f64>,
}

impl CubicSpline {
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(GoesError::DataError(format!(
                "spline knots have {} x values but {} y values",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 4 {
            return Err(GoesError::DataError(format!(
                "a cubic spline needs at least 4 knots, got {}",
                x.len()
            )));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(GoesError::DataError(
                "spline knots must be finite".to_string(),
            ));
        }

        let mut knots: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
        knots.sort_by(|a, b| a.0.total_cmp(&b.0));
        if let Some(w) = knots.windows(2).find(|w| w[1].0 <= w[0].0) {
            return Err(GoesError::DataError(format!(
                "duplicate spline knot at x = {}",
                w[0].0
            )));
        }

        let (x, y): (Vec<f64>, Vec<f64>) = knots.into_iter().unzip();
        let m = not_a_knot_second_derivatives(&x, &y);
        Ok(Self { x, y, m })
    }

    /// Returns (min, max) of the independent variable.
    pub fn domain(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// True if every value lies inside the closed domain. NaN never does.
    pub fn covers(&self, values: &[f64]) -> bool {
        let (lo, hi) = self.domain();
        values.iter().all(|&v| v >= lo && v <= hi)
    }

    /// Evaluates the spline. Callers are expected to have checked the
    /// domain with [`CubicSpline::covers`]; outside it the end polynomials
    /// are extended.
    pub fn evaluate(&self, xout: &[f64]) -> Vec<f64> {
        cubic_spline_eval(&self.x, &self.y, &self.m, xout)
    }

    pub fn second_derivatives(&self) -> &[f64] {
        &self.m
    }
}

/// Cubic spline evaluation using pre-computed second derivatives.
///
/// # Arguments
/// * `xin` - Knot x values (must be strictly increasing)
/// * `yin` - Knot y values
/// * `yspl` - Second derivatives of y at the knots
/// * `xout` - Output x values to interpolate at
pub fn cubic_spline_eval(xin: &[f64], yin: &[f64], yspl: &[f64], xout: &[f64]) -> Vec<f64> {
    xout.iter()
        .map(|&x| {
            let hi = match xin.partition_point(|&v| v < x) {
                i if i >= xin.len() => xin.len() - 1,
                0 => 1.min(xin.len() - 1),
                i => i,
            };
            let lo = hi - 1;

            let diff = xin[hi] - xin[lo];
            debug_assert!(diff > 0.0, "xin must be strictly increasing");

            let a = (xin[hi] - x) / diff;
            let b = (x - xin[lo]) / diff;

            a * yin[lo]
                + b * yin[hi]
                + (diff * diff / 6.0)
                    * ((a * a - 1.0) * a * yspl[lo] + (b * b - 1.0) * b * yspl[hi])
        })
        .collect()
}

/// Second derivatives of the not-a-knot interpolating cubic.
///
/// The interior continuity equations form a tridiagonal system in
/// M[1..n-1]; the two not-a-knot conditions are substituted into its first
/// and last rows, and M[0], M[n-1] recovered afterwards. Needs n >= 4.
fn not_a_knot_second_derivatives(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let k = n - 2;

    let mut sub = vec![0.0; k];
    let mut diag = vec![0.0; k];
    let mut sup = vec![0.0; k];
    let mut rhs = vec![0.0; k];

    for j in 0..k {
        let i = j + 1;
        sub[j] = h[i - 1];
        diag[j] = 2.0 * (h[i - 1] + h[i]);
        sup[j] = h[i];
        rhs[j] = 6.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
    }

    let (h0, h1) = (h[0], h[1]);
    diag[0] = (h0 + h1) * (h0 + 2.0 * h1) / h1;
    sup[0] = (h1 * h1 - h0 * h0) / h1;

    let (ha, hb) = (h[n - 3], h[n - 2]);
    sub[k - 1] = (ha * ha - hb * hb) / ha;
    diag[k - 1] = (ha + hb) * (2.0 * ha + hb) / ha;

    // Thomas algorithm
    for j in 1..k {
        let w = sub[j] / diag[j - 1];
        diag[j] -= w * sup[j - 1];
        rhs[j] -= w * rhs[j - 1];
    }
    let mut inner = vec![0.0; k];
    inner[k - 1] = rhs[k - 1] / diag[k - 1];
    for j in (0..k - 1).rev() {
        inner[j] = (rhs[j] - sup[j] * inner[j + 1]) / diag[j];
    }

    let mut m = Vec::with_capacity(n);
    m.push(((h0 + h1) * inner[0] - h0 * inner[1]) / h1);
    m.extend_from_slice(&inner);
    m.push(((ha + hb) * inner[k - 1] - hb * inner[k - 2]) / ha);
    m
}
