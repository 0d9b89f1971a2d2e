//! Piecewise-linear interpolation over integer samples
//!
//! Slopes are integers, computed with floor division, so values reproduce the
//! recording's fixed-point units exactly at segment starts. Queries outside
//! the sampled range clamp to the first/last value. Segment arithmetic runs
//! in `i128` so any pair of `i64` samples is accepted.

/// Interpolator over sorted sample positions and aligned values
#[derive(Debug, Clone)]
pub struct PiecewiseInterpolator<'a> {
    x: &'a [i64],
    y: &'a [i64],
    slopes: Vec<i128>,
}

impl<'a> PiecewiseInterpolator<'a> {
    /// Build from sample positions `x` and values `y`
    ///
    /// Positions must be sorted ascending. Duplicate positions are accepted
    /// (the segment divisor becomes 1). When the slices differ in length the
    /// extra tail of the longer one is ignored.
    pub fn new(x: &'a [i64], y: &'a [i64]) -> Self {
        let n = x.len().min(y.len());
        let (x, y) = (&x[..n], &y[..n]);

        let slopes = x
            .windows(2)
            .zip(y.windows(2))
            .map(|(xs, ys)| {
                let dx = i128::from(xs[1]) - i128::from(xs[0]);
                let dy = i128::from(ys[1]) - i128::from(ys[0]);
                floor_div(dy, if dx == 0 { 1 } else { dx })
            })
            .collect();

        Self { x, y, slopes }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Value at position `q`
    ///
    /// No samples yield 0 and a single sample is constant everywhere.
    pub fn value(&self, q: i64) -> i64 {
        let (Some(&first), Some(&last_x), Some(&last)) =
            (self.y.first(), self.x.last(), self.y.last())
        else {
            return 0;
        };

        if q >= last_x {
            return last;
        }

        // Rightmost sample strictly left of q
        let right = self.x.partition_point(|&x| x < q);
        if right == 0 {
            return first;
        }
        let i = right - 1;
        match self.slopes.get(i) {
            Some(&slope) => {
                let offset = i128::from(q) - i128::from(self.x[i]);
                saturate(i128::from(self.y[i]) + slope * offset)
            }
            None => last,
        }
    }

    /// Evaluate at every position of `points`
    pub fn resample(&self, points: &[i64]) -> Vec<i64> {
        points.iter().map(|&q| self.value(q)).collect()
    }
}

/// Integer division rounding toward negative infinity
fn floor_div(a: i128, b: i128) -> i128 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

fn saturate(value: i128) -> i64 {
    value.clamp(i64::MIN.into(), i64::MAX.into()) as i64
}
