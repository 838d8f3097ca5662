//! Numeric utilities: arithmetic, descriptive statistics, normalization,
//! smoothing, distance metrics and percentiles.
//!
//! Every function here is total over finite input. Degenerate cases
//! (empty samples, zero variance, zero divisors, mismatched lengths) map
//! to a sentinel value instead of an error:
//!
//! | Situation | Result |
//! |---|---|
//! | empty sample | `0.0` |
//! | zero standard deviation | `0.0` |
//! | `divide(_, 0.0)` | `f64::INFINITY` |
//! | paired samples of different length | `0.0` |
//!
//! The one exception is [`normalize_list`] on an empty sample, which has no
//! meaningful sentinel and returns [`Error::InvalidInput`].
//!
//! All statistics are **population** statistics (divisor `n`, not `n − 1`).
//!
//! # Algorithms
//!
//! - **Mean**: Neumaier compensated summation ([`kahan_sum`]) for O(ε)
//!   error independent of n.
//! - **Percentile**: linear interpolation between the two bracketing ranks
//!   of the sorted sample (R-7, the default in R and NumPy).
//!   Reference: Hyndman & Fan (1996), "Sample Quantiles in Statistical
//!   Packages", *The American Statistician* 50(4).

use crate::error::{Error, Result};

/// A point in the plane, `(x, y)`.
pub type Point2D = (f64, f64);

/// Window length used by callers that have no preference.
pub const DEFAULT_WINDOW: usize = 3;

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// Divides `a` by `b`, returning `f64::INFINITY` when `b == 0`.
///
/// The sign of `a` is ignored for a zero divisor; `0.0 / 0.0` is also
/// reported as `+inf`.
///
/// # Examples
/// ```
/// use shared_utils::numeric::divide;
/// assert_eq!(divide(6.0, 3.0), 2.0);
/// assert_eq!(divide(-5.0, 0.0), f64::INFINITY);
/// ```
pub fn divide(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        f64::INFINITY
    } else {
        a / b
    }
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Computes the arithmetic mean using compensated summation.
///
/// # Complexity
/// Time: O(n), Space: O(1)
///
/// # Returns
/// - `0.0` if `sample` is empty.
///
/// # Examples
/// ```
/// use shared_utils::numeric::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3.0);
/// assert_eq!(mean(&[]), 0.0);
/// ```
pub fn mean(sample: &[f64]) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }
    kahan_sum(sample) / sample.len() as f64
}

/// Computes the median of `sample` without mutating the input.
///
/// Sorts a copy and returns the middle element, or the average of the two
/// middle elements for even-length samples.
///
/// # Complexity
/// Time: O(n log n), Space: O(n)
///
/// # Returns
/// - `0.0` if `sample` is empty.
///
/// # Examples
/// ```
/// use shared_utils::numeric::median;
/// assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
/// ```
pub fn median(sample: &[f64]) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }
    let sorted = sorted_copy(sample);
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Computes the population standard deviation, `sqrt(mean((x − μ)²))`.
///
/// Two-pass: the mean first, then the squared deviations, both with
/// compensated summation.
///
/// # Complexity
/// Time: O(n), Space: O(n)
///
/// # Returns
/// - `0.0` if `sample` is empty.
///
/// # Examples
/// ```
/// use shared_utils::numeric::standard_deviation;
/// let sd = standard_deviation(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// assert!((sd - 2.0).abs() < 1e-12);
/// ```
pub fn standard_deviation(sample: &[f64]) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }
    let mu = mean(sample);
    let squares: Vec<f64> = sample.iter().map(|&x| (x - mu) * (x - mu)).collect();
    (kahan_sum(&squares) / sample.len() as f64).sqrt()
}

/// Standard score of `value` relative to `sample`: `(value − μ) / σ`.
///
/// # Returns
/// - `0.0` when `σ == 0`, which covers both an empty sample and a sample of
///   identical values.
///
/// # Examples
/// ```
/// use shared_utils::numeric::z_score;
/// assert_eq!(z_score(3.0, &[1.0, 2.0, 3.0, 4.0, 5.0]), 0.0);
/// assert_eq!(z_score(10.0, &[4.0, 4.0, 4.0]), 0.0);
/// ```
pub fn z_score(value: f64, sample: &[f64]) -> f64 {
    let sd = standard_deviation(sample);
    if sd == 0.0 {
        return 0.0;
    }
    (value - mean(sample)) / sd
}

// ---------------------------------------------------------------------------
// Normalization & smoothing
// ---------------------------------------------------------------------------

/// Min-max scales `sample` into `[0, 1]`: `(x − min) / (max − min)`.
///
/// A constant sample (including a single element) maps to all zeros.
///
/// # Errors
/// [`Error::InvalidInput`] if `sample` is empty: there is no minimum or
/// maximum to scale against.
///
/// # Examples
/// ```
/// use shared_utils::numeric::normalize_list;
/// assert_eq!(normalize_list(&[10.0, 20.0, 30.0]).unwrap(), vec![0.0, 0.5, 1.0]);
/// assert_eq!(normalize_list(&[5.0, 5.0, 5.0]).unwrap(), vec![0.0, 0.0, 0.0]);
/// assert!(normalize_list(&[]).is_err());
/// ```
pub fn normalize_list(sample: &[f64]) -> Result<Vec<f64>> {
    if sample.is_empty() {
        return Err(Error::InvalidInput("cannot normalize an empty sample"));
    }
    let (lo, hi) = sample
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    if hi == lo {
        return Ok(vec![0.0; sample.len()]);
    }
    let range = hi - lo;
    Ok(sample.iter().map(|&x| (x - lo) / range).collect())
}

/// Forward-looking moving average with the same length as the input.
///
/// Element `i` is the mean of `sample[i..i + window]`, truncated at the end
/// of the sample: trailing windows average over however many elements
/// remain rather than padding with zeros.
///
/// # Complexity
/// Time: O(n · window), Space: O(n)
///
/// # Returns
/// - An empty vector if `sample` is empty or `window == 0`.
///
/// # Examples
/// ```
/// use shared_utils::numeric::moving_average;
/// assert_eq!(
///     moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 2),
///     vec![1.5, 2.5, 3.5, 4.5, 5.0]
/// );
/// ```
pub fn moving_average(sample: &[f64], window: usize) -> Vec<f64> {
    if sample.is_empty() || window == 0 {
        return Vec::new();
    }
    let n = sample.len();
    (0..n)
        .map(|i| {
            let end = i.saturating_add(window).min(n);
            let slice = &sample[i..end];
            kahan_sum(slice) / slice.len() as f64
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Distance metrics
// ---------------------------------------------------------------------------

/// Straight-line distance between two points.
///
/// # Examples
/// ```
/// use shared_utils::numeric::euclidean_distance;
/// assert!((euclidean_distance((1.0, 2.0), (4.0, 6.0)) - 5.0).abs() < 1e-15);
/// ```
pub fn euclidean_distance(p1: Point2D, p2: Point2D) -> f64 {
    (p1.0 - p2.0).hypot(p1.1 - p2.1)
}

/// Taxicab distance, `|Δx| + |Δy|`.
pub fn manhattan_distance(p1: Point2D, p2: Point2D) -> f64 {
    (p1.0 - p2.0).abs() + (p1.1 - p2.1).abs()
}

// ---------------------------------------------------------------------------
// Covariance & correlation
// ---------------------------------------------------------------------------

/// Population covariance, `mean((xᵢ − x̄)(yᵢ − ȳ))`.
///
/// # Complexity
/// Time: O(n), Space: O(n)
///
/// # Returns
/// - `0.0` if `x.len() != y.len()` or either sample is empty.
///
/// # Examples
/// ```
/// use shared_utils::numeric::covariance;
/// let cov = covariance(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
/// assert!((cov - 4.0 / 3.0).abs() < 1e-14);
/// ```
pub fn covariance(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n != y.len() || n == 0 {
        return 0.0;
    }
    let mean_x = mean(x);
    let mean_y = mean(y);
    let products: Vec<f64> = x
        .iter()
        .zip(y)
        .map(|(&xi, &yi)| (xi - mean_x) * (yi - mean_y))
        .collect();
    kahan_sum(&products) / n as f64
}

/// Pearson correlation, `cov(x, y) / (σₓ σᵧ)`.
///
/// # Returns
/// - `0.0` if either series has zero standard deviation (constant or
///   empty), or the lengths differ.
///
/// # Examples
/// ```
/// use shared_utils::numeric::correlation;
/// let r = correlation(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
/// assert!((r - 1.0).abs() < 1e-12);
/// assert_eq!(correlation(&[1.0, 2.0, 3.0], &[7.0, 7.0, 7.0]), 0.0);
/// ```
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    let sd_x = standard_deviation(x);
    let sd_y = standard_deviation(y);
    if sd_x == 0.0 || sd_y == 0.0 {
        return 0.0;
    }
    covariance(x, y) / (sd_x * sd_y)
}

// ---------------------------------------------------------------------------
// Percentile
// ---------------------------------------------------------------------------

/// Computes the `p`-th percentile (`p` in `[0, 100]`) by linear
/// interpolation between closed ranks.
///
/// # Algorithm
/// For the sorted sample `s[0..n]`:
/// 1. `k = (n − 1) × p / 100`
/// 2. `f = ⌊k⌋`, `c = ⌈k⌉`
/// 3. `f == c` → `s[f]`, otherwise `s[f] + (s[c] − s[f]) × (k − f)`
///
/// `p` outside `[0, 100]` is clamped, so the result is always one of the
/// sample's values or an interpolation between two of them.
///
/// # Complexity
/// Time: O(n log n) (dominated by sort), Space: O(n)
///
/// # Returns
/// - `0.0` if `sample` is empty.
/// - `NaN` if `p` is NaN.
///
/// # Examples
/// ```
/// use shared_utils::numeric::percentile;
/// let data = [10.0, 20.0, 30.0, 40.0, 50.0];
/// assert_eq!(percentile(&data, 0.0), 10.0);
/// assert_eq!(percentile(&data, 50.0), 30.0);
/// assert_eq!(percentile(&data, 100.0), 50.0);
/// assert!((percentile(&data, 90.0) - 46.0).abs() < 1e-12);
/// ```
pub fn percentile(sample: &[f64], p: f64) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }
    if p.is_nan() {
        return f64::NAN;
    }
    let sorted = sorted_copy(sample);
    let last = sorted.len() - 1;
    let k = last as f64 * (p.clamp(0.0, 100.0) / 100.0);
    let f = (k.floor() as usize).min(last);
    let c = (k.ceil() as usize).min(last);
    if f == c {
        sorted[f]
    } else {
        sorted[f] + (sorted[c] - sorted[f]) * (k - f as f64)
    }
}

fn sorted_copy(sample: &[f64]) -> Vec<f64> {
    let mut sorted = sample.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    sorted
}

// ---------------------------------------------------------------------------
// Kahan compensated summation
// ---------------------------------------------------------------------------

/// Neumaier compensated summation for O(ε) error independent of `n`.
///
/// This is an improved variant of Kahan summation that also handles the
/// case where the addend is larger in magnitude than the running sum.
///
/// Reference: Neumaier (1974), "Rundungsfehleranalyse einiger Verfahren
/// zur Summation endlicher Summen", *Zeitschrift für Angewandte
/// Mathematik und Mechanik* 54(1), pp. 39–51.
///
/// # Complexity
/// Time: O(n), Space: O(1)
///
/// # Examples
/// ```
/// use shared_utils::numeric::kahan_sum;
/// assert_eq!(kahan_sum(&[1e100, 1.0, -1e100]), 1.0);
/// ```
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}
