//! Descriptive statistics over coerced sensor readings.
//!
//! Every function returns `None` (or zero counts) when there are too few
//! samples, never a NaN.

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1). Needs at least two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// max - min.
pub fn range(values: &[f64]) -> Option<f64> {
    Some(max(values)? - min(values)?)
}

/// Quantile with linear interpolation between the closest ranks.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(quantile_sorted(&sorted, q))
}

fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Successive differences.
pub fn diffs(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Share of successive steps larger than `sigma` standard deviations of all
/// steps. A series whose steps never vary has no abrupt steps.
pub fn abrupt_step_fraction(values: &[f64], sigma: f64) -> Option<f64> {
    let steps = diffs(values);
    let spread = sample_std(&steps)?;
    if spread == 0.0 {
        return Some(0.0);
    }
    let abrupt = steps.iter().filter(|d| d.abs() > sigma * spread).count();
    Some(abrupt as f64 / steps.len() as f64)
}

/// Share of consecutive step pairs that reverse direction.
///
/// Flat steps have no direction and never count as a reversal.
pub fn direction_change_fraction(values: &[f64]) -> Option<f64> {
    let steps = diffs(values);
    if steps.len() < 2 {
        return None;
    }
    let reversals = steps.windows(2).filter(|w| w[0] * w[1] < 0.0).count();
    Some(reversals as f64 / (steps.len() - 1) as f64)
}

/// Number of values outside the Tukey fences `[Q1 - k*IQR, Q3 + k*IQR]`.
pub fn tukey_outliers(values: &[f64], k: f64) -> usize {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let q1 = quantile_sorted(&sorted, 0.25);
    let q3 = quantile_sorted(&sorted, 0.75);
    let iqr = q3 - q1;
    let (lower, upper) = (q1 - k * iqr, q3 + k * iqr);
    values.iter().filter(|v| **v < lower || **v > upper).count()
}

/// Mean of the first half minus mean of the second half.
pub fn half_mean_drop(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let (first, second) = values.split_at(values.len() / 2);
    Some(mean(first)? - mean(second)?)
}

/// Mean of `f(a[i], b[i])` over the common prefix of both series.
pub fn paired_mean(a: &[f64], b: &[f64], f: impl Fn(f64, f64) -> f64) -> Option<f64> {
    let n = a.len().min(b.len());
    if n == 0 {
        return None;
    }
    let total: f64 = a[..n].iter().zip(&b[..n]).map(|(x, y)| f(*x, *y)).sum();
    Some(total / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_mean_and_std() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&v), Some(5.0));
        assert!(close(sample_std(&v).unwrap(), (32.0f64 / 7.0).sqrt()));
        assert_eq!(sample_std(&[1.0]), None);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_range() {
        assert_eq!(range(&[3.0, -1.0, 8.0]), Some(9.0));
        assert_eq!(range(&[]), None);
    }

    #[test]
    fn test_quantile_interpolates() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert!(close(quantile(&v, 0.25).unwrap(), 1.75));
        assert!(close(quantile(&v, 0.5).unwrap(), 2.5));
        assert_eq!(quantile(&v, 1.0), Some(4.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_tukey_outliers() {
        let mut v = vec![10.0; 20];
        v[3] = 11.0;
        v[7] = 9.0;
        v.push(100.0);
        assert_eq!(tukey_outliers(&v, 1.5), 3);
        let spread: Vec<f64> = (0..20).map(f64::from).collect();
        assert_eq!(tukey_outliers(&spread, 1.5), 0);
    }

    #[test]
    fn test_abrupt_steps() {
        let ramp: Vec<f64> = (0..20).map(f64::from).collect();
        assert_eq!(abrupt_step_fraction(&ramp, 2.0), Some(0.0));
        let mut spiky = vec![50.0; 12];
        spiky[6] = 90.0;
        let f = abrupt_step_fraction(&spiky, 2.0).unwrap();
        assert!(close(f, 2.0 / 11.0));
    }

    #[test]
    fn test_direction_changes() {
        let zigzag = [1.0, 2.0, 1.0, 2.0, 1.0];
        assert_eq!(direction_change_fraction(&zigzag), Some(1.0));
        let rising = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(direction_change_fraction(&rising), Some(0.0));
        assert_eq!(direction_change_fraction(&[1.0, 2.0]), None);
    }

    #[test]
    fn test_half_mean_drop() {
        assert_eq!(half_mean_drop(&[300.0, 300.0, 280.0, 280.0]), Some(20.0));
        assert_eq!(half_mean_drop(&[1.0]), None);
    }

    #[test]
    fn test_paired_mean_truncates() {
        let a = [80.0, 80.0, 80.0];
        let b = [60.0, 50.0];
        assert_eq!(paired_mean(&a, &b, |x, y| x - y), Some(25.0));
        assert_eq!(paired_mean(&a, &[], |x, y| x - y), None);
    }
}
