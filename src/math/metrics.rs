//! Regression scores.

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// When the true values are constant (`SS_tot == 0`) the score is `1.0` for a
/// perfect prediction and `0.0` otherwise, so the result is always finite for
/// finite inputs. Returns `None` for empty or mismatched inputs.
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> Option<f64> {
    if y_true.is_empty() || y_true.len() != y_pred.len() {
        return None;
    }

    let n = y_true.len() as f64;
    let mean = y_true.iter().sum::<f64>() / n;
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        return Some(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }
    Some(1.0 - ss_res / ss_tot)
}
