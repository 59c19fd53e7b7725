/// Computes the arithmetic mean of a slice of values. Returns `None` for
/// empty input so "no data" can never be mistaken for an average of zero.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
