/// Divides `part` by `total`, or `None` when `total` is zero.
pub fn ratio(part: f64, total: f64) -> Option<f64> {
    if total == 0.0 {
        None
    } else {
        Some(part / total)
    }
}

/// Rounds to two decimal places; exact halves go to the even neighbour.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
