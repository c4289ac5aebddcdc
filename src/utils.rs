//! Numeric helpers shared by the value formulas and reward shaping.

/// Mean reward `q / n`, zero for an unvisited node.
pub fn exploitation_term(q: f64, n: u32) -> f64 {
    if n == 0 {
        return 0.0;
    }
    q / n as f64
}

/// UCT exploration bonus `sqrt(2 ln(parent_n) / n)`, without the weight.
pub fn exploration_term(parent_n: u32, n: u32) -> f64 {
    if n == 0 {
        return f64::INFINITY;
    }
    (2.0 * (parent_n as f64).ln() / n as f64).sqrt()
}

/// RAVE mixing weight: 1 for a fresh node, falling linearly to 0 at
/// `rave_const` visits.
pub fn rave_alpha(n: u32, rave_const: f64) -> f64 {
    ((rave_const - n as f64) / rave_const).max(0.0)
}

/// Maps a standardized offset onto (-1, 1) with a logistic curve.
pub fn sigmoid_bonus(lambda: f64, k: f64) -> f64 {
    -1.0 + 2.0 / (1.0 + (-k * lambda).exp())
}

/// Mean and population standard deviation.
///
/// Returns `(0.0, 0.0)` for an empty input.
pub fn mean_and_std<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: Clone,
{
    let iter = values.into_iter();
    let mut count = 0usize;
    let mut sum = 0.0;
    for v in iter.clone() {
        count += 1;
        sum += v;
    }
    if count == 0 {
        return (0.0, 0.0);
    }
    let mean = sum / count as f64;
    let variance = iter.map(|v| (v - mean) * (v - mean)).sum::<f64>() / count as f64;
    (mean, variance.sqrt())
}
