//! Score math for classifier outputs.

/// Numerically stable softmax.
///
/// Subtracts the maximum before exponentiation so large logits do not
/// overflow. Returns an empty vector for empty input.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let Some(max) = logits.iter().copied().fold(None::<f32>, |acc, v| {
        Some(acc.map_or(v, |m| m.max(v)))
    }) else {
        return Vec::new();
    };

    let exps: Vec<f32> = logits.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum == 0.0 {
        return vec![0.0; logits.len()];
    }
    exps.into_iter().map(|v| v / sum).collect()
}

/// Index and value of the highest finite score, or `None` when there is none.
pub fn top1(scores: &[f32]) -> Option<(usize, f32)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, s)| s.is_finite())
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
}
