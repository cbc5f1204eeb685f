//! Vector helpers shared by the embedding metrics.

/// Mean of the rows of a row-major `[rows, width]` matrix whose mask is
/// non-zero.
///
/// Returns a zero vector when every row is masked out.
#[must_use]
pub fn masked_mean(hidden: &[f32], mask: &[i64], width: usize) -> Vec<f32> {
    let mut sum = vec![0.0f32; width];
    let mut count = 0usize;

    for (row, &keep) in hidden.chunks_exact(width).zip(mask) {
        if keep == 0 {
            continue;
        }
        for (acc, value) in sum.iter_mut().zip(row) {
            *acc += value;
        }
        count += 1;
    }

    if count > 0 {
        let count = count as f32;
        for value in &mut sum {
            *value /= count;
        }
    }
    sum
}

/// The first row of a row-major matrix, used as the sentence embedding by
/// models pooled on their leading token.
#[must_use]
pub fn first_token(hidden: &[f32], width: usize) -> Vec<f32> {
    hidden.iter().take(width).copied().collect()
}

/// Cosine similarity; zero if either vector has zero norm.
#[must_use]
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_rows_are_ignored() {
        let hidden = [1.0, 2.0, 3.0, 4.0, 100.0, 100.0];
        let pooled = masked_mean(&hidden, &[1, 1, 0], 2);
        assert_eq!(pooled, vec![2.0, 3.0]);
    }

    #[test]
    fn fully_masked_input_pools_to_zero() {
        assert_eq!(masked_mean(&[5.0, 5.0], &[0], 2), vec![0.0, 0.0]);
    }

    #[test]
    fn first_token_takes_leading_row() {
        assert_eq!(first_token(&[1.0, 2.0, 3.0, 4.0], 2), vec![1.0, 2.0]);
    }

    #[test]
    fn cosine_of_parallel_vectors_is_one() {
        assert!((cosine(&[1.0, 2.0], &[2.0, 4.0]) - 1.0).abs() < 1e-6);
        assert!(cosine(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }
}
