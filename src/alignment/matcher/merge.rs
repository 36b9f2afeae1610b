/*!
 * Merge helpers for reducing over-segmented splits to a target count.
 */

/// Join two pieces with the language joiner, skipping empty sides
pub fn join_pieces(left: &str, right: &str, joiner: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{}{}{}", left, joiner, right),
    }
}

/// Repeatedly merge the adjacent pair with the smallest combined length.
///
/// Ties go to the earliest pair. Short fragments are absorbed first so that
/// long clauses keep their own segment.
pub fn merge_shortest_pairs(mut parts: Vec<String>, target: usize, joiner: &str) -> Vec<String> {
    let target = target.max(1);

    while parts.len() > target {
        let mut best_index = 0;
        let mut best_length = usize::MAX;

        for (i, pair) in parts.windows(2).enumerate() {
            let combined = pair[0].chars().count() + pair[1].chars().count();
            if combined < best_length {
                best_length = combined;
                best_index = i;
            }
        }

        let right = parts.remove(best_index + 1);
        parts[best_index] = join_pieces(&parts[best_index], &right, joiner);
    }

    parts
}

/// Group pieces into `target` runs with boundaries at `round(i * parts / target)`
pub fn merge_proportional(parts: Vec<String>, target: usize, joiner: &str) -> Vec<String> {
    let target = target.max(1);
    if parts.len() <= target {
        return parts;
    }

    let total = parts.len();
    let boundaries: Vec<usize> = (0..=target)
        .map(|i| ((i * total) as f64 / target as f64).round() as usize)
        .collect();

    boundaries
        .windows(2)
        .map(|bounds| {
            parts[bounds[0]..bounds[1]]
                .iter()
                .fold(String::new(), |acc, piece| join_pieces(&acc, piece, joiner))
        })
        .collect()
}
