//! Maximum bipartite matching (Kuhn's augmenting paths)

/// Size of a maximum matching in a bipartite graph.
///
/// `adjacency[l]` lists the right-side vertices (in `0..right_count`) that left vertex
/// `l` may be paired with. Each vertex on either side is used at most once, so the result
/// does not depend on which side is called "left".
pub fn maximum_bipartite_matching(adjacency: &[Vec<usize>], right_count: usize) -> usize {
    let mut match_of_right: Vec<Option<usize>> = vec![None; right_count];
    let mut matched = 0;

    for left in 0..adjacency.len() {
        let mut seen = vec![false; right_count];
        if augment(left, adjacency, &mut seen, &mut match_of_right) {
            matched += 1;
        }
    }

    matched
}

fn augment(
    left: usize,
    adjacency: &[Vec<usize>],
    seen: &mut [bool],
    match_of_right: &mut [Option<usize>],
) -> bool {
    for &right in &adjacency[left] {
        if right >= seen.len() || seen[right] {
            continue;
        }
        seen[right] = true;

        let free = match match_of_right[right] {
            None => true,
            Some(other) => augment(other, adjacency, seen, match_of_right),
        };
        if free {
            match_of_right[right] = Some(left);
            return true;
        }
    }
    false
}
