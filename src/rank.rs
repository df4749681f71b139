/// Frequency ranking of filtered tokens.
use std::collections::HashMap;
use std::collections::HashSet;

/// Count and first position of one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Occurrence {
    count: usize,
    first: usize,
}

/// Return the `top_n` most frequent tokens, lower-cased.
///
/// Counting is case-sensitive; ties are broken by first occurrence, earlier
/// first. When two ranked tokens lower-case to the same string only the
/// higher ranked one is kept, and the next candidate takes the freed slot.
#[must_use]
pub fn rank(tokens: &[String], top_n: usize) -> Vec<String> {
    if tokens.is_empty() || top_n == 0 {
        return Vec::new();
    }

    let mut table: HashMap<&str, Occurrence> = HashMap::new();
    for (position, token) in tokens.iter().enumerate() {
        table
            .entry(token.as_str())
            .and_modify(|o| o.count += 1)
            .or_insert(Occurrence {
                count: 1,
                first: position,
            });
    }

    let mut ranked: Vec<(&str, Occurrence)> = table.into_iter().collect();
    ranked.sort_by(|(_, a), (_, b)| b.count.cmp(&a.count).then(a.first.cmp(&b.first)));

    let mut seen = HashSet::new();
    let mut result = Vec::with_capacity(top_n.min(ranked.len()));
    for (token, _) in ranked {
        let lower = token.to_lowercase();
        if seen.insert(lower.clone()) {
            result.push(lower);
            if result.len() == top_n {
                break;
            }
        }
    }
    result
}
