// predictability metric: leet-speak and case aware edit distance against
// a corpus of known weak passwords

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use rayon::prelude::*;
use serde::Serialize;
use tracing::trace;

use crate::corpus::Corpus;

/// letters and the symbols that commonly stand in for them
const LEET_TABLE: &[(char, &[char])] = &[
    ('a', &['4', '@']),
    ('b', &['8']),
    ('c', &['(', '{', '[', '<']),
    ('e', &['3']),
    ('g', &['6', '9']),
    ('i', &['1', '!', '|']),
    ('l', &['1', '|', '7']),
    ('o', &['0']),
    ('s', &['$', '5']),
    ('t', &['+', '7']),
    ('x', &['%']),
    ('z', &['2']),
];

/// letter (both cases) -> set of leet substitutes, built once
static LEET_MAP: LazyLock<HashMap<char, HashSet<char>>> = LazyLock::new(|| {
    let mut map = HashMap::with_capacity(LEET_TABLE.len() * 2);
    for &(letter, substitutes) in LEET_TABLE {
        let set: HashSet<char> = substitutes.iter().copied().collect();
        map.insert(letter.to_ascii_uppercase(), set.clone());
        map.insert(letter, set);
    }
    map
});

/// true if one character is a leet substitute of the other (in either direction)
pub fn is_leet_equivalent(a: char, b: char) -> bool {
    let lookup = |letter: char, symbol: char| {
        LEET_MAP
            .get(&letter)
            .is_some_and(|subs| subs.contains(&symbol))
    };
    lookup(a, b) || lookup(b, a)
}

/// true if the characters differ only by case
pub fn is_case_variant(a: char, b: char) -> bool {
    a.to_lowercase().eq(b.to_lowercase())
}

/// substitution cost: 0 identical, 1 case or leet variant, 2 otherwise
pub fn substitution_cost(a: char, b: char) -> usize {
    if a == b {
        0
    } else if is_case_variant(a, b) || is_leet_equivalent(a, b) {
        1
    } else {
        2
    }
}

/// weighted edit distance (insert/delete 1, substitution per `substitution_cost`)
pub fn edit_distance(a: &[char], b: &[char]) -> usize {
    let mut column = Vec::new();
    edit_distance_with(a, b, &mut column)
}

/// edit distance reusing `column` as the single dp row.
/// the row spans the shorter input, so space is O(min(len(a), len(b))).
pub fn edit_distance_with(a: &[char], b: &[char], column: &mut Vec<usize>) -> usize {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    column.clear();
    column.extend(0..=short.len());

    for (x, &long_ch) in long.iter().enumerate() {
        let mut diagonal = column[0];
        column[0] = x + 1;
        for (y, &short_ch) in short.iter().enumerate() {
            let above = column[y + 1];
            column[y + 1] = (above + 1)
                .min(column[y] + 1)
                .min(diagonal + substitution_cost(short_ch, long_ch));
            diagonal = above;
        }
    }

    column[short.len()]
}

/// `1 - distance / (len_a + len_b)`; undefined when both inputs are empty
pub fn similarity(distance: usize, len_a: usize, len_b: usize) -> Option<f64> {
    let total = len_a + len_b;
    if total == 0 {
        return None;
    }
    Some(1.0 - distance as f64 / total as f64)
}

/// predictability of a password: similarity to its closest corpus entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Predictability {
    /// best similarity scaled to 0..100
    pub score: f64,
    /// the corpus entry that achieved it (none when nothing is similar at all)
    pub best_match: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    similarity: f64,
}

/// scan the whole corpus in parallel for the most similar entry.
///
/// ties keep the entry that comes first in corpus order, and an entry must
/// be strictly more similar than 0 to count as a match.
pub fn calculate_predictability(password: &str, corpus: &Corpus) -> Predictability {
    let candidate: Vec<char> = password.chars().collect();

    let best = corpus
        .entries()
        .par_iter()
        .enumerate()
        .map_init(Vec::new, |column, (index, entry)| {
            let distance = edit_distance_with(&candidate, entry, column);
            similarity(distance, candidate.len(), entry.len())
                .map(|similarity| Candidate { index, similarity })
        })
        .filter_map(|c| c)
        .reduce_with(|a, b| {
            if b.similarity > a.similarity
                || (b.similarity == a.similarity && b.index < a.index)
            {
                b
            } else {
                a
            }
        })
        .filter(|c| c.similarity > 0.0);

    match best {
        Some(c) => {
            let best_match = corpus.entry(c.index);
            trace!(index = c.index, similarity = c.similarity, "closest corpus entry");
            Predictability {
                score: c.similarity * 100.0,
                best_match,
            }
        }
        None => Predictability {
            score: 0.0,
            best_match: None,
        },
    }
}
