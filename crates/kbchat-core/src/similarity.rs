//! Longest-matching-block similarity ratio.
//!
//! `ratio = 2 * M / T`, where `M` is the total size of the matching blocks and
//! `T` the combined character count of both sides. Blocks are found by taking
//! the longest common run, then recursing into the unmatched text on its left
//! and right. Ties go to the earliest run in `a`, then in `b`.
//!
//! When `b` has at least [`AUTOJUNK_MIN_LEN`] characters, characters that make
//! up more than 1% of `b` are "popular": they never start a run but may extend
//! one. [`crate::matcher::MATCH_THRESHOLD`] assumes this behavior.

use std::collections::HashMap;

/// Minimum length of `b` before popular characters stop seeding matches.
pub const AUTOJUNK_MIN_LEN: usize = 200;

/// A matched run: `a[a..a + size] == b[b..b + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Compares `a` against `b`, indexing `b` once up front.
pub struct SequenceMatcher {
    a: Vec<char>,
    b: Vec<char>,
    /// Positions of each non-popular character of `b`, ascending.
    b2j: HashMap<char, Vec<usize>>,
}

impl SequenceMatcher {
    pub fn new(a: &str, b: &str) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }
        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }

        Self { a, b, b2j }
    }

    /// Longest matching run inside `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Returns a zero-size block at `(alo, blo)` when nothing aligns.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Block {
        let (a, b) = (&self.a, &self.b);
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);

        // run length of the match ending at b[j], for the previous row of `a`
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(c) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next;
        }

        // popular characters cannot seed a run but still extend one
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == b[best_j + best_size]
        {
            best_size += 1;
        }

        Block {
            a: best_i,
            b: best_j,
            size: best_size,
        }
    }

    /// All matching blocks in ascending order, adjacent blocks merged.
    pub fn matching_blocks(&self) -> Vec<Block> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut found = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let block = self.find_longest_match(alo, ahi, blo, bhi);
            if block.size == 0 {
                continue;
            }
            if alo < block.a && blo < block.b {
                queue.push((alo, block.a, blo, block.b));
            }
            if block.a + block.size < ahi && block.b + block.size < bhi {
                queue.push((block.a + block.size, ahi, block.b + block.size, bhi));
            }
            found.push(block);
        }
        found.sort_by_key(|block| (block.a, block.b));

        let mut merged: Vec<Block> = Vec::with_capacity(found.len());
        for block in found {
            match merged.last_mut() {
                Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged
    }

    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matched: usize = self.matching_blocks().iter().map(|block| block.size).sum();
        2.0 * matched as f64 / total as f64
    }
}

/// Similarity of two already-normalized strings, in `[0.0, 1.0]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    SequenceMatcher::new(a, b).ratio()
}
