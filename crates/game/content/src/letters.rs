//! Letter frequency table.
//!
//! The generator deals one letter to each catalog kind per run: frequent
//! letters go to common kinds, scarce letters to rare kinds, so that the
//! letters a player keeps tripping over are also the safe ones to test.

/// Relative English letter frequencies, per mille.
const WEIGHTS: [(char, u32); 26] = [
    ('e', 127),
    ('t', 91),
    ('a', 82),
    ('o', 75),
    ('i', 70),
    ('n', 67),
    ('s', 63),
    ('h', 61),
    ('r', 60),
    ('d', 43),
    ('l', 40),
    ('c', 28),
    ('u', 28),
    ('m', 24),
    ('w', 24),
    ('f', 22),
    ('g', 20),
    ('y', 20),
    ('p', 19),
    ('b', 15),
    ('v', 10),
    ('k', 8),
    ('j', 2),
    ('x', 2),
    ('q', 1),
    ('z', 1),
];

/// Weight of a lowercase letter; zero for anything else.
pub fn weight(letter: char) -> u32 {
    WEIGHTS
        .iter()
        .find(|(c, _)| *c == letter)
        .map(|(_, w)| *w)
        .unwrap_or(0)
}

/// All 26 letters, most frequent first. The order is fixed, so the split
/// into rarity bands is deterministic across runs.
pub fn frequency_sorted() -> Vec<char> {
    WEIGHTS.iter().map(|(c, _)| *c).collect()
}
