//! Dictionary oracle.

/// Decides whether the chain's glyphs spell a real word. The core never
/// carries a dictionary; callers plug one in (tests use a fixed list).
pub trait WordOracle: Send + Sync {
    fn is_valid_word(&self, word: &str) -> bool;
}
