//! Hierarchical heading numbering.

use std::collections::BTreeMap;

/// Running outline counters for one document.
///
/// Each heading advances the counter of its level and zeroes every deeper
/// level that has been seen so far. Levels that never occurred are not part
/// of the dotted path, so a document whose first heading sits at level 1
/// numbers it "1" rather than "0.1".
#[derive(Debug, Clone, Default)]
pub struct OutlineCounter {
    counters: BTreeMap<u8, u32>,
}

impl OutlineCounter {
    /// Create a counter with no levels seen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a heading at zero-based `level` and return its dotted path.
    ///
    /// ```
    /// use word2csv::outline::OutlineCounter;
    ///
    /// let mut outline = OutlineCounter::new();
    /// assert_eq!(outline.advance(0), "1");
    /// assert_eq!(outline.advance(1), "1.1");
    /// assert_eq!(outline.advance(1), "1.2");
    /// assert_eq!(outline.advance(0), "2");
    /// assert_eq!(outline.advance(1), "2.1");
    /// ```
    pub fn advance(&mut self, level: u8) -> String {
        *self.counters.entry(level).or_insert(0) += 1;

        if let Some(deeper) = level.checked_add(1) {
            for (_, count) in self.counters.range_mut(deeper..) {
                *count = 0;
            }
        }

        self.counters
            .range(..=level)
            .map(|(_, count)| count.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_reset() {
        let mut outline = OutlineCounter::new();
        let paths: Vec<String> = [0, 0, 1, 0].into_iter().map(|l| outline.advance(l)).collect();
        assert_eq!(paths, ["1", "2", "2.1", "3"]);
    }

    #[test]
    fn test_deep_levels_continue() {
        let mut outline = OutlineCounter::new();
        outline.advance(0);
        outline.advance(1);
        assert_eq!(outline.advance(2), "1.1.1");
        assert_eq!(outline.advance(2), "1.1.2");
        assert_eq!(outline.advance(1), "1.2");
        // Level 2 restarts under the new level-1 heading
        assert_eq!(outline.advance(2), "1.2.1");
    }

    #[test]
    fn test_skipped_level_left_out() {
        let mut outline = OutlineCounter::new();
        assert_eq!(outline.advance(1), "1");
        assert_eq!(outline.advance(0), "1");
        assert_eq!(outline.advance(1), "1.1");
    }
}
