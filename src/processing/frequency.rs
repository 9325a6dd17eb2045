//! Word frequency distribution across all records of a pass

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequencyAccumulator {
    counts: HashMap<String, usize>,
    total: usize,
}

impl WordFrequencyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one record's filtered tokens
    pub fn add_all<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            let token = token.as_ref();
            match self.counts.get_mut(token) {
                Some(count) => *count += 1,
                None => {
                    self.counts.insert(token.to_string(), 1);
                }
            }
            self.total += 1;
        }
    }

    /// Fold another partial table into this one
    pub fn merge(&mut self, other: WordFrequencyAccumulator) {
        for (word, count) in other.counts {
            *self.counts.entry(word).or_insert(0) += count;
        }
        self.total += other.total;
    }

    /// Most frequent words, count descending then word ascending.
    ///
    /// The lexicographic tie-break makes the order independent of the order in
    /// which records were fed in.
    pub fn top_n(&self, n: usize) -> Vec<(String, usize)> {
        let mut entries: Vec<(String, usize)> = self
            .counts
            .iter()
            .map(|(word, &count)| (word.clone(), count))
            .collect();

        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(n);
        entries
    }

    /// The whole table in `top_n` order
    pub fn entries(&self) -> Vec<(String, usize)> {
        self.top_n(self.counts.len())
    }

    pub fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of tokens counted
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct words
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn reset(&mut self) {
        self.counts.clear();
        self.total = 0;
    }
}
