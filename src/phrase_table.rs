//! Flattened phrase index table for the embedded renderer.

use crate::catalog::PhraseIndexList;

/// All phrases' ordinals in one array, with per-phrase start and length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseTable {
    indices: Vec<usize>,
    starts: Vec<usize>,
    lengths: Vec<usize>,
}

impl PhraseTable {
    /// Flatten phrase index lists, preserving phrase order.
    pub fn build(lists: &[PhraseIndexList]) -> Self {
        let mut table = PhraseTable {
            indices: Vec::with_capacity(lists.iter().map(Vec::len).sum()),
            starts: Vec::with_capacity(lists.len()),
            lengths: Vec::with_capacity(lists.len()),
        };
        for list in lists {
            table.starts.push(table.indices.len());
            table.lengths.push(list.len());
            table.indices.extend_from_slice(list);
        }
        table
    }

    /// Number of phrases
    pub fn count(&self) -> usize {
        self.starts.len()
    }

    /// Flattened ordinals
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Start of each phrase within `indices()`
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// Cluster count of each phrase
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Ordinals of one phrase
    pub fn phrase(&self, index: usize) -> Option<&[usize]> {
        let start = *self.starts.get(index)?;
        Some(&self.indices[start..start + self.lengths[index]])
    }

    /// Iterate phrases in order
    pub fn phrases(&self) -> impl Iterator<Item = &[usize]> {
        (0..self.count()).filter_map(|i| self.phrase(i))
    }

    /// Largest value any of the three arrays holds (sizes the C element type)
    pub fn max_value(&self) -> usize {
        self.indices
            .iter()
            .chain(&self.starts)
            .chain(&self.lengths)
            .copied()
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_flattens_in_order() {
        let table = PhraseTable::build(&[vec![0, 1, 2], vec![], vec![2, 0]]);
        assert_eq!(table.count(), 3);
        assert_eq!(table.indices(), &[0, 1, 2, 2, 0]);
        assert_eq!(table.starts(), &[0, 3, 3]);
        assert_eq!(table.lengths(), &[3, 0, 2]);
        assert_eq!(table.phrase(1), Some(&[][..]));
        assert_eq!(table.phrase(2), Some(&[2, 0][..]));
        assert_eq!(table.phrase(3), None);
    }

    #[test]
    fn test_phrases_roundtrip_lists() {
        let lists = vec![vec![4, 4], vec![1]];
        let table = PhraseTable::build(&lists);
        let rebuilt: Vec<Vec<usize>> = table.phrases().map(<[usize]>::to_vec).collect();
        assert_eq!(rebuilt, lists);
    }

    #[test]
    fn test_max_value_covers_all_arrays() {
        let table = PhraseTable::build(&[vec![1; 300]]);
        assert_eq!(table.max_value(), 300);
        assert_eq!(PhraseTable::default().max_value(), 0);
    }
}
