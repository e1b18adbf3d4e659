//! Feature encoding for learned pick models.
//!
//! Downstream model training consumes pick events as fixed-width vectors: a
//! collection half (copy counts per card) and a pack half (membership
//! flags). The [`CardIndexer`] provides the stable name-to-column mapping
//! both halves share.

use log::warn;
use rustc_hash::FxHashMap;

use crate::draft::card::CardCatalog;

/// Stable mapping between card names and dense feature columns.
///
/// Columns are assigned in sorted name order so the same catalog always
/// produces the same encoding.
#[derive(Debug, Clone, Default)]
pub struct CardIndexer {
    index: FxHashMap<String, usize>,
    names: Vec<String>,
}

impl CardIndexer {
    /// Build an indexer over all catalog names.
    pub fn from_catalog(catalog: &CardCatalog) -> Self {
        Self::from_names(catalog.names().map(str::to_string))
    }

    /// Build an indexer from arbitrary names; duplicates collapse.
    pub fn from_names<I: IntoIterator<Item = String>>(names: I) -> Self {
        let mut sorted: Vec<String> = names.into_iter().collect();
        sorted.sort();
        sorted.dedup();

        let index = sorted
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self {
            index,
            names: sorted,
        }
    }

    /// Column for a card name, if known.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Card name for a column.
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Number of distinct cards indexed.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the indexer is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Encode one pick event as a `2n` feature vector.
///
/// The first `n` entries count copies of each card in the collection so
/// far; the second `n` entries flag pack membership. Names the indexer does
/// not know are skipped with a warning rather than aborting the export.
pub fn encode_pick(indexer: &CardIndexer, collection: &[String], pack: &[String]) -> Vec<f32> {
    let n = indexer.len();
    let mut x = vec![0.0; 2 * n];

    for card in collection {
        match indexer.index_of(card) {
            Some(i) => x[i] += 1.0,
            None => warn!("unindexed card {:?} in collection, skipping", card),
        }
    }
    for card in pack {
        match indexer.index_of(card) {
            Some(i) => x[n + i] = 1.0,
            None => warn!("unindexed card {:?} in pack, skipping", card),
        }
    }

    x
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexer() -> CardIndexer {
        CardIndexer::from_names(
            ["drake", "knight", "ogre"]
                .into_iter()
                .map(str::to_string),
        )
    }

    #[test]
    fn test_indexer_round_trip() {
        let idx = indexer();
        assert_eq!(idx.len(), 3);
        for name in ["drake", "knight", "ogre"] {
            let col = idx.index_of(name).unwrap();
            assert_eq!(idx.name_of(col), Some(name));
        }
        assert_eq!(idx.index_of("unknown"), None);
    }

    #[test]
    fn test_indexer_is_sorted_and_deduped() {
        let idx = CardIndexer::from_names(
            ["ogre", "drake", "ogre"].into_iter().map(str::to_string),
        );
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.name_of(0), Some("drake"));
        assert_eq!(idx.name_of(1), Some("ogre"));
    }

    #[test]
    fn test_encode_pick_halves() {
        let idx = indexer();
        let collection = vec!["drake".to_string(), "drake".to_string(), "zzz".to_string()];
        let pack = vec!["knight".to_string(), "ogre".to_string()];

        let x = encode_pick(&idx, &collection, &pack);
        assert_eq!(x.len(), 6);
        // Collection half counts copies; the unknown name is skipped.
        assert_eq!(&x[..3], &[2.0, 0.0, 0.0]);
        // Pack half is membership flags.
        assert_eq!(&x[3..], &[0.0, 1.0, 1.0]);
    }
}
