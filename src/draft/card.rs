//! Card metadata and the per-set card catalog.
//!
//! The catalog is built from the set rating sheets (exported as TSV) and is
//! keyed by normalized card name. Both the catalog side and the draft-log
//! side must run names through [`normalize_name`] or lookups silently miss.

use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Number of colors tracked per card (WUBRG order).
pub const NUM_COLORS: usize = 5;

/// Mana symbol counts per color, in W, U, B, R, G order.
pub type ColorVector = [f64; NUM_COLORS];

/// Color symbol characters in vector order.
pub const COLOR_CHARS: [char; NUM_COLORS] = ['W', 'U', 'B', 'R', 'G'];

/// Hybrid cost letters and the pair of color indices each contributes to.
///
/// Covers all ten color pairs: A=WU, V=WB, S=WR, Y=WG, D=UB, Z=UR, M=UG,
/// K=BR, I=BG, L=RG.
const HYBRID_PAIRS: [(char, usize, usize); 10] = [
    ('A', 0, 1),
    ('V', 0, 2),
    ('S', 0, 3),
    ('Y', 0, 4),
    ('D', 1, 2),
    ('Z', 1, 3),
    ('M', 1, 4),
    ('K', 2, 3),
    ('I', 2, 4),
    ('L', 3, 4),
];

/// Static metadata for a single card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Normalized card name.
    pub name: String,
    /// Mana symbol counts in WUBRG order.
    pub color_vector: ColorVector,
    /// Primary mana cost string as printed on the rating sheet.
    pub mana_cost: String,
    /// Rarity code: 'M', 'R', 'U', 'C' (and 'L' for basic lands).
    pub rarity: char,
    /// Card type line, e.g. "Creature".
    pub card_type: String,
    /// Scalar base rating. Negative for filler lands.
    pub rating: f64,
}

impl Card {
    /// Number of distinct colors this card requires (colors with any pips).
    pub fn num_colors(&self) -> usize {
        self.color_vector.iter().filter(|&&c| c > 0.0).count()
    }
}

/// Normalize a raw card name into catalog-key form.
///
/// Rules (applied in order): spaces become underscores, commas preceding an
/// underscore are dropped, `_<digits>` runs are stripped (basic-land
/// numbering), `_(<letter>)` variant tags are stripped, and the result is
/// lowercased.
///
/// Normalization is idempotent: applying it to an already-normalized name
/// returns the name unchanged.
pub fn normalize_name(name: &str) -> String {
    let spaced = name.replace(' ', "_").replace(",_", "_");
    let chars: Vec<char> = spaced.chars().collect();
    let mut out = String::with_capacity(spaced.len());

    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '_' {
            // Strip `_<digits>` runs.
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            if j > i + 1 {
                i = j;
                continue;
            }

            // Strip `_(<letter>)` variant tags.
            if i + 3 < chars.len()
                && chars[i + 1] == '('
                && chars[i + 2].is_ascii_alphabetic()
                && chars[i + 3] == ')'
            {
                i += 4;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out.to_lowercase()
}

/// Count mana symbols in a single cost string.
///
/// WUBRG letters add one pip to their color; hybrid letters add one pip to
/// both of their colors. Digits and any other characters are ignored.
pub fn color_vector_of_cost(cost: &str) -> ColorVector {
    let mut cv = [0.0; NUM_COLORS];
    for ch in cost.chars() {
        let upper = ch.to_ascii_uppercase();
        if let Some(idx) = COLOR_CHARS.iter().position(|&c| c == upper) {
            cv[idx] += 1.0;
            continue;
        }
        for &(h, a, b) in &HYBRID_PAIRS {
            if h == upper {
                cv[a] += 1.0;
                cv[b] += 1.0;
                break;
            }
        }
    }
    cv
}

/// Merge the color vectors of a card's two cost columns.
///
/// Per color: the primary count wins when it is at least the secondary
/// count, otherwise the average of the two is used.
pub fn merge_cost_vectors(primary: &ColorVector, secondary: &ColorVector) -> ColorVector {
    let mut cv = [0.0; NUM_COLORS];
    for i in 0..NUM_COLORS {
        cv[i] = if primary[i] >= secondary[i] {
            primary[i]
        } else {
            (primary[i] + secondary[i]) / 2.0
        };
    }
    cv
}

/// Errors raised while building a [`CardCatalog`] from rating sheets.
#[derive(Debug)]
pub enum CatalogError {
    /// Underlying file could not be read.
    Io(std::io::Error),
    /// The sheet is missing a required header column.
    MissingColumn(&'static str),
    /// The sheet had a header but no usable card rows.
    NoCards,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "failed to read rating sheet: {}", e),
            CatalogError::MissingColumn(col) => {
                write!(f, "rating sheet is missing required column '{}'", col)
            }
            CatalogError::NoCards => write!(f, "rating sheet contained no usable card rows"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e)
    }
}

/// Required rating-sheet columns.
const COL_NAME: &str = "Name";
const COL_COST1: &str = "Casting Cost 1";
const COL_COST2: &str = "Casting Cost 2";
const COL_TYPE: &str = "Card Type";
const COL_RARITY: &str = "Rarity";
const COL_RATING: &str = "Rating";

/// Per-set card catalog keyed by normalized card name.
///
/// Lookups for names absent from the catalog fall back to a colorless
/// zero-rating default and log a warning; they never abort an evaluation
/// run.
#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    cards: FxHashMap<String, Card>,
    skipped_lines: usize,
}

impl CardCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a main rating sheet and an optional supplement
    /// (typically the lands sheet).
    pub fn from_tsv_files<P: AsRef<Path>>(main: P, supplement: Option<P>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        catalog.merge_tsv_file(main)?;
        if let Some(path) = supplement {
            catalog.merge_tsv_file(path)?;
        }
        if catalog.cards.is_empty() {
            return Err(CatalogError::NoCards);
        }
        Ok(catalog)
    }

    /// Merge one TSV rating sheet into the catalog.
    ///
    /// Individual malformed lines (wrong field count, unparsable rating) are
    /// skipped and counted; only missing headers are fatal.
    pub fn merge_tsv_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CatalogError> {
        let text = fs::read_to_string(path)?;
        self.merge_tsv(&text)
    }

    /// Merge TSV rating-sheet text into the catalog.
    pub fn merge_tsv(&mut self, text: &str) -> Result<(), CatalogError> {
        let mut lines = text.lines();
        let header = lines.next().unwrap_or("");
        let columns: Vec<&str> = header.split('\t').map(str::trim).collect();

        let col = |name: &'static str| -> Result<usize, CatalogError> {
            columns
                .iter()
                .position(|&c| c == name)
                .ok_or(CatalogError::MissingColumn(name))
        };
        let name_idx = col(COL_NAME)?;
        let cost1_idx = col(COL_COST1)?;
        let cost2_idx = col(COL_COST2)?;
        let type_idx = col(COL_TYPE)?;
        let rarity_idx = col(COL_RARITY)?;
        let rating_idx = col(COL_RATING)?;
        let max_idx = [name_idx, cost1_idx, cost2_idx, type_idx, rarity_idx, rating_idx]
            .into_iter()
            .max()
            .unwrap_or(0);

        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            if fields.len() <= max_idx {
                debug!("skipping short catalog line: {:?}", line);
                self.skipped_lines += 1;
                continue;
            }

            let rating: f64 = match fields[rating_idx].parse() {
                Ok(r) => r,
                Err(_) => {
                    debug!(
                        "skipping catalog line with unparsable rating {:?}: {:?}",
                        fields[rating_idx], line
                    );
                    self.skipped_lines += 1;
                    continue;
                }
            };

            let cost1 = fields[cost1_idx];
            let cost2 = fields[cost2_idx];
            let cv1 = color_vector_of_cost(cost1);
            // "none" marks an absent secondary cost on the sheets.
            let cv2 = if cost2.eq_ignore_ascii_case("none") {
                [0.0; NUM_COLORS]
            } else {
                color_vector_of_cost(cost2)
            };

            self.insert(Card {
                name: normalize_name(fields[name_idx]),
                color_vector: merge_cost_vectors(&cv1, &cv2),
                mana_cost: cost1.to_string(),
                rarity: fields[rarity_idx].chars().next().unwrap_or('C'),
                card_type: fields[type_idx].to_string(),
                rating,
            });
        }

        Ok(())
    }

    /// Insert a card, replacing any existing entry with the same name.
    pub fn insert(&mut self, card: Card) {
        self.cards.insert(card.name.clone(), card);
    }

    /// Look up a card by normalized name.
    pub fn get(&self, name: &str) -> Option<&Card> {
        self.cards.get(name)
    }

    /// Color vector for a card, falling back to all-zero for unknown names.
    pub fn color_vector(&self, name: &str) -> ColorVector {
        match self.cards.get(name) {
            Some(card) => card.color_vector,
            None => {
                warn!("unknown card {:?}: assuming no color identity", name);
                [0.0; NUM_COLORS]
            }
        }
    }

    /// Base rating for a card, falling back to zero for unknown names.
    pub fn rating(&self, name: &str) -> f64 {
        match self.cards.get(name) {
            Some(card) => card.rating,
            None => {
                warn!("unknown card {:?}: assuming zero rating", name);
                0.0
            }
        }
    }

    /// Rarity code for a card, falling back to common for unknown names.
    pub fn rarity(&self, name: &str) -> char {
        self.cards.get(name).map(|c| c.rarity).unwrap_or('C')
    }

    /// Number of cards in the catalog.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of malformed sheet lines skipped while building the catalog.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// Iterate over all cards.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// All card names in unspecified order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cards.keys().map(String::as_str)
    }
}
