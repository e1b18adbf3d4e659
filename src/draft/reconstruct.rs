//! Draft-log reconstruction.
//!
//! A raw draft row records, for every seat at the table, the pile of cards
//! that seat ended the draft holding, concatenated seat-by-seat in draft
//! order. Reconstruction inverts the pack-passing process: for every pick
//! the acting seat made, it recovers the exact pack contents that were in
//! that seat's hands at the moment of the choice.
//!
//! # How the inversion works
//!
//! Within one pack round, a physical pack visits one seat per decision
//! point, losing one card at each stop. The card a seat took at its local
//! decision `k` therefore sits at position `k` of that seat's pile slice for
//! the round. Walking a pack backward along the passing order turns into a
//! strided walk over the flat token row: one stride hops to the next pile
//! (one seat over) *and* one decision deeper. Even rounds pass one way
//! around the table, the middle round passes the other way, so the seat
//! component of the stride flips sign. All indexing wraps modulo the row
//! length, which handles packs travelling around the table more than once.

use std::fmt;

use log::debug;

use crate::draft::card::normalize_name;

/// One decision event: the pack as seen by the acting seat.
///
/// Index 0 is always the card the human actually chose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    /// Cards present in the pack at the moment of the choice.
    pub pack: Vec<String>,
}

impl Pick {
    /// The card the human took from this pack.
    pub fn chosen(&self) -> &str {
        &self.pack[0]
    }

    /// Number of cards that were in the pack.
    pub fn len(&self) -> usize {
        self.pack.len()
    }

    /// Whether the pack is empty (never true for a reconstructed pick).
    pub fn is_empty(&self) -> bool {
        self.pack.is_empty()
    }
}

/// A fully reconstructed draft: one [`Pick`] per decision point, in the
/// order the human seat experienced them.
///
/// Immutable once reconstructed; policies consume it read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    /// Cards per fresh pack.
    pub pack_size: usize,
    /// All picks, round-major, earliest first.
    pub picks: Vec<Pick>,
}

impl Draft {
    /// The human's collection after every pick: one card per decision.
    pub fn human_collection(&self) -> Vec<String> {
        self.picks.iter().map(|p| p.chosen().to_string()).collect()
    }
}

/// Errors raised for a single malformed draft row.
///
/// These are row-scoped: corpus processing skips the offending draft and
/// continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The row was empty or contained only the id/set prefix.
    EmptyRow,
    /// The card token count is not a positive multiple of seats * rounds.
    TokenCount {
        /// Number of card tokens found.
        found: usize,
        /// Required divisor (seats * rounds).
        divisor: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyRow => write!(f, "draft row has no card tokens"),
            ParseError::TokenCount { found, divisor } => write!(
                f,
                "draft row has {} card tokens, expected a positive multiple of {}",
                found, divisor
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Reconstructs pick sequences from flat draft rows.
///
/// Holds only the table topology; one instance serves a whole corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackReconstructor {
    seats: usize,
    rounds: usize,
}

impl Default for PackReconstructor {
    fn default() -> Self {
        Self::new(8, 3)
    }
}

impl PackReconstructor {
    /// Create a reconstructor for a table of `seats` drafters opening
    /// `rounds` packs each.
    pub fn new(seats: usize, rounds: usize) -> Self {
        debug_assert!(seats >= 2, "need at least two seats");
        debug_assert!(rounds >= 1, "need at least one pack round");
        Self { seats, rounds }
    }

    /// Number of seats at the table.
    pub fn seats(&self) -> usize {
        self.seats
    }

    /// Number of packs each seat opens.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Flat token index of the card removed by the `hop`-th seat along the
    /// passing path of the pack our seat sees at (`round`, `local_pick`).
    ///
    /// `hop` 0 is the acting seat's own pick. Each further hop moves one
    /// pile over (one seat along the passing order) and one decision deeper.
    /// Even rounds stride forward through the piles, odd rounds backward.
    /// Indices wrap modulo the full row so a pack can travel around the
    /// table more than once without boundary casing.
    pub fn token_index(&self, pack_size: usize, round: usize, local_pick: usize, hop: usize) -> usize {
        let pile = (self.rounds * pack_size) as i64;
        let total = self.seats as i64 * pile;
        let base = (round * pack_size + local_pick) as i64;
        let stride = if round % 2 == 0 { pile + 1 } else { -(pile - 1) };
        (base + hop as i64 * stride).rem_euclid(total) as usize
    }

    /// Derive the pack size from a card token count.
    ///
    /// Fails when the count is zero or not divisible by seats * rounds.
    pub fn pack_size_of(&self, token_count: usize) -> Result<usize, ParseError> {
        let divisor = self.seats * self.rounds;
        if token_count == 0 || token_count % divisor != 0 {
            return Err(ParseError::TokenCount {
                found: token_count,
                divisor,
            });
        }
        Ok(token_count / divisor)
    }

    /// Reconstruct all picks from a flat card token row.
    ///
    /// Output is round-major: all of round 0's picks (earliest first), then
    /// round 1's, and so on. Pack sizes within a round decrease from
    /// `pack_size` down to 1.
    pub fn reconstruct(&self, tokens: &[String]) -> Result<Draft, ParseError> {
        let pack_size = self.pack_size_of(tokens.len())?;

        let mut picks = Vec::with_capacity(self.rounds * pack_size);
        for round in 0..self.rounds {
            for local_pick in 0..pack_size {
                let pack: Vec<String> = (0..pack_size - local_pick)
                    .map(|hop| tokens[self.token_index(pack_size, round, local_pick, hop)].clone())
                    .collect();
                picks.push(Pick { pack });
            }
        }

        Ok(Draft { pack_size, picks })
    }

    /// Parse one raw draft row (comma-separated, with a draft-id and
    /// set-code prefix) and reconstruct it.
    ///
    /// Stray quote characters are dropped and fields are trimmed before the
    /// two prefix tokens are stripped. Card tokens go through the same
    /// [`normalize_name`] as the catalog side, so numbered basic lands and
    /// variant tags in the logs still hit their catalog entries.
    pub fn parse_row(&self, line: &str) -> Result<Draft, ParseError> {
        let cleaned = line.replace('"', "");
        let fields: Vec<&str> = cleaned
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect();

        // Leading draft id and set code are bookkeeping, not cards.
        if fields.len() <= 2 {
            return Err(ParseError::EmptyRow);
        }
        let tokens: Vec<String> = fields[2..].iter().map(|f| normalize_name(f)).collect();

        self.reconstruct(&tokens)
    }

    /// Parse a whole corpus of newline-separated draft rows.
    ///
    /// Malformed rows are skipped and counted; blank lines are ignored
    /// outright.
    pub fn parse_corpus(&self, text: &str) -> Corpus {
        let mut drafts = Vec::new();
        let mut skipped = 0;
        for (row, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match self.parse_row(line) {
                Ok(draft) => drafts.push(draft),
                Err(e) => {
                    debug!("skipping draft row {}: {}", row, e);
                    skipped += 1;
                }
            }
        }
        Corpus { drafts, skipped }
    }
}

/// A parsed corpus of drafts plus row-level skip accounting.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Successfully reconstructed drafts.
    pub drafts: Vec<Draft>,
    /// Number of malformed rows skipped.
    pub skipped: usize,
}

impl Corpus {
    /// Total picks across all drafts.
    pub fn total_picks(&self) -> usize {
        self.drafts.iter().map(|d| d.picks.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Token row for an 8-seat, 3-round, 15-card draft where token text
    /// encodes its own flat index.
    fn indexed_tokens(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("c{:03}", i)).collect()
    }

    /// Seat that owns flat index `i` in an 8x3x15 row.
    fn seat_of(token: &str) -> usize {
        let idx: usize = token[1..].parse().unwrap();
        idx / 45
    }

    #[test]
    fn test_token_index_forward_round() {
        let r = PackReconstructor::default();
        // Round 0, first pick: own card at index 0, then one pile (+1 deeper)
        // per hop.
        assert_eq!(r.token_index(15, 0, 0, 0), 0);
        assert_eq!(r.token_index(15, 0, 0, 1), 46);
        assert_eq!(r.token_index(15, 0, 0, 2), 92);
        // Hop 8 wraps around the table back into our own pile, 8 decisions
        // deeper.
        assert_eq!(r.token_index(15, 0, 0, 8), 8);
    }

    #[test]
    fn test_token_index_reverse_round() {
        let r = PackReconstructor::default();
        // Round 1 passes the other way: strides walk backward through the
        // piles.
        assert_eq!(r.token_index(15, 1, 0, 0), 15);
        assert_eq!(r.token_index(15, 1, 0, 1), (15i64 - 44).rem_euclid(360) as usize);
        assert_eq!(r.token_index(15, 1, 0, 1), 331);
    }

    #[test]
    fn test_reconstruct_shape() {
        let r = PackReconstructor::default();
        let draft = r.reconstruct(&indexed_tokens(360)).unwrap();

        assert_eq!(draft.pack_size, 15);
        assert_eq!(draft.picks.len(), 45);

        // Pack sizes decrease by exactly one within each round, then reset.
        for round in 0..3 {
            for k in 0..15 {
                assert_eq!(draft.picks[round * 15 + k].len(), 15 - k);
            }
        }

        // The chosen card is the seat's own pile entry for that decision.
        assert_eq!(draft.picks[0].chosen(), "c000");
        assert_eq!(draft.picks[15].chosen(), "c015");
        assert_eq!(draft.picks[30].chosen(), "c030");
    }

    #[test]
    fn test_same_physical_pack_after_full_rotation() {
        let r = PackReconstructor::default();
        let draft = r.reconstruct(&indexed_tokens(360)).unwrap();

        // After one full trip around the table the same physical pack comes
        // back 8 cards lighter: pick 8's pack must equal pick 0's pack minus
        // the 8 cards taken along the way.
        let first = &draft.picks[0].pack;
        let returned = &draft.picks[8].pack;
        assert_eq!(returned.as_slice(), &first[8..]);
    }

    #[test]
    fn test_pass_direction_flips_in_middle_round() {
        let r = PackReconstructor::default();
        let draft = r.reconstruct(&indexed_tokens(360)).unwrap();

        // Hop 1 of our first pick in each round is the card taken by the
        // adjacent seat that handed us the pack. Rounds 0 and 2 receive from
        // seat 1; the reversed middle round receives from seat 7.
        assert_eq!(seat_of(&draft.picks[0].pack[1]), 1);
        assert_eq!(seat_of(&draft.picks[15].pack[1]), 7);
        assert_eq!(seat_of(&draft.picks[30].pack[1]), 1);
    }

    #[test]
    fn test_parse_row_strips_prefix_and_quotes() {
        let r = PackReconstructor::new(2, 1);
        // 2 seats, 1 round, pack size 2: 4 card tokens.
        let draft = r.parse_row("17,\"M19\",a,b,c,d").unwrap();
        assert_eq!(draft.pack_size, 2);
        assert_eq!(draft.picks.len(), 2);
        assert_eq!(draft.picks[0].chosen(), "a");
    }

    #[test]
    fn test_parse_row_normalizes_card_tokens() {
        let r = PackReconstructor::new(2, 1);
        // Numbered lands and variant tags in logs must match catalog keys.
        let draft = r.parse_row("17,GRN,Forest_2,Llanowar_Elves,Izzet_Guildgate_(a),Swamp_3").unwrap();
        assert_eq!(draft.picks[0].chosen(), "forest");
        assert_eq!(draft.picks[0].pack[1], "swamp");
        assert_eq!(draft.picks[1].chosen(), "llanowar_elves");
    }

    #[test]
    fn test_malformed_rows_are_row_scoped() {
        let r = PackReconstructor::default();
        assert_eq!(r.parse_row("1,XLN"), Err(ParseError::EmptyRow));
        assert_eq!(
            r.parse_row("1,XLN,a,b,c"),
            Err(ParseError::TokenCount {
                found: 3,
                divisor: 24
            })
        );

        let mut corpus_text = String::new();
        // One good 360-token row, one truncated row, one blank line.
        corpus_text.push_str("1,M19,");
        corpus_text.push_str(&indexed_tokens(360).join(","));
        corpus_text.push('\n');
        corpus_text.push_str("2,M19,a,b,c\n\n");

        let corpus = r.parse_corpus(&corpus_text);
        assert_eq!(corpus.drafts.len(), 1);
        assert_eq!(corpus.skipped, 1);
        assert_eq!(corpus.total_picks(), 45);
    }
}
