//! Match graph reconstruction: from the flat `next_match_id` list to the
//! column-by-column tree one bracket half at a time.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

use log::debug;

use crate::{Match, MatchId};

// ---------------------------------------------------------------------------
// Natural (alphanumeric) ordering
// ---------------------------------------------------------------------------

/// Numeric-aware string compare: `"Match 2" < "Match 10"`. Digit runs are
/// compared by value, everything else by char. Ties between predecessors are
/// broken with this so column reconstruction is deterministic.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();
    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let na = take_number(&mut ai);
                    let nb = take_number(&mut bi);
                    match na.cmp(&nb) {
                        Ordering::Equal => {}
                        ord => return ord,
                    }
                } else {
                    match x.cmp(&y) {
                        Ordering::Equal => {
                            ai.next();
                            bi.next();
                        }
                        ord => return ord,
                    }
                }
            }
        }
    }
}

fn take_number(it: &mut Peekable<Chars>) -> u128 {
    let mut n: u128 = 0;
    while let Some(d) = it.peek().and_then(|c| c.to_digit(10)) {
        n = n.saturating_mul(10).saturating_add(u128::from(d));
        it.next();
    }
    n
}

// ---------------------------------------------------------------------------
// Column-level operations
// ---------------------------------------------------------------------------

/// For each match in `column`, collect the matches in `all` that advance into
/// it (`next_match_id == match.id`), natural-sorted by name, concatenated in
/// column order. This is the previous round in seed-consistent order.
///
/// Dangling references simply contribute nothing — bracket data may be
/// legitimately partial.
pub fn previous_matches_for(column: &[Match], all: &[Match]) -> Vec<Match> {
    let mut out = Vec::new();
    for m in column {
        let mut preds: Vec<Match> = all
            .iter()
            .filter(|c| c.next_match_id == Some(m.id))
            .cloned()
            .collect();
        preds.sort_by(|x, y| natural_cmp(&x.name, &y.name));
        out.extend(preds);
    }
    out
}

/// The two previous-round matches feeding the match whose bottom predecessor
/// sits at `previous_bottom_row_index` in the prior column.
#[derive(Debug, Clone, Copy)]
pub struct RoundSnippet<'a> {
    pub previous_top_match: &'a Match,
    pub previous_bottom_match: &'a Match,
}

/// `None` for column 0 (first-round matches have no predecessors) and when
/// either index falls outside the prior column.
pub fn previous_matches_at<'a>(
    columns: &'a [Vec<Match>],
    column_index: usize,
    previous_bottom_row_index: usize,
) -> Option<RoundSnippet<'a>> {
    if column_index == 0 {
        return None;
    }
    let prior = columns.get(column_index - 1)?;
    let top_index = previous_bottom_row_index.checked_sub(1)?;
    Some(RoundSnippet {
        previous_top_match: prior.get(top_index)?,
        previous_bottom_match: prior.get(previous_bottom_row_index)?,
    })
}

// ---------------------------------------------------------------------------
// BracketGraph — arena for one bracket half
// ---------------------------------------------------------------------------

/// The flat list materialized once: matches indexed by id, predecessor lists
/// resolved and sorted up front. Position calculation and connector drawing
/// read from here instead of rescanning the input per lookup.
#[derive(Debug, Clone, Default)]
pub struct BracketGraph {
    matches: Vec<Match>,
    by_id: HashMap<MatchId, usize>,
    /// Winner-feed predecessors per match, natural-sorted by name.
    preds: Vec<Vec<usize>>,
}

impl BracketGraph {
    pub fn new(matches: Vec<Match>) -> Self {
        let by_id: HashMap<MatchId, usize> =
            matches.iter().enumerate().map(|(i, m)| (m.id, i)).collect();

        let mut preds = vec![Vec::new(); matches.len()];
        for (i, m) in matches.iter().enumerate() {
            let Some(next) = m.next_match_id else { continue };
            match by_id.get(&next) {
                Some(&j) => preds[j].push(i),
                // Tolerated: the successor may live in the other half
                // (lower final -> grand final) or not be supplied at all.
                None => debug!("match {} advances to id {next} outside this half", m.id),
            }
        }
        for list in &mut preds {
            list.sort_by(|&a, &b| natural_cmp(&matches[a].name, &matches[b].name));
        }

        Self { matches, by_id, preds }
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn get(&self, id: MatchId) -> Option<&Match> {
        self.by_id.get(&id).map(|&i| &self.matches[i])
    }

    /// Previous-round matches feeding `id`, natural-sorted by name.
    /// Empty for first-round matches and unknown ids.
    pub fn predecessors(&self, id: MatchId) -> Vec<&Match> {
        match self.by_id.get(&id) {
            Some(&i) => self.preds[i].iter().map(|&j| &self.matches[j]).collect(),
            None => Vec::new(),
        }
    }

    /// By convention the continuing side's feed: the last (natural-ordered)
    /// predecessor. Used for seed-order slot placement.
    pub fn previous_bottom(&self, id: MatchId) -> Option<&Match> {
        self.predecessors(id).pop()
    }

    /// Reconstruct columns for this half, first round at index 0.
    ///
    /// Starts from the terminal matches (those whose winner leaves this half,
    /// or has nowhere to go) and walks backward with [`previous_matches_for`]
    /// until a round has no predecessors. A malformed cyclic input can never
    /// loop: the walk is capped at one column per supplied match.
    pub fn columns(&self) -> Vec<Vec<Match>> {
        let mut terminal: Vec<Match> = self
            .matches
            .iter()
            .filter(|m| match m.next_match_id {
                None => true,
                Some(next) => !self.by_id.contains_key(&next),
            })
            .cloned()
            .collect();
        terminal.sort_by(|a, b| natural_cmp(&a.name, &b.name));
        if terminal.is_empty() {
            if !self.matches.is_empty() {
                debug!("no terminal match found in a half of {} matches", self.matches.len());
            }
            return Vec::new();
        }

        let mut columns = vec![terminal];
        while columns.len() <= self.matches.len() {
            let prev = previous_matches_for(columns.last().expect("at least one column"), &self.matches);
            if prev.is_empty() {
                break;
            }
            columns.push(prev);
        }
        columns.reverse();
        columns
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
