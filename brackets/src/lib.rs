pub mod graph;
pub mod hover;
pub mod layout;
pub mod position;
pub mod render;
pub mod style;
pub mod svg;
pub mod view;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types — clean model, matching the flat id-reference wire format
// ---------------------------------------------------------------------------

pub type MatchId = i64;

/// One contest node in the bracket graph.
///
/// The wire format carries the tree implicitly: `next_match_id` points at the
/// match the winner advances to, `next_looser_match_id` at the match the
/// loser drops to (upper-bracket matches only). Column structure is derived,
/// never stored — see [`graph::BracketGraph`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    /// Display label, e.g. "UB Round 1 Match 3". Also the tie-breaker for
    /// deterministic predecessor ordering (natural/alphanumeric compare).
    #[serde(default)]
    pub name: String,
    /// Where the winner goes, or `None` for the grand final.
    #[serde(default)]
    pub next_match_id: Option<MatchId>,
    /// Where the loser drops to. Only meaningful in the upper bracket.
    #[serde(default)]
    pub next_looser_match_id: Option<MatchId>,
    /// Human label for the round ("1", "Semi-final", ...).
    #[serde(default)]
    pub tournament_round_text: String,
    #[serde(default)]
    pub state: MatchState,
    /// 0–2 entries. Slot order on the wire is not significant; the view
    /// layer re-sorts into seed order.
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl Match {
    /// Non-empty participant ids, in wire order.
    pub fn participant_ids(&self) -> impl Iterator<Item = &str> {
        self.participants.iter().filter_map(|p| p.real_id())
    }

    pub fn has_participant(&self, party_id: &str) -> bool {
        self.participant_ids().any(|id| id == party_id)
    }

    /// Participants that resolve to an actual team (non-empty id).
    pub fn real_participant_count(&self) -> usize {
        self.participant_ids().count()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchState {
    #[default]
    Played,
    NoShow,
    WalkOver,
    NoParty,
    Done,
    ScoreDone,
}

impl MatchState {
    /// States where an empty participant slot stays blank instead of "TBD":
    /// the match is decided (or void), nobody else is coming.
    pub fn is_decided(&self) -> bool {
        matches!(
            self,
            MatchState::WalkOver
                | MatchState::NoShow
                | MatchState::Done
                | MatchState::ScoreDone
                | MatchState::NoParty
        )
    }
}

/// One side of a match. All fields optional — a slot may be an unresolved
/// "winner of match N" placeholder until upstream results land.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Override text (usually the score). When absent, a fallback is derived
    /// from `status` — see [`view::MatchView`].
    #[serde(default)]
    pub result_text: Option<String>,
    #[serde(default)]
    pub is_winner: bool,
    #[serde(default)]
    pub status: Option<ParticipantStatus>,
}

impl Participant {
    /// The id, treating `Some("")` the same as absent.
    pub fn real_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantStatus {
    Played,
    NoShow,
    WalkOver,
    NoParty,
}

// ---------------------------------------------------------------------------
// Input contract
// ---------------------------------------------------------------------------

/// The full double-elimination input: two flat match lists, any order.
/// The grand final lives at the end of the upper chain (its `next_match_id`
/// is `None`); the lower bracket's last match points into it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoubleElimination {
    pub upper: Vec<Match>,
    pub lower: Vec<Match>,
}

impl DoubleElimination {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn is_empty(&self) -> bool {
        self.upper.is_empty() && self.lower.is_empty()
    }

    /// Look a match up by id across both halves.
    pub fn find(&self, id: MatchId) -> Option<&Match> {
        self.upper
            .iter()
            .chain(self.lower.iter())
            .find(|m| m.id == id)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_round_trips_camel_case() {
        let raw = r#"{
            "upper": [{
                "id": 1,
                "name": "UB Match 1",
                "nextMatchId": 3,
                "nextLooserMatchId": 2,
                "tournamentRoundText": "1",
                "state": "SCORE_DONE",
                "participants": [
                    { "id": "T1", "name": "Alpha", "resultText": "2", "isWinner": true, "status": "PLAYED" },
                    { "id": "T8", "name": "Hotel", "resultText": "0", "isWinner": false, "status": "PLAYED" }
                ]
            }],
            "lower": []
        }"#;
        let bracket = DoubleElimination::from_json(raw).unwrap();
        assert_eq!(bracket.upper.len(), 1);
        let m = &bracket.upper[0];
        assert_eq!(m.next_match_id, Some(3));
        assert_eq!(m.next_looser_match_id, Some(2));
        assert_eq!(m.state, MatchState::ScoreDone);
        assert!(m.participants[0].is_winner);
        assert_eq!(m.participants[0].status, Some(ParticipantStatus::Played));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let raw = r#"{ "upper": [{ "id": 7 }], "lower": [] }"#;
        let bracket = DoubleElimination::from_json(raw).unwrap();
        let m = &bracket.upper[0];
        assert_eq!(m.name, "");
        assert_eq!(m.next_match_id, None);
        assert_eq!(m.state, MatchState::Played);
        assert!(m.participants.is_empty());
    }

    #[test]
    fn test_real_participant_count_ignores_empty_ids() {
        let m = Match {
            id: 1,
            participants: vec![
                Participant { id: Some("T1".into()), ..Default::default() },
                Participant { id: Some("".into()), ..Default::default() },
            ],
            ..Default::default()
        };
        assert_eq!(m.real_participant_count(), 1);
        assert!(m.has_participant("T1"));
        assert!(!m.has_participant(""));
    }

    #[test]
    fn test_decided_states() {
        assert!(MatchState::WalkOver.is_decided());
        assert!(MatchState::NoShow.is_decided());
        assert!(MatchState::Done.is_decided());
        assert!(MatchState::ScoreDone.is_decided());
        assert!(MatchState::NoParty.is_decided());
        assert!(!MatchState::Played.is_decided());
    }
}
