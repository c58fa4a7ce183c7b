use super::error::RoomError;
use super::table::Table;
use super::view::RoomView;
use melee_cards::Card;
use melee_core::CardId;
use melee_core::Seq;
use serde::Deserialize;
use serde::Serialize;

/// Inbound actions from a connected client.
///
/// A closed tagged-variant set: unknown tags or malformed fields fail
/// decoding and surface as a validation error to the sender, never a
/// silent no-op.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientAction {
    /// Explicit request to re-send the viewer's current projection.
    State,
    /// Commit held cards onto a table.
    Place { table: Table, cards: Vec<CardId> },
    /// Retract a pending play by its submission sequence.
    Remove { table: Table, placed_seq: Seq },
    /// Vote that this player is done submitting for the round.
    Ready,
    /// Authority override: resolve immediately, bypassing readiness.
    ForceEnd,
    /// Draw cards from a fresh issuance.
    Deal { n: usize },
    /// Append one card from free-text notation.
    AddCard { text: String },
    /// Drop the whole hand.
    ClearHand,
    /// Drop specific held cards (refused while they are pending).
    Discard { cards: Vec<CardId> },
    /// Evaluate held cards without committing them.
    Evaluate { cards: Vec<CardId> },
}

impl ClientAction {
    /// Decodes one inbound message. Unknown action tags are a
    /// validation error per the closed-variant design.
    pub fn decode(s: &str) -> Result<Self, RoomError> {
        serde_json::from_str(s).map_err(|e| RoomError::BadMessage(e.to_string()))
    }
}

/// Messages sent from server to client over the session.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full per-viewer room projection.
    State { state: RoomView },
    /// Result of an `evaluate` request; no state was changed.
    Evaluated {
        label: String,
        category: u8,
        tiebreak: Vec<u8>,
        cards: Vec<Card>,
    },
    /// An operation failed; room state is unchanged.
    Error { error: String },
}

impl ServerMessage {
    pub fn state(view: RoomView) -> Self {
        Self::State { state: view }
    }
    pub fn error(e: &RoomError) -> Self {
        Self::Error {
            error: e.to_string(),
        }
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize server message")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_place() {
        let action = ClientAction::decode(r#"{"type":"place","table":"T7","cards":[1,2,3]}"#);
        match action.unwrap() {
            ClientAction::Place { table, cards } => {
                assert_eq!(table.to_string(), "T7");
                assert_eq!(cards, vec![1, 2, 3]);
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn decode_bare_actions() {
        assert!(ClientAction::decode(r#"{"type":"ready"}"#).is_ok());
        assert!(ClientAction::decode(r#"{"type":"force_end"}"#).is_ok());
        assert!(ClientAction::decode(r#"{"type":"state"}"#).is_ok());
    }

    #[test]
    fn unknown_tag_is_validation_error() {
        let err = ClientAction::decode(r#"{"type":"teleport"}"#).unwrap_err();
        assert!(matches!(err, RoomError::BadMessage(_)));
        assert_eq!(err.kind(), crate::ErrorKind::Validation);
    }

    #[test]
    fn bad_table_fails_decode() {
        assert!(ClientAction::decode(r#"{"type":"place","table":"T99","cards":[1,2]}"#).is_err());
    }

    #[test]
    fn error_message_shape() {
        let json = ServerMessage::error(&RoomError::RoomFull).to_json();
        assert_eq!(json, r#"{"type":"error","error":"room is full"}"#);
    }
}
