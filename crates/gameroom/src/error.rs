use melee_cards::EvalError;

/// How an error should be handled at the operation boundary.
///
/// Validation and conflict errors surface to the originating caller
/// only, with room state untouched. Persistence trouble never reaches a
/// player at all; it is logged at the hosting layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input: bad table, bad size, unknown ids, unknown action.
    Validation,
    /// Valid input that loses against current state: reuse, capacity.
    Conflict,
}

/// Errors surfaced by room operations. None are fatal; every operation
/// validates fully before mutating, so a failed operation leaves the
/// room exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// A seventh distinct player tried to join.
    RoomFull,
    /// Deal size exceeds the issuance.
    InvalidDealSize(usize),
    /// Card notation failed to parse.
    InvalidCardText(String),
    /// Requested cards are committed to a pending play this round.
    CardsInUse,
    /// None of the requested card ids are currently held.
    NoSuchCards,
    /// A card id is already referenced by a pending play this round.
    CardsAlreadyUsed,
    /// Table name outside the fixed slot set.
    BadTable(String),
    /// Combination size outside [2, 5].
    InvalidCombinationSize(usize),
    /// Operation names a player the room has never seen.
    NoSuchPlayer(String),
    /// Inbound action failed to decode (unknown tag or malformed fields).
    BadMessage(String),
}

impl RoomError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RoomFull | Self::CardsInUse | Self::CardsAlreadyUsed => ErrorKind::Conflict,
            Self::InvalidDealSize(_)
            | Self::InvalidCardText(_)
            | Self::NoSuchCards
            | Self::BadTable(_)
            | Self::InvalidCombinationSize(_)
            | Self::NoSuchPlayer(_)
            | Self::BadMessage(_) => ErrorKind::Validation,
        }
    }
}

impl From<EvalError> for RoomError {
    fn from(e: EvalError) -> Self {
        match e {
            EvalError::InvalidSize(n) => Self::InvalidCombinationSize(n),
        }
    }
}

impl std::fmt::Display for RoomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RoomFull => write!(f, "room is full"),
            Self::InvalidDealSize(n) => write!(f, "cannot deal {} cards", n),
            Self::InvalidCardText(s) => write!(f, "invalid card: {}", s),
            Self::CardsInUse => write!(f, "cards are committed to a pending play"),
            Self::NoSuchCards => write!(f, "cards are not in hand"),
            Self::CardsAlreadyUsed => write!(f, "some cards already used in this round"),
            Self::BadTable(s) => write!(f, "bad table: {}", s),
            Self::InvalidCombinationSize(n) => write!(f, "need 2-5 cards, got {}", n),
            Self::NoSuchPlayer(p) => write!(f, "no such player: {}", p),
            Self::BadMessage(s) => write!(f, "bad message: {}", s),
        }
    }
}

impl std::error::Error for RoomError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert_eq!(RoomError::RoomFull.kind(), ErrorKind::Conflict);
        assert_eq!(RoomError::CardsAlreadyUsed.kind(), ErrorKind::Conflict);
        assert_eq!(RoomError::NoSuchCards.kind(), ErrorKind::Validation);
        assert_eq!(
            RoomError::BadTable("T99".into()).kind(),
            ErrorKind::Validation
        );
    }
}
