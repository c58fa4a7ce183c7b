use super::rank::Rank;
use super::suit::Suit;
use serde::Deserialize;
use serde::Serialize;

/// A card face: the `(Rank, Suit)` value of a card.
///
/// Faces carry no identity. Two distinct [`Card`]s may share a face when
/// they come from different deck issuances — only the card id
/// distinguishes them.
///
/// [`Card`]: super::card::Card
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
pub struct Face {
    pub rank: Rank,
    pub suit: Suit,
}

impl From<(Rank, Suit)> for Face {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}

/// str isomorphism
/// rank then suit, e.g. "K♠", "10♥", "As"; "1" aliases Ace
impl TryFrom<&str> for Face {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim();
        let mut chars = s.chars();
        let last = chars.next_back().ok_or_else(|| "empty card str".to_string())?;
        let suit = Suit::try_from(last.to_string().as_str())?;
        let rank = Rank::try_from(chars.as_str())?;
        Ok(Self { rank, suit })
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_str() {
        let face = Face::from((Rank::Ten, Suit::H));
        assert!(face == Face::try_from(face.to_string().as_str()).unwrap());
    }

    #[test]
    fn parse_unicode_and_letter_suits() {
        assert_eq!(
            Face::try_from("K♠").unwrap(),
            Face::from((Rank::King, Suit::S))
        );
        assert_eq!(
            Face::try_from("as").unwrap(),
            Face::from((Rank::Ace, Suit::S))
        );
        assert_eq!(
            Face::try_from("1♦").unwrap(),
            Face::from((Rank::Ace, Suit::D))
        );
    }

    #[test]
    fn reject_garbage() {
        assert!(Face::try_from("").is_err());
        assert!(Face::try_from("K").is_err());
        assert!(Face::try_from("11♠").is_err());
    }
}
