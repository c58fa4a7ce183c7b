use super::face::Face;
use super::rank::Rank;
use super::suit::Suit;
use rand::seq::SliceRandom;

/// A single shuffled issuance of cards, drawn without replacement.
///
/// The no-duplicate guarantee holds within one issuance only: each deal
/// operation constructs a fresh deck, so duplicate faces across separate
/// deals are expected and legal (identity lives in the card id).
#[derive(Debug, Clone)]
pub struct Deck(Vec<Face>);

impl Default for Deck {
    fn default() -> Self {
        Self::shuffled()
    }
}

impl Deck {
    /// Full 52-card deck size.
    pub const SIZE: usize = 52;

    /// Creates a freshly shuffled 52-card deck.
    pub fn shuffled() -> Self {
        let mut faces = Suit::all()
            .into_iter()
            .flat_map(|suit| Rank::all().into_iter().map(move |rank| Face { rank, suit }))
            .collect::<Vec<_>>();
        faces.shuffle(&mut rand::rng());
        Self(faces)
    }
    /// Creates a deck from an explicit set of faces, in the given order.
    pub fn explicit(faces: Vec<Face>) -> Self {
        Self(faces)
    }
    /// Remaining cards in this issuance.
    pub fn size(&self) -> usize {
        self.0.len()
    }
    /// Draws `n` distinct faces, or `None` if the issuance is too small.
    pub fn draw(&mut self, n: usize) -> Option<Vec<Face>> {
        match n <= self.0.len() {
            true => Some(self.0.split_off(self.0.len() - n)),
            false => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_deck_is_distinct() {
        let mut deck = Deck::shuffled();
        let faces = deck.draw(Deck::SIZE).unwrap();
        let distinct = faces
            .iter()
            .copied()
            .collect::<std::collections::HashSet<_>>();
        assert_eq!(distinct.len(), Deck::SIZE);
        assert_eq!(deck.size(), 0);
    }

    #[test]
    fn overdraw_is_refused() {
        let mut deck = Deck::shuffled();
        assert!(deck.draw(Deck::SIZE + 1).is_none());
        assert_eq!(deck.size(), Deck::SIZE);
    }

    #[test]
    fn explicit_deck_draws_in_order() {
        let a = Face::from((Rank::Ace, Suit::S));
        let b = Face::from((Rank::King, Suit::H));
        let mut deck = Deck::explicit(vec![a, b]);
        assert_eq!(deck.draw(1), Some(vec![b]));
        assert_eq!(deck.draw(1), Some(vec![a]));
        assert_eq!(deck.draw(1), None);
    }
}
