use serde::Deserialize;
use serde::Serialize;

/// Combination category, from high card up to straight flush.
///
/// A shape alone is not comparable across combination sizes: the numeric
/// category is assigned per size by [`Shape::category`], densely from
/// weakest to strongest among the shapes that size can realize.
/// Straights and flushes are ranked only at five cards; smaller
/// combinations realize only the rank-multiset shapes.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
pub enum Shape {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOAK,
    Straight,
    Flush,
    FullHouse,
    FourOAK,
    StraightFlush,
}

impl Shape {
    /// Dense category number of this shape within a combination size.
    ///
    /// Returns `None` for shapes the size cannot realize; callers only
    /// ever ask for shapes the evaluator actually detected at that size.
    pub fn category(self, n: usize) -> Option<u8> {
        let table: &[Shape] = match n {
            2 => &[Shape::HighCard, Shape::OnePair],
            3 => &[Shape::HighCard, Shape::OnePair, Shape::ThreeOAK],
            4 => &[
                Shape::HighCard,
                Shape::OnePair,
                Shape::TwoPair,
                Shape::ThreeOAK,
                Shape::FourOAK,
            ],
            5 => &[
                Shape::HighCard,
                Shape::OnePair,
                Shape::TwoPair,
                Shape::ThreeOAK,
                Shape::Straight,
                Shape::Flush,
                Shape::FullHouse,
                Shape::FourOAK,
                Shape::StraightFlush,
            ],
            _ => &[],
        };
        table
            .iter()
            .position(|s| *s == self)
            .map(|i| i as u8)
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Shape::HighCard => "High Card",
                Shape::OnePair => "One Pair",
                Shape::TwoPair => "Two Pair",
                Shape::ThreeOAK => "Three of a Kind",
                Shape::Straight => "Straight",
                Shape::Flush => "Flush",
                Shape::FullHouse => "Full House",
                Shape::FourOAK => "Four of a Kind",
                Shape::StraightFlush => "Straight Flush",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_per_size() {
        assert_eq!(Shape::OnePair.category(2), Some(1));
        assert_eq!(Shape::ThreeOAK.category(3), Some(2));
        assert_eq!(Shape::FourOAK.category(4), Some(4));
        assert_eq!(Shape::StraightFlush.category(5), Some(8));
    }

    #[test]
    fn unrealizable_shapes() {
        assert_eq!(Shape::TwoPair.category(2), None);
        assert_eq!(Shape::Flush.category(4), None);
        assert_eq!(Shape::Straight.category(3), None);
    }

    #[test]
    fn straight_flush_beats_quads_at_five() {
        assert!(Shape::StraightFlush.category(5) > Shape::FourOAK.category(5));
    }
}
