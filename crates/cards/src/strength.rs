use super::error::EvalError;
use super::evaluator::Evaluator;
use super::face::Face;
use super::kicks::Kickers;
use super::shape::Shape;
use melee_core::MAX_COMBO;
use melee_core::MIN_COMBO;
use serde::Deserialize;
use serde::Serialize;

/// A fully-evaluated combination strength.
///
/// Ordering is lexicographic: dense per-size category first, then the
/// tie-break vector. Category numbers are only meaningful relative to
/// other plays on the same table, which is the only place strengths are
/// ever compared; the shape is carried for the human label.
///
/// Construction is deterministic: the same multiset of faces always
/// yields an identical strength.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
pub struct Strength {
    category: u8,
    kicks: Kickers,
    shape: Shape,
}

impl TryFrom<&[Face]> for Strength {
    type Error = EvalError;
    fn try_from(faces: &[Face]) -> Result<Self, Self::Error> {
        let n = faces.len();
        if n < MIN_COMBO || n > MAX_COMBO {
            return Err(EvalError::InvalidSize(n));
        }
        let evaluator = Evaluator::from(faces);
        let shape = evaluator.find_shape();
        let kicks = evaluator.find_kickers(shape);
        let category = shape
            .category(n)
            .expect("detected shape is realizable at its size");
        Ok(Self {
            category,
            kicks,
            shape,
        })
    }
}

impl Strength {
    pub fn category(&self) -> u8 {
        self.category
    }
    pub fn kicks(&self) -> &Kickers {
        &self.kicks
    }
    pub fn shape(&self) -> Shape {
        self.shape
    }
    /// Human label, e.g. "Two Pair K 2 A".
    pub fn label(&self) -> String {
        format!("{} {}", self.shape, self.kicks).trim_end().to_string()
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<16} {}", self.shape.to_string(), self.kicks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strength(s: &str) -> Strength {
        let faces = s
            .split_whitespace()
            .map(|t| Face::try_from(t).unwrap())
            .collect::<Vec<_>>();
        Strength::try_from(faces.as_slice()).unwrap()
    }

    #[test]
    fn straight_flush_beats_quads() {
        assert!(strength("5♠ 6♠ 7♠ 8♠ 9♠") > strength("A♠ A♥ A♦ A♣ K♠"));
    }

    #[test]
    fn wheel_is_the_weakest_straight() {
        let wheel = strength("A♠ 2♥ 3♦ 4♣ 5♠");
        assert_eq!(wheel.shape(), Shape::Straight);
        assert_eq!(wheel.kicks().values(), vec![3]); // Five, not Ace
        assert!(wheel < strength("2♠ 3♥ 4♦ 5♣ 6♠"));
    }

    #[test]
    fn deterministic() {
        let a = strength("K♠ K♥ Q♦ 2♣");
        let b = strength("K♠ K♥ Q♦ 2♣");
        assert_eq!(a, b);
    }

    #[test]
    fn kickers_break_category_ties() {
        assert!(strength("A♠ A♥") > strength("K♠ K♥"));
        assert!(strength("A♠ K♥ 3♦") > strength("A♣ Q♥ J♦"));
    }

    #[test]
    fn pair_beats_high_card_at_every_size() {
        assert!(strength("2♠ 2♥") > strength("A♠ K♥"));
        assert!(strength("2♠ 2♥ 3♦") > strength("A♠ K♥ Q♦"));
        assert!(strength("2♠ 2♥ 3♦ 4♣") > strength("A♠ K♥ Q♦ J♣"));
    }

    #[test]
    fn size_bounds() {
        let one = vec![Face::try_from("A♠").unwrap()];
        assert_eq!(
            Strength::try_from(one.as_slice()),
            Err(EvalError::InvalidSize(1))
        );
        let six = "2♠ 3♠ 4♠ 5♠ 6♠ 7♠"
            .split_whitespace()
            .map(|t| Face::try_from(t).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(
            Strength::try_from(six.as_slice()),
            Err(EvalError::InvalidSize(6))
        );
    }

    #[test]
    fn full_house_orders_trips_over_pair() {
        let boat = strength("Q♠ Q♥ Q♦ 9♣ 9♠");
        assert_eq!(boat.shape(), Shape::FullHouse);
        assert!(boat > strength("J♠ J♥ J♦ A♣ A♠"));
    }
}
