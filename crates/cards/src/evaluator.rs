use super::face::Face;
use super::kicks::Kickers;
use super::rank::Rank;
use super::shape::Shape;
use melee_core::MAX_COMBO;
use melee_core::MIN_COMBO;

/// Derives the structural facts of a combination: rank groups, flush,
/// and straight. [`Strength`] consumes these to pick a [`Shape`] and
/// build the tie-break vector.
///
/// Ranking derivation: group by rank with counts, sort groups by
/// (count desc, rank desc). Flush means all suits identical; a straight
/// is a run of distinct consecutive ranks spanning the whole
/// combination, with the five-card wheel (A-2-3-4-5) keyed on the Five.
/// Both are ranked only at five cards.
///
/// [`Strength`]: super::strength::Strength
#[derive(Debug)]
pub struct Evaluator {
    n: usize,
    ranks: Vec<Rank>,        // descending
    groups: Vec<(u8, Rank)>, // (count, rank), count desc then rank desc
    flush: bool,
    straight: Option<Rank>,
}

impl From<&[Face]> for Evaluator {
    fn from(faces: &[Face]) -> Self {
        let n = faces.len();
        let mut ranks = faces.iter().map(|f| f.rank).collect::<Vec<_>>();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let mut counts = [0u8; 13];
        for rank in &ranks {
            counts[u8::from(*rank) as usize] += 1;
        }
        let mut groups = counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(i, c)| (*c, Rank::from(i as u8)))
            .collect::<Vec<_>>();
        groups.sort_unstable_by(|a, b| b.cmp(a));
        let flush = faces.iter().all(|f| f.suit == faces[0].suit);
        let straight = Self::find_straight(&ranks, n);
        Self {
            n,
            ranks,
            groups,
            flush,
            straight,
        }
    }
}

impl Evaluator {
    pub fn size(&self) -> usize {
        self.n
    }
    /// All ranks in the combination, descending.
    pub fn ranks(&self) -> &[Rank] {
        &self.ranks
    }
    /// Highest card of a straight, if the combination is one.
    /// The wheel reports Five, not Ace.
    pub fn straight_high(&self) -> Option<Rank> {
        self.straight
    }
    pub fn is_flush(&self) -> bool {
        self.flush
    }
    /// Strongest detected shape for this combination's size.
    pub fn find_shape(&self) -> Shape {
        let quads = self.count_of(0) == 4;
        let trips = self.count_of(0) == 3;
        let pair = self.count_of(0) == 2;
        let boat = trips && self.count_of(1) == 2;
        let pairs = pair && self.count_of(1) == 2;
        match self.n {
            5 => match () {
                _ if self.straight.is_some() && self.flush => Shape::StraightFlush,
                _ if quads => Shape::FourOAK,
                _ if boat => Shape::FullHouse,
                _ if self.flush => Shape::Flush,
                _ if self.straight.is_some() => Shape::Straight,
                _ if trips => Shape::ThreeOAK,
                _ if pairs => Shape::TwoPair,
                _ if pair => Shape::OnePair,
                _ => Shape::HighCard,
            },
            4 => match () {
                _ if quads => Shape::FourOAK,
                _ if trips => Shape::ThreeOAK,
                _ if pairs => Shape::TwoPair,
                _ if pair => Shape::OnePair,
                _ => Shape::HighCard,
            },
            3 => match () {
                _ if trips => Shape::ThreeOAK,
                _ if pair => Shape::OnePair,
                _ => Shape::HighCard,
            },
            _ => match () {
                _ if pair => Shape::OnePair,
                _ => Shape::HighCard,
            },
        }
    }
    /// Tie-break vector for a detected shape: repeated-group ranks in
    /// descending significance, then remaining kickers descending.
    pub fn find_kickers(&self, shape: Shape) -> Kickers {
        match shape {
            Shape::StraightFlush | Shape::Straight => {
                Kickers::from(vec![self.straight.expect("straight shape implies run")])
            }
            Shape::Flush | Shape::HighCard => Kickers::from(self.ranks.clone()),
            Shape::FourOAK => self.grouped(1),
            Shape::FullHouse => Kickers::from(vec![self.groups[0].1, self.groups[1].1]),
            Shape::ThreeOAK => self.grouped(1),
            Shape::TwoPair => self.grouped(2),
            Shape::OnePair => self.grouped(1),
        }
    }
    /// Count of the i-th largest rank group, 0 when absent.
    fn count_of(&self, i: usize) -> u8 {
        self.groups.get(i).map(|(c, _)| *c).unwrap_or(0)
    }
    /// The first `heads` group ranks, then every remaining rank descending.
    fn grouped(&self, heads: usize) -> Kickers {
        let lead = self
            .groups
            .iter()
            .take(heads)
            .map(|(_, r)| *r)
            .collect::<Vec<_>>();
        let rest = self
            .groups
            .iter()
            .skip(heads)
            .map(|(_, r)| *r)
            .collect::<Vec<_>>();
        Kickers::from(lead.into_iter().chain(rest).collect::<Vec<_>>())
    }
    fn find_straight(ranks: &[Rank], n: usize) -> Option<Rank> {
        if n < MIN_COMBO || n > MAX_COMBO {
            return None;
        }
        let mut distinct = ranks.iter().copied().map(u8::from).collect::<Vec<_>>();
        distinct.dedup();
        if distinct.len() != n {
            return None;
        }
        let hi = distinct[0];
        let lo = distinct[n - 1];
        if hi - lo == (n - 1) as u8 {
            return Some(Rank::from(hi));
        }
        // the wheel: A-2-3-4-5 keys on the Five
        if n == 5 && distinct == [12, 3, 2, 1, 0] {
            return Some(Rank::Five);
        }
        None
    }
}
