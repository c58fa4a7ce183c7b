use super::rank::Rank;
use serde::Deserialize;
use serde::Serialize;

/// Ordered tie-breaking rank vector.
///
/// Repeated-group ranks come first in descending significance, then the
/// remaining kickers sorted descending. Within one (size, category) cell
/// every vector has the same length, so the derived lexicographic
/// ordering is exactly the tie-break the resolver needs.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
pub struct Kickers(Vec<Rank>);

impl Kickers {
    pub fn ranks(&self) -> &[Rank] {
        &self.0
    }
    /// Tie-break vector as raw rank values, for snapshots and the wire.
    pub fn values(&self) -> Vec<u8> {
        self.0.iter().copied().map(u8::from).collect()
    }
}

impl From<Vec<Rank>> for Kickers {
    fn from(ranks: Vec<Rank>) -> Self {
        Self(ranks)
    }
}

impl std::fmt::Display for Kickers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for rank in &self.0 {
            write!(f, "{} ", rank)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicographic() {
        let high = Kickers::from(vec![Rank::Ace, Rank::Two]);
        let low = Kickers::from(vec![Rank::King, Rank::Queen]);
        assert!(high > low);
    }

    #[test]
    fn prefix_is_lesser() {
        let short = Kickers::from(vec![Rank::King]);
        let long = Kickers::from(vec![Rank::King, Rank::Two]);
        assert!(short < long);
    }
}
