use super::play::Play;

/// Picks the winning play among one table's pending plays.
///
/// The winner holds the maximal `(category, tiebreak)` strength; among
/// strength-equal plays the smallest `placed_seq` wins, so the earliest
/// submission takes the tie deterministically. Returns the index into
/// the slice, or `None` for an empty table.
pub fn contest(plays: &[Play]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, play) in plays.iter().enumerate() {
        best = match best {
            None => Some(i),
            Some(b) => {
                let incumbent = &plays[b];
                if play.strength > incumbent.strength {
                    Some(i)
                } else if play.strength == incumbent.strength
                    && play.placed_seq < incumbent.placed_seq
                {
                    Some(i)
                } else {
                    Some(b)
                }
            }
        };
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;
    use melee_cards::Card;
    use melee_cards::Face;
    use melee_cards::Strength;

    fn play(seq: u64, combo: &str) -> Play {
        let cards = combo
            .split_whitespace()
            .enumerate()
            .map(|(i, s)| Card::new(seq * 10 + i as u64, Face::try_from(s).unwrap()))
            .collect::<Vec<_>>();
        let faces = cards.iter().map(|c| c.face).collect::<Vec<_>>();
        Play {
            pid: format!("p{}", seq),
            table: Table::try_from("T1").unwrap(),
            strength: Strength::try_from(faces.as_slice()).unwrap(),
            cards,
            placed_seq: seq,
            placed_ms: 0,
        }
    }

    #[test]
    fn empty_table_has_no_winner() {
        assert_eq!(contest(&[]), None);
    }

    #[test]
    fn stronger_play_wins_regardless_of_order() {
        let plays = vec![play(1, "K♠ K♥"), play(2, "A♠ A♥")];
        assert_eq!(contest(&plays), Some(1));
    }

    #[test]
    fn equal_strength_goes_to_earliest_seq() {
        let plays = vec![play(2, "Q♠ Q♥"), play(1, "Q♦ Q♣")];
        assert_eq!(contest(&plays), Some(1));
    }

    #[test]
    fn mixed_sizes_compare_by_category_then_kicks() {
        // five-card straight (cat 4) over four-card trips (cat 3)
        let plays = vec![play(1, "5♠ 5♥ 5♦ 2♣"), play(2, "2♠ 3♥ 4♦ 5♣ 6♠")];
        assert_eq!(contest(&plays), Some(1));
    }
}
