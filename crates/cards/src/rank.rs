use serde::Deserialize;
use serde::Serialize;

/// One of 13 ordered card ranks, Two lowest and Ace highest.
///
/// The numeric value `0..13` is the tie-break currency of the whole
/// engine: kickers, straight highs, and snapshot encodings all speak
/// in `u8::from(rank)`.
#[derive(Debug, Default, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[derive(Serialize, Deserialize)]
pub enum Rank {
    #[default]
    #[serde(rename = "2")]
    Two = 0,
    #[serde(rename = "3")]
    Three = 1,
    #[serde(rename = "4")]
    Four = 2,
    #[serde(rename = "5")]
    Five = 3,
    #[serde(rename = "6")]
    Six = 4,
    #[serde(rename = "7")]
    Seven = 5,
    #[serde(rename = "8")]
    Eight = 6,
    #[serde(rename = "9")]
    Nine = 7,
    #[serde(rename = "10")]
    Ten = 8,
    #[serde(rename = "J")]
    Jack = 9,
    #[serde(rename = "Q")]
    Queen = 10,
    #[serde(rename = "K")]
    King = 11,
    #[serde(rename = "A")]
    Ace = 12,
}

impl Rank {
    /// All 13 ranks from lowest to highest.
    pub const fn all() -> [Rank; 13] {
        [
            Rank::Two,
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Six,
            Rank::Seven,
            Rank::Eight,
            Rank::Nine,
            Rank::Ten,
            Rank::Jack,
            Rank::Queen,
            Rank::King,
            Rank::Ace,
        ]
    }
}

/// u8 isomorphism
impl From<u8> for Rank {
    fn from(n: u8) -> Rank {
        match n {
            0 => Rank::Two,
            1 => Rank::Three,
            2 => Rank::Four,
            3 => Rank::Five,
            4 => Rank::Six,
            5 => Rank::Seven,
            6 => Rank::Eight,
            7 => Rank::Nine,
            8 => Rank::Ten,
            9 => Rank::Jack,
            10 => Rank::Queen,
            11 => Rank::King,
            12 => Rank::Ace,
            _ => unreachable!("invalid rank u8: {}", n),
        }
    }
}
impl From<Rank> for u8 {
    fn from(r: Rank) -> u8 {
        r as u8
    }
}

/// str isomorphism
/// accepts "10" and "T" for ten, and "1" as an alias for Ace
impl TryFrom<&str> for Rank {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_uppercase().as_str() {
            "2" => Ok(Rank::Two),
            "3" => Ok(Rank::Three),
            "4" => Ok(Rank::Four),
            "5" => Ok(Rank::Five),
            "6" => Ok(Rank::Six),
            "7" => Ok(Rank::Seven),
            "8" => Ok(Rank::Eight),
            "9" => Ok(Rank::Nine),
            "10" | "T" => Ok(Rank::Ten),
            "J" => Ok(Rank::Jack),
            "Q" => Ok(Rank::Queen),
            "K" => Ok(Rank::King),
            "1" | "A" => Ok(Rank::Ace),
            _ => Err(format!("invalid rank str: {}", s)),
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Rank::Two => "2",
                Rank::Three => "3",
                Rank::Four => "4",
                Rank::Five => "5",
                Rank::Six => "6",
                Rank::Seven => "7",
                Rank::Eight => "8",
                Rank::Nine => "9",
                Rank::Ten => "10",
                Rank::Jack => "J",
                Rank::Queen => "Q",
                Rank::King => "K",
                Rank::Ace => "A",
            }
        )
    }
}
