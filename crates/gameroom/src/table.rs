use super::error::RoomError;
use melee_core::N_TABLES;

/// One of the fixed contest slots within a room, named `T1`..`T30`.
///
/// Tables are independent of each other within a round: each gathers
/// its own pending plays and crowns its own winner at resolution.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Table(u8);

impl Table {
    /// All contest slots in order.
    pub fn all() -> impl Iterator<Item = Table> {
        (1..=N_TABLES as u8).map(Table)
    }
    /// 1-based slot index.
    pub fn index(&self) -> u8 {
        self.0
    }
}

/// str isomorphism
impl TryFrom<&str> for Table {
    type Error = RoomError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.trim()
            .strip_prefix('T')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=N_TABLES as u8).contains(n))
            .map(Table)
            .ok_or_else(|| RoomError::BadTable(s.to_string()))
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "T{}", self.0)
    }
}

impl serde::Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Table::try_from(s.as_str()).map_err(serde::de::Error::custom)
    }
}
