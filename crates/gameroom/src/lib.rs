//! Room state and round resolution for live melee games.
//!
//! A room holds up to six players, each with a private hand of
//! identified cards. During a round, players commit 2–5 card
//! combinations onto any of the thirty contested table slots; once every
//! connected player votes ready (or an authority forces it), the round
//! resolves: each table's strongest play wins, every committed card is
//! spent, and a summary lands in the battle history.
//!
//! ## Core Types
//!
//! - [`RoomState`] — The aggregate: players, pending plays, counters, history
//! - [`Play`] — An immutable, strength-ranked submission onto one table
//! - [`Table`] — One of the fixed contest slots (`T1`..`T30`)
//! - [`RoundSummary`] — Per-round record of winners and losers
//!
//! ## Protocol
//!
//! - [`ClientAction`] — Closed tagged-variant inbound actions
//! - [`ServerMessage`] — Outbound wire messages
//! - [`RoomView`] — Per-viewer projection of the room
//!
//! All mutation happens under the room's exclusive scope, owned by the
//! hosting layer; this crate is purely synchronous.
mod error;
mod history;
mod play;
mod player;
mod protocol;
mod resolve;
mod room;
mod table;
mod view;

pub use error::*;
pub use history::*;
pub use play::*;
pub use player::*;
pub use protocol::*;
pub use resolve::*;
pub use room::*;
pub use table::*;
pub use view::*;
