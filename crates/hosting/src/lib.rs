//! WebSocket room hosting infrastructure.
//!
//! This crate provides the server-side machinery for hosting live melee
//! rooms over WebSocket connections: the room registry, per-room session
//! tracking, the client bridge loop, and the autosave sweep.
//!
//! ## Core Types
//!
//! - [`Arena`] — Central registry of live rooms, lazily loaded from the store
//! - [`HostedRoom`] — One room's exclusive scope: state + sessions under one lock
//! - [`SessionHub`] — Connection-to-player bindings and message fan-out
//!
//! ## Lock hierarchy
//!
//! The registry lock is held only while locating or inserting a room;
//! each room's own lock serializes all further mutation and every
//! projection taken for broadcast. Persistence writes happen after the
//! room lock is released.
mod arena;
mod autosave;
mod bridge;
mod hub;
mod room;

pub use arena::*;
pub use autosave::*;
pub use bridge::*;
pub use hub::*;
pub use room::*;
