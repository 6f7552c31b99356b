//! Read-only content library for encounters.
//!
//! This crate houses the data the encounter draws from but never owns:
//! - Bestiary of monster records (data-driven via RON)
//! - Campaign roster of player characters (data-driven via RON)
//! - Display-name disambiguation for repeated monsters ("Goblin 2")
//!
//! Content is consumed by runtime oracles; the encounter only keeps the
//! `entity_id` of the record a combatant came from.

pub mod naming;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use naming::{disambiguate_name, spawn_monster};

#[cfg(feature = "loaders")]
pub use loaders::{BestiaryLoader, ContentFactory, LoadResult, RosterLoader};
