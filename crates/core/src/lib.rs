//! Domain types and pure logic for the SoundMood backend.
//!
//! Nothing in this crate touches the network or the database; the `db`,
//! `pipeline` and `api` crates build on these definitions.

pub mod account;
pub mod analysis;
pub mod error;
pub mod journal;
pub mod music;
pub mod pagination;
pub mod types;
pub mod uploads;
