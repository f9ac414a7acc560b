//! Rebuilds, from curl's git history, when each command line option (long
//! name, short letter, argument type) existed, and emits the result as a
//! generated JS table.
//!
//! The stages are: [`extract`] one revision's `aliases[]` table, [`normalize`]
//! it, [`reconcile`] identities across the whole timeline, and [`render`] the
//! outcome. [`pipeline`] wires them to git ([`gitio`], [`history`]) and the
//! on-disk [`cache`].

pub mod cache;
pub mod cli;
pub mod error;
pub mod extract;
pub mod gitio;
pub mod history;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod preflight;
pub mod reconcile;
pub mod render;
pub mod util;
