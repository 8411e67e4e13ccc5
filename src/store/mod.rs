// SPDX-License-Identifier: MIT

//! Roster persistence layer (flat JSON file).

pub mod roster;

pub use roster::RosterStore;
