//! Skycycle - deterministic day/night and weather simulation for shared 3D worlds
//!
//! Every running instance derives identical sun/moon positions and weather
//! state from nothing but the wall clock and its configuration, so clients
//! stay in agreement without exchanging any synchronization messages.

pub mod atmosphere;
pub mod core;
pub mod scene;
pub mod weather;
