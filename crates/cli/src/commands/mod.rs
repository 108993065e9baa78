//! Command implementations

pub mod add;
pub mod config;
pub mod doctor;
pub mod list;
pub mod outfits;
pub mod remove;
pub mod suggest;
