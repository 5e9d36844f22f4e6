//! Terminal front end for the sliding-tile merge puzzle: config, key
//! decoding, the session object, rendering and the interactive loop.

pub mod app;
pub mod config;
pub mod input;
pub mod render;
pub mod session;
pub mod terminal;
