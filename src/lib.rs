pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod render;
pub mod roster;
pub mod spawn;
