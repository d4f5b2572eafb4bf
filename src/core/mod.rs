//! Viewport core: geography utility, bounds, the viewport box and its builder.

pub mod bounds;
pub mod builder;
pub mod config;
pub mod constants;
pub mod geo;
pub mod viewport;
