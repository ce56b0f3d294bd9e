mod bridge;
mod config;
mod error;
mod listener;
mod oft;
mod options;
mod units;

pub use {bridge::*, config::*, error::*, listener::*, oft::*, options::*, units::*};
