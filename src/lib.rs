pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod inherit;
pub mod io;
pub mod matcher;
pub mod normalize;
pub mod table;
