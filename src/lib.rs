pub mod applier;
pub mod artifacts;
pub mod cli;
pub mod config;
pub mod docblock;
pub mod error;
pub mod events;
pub mod exit;
pub mod generator;
pub mod item;
pub mod lang;
pub mod marker;
pub mod normalize;
pub mod offset;
pub mod pipeline;
pub mod placeholder;
pub mod prompt;
pub mod reporting;
pub mod tokens;
pub mod tree;
