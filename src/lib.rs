pub mod analyzers;
pub mod config;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod source;
