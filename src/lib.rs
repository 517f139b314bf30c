pub mod cli;
pub mod engine;
pub mod error;
pub mod model;
pub mod output;
pub mod reindex;
pub mod repl;
pub mod store;
pub mod view;
