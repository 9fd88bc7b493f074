pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod table;

pub use config::{Mode, PolicyConfig};
pub use error::FilterError;
pub use filter::MatchPolicy;
pub use pipeline::{run, RunConfig, Summary};
pub use table::{Record, Table};
