//! Application layer shared by the reelstats frontends: data-directory
//! settings, the post-processing transform, and the analytical table.

pub mod analytical;
pub mod error;
pub mod settings;
pub mod transform;

pub use analytical::{read_analytical, write_analytical};
pub use error::LibError;
pub use settings::{AppConfig, DataDirSource, DataPaths};
pub use transform::{PrepareSummary, fix_name_suffixes, prepare, run_prepare};
