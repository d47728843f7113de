mod config;
mod islands;
mod layout;

pub use config::*;
pub use islands::*;
pub use layout::*;

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("{} in {}", .source, .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io {
        #[from]
        source: io::Error,
    },
}
