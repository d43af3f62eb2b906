use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors in describing what to render, detected before any rendering.
#[derive(Debug, Error)]
pub enum LayoutError {
  #[error("{directive}: no active section; pass --section first")]
  NoActiveSection { directive: &'static str },

  #[error("failed to read layout file {}", path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse layout file {}", path.display())]
  Parse {
    path:   PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("subcommand matches for {0} are missing")]
  MissingMatches(&'static str),
}
