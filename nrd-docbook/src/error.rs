use std::{io, path::PathBuf};

use thiserror::Error;

use crate::types::{RootTag, SourceMap};

/// Failure while rendering a single Markdown document.
#[derive(Debug, Error)]
pub enum RenderError {
  #[error(
    "only one title heading (# [text...]) allowed per manual chapter but \
     found a second in lines {map}. please remove all such headings except \
     the first, split your chapters, or demote the subsequent headings to \
     (##) or lower."
  )]
  DuplicateTitle { map: SourceMap },

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),
}

/// Failure while assembling a manual or a standalone fragment.
#[derive(Debug, Error)]
pub enum ManualError {
  #[error("failed to render manual chapter {}", path.display())]
  Chapter {
    path:   PathBuf,
    #[source]
    source: RenderError,
  },

  #[error("failed to render manual {kind} {}", path.display())]
  Fragment {
    kind:   RootTag,
    path:   PathBuf,
    #[source]
    source: RenderError,
  },

  #[error("no active section: begin a section before adding chapters")]
  NoActiveSection,
}

/// Failure while loading the man page URL mapping.
#[derive(Debug, Error)]
pub enum ManpageUrlsError {
  #[error("failed to read manpage URL mapping {}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("invalid manpage URL mapping {}", path.display())]
  InFile {
    path:   PathBuf,
    #[source]
    source: Box<Self>,
  },

  #[error("malformed JSON: {0}")]
  Json(#[from] serde_json::Error),

  #[error("expected a JSON object mapping manpage names to URLs")]
  NotAnObject,

  #[error("URL for manpage {key:?} is not a string")]
  NotAString { key: String },
}

impl ManpageUrlsError {
  /// Attach the file the mapping was read from.
  #[must_use]
  pub fn at(self, path: &std::path::Path) -> Self {
    Self::InFile {
      path:   path.to_path_buf(),
      source: Box::new(self),
    }
  }
}
