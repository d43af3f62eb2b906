//! # nrd-docbook
//!
//! Renders Nixpkgs-flavored Markdown manual chapters to DocBook 5, and
//! assembles them either into manual sections or into standalone chapter and
//! section fragments.
//!
//! ## Quick Start
//!
//! ```rust
//! use nrd_docbook::{DocBookConverter, DocBookOptions, TitlePolicy};
//!
//! let converter =
//!   DocBookConverter::new(DocBookOptions::default(), TitlePolicy::CHAPTER);
//! let xml = converter.render("# Hello\n\nSome *text*.").unwrap();
//! assert!(xml.starts_with("<chapter xmlns="));
//! ```
//!
//! ## Manuals
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use nrd_docbook::{DocBookOptions, Manual};
//!
//! let mut manual = Manual::new(DocBookOptions::default());
//! manual.begin_section(Some("ch-installation".to_string()));
//! manual.add_chapter(Path::new("installation.md")).unwrap();
//! let xml = manual.finalize();
//! ```
//!
//! The first level-1 heading of a chapter becomes its root element. A second
//! level-1 heading is an error; deeper headings become nested `<section>`
//! elements.

pub mod converter;
pub mod error;
pub mod manual;
pub mod options;
pub mod renderer;
pub mod types;
pub mod utils;

pub use crate::{
  converter::{DocBookConverter, render_markdown},
  error::{ManpageUrlsError, ManualError, RenderError},
  manual::{FragmentConverter, FragmentTarget, Manual, RenderedSection},
  options::{DocBookOptions, DocBookOptionsBuilder},
  types::{RootTag, SourceMap, TitlePolicy},
  utils::load_manpage_urls,
};
