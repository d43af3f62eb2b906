//! Assembly of rendered chapters into manual sections, and standalone
//! fragment rendering.
use std::path::{Path, PathBuf};

use log::debug;
use rayon::prelude::*;

use crate::{
  converter::{DocBookConverter, render_markdown},
  error::{ManualError, RenderError},
  options::DocBookOptions,
  types::{RootTag, TitlePolicy},
  utils::quote_attr,
};

/// A section of the manual and the chapters rendered into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedSection {
  pub id:       Option<String>,
  pub chapters: Vec<String>,
}

impl RenderedSection {
  #[must_use]
  pub const fn new(id: Option<String>) -> Self {
    Self {
      id,
      chapters: Vec::new(),
    }
  }

  fn open_tag(&self) -> String {
    match &self.id {
      Some(id) => format!("<section id={}>", quote_attr(id)),
      None => "<section>".to_string(),
    }
  }
}

/// A manual made of sections of chapters, serialized once by
/// [`Manual::finalize`].
#[derive(Debug, Clone, Default)]
pub struct Manual {
  converter: DocBookConverter,
  sections:  Vec<RenderedSection>,
}

impl Manual {
  #[must_use]
  pub const fn new(options: DocBookOptions) -> Self {
    Self {
      converter: DocBookConverter::new(options, TitlePolicy::CHAPTER),
      sections:  Vec::new(),
    }
  }

  /// Start a new, empty section. Chapters added afterwards go into it.
  pub fn begin_section(&mut self, id: Option<String>) {
    debug!("Beginning section {}", id.as_deref().unwrap_or("<no id>"));
    self.sections.push(RenderedSection::new(id));
  }

  /// Render a chapter into the current section.
  ///
  /// # Errors
  ///
  /// Returns [`ManualError::NoActiveSection`] when no section has been
  /// begun, or [`ManualError::Chapter`] when rendering fails. Nothing is
  /// appended on failure.
  pub fn add_chapter(&mut self, path: &Path) -> Result<(), ManualError> {
    let Some(section) = self.sections.last_mut() else {
      return Err(ManualError::NoActiveSection);
    };
    let chapter = render_chapter(&self.converter, path)?;
    section.chapters.push(chapter);
    Ok(())
  }

  /// Begin a section and render all of its chapters.
  ///
  /// Chapters are rendered in parallel and kept in the given order. When
  /// several chapters fail, the first failing one in that order is
  /// reported, and the section is not added.
  ///
  /// # Errors
  ///
  /// Returns [`ManualError::Chapter`] for the first chapter that fails.
  pub fn add_section<P>(
    &mut self,
    id: Option<String>,
    chapters: &[P],
  ) -> Result<(), ManualError>
  where
    P: AsRef<Path> + Sync,
  {
    let converter = &self.converter;
    let rendered = chapters
      .par_iter()
      .map(|path| render_chapter(converter, path.as_ref()))
      .collect::<Vec<_>>()
      .into_iter()
      .collect::<Result<Vec<_>, _>>()?;

    let mut section = RenderedSection::new(id);
    section.chapters = rendered;
    self.sections.push(section);
    Ok(())
  }

  #[must_use]
  pub fn sections(&self) -> &[RenderedSection] {
    &self.sections
  }

  /// Serialize every section, in insertion order, joined by newlines.
  #[must_use]
  pub fn finalize(&self) -> String {
    let mut parts = Vec::new();
    for section in &self.sections {
      parts.push(section.open_tag());
      parts.extend(section.chapters.iter().cloned());
      parts.push("</section>".to_string());
    }
    parts.join("\n")
  }
}

fn render_chapter(
  converter: &DocBookConverter,
  path: &Path,
) -> Result<String, ManualError> {
  converter
    .render_file(path)
    .map_err(|source| ManualError::Chapter {
      path: path.to_path_buf(),
      source,
    })
}

/// Renders single files as standalone chapter or section fragments.
#[derive(Debug, Clone, Default)]
pub struct FragmentConverter {
  options: DocBookOptions,
}

impl FragmentConverter {
  #[must_use]
  pub const fn new(options: DocBookOptions) -> Self {
    Self { options }
  }

  /// Render `path` with its title heading as a `tag` root element.
  ///
  /// # Errors
  ///
  /// Returns [`ManualError::Fragment`] if the file cannot be read or
  /// rendered.
  pub fn convert(
    &self,
    path: &Path,
    tag: RootTag,
  ) -> Result<String, ManualError> {
    debug!("Rendering {tag} fragment {}", path.display());
    std::fs::read_to_string(path)
      .map_err(RenderError::from)
      .and_then(|markdown| {
        render_markdown(&markdown, &self.options, TitlePolicy::fragment(tag))
      })
      .map_err(|source| ManualError::Fragment {
        kind: tag,
        path: path.to_path_buf(),
        source,
      })
  }
}

/// An output file and the source rendered into it as a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentTarget {
  pub output: PathBuf,
  pub input:  PathBuf,
  pub tag:    RootTag,
}
