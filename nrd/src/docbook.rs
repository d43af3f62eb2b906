//! Building DocBook output files.
use std::{fs, path::Path};

use color_eyre::eyre::{Context, Result};
use log::info;
use nrd_docbook::{
  DocBookOptions,
  FragmentConverter,
  FragmentTarget,
  Manual,
  load_manpage_urls,
};

use crate::layout::SectionSpec;

fn load_options(manpage_urls: &Path) -> Result<DocBookOptions> {
  let urls = load_manpage_urls(manpage_urls)?;
  Ok(DocBookOptions::with_manpage_urls(urls))
}

/// Render every section and write the assembled manual to `outfile`.
///
/// Nothing is written unless every chapter renders.
///
/// # Errors
///
/// Returns an error if the URL mapping cannot be loaded, any chapter fails
/// to render, or the output cannot be written.
pub fn build_section_manual(
  manpage_urls: &Path,
  outfile: &Path,
  sections: &[SectionSpec],
) -> Result<()> {
  let mut manual = Manual::new(load_options(manpage_urls)?);

  for section in sections {
    manual.add_section(section.id.clone(), &section.chapters)?;
  }

  let chapter_count: usize = manual
    .sections()
    .iter()
    .map(|section| section.chapters.len())
    .sum();

  fs::write(outfile, manual.finalize()).wrap_err_with(|| {
    format!("Failed to write output file: {}", outfile.display())
  })?;

  info!(
    "Wrote {} section(s) with {chapter_count} chapter(s) to {}",
    manual.sections().len(),
    outfile.display()
  );
  Ok(())
}

/// Render and write each fragment target in turn, stopping at the first
/// failure.
///
/// # Errors
///
/// Returns an error if the URL mapping cannot be loaded, a fragment fails
/// to render, or an output cannot be written.
pub fn build_fragments(
  manpage_urls: &Path,
  targets: &[FragmentTarget],
) -> Result<()> {
  let converter = FragmentConverter::new(load_options(manpage_urls)?);

  for target in targets {
    let converted = converter.convert(&target.input, target.tag)?;

    if let Some(parent) = target.output.parent() {
      fs::create_dir_all(parent).wrap_err_with(|| {
        format!("Failed to create directory: {}", parent.display())
      })?;
    }
    fs::write(&target.output, converted).wrap_err_with(|| {
      format!("Failed to write output file: {}", target.output.display())
    })?;

    info!(
      "Wrote {} fragment {}",
      target.tag,
      target.output.display()
    );
  }

  Ok(())
}
