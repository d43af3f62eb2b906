//! What to render: manual sections and fragment targets, from the command
//! line or from a TOML layout file.
use std::{
  fs,
  path::{Path, PathBuf},
};

use clap::ArgMatches;
use log::debug;
use nrd_docbook::{FragmentTarget, RootTag};
use serde::Deserialize;

use crate::error::LayoutError;

/// A manual section to render: optional id and chapter files, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SectionSpec {
  #[serde(default)]
  pub id:       Option<String>,
  #[serde(default)]
  pub chapters: Vec<PathBuf>,
}

/// Contents of a layout file.
///
/// ```toml
/// [[section]]
/// id = "ch-installation"
/// chapters = ["installation/obtaining.md", "installation/installing.md"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Layout {
  #[serde(default, rename = "section")]
  pub sections: Vec<SectionSpec>,
}

impl Layout {
  /// Load a layout file. Relative chapter paths are resolved against the
  /// directory containing the file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed.
  pub fn load(path: &Path) -> Result<Self, LayoutError> {
    let content =
      fs::read_to_string(path).map_err(|source| LayoutError::Read {
        path: path.to_path_buf(),
        source,
      })?;
    let mut layout: Self =
      toml::from_str(&content).map_err(|source| LayoutError::Parse {
        path: path.to_path_buf(),
        source,
      })?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    for section in &mut layout.sections {
      for chapter in &mut section.chapters {
        if chapter.is_relative() {
          *chapter = base.join(&*chapter);
        }
      }
    }

    debug!(
      "Loaded {} section(s) from layout {}",
      layout.sections.len(),
      path.display()
    );
    Ok(layout)
  }
}

enum Directive {
  Begin,
  Id(String),
  Chapter(PathBuf),
}

/// Rebuild the section list from `docbook-section` matches, honoring the
/// order in which `--section`, `--section-id` and `--chapters` appeared.
///
/// # Errors
///
/// Returns [`LayoutError::NoActiveSection`] if `--section-id` or
/// `--chapters` appears before the first `--section`.
pub fn sections_from_matches(
  matches: &ArgMatches,
) -> Result<Vec<SectionSpec>, LayoutError> {
  let mut directives: Vec<(usize, Directive)> = Vec::new();

  if let Some(indices) = matches.indices_of("section") {
    directives.extend(indices.map(|idx| (idx, Directive::Begin)));
  }

  if let (Some(values), Some(indices)) = (
    matches.get_many::<String>("section_id"),
    matches.indices_of("section_id"),
  ) {
    directives.extend(
      indices
        .zip(values)
        .map(|(idx, id)| (idx, Directive::Id(id.clone()))),
    );
  }

  if let (Some(values), Some(indices)) = (
    matches.get_many::<PathBuf>("chapters"),
    matches.indices_of("chapters"),
  ) {
    directives.extend(
      indices
        .zip(values)
        .map(|(idx, path)| (idx, Directive::Chapter(path.clone()))),
    );
  }

  directives.sort_by_key(|(idx, _)| *idx);

  let mut sections: Vec<SectionSpec> = Vec::new();
  for (_, directive) in directives {
    match directive {
      Directive::Begin => sections.push(SectionSpec::default()),
      Directive::Id(id) => {
        let section = sections.last_mut().ok_or(
          LayoutError::NoActiveSection {
            directive: "--section-id",
          },
        )?;
        section.id = Some(id);
      },
      Directive::Chapter(path) => {
        let section = sections.last_mut().ok_or(
          LayoutError::NoActiveSection {
            directive: "--chapters",
          },
        )?;
        section.chapters.push(path);
      },
    }
  }

  Ok(sections)
}

/// Pair up `OUTPUT INPUT` values into fragment targets: every chapter
/// first, then every section.
#[must_use]
pub fn fragment_targets(
  chapters: &[PathBuf],
  sections: &[PathBuf],
) -> Vec<FragmentTarget> {
  let pairs = |values: &[PathBuf], tag: RootTag| {
    values
      .chunks_exact(2)
      .map(|pair| {
        FragmentTarget {
          output: pair[0].clone(),
          input: pair[1].clone(),
          tag,
        }
      })
      .collect::<Vec<_>>()
  };

  let mut targets = pairs(chapters, RootTag::Chapter);
  targets.extend(pairs(sections, RootTag::Section));
  targets
}

#[cfg(test)]
mod tests {
  #![allow(
    clippy::expect_used,
    clippy::panic,
    reason = "Fine in tests"
  )]
  use super::*;
  use crate::cli::{Cli, Commands};

  fn section_matches(args: &[&str]) -> Result<Vec<SectionSpec>, LayoutError> {
    let mut argv = vec!["nrd", "docbook-section", "--manpage-urls", "m.json"];
    argv.extend_from_slice(args);
    let (_, matches) =
      Cli::try_parse_with_matches_from(argv).expect("valid arguments");
    let (name, sub) = matches.subcommand().expect("subcommand");
    assert_eq!(name, "docbook-section");
    sections_from_matches(sub)
  }

  #[test]
  fn test_directives_follow_command_line_order() {
    let sections = section_matches(&[
      "out.xml",
      "--section",
      "--chapters",
      "a.md",
      "b.md",
      "--section",
      "--section-id",
      "ch-intro",
      "--chapters",
      "c.md",
    ])
    .expect("sections");

    assert_eq!(sections, vec![
      SectionSpec {
        id:       None,
        chapters: vec![PathBuf::from("a.md"), PathBuf::from("b.md")],
      },
      SectionSpec {
        id:       Some("ch-intro".to_string()),
        chapters: vec![PathBuf::from("c.md")],
      },
    ]);
  }

  #[test]
  fn test_section_takes_no_value() {
    let sections =
      section_matches(&["--section", "out.xml", "--chapters", "a.md"])
        .expect("sections");
    assert_eq!(sections, vec![SectionSpec {
      id:       None,
      chapters: vec![PathBuf::from("a.md")],
    }]);
  }

  #[test]
  fn test_outfile_after_section_is_positional() {
    let (cli, _) = Cli::try_parse_with_matches_from([
      "nrd",
      "docbook-section",
      "--manpage-urls",
      "m.json",
      "--section",
      "out.xml",
      "--chapters",
      "a.md",
    ])
    .expect("valid arguments");
    let Commands::DocbookSection { outfile, .. } = cli.command else {
      panic!("expected docbook-section");
    };
    assert_eq!(outfile, PathBuf::from("out.xml"));
  }

  #[test]
  fn test_repeated_sections_each_begin_one() {
    let sections = section_matches(&[
      "out.xml",
      "--section",
      "--section",
      "--section-id",
      "ch-b",
      "--chapters",
      "b.md",
    ])
    .expect("sections");
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0], SectionSpec::default());
    assert_eq!(sections[1].id.as_deref(), Some("ch-b"));
  }

  #[test]
  fn test_chapters_before_section_is_usage_error() {
    let err = section_matches(&["out.xml", "--chapters", "a.md", "--section"])
      .expect_err("usage error");
    assert!(matches!(err, LayoutError::NoActiveSection {
      directive: "--chapters",
    }));
  }

  #[test]
  fn test_section_id_before_section_is_usage_error() {
    let err = section_matches(&["out.xml", "--section-id", "x"])
      .expect_err("usage error");
    assert!(err.to_string().contains("no active section"));
  }

  #[test]
  fn test_fragment_targets_pair_values() {
    let chapters = vec![
      PathBuf::from("out/a.xml"),
      PathBuf::from("a.md"),
      PathBuf::from("out/b.xml"),
      PathBuf::from("b.md"),
    ];
    let sections = vec![PathBuf::from("out/s.xml"), PathBuf::from("s.md")];
    let targets = fragment_targets(&chapters, &sections);

    assert_eq!(targets.len(), 3);
    assert_eq!(targets[0].tag, RootTag::Chapter);
    assert_eq!(targets[1].input, PathBuf::from("b.md"));
    assert_eq!(targets[2].tag, RootTag::Section);
    assert_eq!(targets[2].output, PathBuf::from("out/s.xml"));
  }

  #[test]
  fn test_layout_resolves_relative_chapters() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir in test");
    let path = dir.path().join("manual.toml");
    fs::write(
      &path,
      "[[section]]\nid = \"ch-a\"\nchapters = [\"a.md\", \"/abs/b.md\"]\n\n\
       [[section]]\nchapters = [\"c.md\"]\n",
    )
    .expect("Failed to write layout in test");

    let layout = Layout::load(&path).expect("layout");
    assert_eq!(layout.sections.len(), 2);
    assert_eq!(layout.sections[0].id.as_deref(), Some("ch-a"));
    assert_eq!(layout.sections[0].chapters[0], dir.path().join("a.md"));
    assert_eq!(layout.sections[0].chapters[1], PathBuf::from("/abs/b.md"));
    assert_eq!(layout.sections[1].id, None);
  }

  #[test]
  fn test_layout_parse_error_names_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir in test");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[[section]\n").expect("Failed to write layout in test");

    let err = Layout::load(&path).expect_err("parse error");
    assert!(matches!(err, LayoutError::Parse { .. }));
    assert!(err.to_string().contains("broken.toml"));
  }
}
