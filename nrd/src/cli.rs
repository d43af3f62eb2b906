use std::{ffi::OsString, path::PathBuf};

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};

/// Command line interface for nrd
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "NRD: render Nixpkgs-flavored Markdown manuals to DocBook"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Number of threads to use for rendering chapters in parallel.
  #[arg(short = 'j', long = "jobs", global = true)]
  pub jobs: Option<usize>,
}

/// All supported subcommands for the nrd CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Render chapters into a sequence of DocBook sections, written to a
  /// single file.
  ///
  /// Sections are described in command line order: `--section` begins a
  /// section, `--section-id` names the current one, and `--chapters` adds
  /// chapter files to it.
  DocbookSection {
    /// Path to manpage URL mappings JSON file.
    #[arg(long = "manpage-urls", required = true)]
    manpage_urls: PathBuf,

    /// File to write the assembled sections to.
    outfile: PathBuf,

    /// TOML file listing sections and their chapters. Its sections come
    /// before any given on the command line.
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Begin a new section. Its id is set with `--section-id`.
    // Value-less in practice; only occurrence indices are read.
    #[arg(
      long,
      num_args = 0..=1,
      require_equals = true,
      default_missing_value = "true",
      hide_possible_values = true,
      action = clap::ArgAction::Append
    )]
    section: Vec<bool>,

    /// Set the id of the current section.
    #[arg(
      long = "section-id",
      value_name = "ID",
      action = clap::ArgAction::Append
    )]
    section_id: Vec<String>,

    /// Chapter files to add to the current section.
    #[arg(
      long,
      num_args = 1..,
      value_name = "PATH",
      action = clap::ArgAction::Append
    )]
    chapters: Vec<PathBuf>,
  },

  /// Render files as standalone chapter or section fragments.
  DocbookFragment {
    /// Path to manpage URL mappings JSON file.
    #[arg(long = "manpage-urls", required = true)]
    manpage_urls: PathBuf,

    /// Render INPUT as a `<chapter>` fragment into OUTPUT (can be specified
    /// multiple times).
    #[arg(
      long,
      num_args = 2,
      value_names = ["OUTPUT", "INPUT"],
      action = clap::ArgAction::Append
    )]
    chapter: Vec<PathBuf>,

    /// Render INPUT as a `<section>` fragment into OUTPUT (can be specified
    /// multiple times).
    #[arg(
      long,
      num_args = 2,
      value_names = ["OUTPUT", "INPUT"],
      action = clap::ArgAction::Append
    )]
    section: Vec<PathBuf>,
  },
}

impl Cli {
  /// Parse command line arguments, keeping the raw matches: the order of
  /// section directives is only recoverable from them.
  #[must_use]
  pub fn parse_with_matches() -> (Self, ArgMatches) {
    let matches = Self::command().get_matches();
    match Self::from_arg_matches(&matches) {
      Ok(cli) => (cli, matches),
      Err(e) => e.exit(),
    }
  }

  /// Like [`Cli::parse_with_matches`], from an explicit argument list.
  ///
  /// # Errors
  ///
  /// Returns an error if the arguments do not match the CLI definition.
  pub fn try_parse_with_matches_from<I, T>(
    args: I,
  ) -> Result<(Self, ArgMatches), clap::Error>
  where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
  {
    let matches = Self::command().try_get_matches_from(args)?;
    let cli = Self::from_arg_matches(&matches)?;
    Ok((cli, matches))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }
}
