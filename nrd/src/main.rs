use color_eyre::eyre::{Result, eyre};
use log::{LevelFilter, debug};
use nrd::{
  cli::{Cli, Commands},
  docbook,
  error::LayoutError,
  layout::{self, Layout},
};

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let (cli, matches) = Cli::parse_with_matches();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  // Setup thread pool once for all parallel rendering
  let thread_count = cli.jobs.unwrap_or_else(num_cpus::get);
  rayon::ThreadPoolBuilder::new()
    .num_threads(thread_count)
    .build_global()?;
  debug!("Rendering with {thread_count} thread(s)");

  match &cli.command {
    Commands::DocbookSection {
      manpage_urls,
      outfile,
      layout: layout_file,
      ..
    } => {
      let sub_matches = matches
        .subcommand_matches("docbook-section")
        .ok_or(LayoutError::MissingMatches("docbook-section"))?;

      // Resolve the whole layout before rendering anything
      let mut sections = match layout_file {
        Some(path) => Layout::load(path)?.sections,
        None => Vec::new(),
      };
      sections.extend(layout::sections_from_matches(sub_matches)?);

      if sections.is_empty() {
        return Err(eyre!(
          "No sections to render. Pass --section with --chapters, or \
           --layout."
        ));
      }

      docbook::build_section_manual(manpage_urls, outfile, &sections)
    },

    Commands::DocbookFragment {
      manpage_urls,
      chapter,
      section,
    } => {
      let targets = layout::fragment_targets(chapter, section);
      docbook::build_fragments(manpage_urls, &targets)
    },
  }
}
