use clap::{Parser, Subcommand};
use folio::detail::DetailView;
use folio::{catalog, config, content, generate, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Static site generator for a studio portfolio")]
#[command(long_about = "\
Static site generator for a studio portfolio

Builds a marketing site with a services section, a featured-work grid, one
case-study page per project (tabs plus an image carousel), an about page, and
a contact form that posts JSON to your backend.

Content structure (every piece is optional; stock content fills the gaps):

  content/
  ├── config.toml                  # Site config, layered over defaults
  ├── services.toml                # [[service]] entries
  ├── about.md                     # About page
  ├── assets/                      # Copied to dist/assets/
  └── projects/
      ├── 010-master-with-ai.toml  # Numbered = catalog order
      └── freshly-mobile-app.toml  # Unnumbered = after numbered, by name

Run 'folio gen-config' for a documented config.toml and 'folio gen-catalog'
for example project files.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log debug detail (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load content and write the site
    Build,
    /// Validate content directory without building
    Check,
    /// Resolve a case study and print it as the detail page would show it
    Show {
        /// Project slug
        slug: String,
        /// Tab to display (overview, features, results, gallery)
        #[arg(long)]
        tab: Option<String>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print the stock project catalog
    GenCatalog,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build => {
            println!("==> Loading {}", cli.source.display());
            let site = content::load(&cli.source)?;
            init_thread_pool(&site.config.processing);

            println!("==> Generating HTML → {}", cli.output.display());
            let report = generate::generate(&site, &cli.output)?;
            output::print_generate_output(&site, &report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = content::load(&cli.source)?;
            output::print_content_output(&site);
            println!("==> Content is valid");
        }
        Command::Show { slug, tab } => {
            let site = content::load(&cli.source)?;
            let mut view = DetailView::open(&site.catalog, &slug);
            if let Some(tab) = tab {
                // An unknown tab is logged by the view and the overview stays.
                let _ = view.select_tab(&tab);
            }
            output::print_detail_output(&site, &view);
            if view.record().is_none() {
                std::process::exit(1);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::GenCatalog => {
            print!("{}", catalog::stock_catalog_toml());
        }
    }

    Ok(())
}

/// `info` by default, `debug` with `-v`. `RUST_LOG` wins over both.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores: config can lower it, not raise it.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
