use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::app::RunOptions;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::render::image_loader::ImageOptions;

#[derive(Parser)]
#[command(name = "showdeck")]
#[command(author, version, about)]
#[command(long_about = "A native slideshow for product-line presentations.\n\n\
    Slides are read from a YAML catalog; without one, the built-in deck is shown.\n\n\
    Examples:\n  \
    showdeck                          Present the built-in deck (fullscreen)\n  \
    showdeck deck.yaml --windowed     Present a catalog in a window\n  \
    showdeck deck.yaml --watch        Reload the catalog when it changes\n  \
    showdeck catalog --dump-default   Print the built-in deck as YAML")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Slide catalog (YAML) to present
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Skip the landing page and open the first slide directly
    #[arg(long, global = false)]
    pub present: bool,

    /// Directory that `/`-prefixed image references resolve against
    #[arg(long, global = false, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Reload the catalog when the file changes
    #[arg(long, global = false)]
    pub watch: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the slides of a catalog
    Catalog {
        /// Catalog to inspect (defaults to the configured or built-in deck)
        file: Option<PathBuf>,

        /// Print the parsed catalog as JSON
        #[arg(long, conflicts_with = "dump_default")]
        json: bool,

        /// Print the built-in deck as YAML
        #[arg(long)]
        dump_default: bool,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Export slides as PNG images
    Export {
        /// Catalog to export (defaults to the configured or built-in deck)
        file: Option<PathBuf>,

        /// Output directory for PNG files
        #[arg(short, long, default_value = "export")]
        output_dir: PathBuf,

        /// Export width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Export height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Directory that `/`-prefixed image references resolve against
        #[arg(long, value_name = "DIR")]
        assets: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.windowed, defaults.start_slide, images.timeout_secs)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Catalog {
                file,
                json,
                dump_default,
            }) => crate::commands::catalog::run(file, json, dump_default),
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Export {
                file,
                output_dir,
                width,
                height,
                assets,
            }) => {
                let config = Config::load_or_default();
                let (catalog, _) = load_catalog(file, &config)?;
                let images = image_options(&catalog, assets, &config);
                crate::commands::export::run(catalog, images, output_dir, width, height)
            }
            Some(Commands::Version) => {
                println!("showdeck {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => {
                let config = Config::load_or_default();
                let (catalog, catalog_path) = load_catalog(self.file, &config)?;
                let images = image_options(&catalog, self.assets, &config);
                let start_slide = self.slide.or(config.start_slide()).unwrap_or(1);
                crate::app::run(RunOptions {
                    catalog,
                    catalog_path,
                    windowed: self.windowed || config.windowed(),
                    start_slide: start_slide.saturating_sub(1),
                    present: self.present,
                    watch: self.watch,
                    images,
                    reset_modal_on_navigate: config.reset_modal_on_navigate(),
                })
            }
        }
    }
}

/// The catalog named on the command line, else the configured one, else the built-in deck.
pub fn load_catalog(
    file: Option<PathBuf>,
    config: &Config,
) -> anyhow::Result<(Catalog, Option<PathBuf>)> {
    let path = file.or_else(|| config.catalog().map(Path::to_path_buf));
    if let Some(path) = &path {
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }
    }
    let catalog = Catalog::load_or_embedded(path.as_deref())?;
    Ok((catalog, path))
}

/// Assets directory precedence: command line, configuration, then the catalog's directory.
fn image_options(catalog: &Catalog, assets: Option<PathBuf>, config: &Config) -> ImageOptions {
    let assets_dir = assets
        .or_else(|| config.assets().map(Path::to_path_buf))
        .or_else(|| catalog.base_dir.clone());
    ImageOptions {
        assets_dir,
        timeout: config.image_timeout(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_presentation_flags() {
        let cli = Cli::parse_from(["showdeck", "deck.yaml", "--windowed", "--slide", "3", "-vv"]);
        assert_eq!(cli.file, Some(PathBuf::from("deck.yaml")));
        assert!(cli.windowed);
        assert_eq!(cli.slide, Some(3));
        assert_eq!(cli.verbose, 2);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_export_defaults() {
        let cli = Cli::parse_from(["showdeck", "export"]);
        let Some(Commands::Export {
            file,
            output_dir,
            width,
            height,
            ..
        }) = cli.command
        else {
            panic!("expected export command");
        };
        assert!(file.is_none());
        assert_eq!(output_dir, PathBuf::from("export"));
        assert_eq!((width, height), (1920, 1080));
    }

    #[test]
    fn test_missing_catalog_is_reported() {
        let err = load_catalog(Some(PathBuf::from("/nonexistent/deck.yaml")), &Config::default())
            .unwrap_err()
            .to_string();
        assert!(err.contains("File not found"));
    }

    #[test]
    fn test_no_file_uses_embedded_deck() {
        let (catalog, path) = load_catalog(None, &Config::default()).unwrap();
        assert!(path.is_none());
        assert_eq!(catalog.len(), 9);
    }

    #[test]
    fn test_assets_precedence() {
        let mut catalog = Catalog::embedded().unwrap();
        catalog.base_dir = Some(PathBuf::from("/decks"));
        let mut config = Config::default();

        let options = image_options(&catalog, None, &config);
        assert_eq!(options.assets_dir, Some(PathBuf::from("/decks")));

        config.set("defaults.assets", "/srv/assets").unwrap();
        let options = image_options(&catalog, None, &config);
        assert_eq!(options.assets_dir, Some(PathBuf::from("/srv/assets")));

        let options = image_options(&catalog, Some(PathBuf::from("/cli")), &config);
        assert_eq!(options.assets_dir, Some(PathBuf::from("/cli")));
    }
}
