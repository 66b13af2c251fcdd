//! Firmware Downloads Hub CLI
//!
//! Browse, filter and download firmware listed in a manifest.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use fwhub::{
    error::{AppError, Result},
    models::{Config, Language, LocaleConfig, Manifest, Messages},
    pipeline::{self, BrowseRequest, ManifestInfo},
    services::{FilterState, TagType},
    storage::{LocalStorage, PreferenceStore},
    utils::{DownloadLinks, http},
    view::{DisplayMode, ExpandState, text},
};

/// fwhub - Firmware Downloads Hub
#[derive(Parser, Debug)]
#[command(
    name = "fwhub",
    version,
    about = "Browse and download firmware from a manifest"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "fwhub.toml")]
    config: PathBuf,

    /// Optional TOML file overriding the built-in messages
    #[arg(long)]
    locale: Option<PathBuf>,

    /// Manifest URL or file (overrides source.manifest)
    #[arg(short, long)]
    manifest: Option<String>,

    /// Directory holding persisted preferences
    #[arg(short, long, default_value = "storage")]
    state_dir: PathBuf,

    /// Interface language for this run (en or zh)
    #[arg(long, global = true)]
    lang: Option<Language>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List models and their firmware
    List {
        /// Free-text search across model and artifact fields
        #[arg(short, long, default_value = "")]
        query: String,

        /// Facet type: all, collection, series or category
        #[arg(long)]
        tag_type: Option<String>,

        /// Facet value to filter on
        #[arg(long, default_value = "")]
        tag: String,

        /// Model (or group path) to filter on
        #[arg(long, default_value = "")]
        model: String,

        /// Show full history instead of the latest builds
        #[arg(long)]
        all: bool,

        /// Expand a card by key (repeatable)
        #[arg(long = "expand", value_name = "KEY")]
        expand: Vec<String>,

        /// Expand every card
        #[arg(long)]
        expand_all: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the values offered by the tag and model facets
    Facets {
        /// Facet type: all, collection, series or category
        #[arg(long)]
        tag_type: Option<String>,
    },

    /// Show manifest metadata
    Info,

    /// Download one artifact and verify its SHA-256
    Download {
        /// Artifact path as listed in the manifest
        #[arg(long)]
        path: String,

        /// Directory to save into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Persist the interface language
    Lang {
        /// en or zh
        language: Language,
    },

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn tag_type_or_default(raw: Option<&str>, config: &Config) -> TagType {
    raw.map(TagType::parse)
        .unwrap_or(config.display.default_tag_type)
}

/// Load the manifest. A load failure is reported once, with the localized
/// message, and yields `None`.
async fn load(location: &str, config: &Config, messages: &Messages) -> Result<Option<Manifest>> {
    let client = http::create_client(&config.http)?;
    match pipeline::load_manifest(location, &client).await {
        Ok(manifest) => Ok(Some(manifest)),
        Err(e) if e.is_load_failure() => {
            log::debug!("Manifest load failed: {}", e);
            eprintln!("{}", messages.load_error);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config);
    init_logging(cli.verbose, &config.logging.level);

    let locale = match &cli.locale {
        Some(path) => LocaleConfig::load_or_default(path),
        None => LocaleConfig::default(),
    };
    let storage = LocalStorage::new(&cli.state_dir);
    let language = match cli.lang {
        Some(lang) => lang,
        None => storage.load_language().await?,
    };
    let messages = locale.messages(language);
    let location = cli.manifest.clone().unwrap_or_else(|| config.source.manifest.clone());

    match cli.command {
        Command::List {
            query,
            tag_type,
            tag,
            model,
            all,
            expand,
            expand_all,
            json,
        } => {
            let Some(manifest) = load(&location, &config, messages).await? else {
                return Ok(ExitCode::FAILURE);
            };
            let request = BrowseRequest {
                filter: FilterState {
                    query,
                    tag_type: tag_type_or_default(tag_type.as_deref(), &config),
                    tag_value: tag,
                    model_value: model,
                },
                mode: if all { DisplayMode::All } else { DisplayMode::Latest },
                expand: if expand_all {
                    ExpandState::everything()
                } else {
                    expand.into_iter().collect()
                },
            };
            let catalog = pipeline::run_list(&manifest, &config, request, messages)?;
            println!("{}", pipeline::render_list(&catalog, messages, json)?);
        }

        Command::Facets { tag_type } => {
            let Some(manifest) = load(&location, &config, messages).await? else {
                return Ok(ExitCode::FAILURE);
            };
            let mut filter = FilterState {
                tag_type: tag_type_or_default(tag_type.as_deref(), &config),
                ..FilterState::default()
            };
            let options = pipeline::resolve_facets(&manifest, &mut filter, &config);
            print!("{}", text::render_facets(&options, messages));
        }

        Command::Info => {
            log::info!("Manifest: {}", location);
            log::info!("State directory: {}", cli.state_dir.display());
            let Some(manifest) = load(&location, &config, messages).await? else {
                return Ok(ExitCode::FAILURE);
            };
            for line in ManifestInfo::from_manifest(&manifest).lines(messages) {
                println!("{line}");
            }
        }

        Command::Download { path, output } => {
            let Some(manifest) = load(&location, &config, messages).await? else {
                return Ok(ExitCode::FAILURE);
            };
            let artifact = pipeline::find_artifact(&manifest, &path)?;
            let links = DownloadLinks::new(&config.source.download_base_url)?;
            let client = http::create_client(&config.http)?;
            let outcome = pipeline::download_artifact(&client, &links, artifact, &output).await?;
            println!("{}", outcome.path.display());
            println!("SHA256: {}", outcome.sha256);
        }

        Command::Lang { language } => {
            storage.save_language(language).await?;
            log::info!("Language set to {}", language);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            DownloadLinks::new(&config.source.download_base_url)
                .map_err(|e| AppError::validation(format!("source.download_base_url: {e}")))?;
            log::info!("✓ Config OK");
            print!("{}", config.to_toml()?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreadable_manifest_is_reported_not_propagated() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("manifest.json");
        let loaded = load(missing.to_str().unwrap(), &Config::default(), &Messages::english())
            .await
            .unwrap();
        assert!(loaded.is_none());

        let scalar = dir.path().join("scalar.json");
        std::fs::write(&scalar, "true").unwrap();
        let loaded = load(scalar.to_str().unwrap(), &Config::default(), &Messages::english())
            .await
            .unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn readable_manifest_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, r#"{"machines":[{"model":"A"}]}"#).unwrap();
        let loaded = load(path.to_str().unwrap(), &Config::default(), &Messages::english())
            .await
            .unwrap();
        assert_eq!(loaded.unwrap().machines.len(), 1);
    }

    #[test]
    fn list_flags_parse() {
        let cli = Cli::try_parse_from([
            "fwhub", "--lang", "zh", "list", "--all", "--expand", "S/A", "--expand", "S/B",
        ])
        .unwrap();
        assert_eq!(cli.lang, Some(Language::Zh));
        match cli.command {
            Command::List { all, expand, .. } => {
                assert!(all);
                assert_eq!(expand, vec!["S/A", "S/B"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
