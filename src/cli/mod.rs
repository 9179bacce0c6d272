#[cfg(feature = "browse")]
pub mod browse;
pub mod config;
pub mod demo;
pub mod export;
pub mod report;
pub mod request;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::error::{Result, SalesError};
use crate::export::ExportFormat;
use crate::models::SaleRecord;
use crate::navigation::Dashboard;
use crate::settings::{load_settings, shellexpand_path, Settings};
use crate::source::{self, Source};

#[derive(Parser)]
#[command(
    name = "dealerboard",
    version,
    about = "Drill-down sales analytics for automotive dealer networks."
)]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Records file: a flat record list or an analytics API response (default: settings data_file)
    #[arg(long, global = true)]
    pub input: Option<String>,
    /// Use generated demo data instead of a file
    #[arg(long, global = true, conflicts_with = "input")]
    pub demo: bool,
    /// Seed for demo data (default: settings demo_seed)
    #[arg(long, global = true)]
    pub seed: Option<u64>,
    /// Month filter for API responses: YYYY-MM
    #[arg(long, global = true)]
    pub month: Option<String>,
    /// Fail instead of falling back to demo data when the input cannot be loaded
    #[arg(long = "no-fallback", global = true)]
    pub no_fallback: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Units sold per model.
    Models {
        /// Show only the N best-selling rows (0 = all; default: settings top_n)
        #[arg(long)]
        top: Option<usize>,
    },
    /// Units sold per dealer for one model.
    Dealers {
        /// Model ID
        #[arg(long)]
        model: String,
        #[arg(long)]
        top: Option<usize>,
    },
    /// Units sold per salesperson for one model at one dealer.
    Salespeople {
        /// Model ID
        #[arg(long)]
        model: String,
        /// Dealer ID
        #[arg(long)]
        dealer: String,
        #[arg(long)]
        top: Option<usize>,
    },
    /// Interactively drill down from models to dealers to salespeople.
    #[cfg(feature = "browse")]
    Browse,
    /// Export one summary level to CSV or JSON.
    Export {
        #[arg(long, value_enum, default_value = "models")]
        level: LevelArg,
        /// Model ID (dealers and salespeople levels)
        #[arg(long)]
        model: Option<String>,
        /// Dealer ID (salespeople level)
        #[arg(long)]
        dealer: Option<String>,
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<String>,
    },
    /// Write generated demo records as JSON.
    Demo {
        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<String>,
    },
    /// Print the analytics API request body for a period.
    Request {
        /// Start date: DD.MM.YYYY
        #[arg(long = "from")]
        from_date: String,
        /// End date: DD.MM.YYYY
        #[arg(long = "to")]
        to_date: String,
    },
    /// Show or update settings.
    Config {
        /// Default records file
        #[arg(long = "data-file")]
        data_file: Option<String>,
        /// Default demo seed
        #[arg(long = "demo-seed")]
        demo_seed: Option<u64>,
        /// Default row limit for tables (0 = all)
        #[arg(long = "top")]
        top_n: Option<usize>,
        /// Fall back to demo data when the records file cannot be loaded
        #[arg(long = "fallback-demo")]
        fallback_to_demo: Option<bool>,
    },
    /// Print shell completions.
    Completions {
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LevelArg {
    Models,
    Dealers,
    Salespeople,
}

pub(crate) fn resolve_source(args: &SourceArgs, settings: &Settings) -> Source {
    let seed = args.seed.unwrap_or(settings.demo_seed);
    if args.demo {
        return Source::Demo { seed };
    }
    let path = args.input.as_deref().unwrap_or(&settings.data_file);
    Source::File(PathBuf::from(shellexpand_path(path)))
}

pub(crate) fn load_records(args: &SourceArgs) -> Result<Vec<SaleRecord>> {
    let settings = load_settings();
    let source = resolve_source(args, &settings);
    let fallback = if settings.fallback_to_demo && !args.no_fallback {
        Some(args.seed.unwrap_or(settings.demo_seed))
    } else {
        None
    };
    debug!(?source, ?fallback, "resolving records");
    source::load(&source, args.month.as_deref(), fallback)
}

pub(crate) fn load_dashboard(args: &SourceArgs) -> Result<Dashboard> {
    Ok(Dashboard::new(load_records(args)?))
}

pub(crate) fn ensure_model(records: &[SaleRecord], model_id: &str) -> Result<()> {
    if records.iter().any(|r| r.model_id == model_id) {
        Ok(())
    } else {
        Err(SalesError::UnknownModel(model_id.to_string()))
    }
}

pub(crate) fn ensure_dealer(records: &[SaleRecord], model_id: &str, dealer_id: &str) -> Result<()> {
    ensure_model(records, model_id)?;
    if records
        .iter()
        .any(|r| r.model_id == model_id && r.dealer_id == dealer_id)
    {
        Ok(())
    } else {
        Err(SalesError::UnknownDealer {
            model_id: model_id.to_string(),
            dealer_id: dealer_id.to_string(),
        })
    }
}

/// Open `path` for writing, or stdout when absent.
pub(crate) fn output_writer(path: Option<&str>) -> Result<Box<dyn std::io::Write>> {
    match path {
        Some(p) => {
            let p = shellexpand_path(p);
            if let Some(parent) = std::path::Path::new(&p).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            Ok(Box::new(std::fs::File::create(p)?))
        }
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(model: &str, dealer: &str) -> SaleRecord {
        SaleRecord {
            model_id: model.to_string(),
            dealer_id: dealer.to_string(),
            salesperson_id: "s1".to_string(),
            model_name: String::new(),
            dealer_name: String::new(),
            salesperson_name: String::new(),
            units: 1,
        }
    }

    #[test]
    fn test_resolve_source_demo_uses_settings_seed() {
        let settings = Settings::default();
        let args = SourceArgs {
            demo: true,
            ..Default::default()
        };
        assert_eq!(resolve_source(&args, &settings), Source::Demo { seed: 42 });
    }

    #[test]
    fn test_resolve_source_input_overrides_settings() {
        let settings = Settings::default();
        let args = SourceArgs {
            input: Some("/tmp/q3.json".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve_source(&args, &settings),
            Source::File(PathBuf::from("/tmp/q3.json"))
        );
    }

    #[test]
    fn test_ensure_model_and_dealer() {
        let records = vec![rec("m1", "d1")];
        assert!(ensure_model(&records, "m1").is_ok());
        assert!(matches!(
            ensure_model(&records, "m2"),
            Err(SalesError::UnknownModel(_))
        ));
        assert!(ensure_dealer(&records, "m1", "d1").is_ok());
        assert!(matches!(
            ensure_dealer(&records, "m1", "d2"),
            Err(SalesError::UnknownDealer { .. })
        ));
    }

    #[test]
    fn test_cli_parses_global_source_after_subcommand() {
        let cli = Cli::try_parse_from(["dealerboard", "dealers", "--model", "m1", "--demo", "--seed", "3"]).unwrap();
        assert!(cli.source.demo);
        assert_eq!(cli.source.seed, Some(3));
        assert!(matches!(cli.command, Commands::Dealers { ref model, .. } if model == "m1"));
    }
}
