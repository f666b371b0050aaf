use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use deltaconv_core::SymbolDecomposer;
use deltaconv_export::{BinanceDepositExporter, BinanceTradeExporter, DeltaExporter};
use deltaconv_ingest::{History, SourceFormat, read_table};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;

#[derive(Parser, Debug)]
#[command(
    name = "deltaconv",
    version,
    about = "Convert exchange trade history exports into portfolio-tracker CSV"
)]
struct Cli {
    /// Config file (default: ~/.deltaconv/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an exchange export and append it to a target CSV
    Convert {
        /// Input layout: binance-trade, binance-crawler, binance-deposit or
        /// binance-crawler-deposit
        #[arg(long)]
        format: SourceFormat,

        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        output: PathBuf,

        #[arg(long, value_enum, default_value_t = Target::Delta)]
        target: Target,

        /// Input field delimiter (default depends on the format)
        #[arg(long)]
        delimiter: Option<char>,
    },

    /// Show how market strings split into base and quote currency
    Decompose {
        #[arg(required = true)]
        markets: Vec<String>,
    },

    /// Config file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the config file location
    Path,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    /// Portfolio-tracker import layout, appended
    Delta,
    /// Binance trade or deposit history layout, sorted by time, overwritten
    Binance,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Convert {
            format,
            input,
            output,
            target,
            delimiter,
        } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            let catalog = cfg.catalog()?;

            let delimiter = match delimiter.or(cfg.input.delimiter) {
                Some(c) if c.is_ascii() => c as u8,
                Some(c) => bail!("delimiter '{}' must be a single ASCII character", c),
                None => format.default_delimiter(),
            };

            if !input.exists() {
                bail!("input not found: {}", input.display());
            }

            let table = read_table(&input, delimiter)?;
            let history = format
                .parse(table, &catalog)
                .with_context(|| format!("parsing {} as {}", input.display(), format))?;

            let delta = DeltaExporter::new(cfg.aliases(), cfg.output.clone());
            match (&history, target) {
                (History::Trades(t), Target::Delta) => delta.export(t, &output)?,
                (History::Deposits(d), Target::Delta) => delta.export(d, &output)?,
                (History::Trades(t), Target::Binance) => {
                    BinanceTradeExporter::new(cfg.output.clone()).export(t, &output)?
                }
                (History::Deposits(d), Target::Binance) => {
                    BinanceDepositExporter::new(cfg.output.clone()).export(d, &output)?
                }
            }

            println!(
                "Converted {} {} from {} into {}",
                history.len(),
                history.kind(),
                input.display(),
                output.display()
            );
        }

        Command::Decompose { markets } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            let catalog = cfg.catalog()?;
            decompose(&SymbolDecomposer::new(&catalog), &markets, std::io::stdout().lock())?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Path => {
                let p = match cli.config {
                    Some(p) => p,
                    None => config::config_path()?,
                };
                println!("{}", p.display());
            }
        },
    }

    Ok(())
}

/// Print one `base`/`quote` line per market. Fails after printing all of
/// them if any market stayed unresolved.
fn decompose<W: Write>(
    decomposer: &SymbolDecomposer<'_>,
    markets: &[String],
    mut out: W,
) -> Result<()> {
    let mut unresolved = 0;
    for market in markets {
        match decomposer.decompose(market) {
            Some(pair) => writeln!(out, "{market}: base={} quote={}", pair.base, pair.quote)?,
            None => {
                unresolved += 1;
                writeln!(out, "{market}: unresolved")?;
            }
        }
    }
    if unresolved > 0 {
        bail!("{} of {} markets could not be resolved", unresolved, markets.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use deltaconv_core::CurrencyCatalog;

    fn markets(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_args() {
        let cli = Cli::try_parse_from([
            "deltaconv",
            "convert",
            "--format",
            "binance-crawler",
            "--input",
            "trades.csv",
            "--output",
            "delta.csv",
        ])
        .unwrap();
        match cli.command {
            Command::Convert { format, target, delimiter, .. } => {
                assert_eq!(format, SourceFormat::BinanceCrawler);
                assert_eq!(target, Target::Delta);
                assert_eq!(delimiter, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let res = Cli::try_parse_from([
            "deltaconv", "convert", "--format", "kraken", "--input", "a", "--output", "b",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_decompose_prints_splits() {
        let catalog = CurrencyCatalog::builtin();
        let mut out = Vec::new();
        decompose(
            &SymbolDecomposer::new(&catalog),
            &markets(&["ETHBTC", "BTCUSDT"]),
            &mut out,
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ETHBTC: base=ETH quote=BTC\nBTCUSDT: base=BTC quote=USDT\n"
        );
    }

    #[test]
    fn test_decompose_fails_on_unresolved_market() {
        let catalog = CurrencyCatalog::builtin();
        let mut out = Vec::new();
        let err = decompose(
            &SymbolDecomposer::new(&catalog),
            &markets(&["ETHBTC", "QQQZZZ"]),
            &mut out,
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "1 of 2 markets could not be resolved");
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("QQQZZZ: unresolved\n"));
    }

    #[test]
    fn test_decompose_args() {
        let cli = Cli::try_parse_from(["deltaconv", "decompose", "ETHBTC", "IOTAETH"]).unwrap();
        match cli.command {
            Command::Decompose { markets } => assert_eq!(markets, ["ETHBTC", "IOTAETH"]),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["deltaconv", "decompose"]).is_err());
    }
}
