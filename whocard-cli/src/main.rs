mod display;

use std::io::Read;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use whocard_core::colors::CatppuccinExt;
use whocard_core::output::{get_formatter, OutputFormat};
use whocard_core::{Locale, TldAllowList, WhoisClient, WhoisReport, WhoisService};

use crate::display::Spinner;

#[derive(Parser)]
#[command(name = "whocard")]
#[command(about = "Summarize WHOIS records for a domain")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (human or json)
    #[arg(short, long, default_value = "human")]
    format: String,

    /// Language of labels and messages (en or fr)
    #[arg(short, long, env = "WHOCARD_LANG", default_value = "en")]
    lang: String,

    /// Seconds to wait on each WHOIS server operation
    #[arg(short, long, default_value_t = 10)]
    timeout: u64,

    /// WHOIS server to query instead of the registry (host or host:port)
    #[arg(short, long)]
    server: Option<String>,

    /// Accepted TLD; repeat to accept several (default: com, net, edu)
    #[arg(long = "tld")]
    tlds: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a domain and summarize its WHOIS record
    Lookup {
        /// Domain name to look up
        domain: String,
    },
    /// Summarize a saved WHOIS response without querying any server
    Parse {
        /// Domain the response belongs to
        domain: String,
        /// File holding the raw response, or - for stdin
        #[arg(default_value = "-")]
        file: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let output_format: OutputFormat = cli.format.parse().unwrap_or_default();
    let locale: Locale = match cli.lang.parse() {
        Ok(locale) => locale,
        Err(e) => {
            eprintln!("{} {}", "Warning:".ctp_yellow(), e);
            Locale::default()
        }
    };

    let mut client = WhoisClient::new().with_timeout(Duration::from_secs(cli.timeout));
    if let Some(server) = cli.server {
        client = client.with_server(server);
    }

    let mut service = WhoisService::new(client).with_locale(locale);
    if !cli.tlds.is_empty() {
        service = service.with_allow_list(TldAllowList::new(&cli.tlds));
    }

    let report = match cli.command {
        Commands::Lookup { domain } => {
            let spinner = Spinner::new(&format!("Querying WHOIS for {}...", domain));
            let report = service.run(&domain).await;
            spinner.finish();
            report
        }
        Commands::Parse { domain, file } => {
            let raw = read_input(&file)?;
            service.report_from_raw(&domain, &raw)
        }
    };

    let formatter = get_formatter(output_format);
    println!("{}", formatter.format_report(&report));

    if !matches!(report, WhoisReport::Found { .. }) {
        std::process::exit(1);
    }

    Ok(())
}

fn read_input(file: &str) -> anyhow::Result<String> {
    if file == "-" {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        Ok(raw)
    } else {
        Ok(std::fs::read_to_string(file)?)
    }
}
