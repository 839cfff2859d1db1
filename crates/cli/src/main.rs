use clap::Parser;
use ferrous_lookup_application::use_cases::LookupUseCase;
use ferrous_lookup_domain::{CliOverrides, DnsClass, Question, RecordType};
use std::io::Write;
use tracing::info;

mod bootstrap;
mod di;
mod output;

#[derive(Parser)]
#[command(name = "ferrous-lookup")]
#[command(version)]
#[command(about = "Ferrous Lookup - DNS lookups over UDP, TCP, TLS and HTTPS")]
struct Cli {
    /// Names to look up
    #[arg(required = true, value_name = "NAME")]
    names: Vec<String>,

    /// Record types to query (repeatable)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    types: Vec<RecordType>,

    /// Query class
    #[arg(short = 'c', long, value_name = "CLASS", default_value = "IN")]
    class: DnsClass,

    /// Server (udp://IP:PORT, tcp://IP:PORT, tls://HOST:PORT, https://URL)
    #[arg(short = 's', long, value_name = "SERVER")]
    server: Option<String>,

    /// Dots a name needs before it is tried as given first
    #[arg(long, allow_negative_numbers = true)]
    ndots: Option<i64>,

    /// Search domains, comma separated or repeated
    #[arg(long, value_delimiter = ',')]
    search: Option<Vec<String>>,

    /// Timeout per exchange in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn questions(&self) -> Vec<Question> {
        let types = if self.types.is_empty() {
            vec![RecordType::A]
        } else {
            self.types.clone()
        };

        self.names
            .iter()
            .flat_map(|name| {
                types.iter().map(move |record_type| {
                    Question::new(name.as_str(), *record_type).with_class(self.class)
                })
            })
            .collect()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        server: cli.server.clone(),
        ndots: cli.ndots,
        search: cli.search.clone(),
        timeout_ms: cli.timeout_ms,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting Ferrous Lookup v{}", env!("CARGO_PKG_VERSION"));

    let resolver = di::build_resolver(&config).await?;
    let use_case = LookupUseCase::new(resolver);

    let questions = cli.questions();
    let outcomes = use_case.execute(&questions).await;

    let mut stdout = std::io::stdout().lock();
    if cli.json {
        output::write_json(&mut stdout, &outcomes)?;
    } else {
        output::write_table(&mut stdout, &outcomes)?;
    }
    stdout.flush()?;

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} lookups failed", failed, outcomes.len());
    }

    Ok(())
}
