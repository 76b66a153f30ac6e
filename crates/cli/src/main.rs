use anyhow::Context;
use clap::Parser;
use hickory_proto::rr::RecordType;
use nsquery_application::use_cases::SendQueryUseCase;
use nsquery_domain::{CliOverrides, IpPreference, TransportProtocol};
use nsquery_infrastructure::dns::{
    create_transport, HickoryWireDecoder, MessageBuilder, TracingDiagnosticSink,
    UnsupportedTsigVerifier,
};
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

mod bootstrap;
mod output;

#[derive(Parser)]
#[command(name = "nsquery")]
#[command(version)]
#[command(about = "nsquery - send a DNS query to a list of nameservers and print the reply")]
struct Cli {
    /// Domain name to query
    name: String,

    /// Record type (A, AAAA, MX, NS, TXT, ...)
    #[arg(default_value = "A")]
    record_type: String,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Nameserver to query, in order. Repeat for fallbacks.
    #[arg(short = 's', long = "server", value_name = "IP")]
    servers: Vec<IpAddr>,

    /// Nameserver port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Use TCP instead of UDP
    #[arg(short = 't', long)]
    tcp: bool,

    /// Only use IPv4 nameservers
    #[arg(short = '4', conflicts_with = "ipv6")]
    ipv4: bool,

    /// Only use IPv6 nameservers
    #[arg(short = '6')]
    ipv6: bool,

    /// Per-attempt timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Stop after the first failed nameserver
    #[arg(long)]
    fail_fast: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let ip_preference = if self.ipv4 {
            Some(IpPreference::V4Only)
        } else if self.ipv6 {
            Some(IpPreference::V6Only)
        } else {
            None
        };

        CliOverrides {
            nameservers: self.servers.clone(),
            port: self.port,
            transport: self.tcp.then_some(TransportProtocol::Tcp),
            ip_preference,
            timeout_ms: self.timeout_ms,
            fail_fast: self.fail_fast.then_some(true),
            log_level: self.log_level.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config.logging);

    info!(
        "Starting nsquery v{} ({} nameservers, {})",
        env!("CARGO_PKG_VERSION"),
        config.resolver.nameservers.len(),
        config.resolver.transport
    );

    let record_type = RecordType::from_str(&cli.record_type.to_ascii_uppercase())
        .with_context(|| format!("Unknown record type '{}'", cli.record_type))?;
    let query = MessageBuilder::build_query(&cli.name, record_type)?;

    let use_case = SendQueryUseCase::new(
        create_transport(TransportProtocol::Udp),
        create_transport(TransportProtocol::Tcp),
        Arc::new(HickoryWireDecoder::new()),
        Arc::new(UnsupportedTsigVerifier),
        Arc::new(TracingDiagnosticSink),
    );

    let reply = use_case
        .execute(&config.resolver, &query)
        .with_context(|| format!("Query for {} {} failed", cli.name, record_type))?;

    print!("{}", output::render(&reply));
    Ok(())
}
