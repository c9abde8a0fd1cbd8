use std::path::PathBuf;

use clap::Parser;
use elb_client::{ClientConfig, ElbClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Ask the local agent for one host and report the call back
#[derive(Parser, Debug)]
#[command(name = "elb-selftest")]
struct Args {
    #[arg(long, default_value_t = 10001)]
    modid: i32,

    #[arg(long, default_value_t = 1001)]
    cmdid: i32,

    /// Lookup timeout, clamped to [10, 1000]
    #[arg(long, default_value_t = 10)]
    timeout_ms: u64,

    /// TOML client configuration; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };

    let mut client = ElbClient::connect(&config).await?;

    match client.get_host(args.modid, args.cmdid, args.timeout_ms).await {
        Ok(host) => {
            println!("{}", host);
            client
                .report_result(args.modid, args.cmdid, *host.ip(), host.port(), 0)
                .await?;
            info!("Reported success for {}", host);
        }
        Err(e) => println!("lookup failed ({}): {}", e.code(), e),
    }

    client.close().await?;
    Ok(())
}
