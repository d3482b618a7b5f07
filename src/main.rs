use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use compensation_claim::allow_list::AllowList;
use compensation_claim::config::ClaimConfig;
use compensation_claim::form::FormController;
use compensation_claim::message::{TxReference, compose};
use compensation_claim::notify::ConsoleNotifier;
use compensation_claim::signer::LocalWallet;
use compensation_claim::submit::SubmissionClient;
use compensation_claim::wallet::WalletConnection;
use dotenv::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "compensation-claim", version, about = "Sign and submit a compensation claim")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the JSON config file.
    #[arg(long, global = true, default_value = "config.json")]
    config: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign the attestation with the configured wallet and submit the claim.
    Submit(SubmitArgs),

    /// Print the attestation message that would be signed.
    Message(MessageArgs),

    /// Check whether an address is eligible for compensation.
    Check {
        address: String,
    },
}

#[derive(Args, Debug)]
struct SubmitArgs {
    /// Address that should receive the compensation.
    #[arg(long)]
    new_address: String,

    /// Support ticket number.
    #[arg(long)]
    ticket_id: String,

    /// Transaction reference. Format: HASH@CHAIN
    #[arg(long = "tx")]
    tx_references: Vec<String>,
}

#[derive(Args, Debug)]
struct MessageArgs {
    #[arg(long)]
    victim_address: String,

    #[arg(long)]
    new_address: String,

    /// Transaction reference. Format: HASH@CHAIN
    #[arg(long = "tx")]
    tx_references: Vec<String>,
}

fn parse_references(raw: &[String]) -> Result<Vec<TxReference>> {
    raw.iter()
        .map(|s| s.parse::<TxReference>())
        .collect::<Result<Vec<_>>>()
        .context("failed to parse --tx arguments")
}

async fn submit(config: ClaimConfig, args: SubmitArgs) -> Result<bool> {
    let allow_list = AllowList::from_file(&config.allow_list_path)?;
    info!(entries = allow_list.len(), "Loaded allow-list");

    let wallet = Arc::new(WalletConnection::disconnected());
    match config.private_key() {
        Some(key) => wallet.connect(LocalWallet::from_private_key(&key)?),
        None => warn!("No wallet key configured; signing will fail"),
    }

    let mut controller = FormController::new(
        wallet,
        allow_list,
        SubmissionClient::new(&config.submit_url),
        ConsoleNotifier,
        config.rules,
    );
    if let Some(secs) = config.signing_timeout_secs {
        controller = controller.with_signing_timeout(Duration::from_secs(secs));
    }

    controller.set_new_address(args.new_address);
    controller.set_ticket_id(args.ticket_id);
    for reference in parse_references(&args.tx_references)? {
        controller.add_tx_reference(reference)?;
    }

    Ok(controller.submit().await.is_ok())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Submit(args) => {
            let config = ClaimConfig::from_file(&cli.config)?;
            if !submit(config, args).await? {
                std::process::exit(1);
            }
        }
        Commands::Message(args) => {
            let references = parse_references(&args.tx_references)?;
            println!(
                "{}",
                compose(&args.victim_address, &args.new_address, &references)
            );
        }
        Commands::Check { address } => {
            let config = ClaimConfig::from_file(&cli.config)?;
            let allow_list = AllowList::from_file(&config.allow_list_path)?;
            if allow_list.contains(&address) {
                println!("{address} is eligible for compensation");
            } else {
                println!("{address} is not allowed for compensation");
            }
        }
    }

    Ok(())
}
