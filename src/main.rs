use {
    alloy_primitives::Address,
    alloy_provider::ProviderBuilder,
    alloy_signer_local::PrivateKeySigner,
    clap::Parser,
    oft_bridge::{
        ContractKind, ContractRegistry, EndpointRegistry, Error, OftBridge, Result, Supervisor,
        WsTransferSource,
    },
    std::{
        env,
        path::{Path, PathBuf},
        process::ExitCode,
        str::FromStr,
    },
    tracing::{error, info},
    tracing_subscriber::EnvFilter,
};

const PRIVATE_KEY_VAR: &str = "PRIVATE_KEY";

/// Drive a LayerZero V2 OFT transfer, or listen for inbound transfers.
#[derive(Parser, Debug)]
#[command(name = "oft-bridge", version)]
struct Cli {
    /// Listen for inbound transfers instead of sending
    #[arg(
        long,
        num_args = 2,
        value_names = ["LISTENING_NETWORK", "EXPECTED_SOURCE_NETWORK"],
        conflicts_with = "send"
    )]
    listen: Option<Vec<String>>,

    /// Send a transfer: <sourceNetwork> <destinationNetwork> <destinationAddress> <amount>
    #[arg(
        num_args = 4,
        value_names = ["SOURCE_NETWORK", "DESTINATION_NETWORK", "DESTINATION_ADDRESS", "AMOUNT"],
        required_unless_present = "listen"
    )]
    send: Option<Vec<String>>,

    /// Network endpoint config file
    #[arg(long, default_value = "config/lz_endpoints.json")]
    endpoints: PathBuf,

    /// Deployed contract config file
    #[arg(long, default_value = "config/deployments.json")]
    deployments: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Required regardless of mode; missing credentials are fatal up front.
    let secret = env::var(PRIVATE_KEY_VAR).map_err(|_| Error::MissingCredential(PRIVATE_KEY_VAR))?;

    if let Some(listen) = cli.listen {
        let (network, source_network) = (&listen[0], &listen[1]);
        return listen_for_transfers(&cli.endpoints, &cli.deployments, network, source_network)
            .await;
    }

    let send = cli.send.expect("clap enforces send args when not listening");
    let (src, dst, to, amount) = (&send[0], &send[1], &send[2], &send[3]);
    let signer = PrivateKeySigner::from_str(secret.trim())
        .map_err(|_| Error::InvalidCredential(PRIVATE_KEY_VAR))?;
    send_transfer(&cli.endpoints, &cli.deployments, signer, src, dst, to, amount).await
}

async fn send_transfer(
    endpoints_path: &Path,
    deployments_path: &Path,
    signer: PrivateKeySigner,
    src: &str,
    dst: &str,
    to: &str,
    amount: &str,
) -> Result<()> {
    let recipient: Address = to.parse().map_err(|e| Error::InvalidAddress {
        address: to.to_string(),
        source: e,
    })?;

    let endpoints = EndpointRegistry::load(endpoints_path)?;
    let source = endpoints.get(src)?.clone();
    let destination = endpoints.get(dst)?.clone();
    let contracts = ContractRegistry::load(deployments_path)?;
    let source_adapter = contracts.get(src, ContractKind::Adapter)?.clone();
    let destination_adapter = contracts.get(dst, ContractKind::Adapter)?.clone();

    let source_provider = ProviderBuilder::new().wallet(signer.clone()).connect_http(
        source
            .rpc_url()?
            .parse()
            .map_err(|e| Error::Transport(format!("invalid rpc url for {src}: {e}")))?,
    );
    let destination_provider = ProviderBuilder::new().wallet(signer).connect_http(
        destination
            .rpc_url()?
            .parse()
            .map_err(|e| Error::Transport(format!("invalid rpc url for {dst}: {e}")))?,
    );

    let bridge = OftBridge::new(
        source_provider,
        destination_provider,
        source,
        destination,
        source_adapter,
        destination_adapter,
        recipient,
    );
    let result = bridge.transfer(amount).await?;
    println!("{result}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEND: [&str; 5] = [
        "oft-bridge",
        "holesky",
        "amoy",
        "0x1a44076050125825900e736c501f859c50fE728c",
        "1.5",
    ];

    #[test]
    fn send_mode_takes_four_positionals() {
        let cli = Cli::try_parse_from(SEND).unwrap();
        let send = cli.send.unwrap();
        assert_eq!(send, ["holesky", "amoy", SEND[3], "1.5"]);
        assert!(cli.listen.is_none());
        assert_eq!(cli.endpoints, PathBuf::from("config/lz_endpoints.json"));
    }

    #[test]
    fn listen_mode_takes_both_networks() {
        let cli = Cli::try_parse_from(["oft-bridge", "--listen", "amoy", "holesky"]).unwrap();
        assert_eq!(cli.listen.unwrap(), ["amoy", "holesky"]);
        assert!(cli.send.is_none());
    }

    #[test]
    fn listen_and_send_conflict() {
        let args = SEND.iter().copied().chain(["--listen", "amoy", "holesky"]);
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn send_with_missing_positional_is_rejected() {
        assert!(Cli::try_parse_from(SEND[..4].iter().copied()).is_err());
    }

    #[test]
    fn one_mode_is_required() {
        assert!(Cli::try_parse_from(["oft-bridge"]).is_err());
    }
}

async fn listen_for_transfers(
    endpoints_path: &Path,
    deployments_path: &Path,
    network: &str,
    source_network: &str,
) -> Result<()> {
    info!("listening on {network} for transfers from {source_network}");
    let source = WsTransferSource::new(endpoints_path, deployments_path, network, source_network);
    let mut supervisor = Supervisor::new(source);
    supervisor
        .run(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;
    Ok(())
}
