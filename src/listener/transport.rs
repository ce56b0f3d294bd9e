use {
    super::{InboundTransfer, WatchTarget},
    crate::{
        config::{ContractKind, ContractRegistry, EndpointRegistry},
        error::Result,
        oft::ERC20,
        units,
    },
    alloy_primitives::Address,
    alloy_provider::{DynProvider, Provider, ProviderBuilder, WsConnect},
    alloy_rpc_types::{Filter, Log},
    alloy_sol_types::SolEvent,
    std::{
        path::{Path, PathBuf},
        pin::Pin,
    },
    tokio_stream::{Stream, StreamExt},
    tracing::{debug, info, warn},
};

/// Capability interface over the streaming event source, so the supervisor
/// can be driven by a test double as well as a live WebSocket connection.
///
/// `connect` performs the whole establishment contract: resolve the watch
/// target from configuration, open the transport, register the subscription.
/// Any failure is returned to the supervisor, which retries.
pub trait TransferSource {
    type Subscription: TransferSubscription;

    fn connect(
        &mut self,
    ) -> impl Future<Output = Result<(Self::Subscription, WatchTarget)>> + Send;
}

/// A live subscription handle. `next_event` resolves with the next decoded
/// transfer, or `None` once the transport has closed (cleanly or not).
/// `close` releases the transport and is safe to call repeatedly.
pub trait TransferSubscription: Send {
    fn next_event(&mut self) -> impl Future<Output = Option<InboundTransfer>> + Send;
    fn close(&mut self);
}

/// WebSocket-backed event source for ERC-20 `Transfer` logs.
///
/// Configuration is re-read from disk on every connect so that a config file
/// fixed while the listener is retrying is picked up without a restart.
pub struct WsTransferSource {
    endpoints_path: PathBuf,
    deployments_path: PathBuf,
    /// Network whose token contract is watched.
    network: String,
    /// Network transfers are expected to originate from; resolved for its
    /// endpoint id and reported, since a plain `Transfer` log does not carry
    /// the source chain.
    source_network: String,
}

impl WsTransferSource {
    pub fn new(
        endpoints_path: impl AsRef<Path>,
        deployments_path: impl AsRef<Path>,
        network: impl Into<String>,
        source_network: impl Into<String>,
    ) -> Self {
        Self {
            endpoints_path: endpoints_path.as_ref().to_path_buf(),
            deployments_path: deployments_path.as_ref().to_path_buf(),
            network: network.into(),
            source_network: source_network.into(),
        }
    }

    fn resolve_target(&self) -> Result<(String, WatchTarget, u32)> {
        let endpoints = EndpointRegistry::load(&self.endpoints_path)?;
        let endpoint = endpoints.get(&self.network)?;
        let ws_url = endpoint.ws_url()?.to_string();
        let source_eid = endpoints.get(&self.source_network)?.eid()?;

        let contracts = ContractRegistry::load(&self.deployments_path)?;
        let token = contracts.get(&self.network, ContractKind::Token)?;
        let target = WatchTarget {
            contract: token.address,
            expected_sender: token.expected_sender.unwrap_or(Address::ZERO),
            decimals: token.decimals.unwrap_or(units::DEFAULT_DECIMALS),
        };
        Ok((ws_url, target, source_eid))
    }
}

impl TransferSource for WsTransferSource {
    type Subscription = WsSubscription;

    async fn connect(&mut self) -> Result<(Self::Subscription, WatchTarget)> {
        let (ws_url, target, source_eid) = self.resolve_target()?;
        info!(
            "watching {} on {} for transfers from {} (source eid {source_eid})",
            target.contract, self.network, self.source_network
        );

        let provider = ProviderBuilder::new()
            .connect_ws(WsConnect::new(ws_url))
            .await?
            .erased();
        let filter = Filter::new()
            .address(target.contract)
            .event_signature(ERC20::Transfer::SIGNATURE_HASH);
        let stream = provider.subscribe_logs(&filter).await?.into_stream();
        debug!("subscribed to Transfer logs on {}", target.contract);

        let subscription = WsSubscription {
            provider: Some(provider),
            stream: Some(Box::pin(stream)),
        };
        Ok((subscription, target))
    }
}

/// Owns the live connection and the registered log stream. Dropping or
/// closing it tears the WebSocket down.
pub struct WsSubscription {
    provider: Option<DynProvider>,
    stream: Option<Pin<Box<dyn Stream<Item = Log> + Send>>>,
}

impl std::fmt::Debug for WsSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsSubscription")
            .field("provider", &self.provider)
            .field("stream", &self.stream.as_ref().map(|_| "..."))
            .finish()
    }
}

impl TransferSubscription for WsSubscription {
    async fn next_event(&mut self) -> Option<InboundTransfer> {
        // A closed handle has nothing left to deliver.
        self.provider.as_ref()?;
        let stream = self.stream.as_mut()?;
        loop {
            let log = stream.next().await?;
            match ERC20::Transfer::decode_log_data(log.data()) {
                Ok(event) => {
                    return Some(InboundTransfer {
                        from: event.from,
                        to: event.to,
                        amount: event.value,
                        tx_hash: log.transaction_hash,
                        block_number: log.block_number,
                    });
                }
                Err(e) => {
                    // Not a well-formed Transfer; keep the subscription alive.
                    warn!("undecodable log from watched contract: {e}");
                }
            }
        }
    }

    fn close(&mut self) {
        // Deregister the stream first, then drop the connection. Both slots
        // are left empty so a second close is a no-op.
        self.stream = None;
        self.provider = None;
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::error::Error};

    fn write_configs(dir: &std::path::Path, endpoints: &str, deployments: &str) {
        std::fs::write(dir.join("lz_endpoints.json"), endpoints).unwrap();
        std::fs::write(dir.join("deployments.json"), deployments).unwrap();
    }

    fn source_for(dir: &std::path::Path) -> WsTransferSource {
        WsTransferSource::new(
            dir.join("lz_endpoints.json"),
            dir.join("deployments.json"),
            "amoy",
            "holesky",
        )
    }

    const DEPLOYMENTS: &str = r#"{
        "amoy": { "token": { "address": "0x6EDCE65403992e310A62460808c4b910D972f10f",
                             "decimals": 6 } }
    }"#;

    // Establishment must resolve the streaming URL before touching the
    // network; a config without one fails fast and is retried upstream.
    #[tokio::test]
    async fn missing_ws_url_fails_establishment() {
        let dir = tempfile::tempdir().unwrap();
        write_configs(
            dir.path(),
            r#"[ { "network": "amoy", "eid": 40267, "rpcUrl": "https://amoy.example" },
                 { "network": "holesky", "eid": 40217, "rpcUrl": "https://holesky.example" } ]"#,
            DEPLOYMENTS,
        );
        let err = source_for(dir.path()).connect().await.unwrap_err();
        assert!(
            matches!(err, Error::ConfigurationMissing { ref field, .. } if field == "wsUrl"),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn unknown_source_network_fails_establishment() {
        let dir = tempfile::tempdir().unwrap();
        write_configs(
            dir.path(),
            r#"[ { "network": "amoy", "eid": 40267,
                   "rpcUrl": "https://amoy.example", "wsUrl": "wss://amoy.example" } ]"#,
            DEPLOYMENTS,
        );
        let err = source_for(dir.path()).connect().await.unwrap_err();
        assert!(matches!(err, Error::NetworkNotFound { ref network } if network == "holesky"));
    }

    // The watch target comes from the token config; OFT mints credit from
    // the zero address unless the config overrides the expected sender.
    #[test]
    fn watch_target_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_configs(
            dir.path(),
            r#"[ { "network": "amoy", "eid": 40267,
                   "rpcUrl": "https://amoy.example", "wsUrl": "wss://amoy.example" },
                 { "network": "holesky", "eid": 40217, "rpcUrl": "https://holesky.example" } ]"#,
            DEPLOYMENTS,
        );
        let (ws_url, target, source_eid) = source_for(dir.path()).resolve_target().unwrap();
        assert_eq!(ws_url, "wss://amoy.example");
        assert_eq!(target.expected_sender, Address::ZERO);
        assert_eq!(target.decimals, 6);
        assert_eq!(source_eid, 40217);
    }
}
