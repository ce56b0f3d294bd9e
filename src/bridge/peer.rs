use {
    super::OftBridge,
    crate::{
        error::{Error, Result},
        oft::OftAdapter,
    },
    alloy_network::Ethereum,
    alloy_primitives::{Address, FixedBytes, hex},
    alloy_provider::{Provider, WalletProvider},
    tracing::{Level, debug, info, instrument, warn},
};

/// Peer registrations are bytes32-padded contract addresses.
fn as_peer(address: Address) -> FixedBytes<32> {
    address.into_word()
}

async fn ensure_peer<P: Provider<Ethereum> + Clone>(
    provider: &P,
    network: &str,
    adapter_address: Address,
    eid: u32,
    want: FixedBytes<32>,
) -> Result<bool> {
    let adapter = OftAdapter::new(adapter_address, provider.clone());
    match adapter.peers(eid).call().await {
        Ok(current) if current == want => {
            debug!("peer for eid {eid} already set on {network}");
            return Ok(false);
        }
        Ok(current) => {
            debug!(
                "peer on {network} for eid {eid} is 0x{}, updating",
                hex::encode(current)
            );
        }
        Err(e) => {
            // The view may be absent on older deployments; try the write.
            warn!("could not read peers({eid}) on {network}: {e}");
        }
    }

    info!("setting peer on {network} adapter {adapter_address} for eid {eid}");
    let hash = adapter.setPeer(eid, want).send().await?.watch().await?;
    info!("setPeer on {network}: {hash}");
    Ok(true)
}

impl<
    SrcProvider: Provider<Ethereum> + WalletProvider + Clone,
    DstProvider: Provider<Ethereum> + WalletProvider + Clone,
> OftBridge<SrcProvider, DstProvider>
{
    /// Register each adapter as the other's peer, skipping sides that are
    /// already wired. The send path requires the source side to resolve; a
    /// still-mismatched peer after wiring is a hard precondition failure.
    #[instrument(skip(self), level = Level::INFO)]
    pub async fn wire_peers(&self) -> Result<()> {
        let src_eid = self.source().eid()?;
        let dst_eid = self.destination_eid()?;
        let src_peer = as_peer(self.source_adapter().address);
        let dst_peer = as_peer(self.destination_adapter().address);

        ensure_peer(
            self.source_provider(),
            &self.source().network,
            self.source_adapter().address,
            dst_eid,
            dst_peer,
        )
        .await?;
        ensure_peer(
            self.destination_provider(),
            &self.destination().network,
            self.destination_adapter().address,
            src_eid,
            src_peer,
        )
        .await?;

        self.verify_source_peer(dst_eid, dst_peer).await
    }

    async fn verify_source_peer(&self, dst_eid: u32, want: FixedBytes<32>) -> Result<()> {
        let adapter = OftAdapter::new(self.source_adapter().address, self.source_provider());
        let configured = adapter.peers(dst_eid).call().await?;
        if configured != want {
            return Err(Error::PeerMismatch {
                network: self.source().network.clone(),
                eid: dst_eid,
                configured: format!("0x{}", hex::encode(configured)),
                expected: format!("0x{}", hex::encode(want)),
            });
        }
        Ok(())
    }
}
