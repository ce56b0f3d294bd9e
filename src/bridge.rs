use {
    crate::{
        config::{ChainEndpoint, ContractConfig},
        error::Result,
    },
    alloy_primitives::{Address, TxHash, U256},
    std::fmt::{Debug, Display},
};

mod evm;
mod fee;
mod peer;

pub use fee::FeeQuote;

/// Gas the destination executor is given for `lzReceive`. The deployed test
/// adapters need a generous limit; matches the value the contracts were
/// exercised with.
pub const LZ_RECEIVE_GAS: u128 = 65_000_000;

/// Outcome of a completed send sequence.
#[derive(Clone, Debug)]
pub struct TransferResult {
    pub approval: Option<TxHash>,
    pub send: TxHash,
    pub native_fee: U256,
}

impl Display for TransferResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Approval: {:?}, Send: {}, Native fee: {} wei",
            self.approval, self.send, self.native_fee
        )
    }
}

/// Drives one OFT transfer between two networks: approval, peer wiring, fee
/// quoting and the send itself, in that order.
#[derive(Clone)]
pub struct OftBridge<SrcProvider, DstProvider> {
    source_provider: SrcProvider,
    destination_provider: DstProvider,
    source: ChainEndpoint,
    destination: ChainEndpoint,
    source_adapter: ContractConfig,
    destination_adapter: ContractConfig,
    recipient: Address,
}

impl<SrcProvider, DstProvider> Debug for OftBridge<SrcProvider, DstProvider> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "OFT[{}({})->{}({})]",
            self.source.network,
            self.source.eid.unwrap_or(u32::MAX),
            self.destination.network,
            self.destination.eid.unwrap_or(u32::MAX),
        )
    }
}

impl<SrcProvider, DstProvider> OftBridge<SrcProvider, DstProvider> {
    pub fn new(
        source_provider: SrcProvider,
        destination_provider: DstProvider,
        source: ChainEndpoint,
        destination: ChainEndpoint,
        source_adapter: ContractConfig,
        destination_adapter: ContractConfig,
        recipient: Address,
    ) -> Self {
        Self {
            source_provider,
            destination_provider,
            source,
            destination,
            source_adapter,
            destination_adapter,
            recipient,
        }
    }

    pub fn source(&self) -> &ChainEndpoint {
        &self.source
    }

    pub fn destination(&self) -> &ChainEndpoint {
        &self.destination
    }

    pub fn destination_eid(&self) -> Result<u32> {
        self.destination.eid()
    }

    pub fn source_provider(&self) -> &SrcProvider {
        &self.source_provider
    }

    pub fn destination_provider(&self) -> &DstProvider {
        &self.destination_provider
    }

    /// The OFT contract called on the source chain.
    pub fn source_adapter(&self) -> &ContractConfig {
        &self.source_adapter
    }

    /// Its peer on the destination chain.
    pub fn destination_adapter(&self) -> &ContractConfig {
        &self.destination_adapter
    }

    pub fn recipient(&self) -> Address {
        self.recipient
    }
}
