use alloy_primitives::{Address, TxHash, U256};

mod report;
mod supervisor;
mod transport;

pub use {report::*, supervisor::*, transport::*};

/// What one listener invocation watches: a token contract on the listening
/// network, the sender its inbound transfers are expected to come from, and
/// the decimals used for display. Resolved from configuration on every
/// establishment attempt, immutable once a subscription is live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    pub contract: Address,
    /// OFT credits mint from the zero address on delivery.
    pub expected_sender: Address,
    pub decimals: u8,
}

/// One decoded `Transfer` event from the watched contract. Consumed
/// immediately by the reporter, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundTransfer {
    pub from: Address,
    pub to: Address,
    pub amount: U256,
    pub tx_hash: Option<TxHash>,
    pub block_number: Option<u64>,
}
