use {
    super::OftBridge,
    crate::{
        error::Result,
        oft::{
            OftAdapter,
            OftAdapter::{MessagingFee, SendParam},
        },
    },
    alloy_network::Ethereum,
    alloy_primitives::U256,
    alloy_provider::Provider,
    std::fmt::{Display, Formatter},
    tracing::debug,
};

/// Messaging fee returned by `quoteSend`. The native fee is attached as
/// transaction value on the send; the LZ token fee is zero unless fees are
/// paid in the protocol token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeQuote {
    pub native_fee: U256,
    pub lz_token_fee: U256,
}

impl FeeQuote {
    pub(crate) fn messaging_fee(&self) -> MessagingFee {
        MessagingFee {
            nativeFee: self.native_fee,
            lzTokenFee: self.lz_token_fee,
        }
    }
}

impl From<MessagingFee> for FeeQuote {
    fn from(fee: MessagingFee) -> Self {
        Self {
            native_fee: fee.nativeFee,
            lz_token_fee: fee.lzTokenFee,
        }
    }
}

impl Display for FeeQuote {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "native {} wei, lz token {}",
            self.native_fee, self.lz_token_fee
        )
    }
}

impl<SrcProvider: Provider<Ethereum> + Clone, DstProvider> OftBridge<SrcProvider, DstProvider> {
    /// Ask the source adapter what delivering this message will cost.
    pub async fn quote_send(&self, param: &SendParam) -> Result<FeeQuote> {
        let adapter = OftAdapter::new(self.source_adapter().address, self.source_provider());
        debug!("quoting send of {} to eid {}", param.amountLD, param.dstEid);
        let fee = adapter.quoteSend(param.clone(), false).call().await?;
        Ok(fee.into())
    }
}
