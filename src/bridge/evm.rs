use {
    super::{LZ_RECEIVE_GAS, OftBridge, TransferResult},
    crate::{
        error::{Error, Result},
        oft::{ERC20, OftAdapter, OftAdapter::SendParam},
        options::OptionsBuilder,
        units,
    },
    alloy_network::Ethereum,
    alloy_primitives::{Address, TxHash, U256},
    alloy_provider::{Provider, WalletProvider},
    tracing::{Level, debug, info, instrument, warn},
};

// A transfer between two EVM chains.
impl<
    SrcProvider: Provider<Ethereum> + WalletProvider + Clone,
    DstProvider: Provider<Ethereum> + WalletProvider + Clone,
> OftBridge<SrcProvider, DstProvider>
{
    /// Token decimals on the source side: the adapter's own `decimals()`,
    /// the underlying token's, or the configured/default value, whichever
    /// resolves first.
    pub async fn resolve_decimals(&self) -> u8 {
        let adapter = OftAdapter::new(self.source_adapter().address, self.source_provider());
        if let Ok(decimals) = adapter.decimals().call().await {
            return decimals;
        }
        debug!("adapter has no decimals(), querying underlying token");
        if let Ok(token) = adapter.token().call().await
            && !token.is_zero()
            && let Ok(decimals) = ERC20::new(token, self.source_provider()).decimals().call().await
        {
            return decimals;
        }
        let fallback = self
            .source_adapter()
            .decimals
            .unwrap_or(units::DEFAULT_DECIMALS);
        warn!("could not read token decimals on-chain, using {fallback}");
        fallback
    }

    /// The ERC-20 the adapter pulls from the sender. A native OFT reports no
    /// underlying token and manages balances itself.
    pub async fn underlying_token(&self) -> Option<Address> {
        let adapter = OftAdapter::new(self.source_adapter().address, self.source_provider());
        match adapter.token().call().await {
            Ok(token) if !token.is_zero() && token != self.source_adapter().address => Some(token),
            Ok(_) => None,
            Err(e) => {
                debug!("no token() on adapter ({e}), assuming native OFT");
                None
            }
        }
    }

    /// Check balance and allowance against the adapter, approving when the
    /// allowance is short. Returns the approval hash if one was sent.
    #[instrument(skip(self), level = Level::INFO)]
    pub async fn approve_if_needed(&self, amount: U256) -> Result<Option<TxHash>> {
        let Some(token) = self.underlying_token().await else {
            debug!("native OFT, no approval needed");
            return Ok(None);
        };
        let provider = self.source_provider();
        let sender = provider.default_signer_address();
        let adapter_address = self.source_adapter().address;
        let erc20 = ERC20::new(token, provider);

        let balance = erc20.balanceOf(sender).call().await?;
        if balance < amount {
            return Err(Error::InsufficientBalance(balance, amount));
        }

        let allowance = erc20.allowance(sender, adapter_address).call().await?;
        if allowance >= amount {
            debug!("allowance {allowance} already covers {amount}");
            return Ok(None);
        }

        info!("approving {adapter_address} to spend {amount} of {token}");
        let approve_hash = erc20.approve(adapter_address, amount).send().await?.watch().await?;
        info!("approved: {approve_hash}");

        // The approval is mined; a still-short allowance means the token did
        // something nonstandard and the send would revert anyway.
        let allowance = erc20.allowance(sender, adapter_address).call().await?;
        if allowance < amount {
            return Err(Error::InsufficientAllowance(allowance, amount));
        }
        Ok(Some(approve_hash))
    }

    fn send_param(&self, amount_ld: U256) -> Result<SendParam> {
        Ok(SendParam {
            dstEid: self.destination_eid()?,
            to: self.recipient().into_word(),
            amountLD: amount_ld,
            minAmountLD: amount_ld,
            extraOptions: OptionsBuilder::new()
                .executor_lz_receive(LZ_RECEIVE_GAS, 0)
                .build(),
            composeMsg: Default::default(),
            oftCmd: Default::default(),
        })
    }

    /// Run the full send sequence: approve, wire peers, quote, send.
    ///
    /// `amount` is the human-readable token amount ("10.5").
    #[instrument(skip(self), level = Level::INFO)]
    pub async fn transfer(&self, amount: &str) -> Result<TransferResult> {
        info!(
            "initiating OFT transfer {self:?} to {} amount {amount}",
            self.recipient()
        );

        let decimals = self.resolve_decimals().await;
        let amount_ld = units::parse_units(amount, decimals)?;
        debug!("amount in local decimals: {amount_ld} ({decimals} decimals)");

        let approval = self.approve_if_needed(amount_ld).await?;
        self.wire_peers().await?;

        let param = self.send_param(amount_ld)?;
        let quote = self.quote_send(&param).await?;
        info!("quoted fee: {quote}");

        let provider = self.source_provider();
        let adapter = OftAdapter::new(self.source_adapter().address, provider);
        let send_hash = adapter
            .send(param, quote.messaging_fee(), provider.default_signer_address())
            .value(quote.native_fee)
            .send()
            .await?
            .watch()
            .await?;
        info!("OFT transfer initiated: {send_hash}");

        Ok(TransferResult {
            approval,
            send: send_hash,
            native_fee: quote.native_fee,
        })
    }
}
