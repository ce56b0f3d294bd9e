use {
    super::{InboundTransfer, WatchTarget},
    crate::units,
};

/// Decides whether an inbound transfer is relevant and renders it for the
/// log. Relevance is a sender check only; the recipient is whoever the
/// message credited and carries no extra signal here.
#[derive(Debug, Clone)]
pub struct Reporter {
    target: WatchTarget,
}

impl Reporter {
    pub fn new(target: WatchTarget) -> Self {
        Self { target }
    }

    /// One line per relevant event, `None` for everything else. Addresses
    /// are compared byte-wise; hex casing was normalized at parse time.
    /// Never fails: when the amount cannot be formatted the raw integer is
    /// reported, marked as such.
    pub fn observe(&self, event: &InboundTransfer) -> Option<String> {
        if event.from != self.target.expected_sender {
            return None;
        }
        let amount = match units::format_units(event.amount, self.target.decimals) {
            Ok(formatted) => formatted,
            Err(e) => format!("{} (raw amount, formatting failed: {e})", event.amount),
        };
        let tx = event
            .tx_hash
            .map(|h| h.to_string())
            .unwrap_or_else(|| "pending".to_string());
        let block = event
            .block_number
            .map(|b| b.to_string())
            .unwrap_or_else(|| "pending".to_string());
        Some(format!(
            "transfer received: {amount} to {} from {} (tx {tx}, block {block})",
            event.to, event.from
        ))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy_primitives::{Address, B256, U256, address},
        rstest::rstest,
    };

    fn target(decimals: u8) -> WatchTarget {
        WatchTarget {
            contract: address!("0x6EDCE65403992e310A62460808c4b910D972f10f"),
            expected_sender: Address::ZERO,
            decimals,
        }
    }

    fn event(from: Address, amount: u128) -> InboundTransfer {
        InboundTransfer {
            from,
            to: address!("0x1a44076050125825900e736c501f859c50fE728c"),
            amount: U256::from(amount),
            tx_hash: Some(B256::repeat_byte(0xab)),
            block_number: Some(1234),
        }
    }

    #[test]
    fn unexpected_sender_is_silently_dropped() {
        let reporter = Reporter::new(target(6));
        let other = address!("0x28b5a0e9C621a5BadaA536219b3a228C8168cf5d");
        assert_eq!(reporter.observe(&event(other, 1_500_000)), None);
    }

    #[rstest]
    #[case(6, 1_500_000u128, "1.5")]
    #[case(18, 2_000_000_000_000_000_000u128, "2.0")]
    fn matching_sender_reports_once(
        #[case] decimals: u8,
        #[case] raw: u128,
        #[case] formatted: &str,
    ) {
        let reporter = Reporter::new(target(decimals));
        let line = reporter.observe(&event(Address::ZERO, raw)).unwrap();
        assert!(
            line.contains(&format!("transfer received: {formatted} ")),
            "line was: {line}"
        );
    }

    #[test]
    fn formatting_failure_still_reports_raw_amount() {
        let reporter = Reporter::new(target(200));
        let line = reporter.observe(&event(Address::ZERO, 42)).unwrap();
        assert!(line.contains("42 (raw amount"), "line was: {line}");
    }

    #[test]
    fn missing_tx_metadata_is_tolerated() {
        let reporter = Reporter::new(target(6));
        let mut ev = event(Address::ZERO, 1_000_000);
        ev.tx_hash = None;
        ev.block_number = None;
        let line = reporter.observe(&ev).unwrap();
        assert!(line.contains("tx pending"), "line was: {line}");
    }
}
