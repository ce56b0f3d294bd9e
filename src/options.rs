use alloy_primitives::Bytes;

// LayerZero V2 "type 3" options wire format constants.
const OPTIONS_TYPE_3: u16 = 3;
const WORKER_ID_EXECUTOR: u8 = 1;
const OPTION_TYPE_LZ_RECEIVE: u8 = 1;

/// Builder for LayerZero V2 message options, matching the encoding of
/// `@layerzerolabs/lz-v2-utilities` `Options.newOptions()`.
#[derive(Debug, Clone, Default)]
pub struct OptionsBuilder {
    options: Vec<u8>,
}

impl OptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an executor `lzReceive` option: the gas the executor supplies
    /// on the destination, plus optional native value for the call. A zero
    /// value is omitted from the encoding, as the reference library does.
    pub fn executor_lz_receive(mut self, gas: u128, value: u128) -> Self {
        let mut payload = gas.to_be_bytes().to_vec();
        if value > 0 {
            payload.extend_from_slice(&value.to_be_bytes());
        }
        self.options.push(WORKER_ID_EXECUTOR);
        // option length covers the option type byte plus its payload
        self.options
            .extend_from_slice(&(payload.len() as u16 + 1).to_be_bytes());
        self.options.push(OPTION_TYPE_LZ_RECEIVE);
        self.options.extend_from_slice(&payload);
        self
    }

    pub fn build(self) -> Bytes {
        let mut out = OPTIONS_TYPE_3.to_be_bytes().to_vec();
        out.extend(self.options);
        out.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Known vector from the LayerZero docs:
    // Options.newOptions().addExecutorLzReceiveOption(200000, 0).toHex()
    #[test]
    fn lz_receive_known_vector() {
        let options = OptionsBuilder::new().executor_lz_receive(200_000, 0).build();
        assert_eq!(
            options.to_string(),
            "0x00030100110100000000000000000000000000030d40"
        );
    }

    #[test]
    fn lz_receive_with_value_extends_payload() {
        let options = OptionsBuilder::new().executor_lz_receive(200_000, 1).build();
        // 16 extra payload bytes and a length of 0x21 instead of 0x11
        assert_eq!(options.len(), 2 + 1 + 2 + 1 + 32);
        assert_eq!(options[3..5], [0x00, 0x21]);
    }
}
