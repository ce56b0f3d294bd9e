use {
    crate::error::{Error, Result},
    alloy_primitives::Address,
    serde::Deserialize,
    std::{fs, path::Path},
};

/// One entry of the endpoint config file (`lz_endpoints.json`): a network
/// name, its LayerZero endpoint id and the RPC/WebSocket URLs to reach it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainEndpoint {
    pub network: String,
    pub eid: Option<u32>,
    pub rpc_url: Option<String>,
    pub ws_url: Option<String>,
}

impl ChainEndpoint {
    pub fn eid(&self) -> Result<u32> {
        self.eid.ok_or_else(|| self.missing("eid"))
    }

    pub fn rpc_url(&self) -> Result<&str> {
        self.rpc_url.as_deref().ok_or_else(|| self.missing("rpcUrl"))
    }

    /// The streaming URL used by the listener. Optional in the config file,
    /// required for listening.
    pub fn ws_url(&self) -> Result<&str> {
        self.ws_url.as_deref().ok_or_else(|| self.missing("wsUrl"))
    }

    fn missing(&self, field: &str) -> Error {
        Error::ConfigurationMissing {
            network: self.network.clone(),
            field: field.to_string(),
        }
    }
}

/// All known networks, loaded once from `lz_endpoints.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct EndpointRegistry {
    endpoints: Vec<ChainEndpoint>,
}

impl EndpointRegistry {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Look up a network by name, case-insensitively.
    pub fn get(&self, network: &str) -> Result<&ChainEndpoint> {
        self.endpoints
            .iter()
            .find(|e| e.network.eq_ignore_ascii_case(network))
            .ok_or_else(|| Error::NetworkNotFound {
                network: network.to_string(),
            })
    }
}

/// Which deployed contract to resolve for a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractKind {
    /// The OFT or OFT Adapter that is called for quoting and sending.
    Adapter,
    /// The ERC-20 the adapter locks or mints; also the contract whose
    /// `Transfer` events the listener watches.
    Token,
}

impl ContractKind {
    fn key(&self) -> &'static str {
        match self {
            ContractKind::Adapter => "adapter",
            ContractKind::Token => "token",
        }
    }
}

/// A deployed contract on one network.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractConfig {
    pub address: Address,
    pub decimals: Option<u8>,
    /// Sender the listener expects on inbound `Transfer` events. OFT credits
    /// mint from the zero address, which is the default when unset.
    pub expected_sender: Option<Address>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
struct NetworkContracts(std::collections::HashMap<String, ContractConfig>);

/// Deployed contract addresses per network, loaded from `deployments.json`:
///
/// ```json
/// { "holesky": { "adapter": { "address": "0x..." },
///                "token":   { "address": "0x...", "decimals": 18 } } }
/// ```
///
/// The shipped `config/deployments.json` is a template with zero-address
/// placeholders; fill in your deployments before sending.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ContractRegistry {
    networks: std::collections::HashMap<String, NetworkContracts>,
}

impl ContractRegistry {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn get(&self, network: &str, kind: ContractKind) -> Result<&ContractConfig> {
        let contracts = self
            .networks
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(network))
            .map(|(_, c)| c)
            .ok_or_else(|| Error::NetworkNotFound {
                network: network.to_string(),
            })?;
        contracts.0.get(kind.key()).ok_or_else(|| Error::ConfigurationMissing {
            network: network.to_string(),
            field: kind.key().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    const ENDPOINTS: &str = r#"[
        { "network": "holesky", "eid": 40217,
          "rpcUrl": "https://holesky.example/rpc",
          "wsUrl": "wss://holesky.example/ws" },
        { "network": "amoy", "eid": 40267,
          "rpcUrl": "https://amoy.example/rpc" },
        { "network": "broken", "rpcUrl": "https://broken.example/rpc" }
    ]"#;

    const DEPLOYMENTS: &str = r#"{
        "holesky": {
            "adapter": { "address": "0x1a44076050125825900e736c501f859c50fE728c" },
            "token":   { "address": "0x6EDCE65403992e310A62460808c4b910D972f10f",
                         "decimals": 6 }
        },
        "amoy": {
            "adapter": { "address": "0x6EDCE65403992e310A62460808c4b910D972f10f" }
        }
    }"#;

    #[rstest]
    #[case("holesky", 40217)]
    #[case("HOLESKY", 40217)]
    #[case("Amoy", 40267)]
    fn lookup_is_case_insensitive(#[case] network: &str, #[case] eid: u32) {
        let registry = EndpointRegistry::from_json(ENDPOINTS).unwrap();
        let endpoint = registry.get(network).unwrap();
        assert_eq!(endpoint.eid().unwrap(), eid);
    }

    #[test]
    fn unknown_network() {
        let registry = EndpointRegistry::from_json(ENDPOINTS).unwrap();
        let err = registry.get("sepolia").unwrap_err();
        assert!(matches!(err, Error::NetworkNotFound { .. }));
    }

    #[test]
    fn missing_eid_reports_field() {
        let registry = EndpointRegistry::from_json(ENDPOINTS).unwrap();
        let endpoint = registry.get("broken").unwrap();
        let err = endpoint.eid().unwrap_err();
        assert!(
            matches!(err, Error::ConfigurationMissing { ref field, .. } if field == "eid"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn missing_ws_url_is_configuration_missing() {
        let registry = EndpointRegistry::from_json(ENDPOINTS).unwrap();
        let endpoint = registry.get("amoy").unwrap();
        assert!(endpoint.rpc_url().is_ok());
        let err = endpoint.ws_url().unwrap_err();
        assert!(matches!(err, Error::ConfigurationMissing { ref field, .. } if field == "wsUrl"));
    }

    #[test]
    fn contract_lookup() {
        let registry = ContractRegistry::from_json(DEPLOYMENTS).unwrap();
        let token = registry.get("holesky", ContractKind::Token).unwrap();
        assert_eq!(token.decimals, Some(6));
        assert!(token.expected_sender.is_none());

        let err = registry.get("amoy", ContractKind::Token).unwrap_err();
        assert!(matches!(err, Error::ConfigurationMissing { ref field, .. } if field == "token"));

        let err = registry.get("sepolia", ContractKind::Adapter).unwrap_err();
        assert!(matches!(err, Error::NetworkNotFound { .. }));
    }

    #[test]
    fn load_from_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("lz_endpoints.json");
        std::fs::write(&path, ENDPOINTS)?;
        let registry = EndpointRegistry::load(&path)?;
        assert!(registry.get("holesky").is_ok());
        Ok(())
    }
}
