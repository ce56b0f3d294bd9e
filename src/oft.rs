use alloy_sol_types::sol;

sol! {
    /// The OFT / OFT Adapter surface this crate drives. Field and function
    /// shapes follow the LayerZero V2 `IOFT`/`OAppCore` interfaces.
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract OftAdapter {
        struct SendParam {
            uint32 dstEid;
            bytes32 to;
            uint256 amountLD;
            uint256 minAmountLD;
            bytes extraOptions;
            bytes composeMsg;
            bytes oftCmd;
        }

        struct MessagingFee {
            uint256 nativeFee;
            uint256 lzTokenFee;
        }

        struct MessagingReceipt {
            bytes32 guid;
            uint64 nonce;
            MessagingFee fee;
        }

        struct OFTReceipt {
            uint256 amountSentLD;
            uint256 amountReceivedLD;
        }

        /// The underlying ERC-20 for adapters; the OFT itself otherwise.
        function token() external view returns (address);
        function decimals() external view returns (uint8);

        function peers(uint32 eid) external view returns (bytes32);
        function setPeer(uint32 eid, bytes32 peer) external;

        function quoteSend(SendParam calldata sendParam, bool payInLzToken)
            external view returns (MessagingFee memory fee);

        function send(
            SendParam calldata sendParam,
            MessagingFee calldata fee,
            address refundAddress
        ) external payable returns (MessagingReceipt memory, OFTReceipt memory);
    }

    /// The slice of ERC-20 used for approvals and the inbound listener.
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract ERC20 {
        event Transfer(address indexed from, address indexed to, uint256 value);

        function decimals() external view returns (uint8);
        function balanceOf(address owner) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 value) external returns (bool);
    }
}
