//! Sample configuration documents.

use serde_json::{json, Value};

/// Standalone-ledger genesis account.
pub const GENESIS_ACCOUNT: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

/// Signing secret of [`GENESIS_ACCOUNT`].
pub const GENESIS_SECRET: &str = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";

/// A witness configuration bridging the native asset between two door accounts.
pub fn witness_config(locking_door: &str, issuing_door: &str) -> Value {
    json!({
        "LockingChain": {
            "Endpoint": { "Host": "127.0.0.1", "Port": 6005 },
            "TxnSubmit": { "ShouldSubmit": true }
        },
        "IssuingChain": {
            "Endpoint": { "Host": "127.0.0.1", "Port": 6007 },
            "TxnSubmit": { "ShouldSubmit": true }
        },
        "RPCEndpoint": { "Host": "127.0.0.1", "Port": 6010 },
        "DBDir": "/tmp/witness/db",
        "LogFile": "/tmp/witness/witness.log",
        "SigningKeySeed": "snzb83cV8zpLPTE4nk7PSnqj3VBKM",
        "SigningKeyType": "ed25519",
        "XChainBridge": {
            "LockingChainDoor": locking_door,
            "LockingChainIssue": { "currency": "XRP" },
            "IssuingChainDoor": issuing_door,
            "IssuingChainIssue": { "currency": "XRP" }
        }
    })
}

/// A bootstrap document for a bridge with the given door accounts and signers.
///
/// The issuing chain's reward and submit accounts are given separately so that overlapping entries
/// can be tested; the locking chain gets one fixed account of each.
pub fn bootstrap_document(
    doors: (&str, &str),
    signers: &[(&str, u32)],
    issuing_reward_accounts: &[&str],
    issuing_submit_accounts: &[&str],
) -> Value {
    let signer_list: Vec<Value> = signers
        .iter()
        .map(|(account, weight)| json!({ "Account": account, "Weight": weight }))
        .collect();

    json!({
        "LockingChain": {
            "DoorAccount": { "Address": doors.0, "Seed": format!("s{}Seed", doors.0) },
            "WitnessRewardAccounts": ["rLockingReward"],
            "WitnessSubmitAccounts": ["rLockingSubmit"]
        },
        "IssuingChain": {
            "DoorAccount": { "Address": doors.1, "Seed": format!("s{}Seed", doors.1) },
            "WitnessRewardAccounts": issuing_reward_accounts,
            "WitnessSubmitAccounts": issuing_submit_accounts
        },
        "Witnesses": { "SignerList": signer_list }
    })
}

/// A node configuration exposing an admin JSON-RPC port and a websocket port.
pub fn node_config(rpc_ip: &str, rpc_port: u16) -> String {
    format!(
        "[server]
port_rpc_admin_local
port_ws_admin_local
port_peer

[port_rpc_admin_local]
port = {rpc_port}
ip = {rpc_ip}
admin = 127.0.0.1
protocol = http

[port_ws_admin_local]
port = 6006
ip = 127.0.0.1
admin = 127.0.0.1
protocol = ws

[port_peer]
port = 51235
ip = 0.0.0.0
protocol = peer

[node_db]
type = NuDB
path = /tmp/node/db/nudb

# standalone nodes never sync
[ssl_verify]
0
"
    )
}
