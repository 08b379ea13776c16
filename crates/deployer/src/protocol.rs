//! The bridge activation sequence.

use std::path::PathBuf;

use tracing::{info, warn};
use xbridge_ledger::{LedgerClient, Transaction};
use xbridge_primitives::{constants::DEFAULT_SIGNATURE_REWARD, types::ChainSide};
use xbridge_registry::{
    BridgeRecord, ChainRecord, ConfigStore, StorageBackend, WitnessBridgeConfig, WitnessRecord,
};

use crate::{
    bootstrap::BootstrapDocument,
    config::FundingPolicy,
    connector::ClientFactory,
    errors::{DeployError, DeployResult, FundingFailure},
    funding::AccountFunder,
    params::account_create_amounts,
};

/// What to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Name of the new bridge.
    pub name: String,

    /// Names of the locking and issuing chains.
    pub chains: (String, String),

    /// Names of the witnesses attesting for the bridge. The first one's configuration defines
    /// the bridge.
    pub witnesses: Vec<String>,

    /// Bootstrap document, or the directory holding it.
    pub bootstrap: PathBuf,

    /// Reward per witness signature, in drops.
    pub signature_reward: String,

    /// Whether to disable the door accounts' master keys once their signer lists are installed.
    pub disable_master_key: bool,
}

impl BuildRequest {
    /// Creates a request with the default signature reward and master keys left enabled.
    pub fn new(
        name: impl Into<String>,
        chains: (String, String),
        witnesses: Vec<String>,
        bootstrap: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            chains,
            witnesses,
            bootstrap: bootstrap.into(),
            signature_reward: DEFAULT_SIGNATURE_REWARD.to_string(),
            disable_master_key: false,
        }
    }

    /// Sets the reward per witness signature.
    pub fn with_signature_reward(self, signature_reward: impl Into<String>) -> Self {
        Self {
            signature_reward: signature_reward.into(),
            ..self
        }
    }

    /// Sets whether the door accounts' master keys are disabled.
    pub fn with_master_key_disabled(self, disable_master_key: bool) -> Self {
        Self {
            disable_master_key,
            ..self
        }
    }
}

/// A transaction applied during a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedTx {
    /// Side of the bridge it was applied on.
    pub side: ChainSide,

    /// Transaction type.
    pub kind: &'static str,

    /// Transaction hash, when the node reported it.
    pub hash: Option<String>,
}

/// Everything a successful build did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentReport {
    /// The persisted bridge.
    pub record: BridgeRecord,

    /// Applied door-account transactions, in order.
    pub submitted: Vec<SubmittedTx>,

    /// Funded `(chain, account)` pairs, in order.
    pub funded: Vec<(String, String)>,
}

/// Runs bridge builds against one registry.
#[derive(Debug)]
pub struct BridgeDeployer<'a, B, F, A> {
    store: &'a ConfigStore<B>,
    clients: F,
    funder: A,
    funding_policy: FundingPolicy,
}

impl<'a, B, F, A> BridgeDeployer<'a, B, F, A>
where
    B: StorageBackend,
    F: ClientFactory,
    A: AccountFunder,
{
    /// Creates a deployer.
    pub const fn new(
        store: &'a ConfigStore<B>,
        clients: F,
        funder: A,
        funding_policy: FundingPolicy,
    ) -> Self {
        Self {
            store,
            clients,
            funder,
            funding_policy,
        }
    }

    /// Defines the bridge, activates it on both chains and funds the witnesses' accounts.
    ///
    /// The bridge is recorded before the first transaction is sent and stays recorded whatever
    /// happens afterwards, so a failed build cannot be re-run under the same name.
    pub async fn build(&self, request: &BuildRequest) -> DeployResult<DeploymentReport> {
        let (chains, witnesses) = self.validate(request)?;

        let witness_config = WitnessBridgeConfig::load(&witnesses[0])?;
        let clients = (
            self.clients.client_for(&chains.0)?,
            self.clients.client_for(&chains.1)?,
        );
        let reserves = (
            clients.0.reserve_base().await?,
            clients.1.reserve_base().await?,
        );

        let record = BridgeRecord {
            name: request.name.clone(),
            chain_pair: request.chains.clone(),
            witness_count: witnesses.len(),
            door_accounts: witness_config.door_accounts(),
            bridge_currencies: witness_config.currencies(),
            signature_reward: request.signature_reward.clone(),
            account_create_amounts: account_create_amounts(reserves),
        };
        self.store.append_bridge(record.clone())?;
        info!(
            bridge = %record.name,
            locking = %record.chain_pair.0,
            issuing = %record.chain_pair.1,
            ?reserves,
            "recorded bridge"
        );

        let bootstrap = BootstrapDocument::load(&request.bootstrap)?;
        check_doors(&bootstrap, &record, request)?;

        let mut submitted = Vec::new();
        for side in ChainSide::ALL {
            let client = side.select(&clients).as_ref();
            let applied = self
                .activate_side(side, client, &bootstrap, &record, request)
                .await?;
            submitted.extend(applied);
        }

        let funded = self.fund_accounts(&bootstrap, &record).await?;
        info!(
            bridge = %record.name,
            transactions = submitted.len(),
            funded = funded.len(),
            "bridge active"
        );

        Ok(DeploymentReport {
            record,
            submitted,
            funded,
        })
    }

    fn validate(
        &self,
        request: &BuildRequest,
    ) -> DeployResult<((ChainRecord, ChainRecord), Vec<WitnessRecord>)> {
        let registry = self.store.load()?;

        if registry.bridge_exists(&request.name) {
            return Err(DeployError::BridgeExists(request.name.clone()));
        }

        let (locking, issuing) = &request.chains;
        if locking == issuing {
            return Err(DeployError::SameChain(locking.clone()));
        }

        let find_chain = |name: &String| {
            registry
                .find_chain(name)
                .cloned()
                .ok_or_else(|| DeployError::ChainNotRunning(name.clone()))
        };
        let chains = (find_chain(locking)?, find_chain(issuing)?);

        if request.witnesses.is_empty() {
            return Err(DeployError::NoWitnesses);
        }
        let witnesses = request
            .witnesses
            .iter()
            .map(|name| {
                registry
                    .find_witness(name)
                    .cloned()
                    .ok_or_else(|| DeployError::WitnessNotRunning(name.clone()))
            })
            .collect::<DeployResult<Vec<_>>>()?;

        Ok((chains, witnesses))
    }

    /// Creates the bridge on one side and hands its door account to the witnesses.
    async fn activate_side(
        &self,
        side: ChainSide,
        client: &dyn LedgerClient,
        bootstrap: &BootstrapDocument,
        record: &BridgeRecord,
        request: &BuildRequest,
    ) -> DeployResult<Vec<SubmittedTx>> {
        let door = &bootstrap.chain(side).door_account;

        let mut txs = vec![
            Transaction::create_bridge(
                &door.address,
                record.xchain_bridge(),
                &record.signature_reward,
                record.account_create_amount(side),
            ),
            Transaction::signer_list(&door.address, bootstrap.signer_entries()),
        ];
        if request.disable_master_key {
            txs.push(Transaction::disable_master_key(&door.address));
        }

        let mut submitted = Vec::with_capacity(txs.len());
        for tx in &txs {
            let outcome = client
                .submit_and_accept(tx, &door.seed)
                .await
                .map_err(|source| DeployError::Transaction {
                    step: tx.kind(),
                    chain: record.chain(side).to_string(),
                    source,
                })?;

            submitted.push(SubmittedTx {
                side,
                kind: tx.kind(),
                hash: outcome.hash,
            });
        }

        Ok(submitted)
    }

    /// Funds every issuing-side witness account on both chains, locking chain first.
    async fn fund_accounts(
        &self,
        bootstrap: &BootstrapDocument,
        record: &BridgeRecord,
    ) -> DeployResult<Vec<(String, String)>> {
        let mut funded = Vec::new();
        let mut failures = Vec::new();

        for account in bootstrap.accounts_to_fund() {
            for side in ChainSide::ALL {
                let chain = record.chain(side);
                match self.funder.fund_account(chain, &account).await {
                    Ok(()) => funded.push((chain.to_string(), account.clone())),
                    Err(err) => {
                        warn!(%chain, %account, %err, "failed to fund account");
                        failures.push(FundingFailure {
                            chain: chain.to_string(),
                            account: account.clone(),
                            reason: err.to_string(),
                        });

                        if self.funding_policy == FundingPolicy::Abort {
                            return Err(DeployError::Funding { failures });
                        }
                    }
                }
            }
        }

        if !failures.is_empty() {
            return Err(DeployError::Funding { failures });
        }

        Ok(funded)
    }
}

/// The bootstrap document must hold the secrets of the doors the witnesses watch.
fn check_doors(
    bootstrap: &BootstrapDocument,
    record: &BridgeRecord,
    request: &BuildRequest,
) -> DeployResult<()> {
    for side in ChainSide::ALL {
        let expected = record.door_account(side);
        let found = &bootstrap.chain(side).door_account.address;
        if found != expected {
            return Err(DeployError::Bootstrap {
                path: request.bootstrap.clone(),
                reason: format!("{side} door is {found}, witnesses expect {expected}"),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use xbridge_primitives::types::{EntityKind, Issue};
    use xbridge_registry::{JsonFileBackend, ProcessRecord};
    use xbridge_test_utils::{
        configs::{bootstrap_document, witness_config},
        fs::write_file,
    };

    use super::*;
    use crate::testing::{Call, MockClientFactory, MockFunder};

    struct Fixture {
        dir: TempDir,
        store: ConfigStore,
    }

    impl Fixture {
        /// Chains A and B plus witness w1 watching doors rDoorA/rDoorB.
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let backend =
                JsonFileBackend::create_if_missing(dir.path().join("config.json")).unwrap();
            let store = ConfigStore::new(backend);

            for (name, pid) in [("A", 1), ("B", 2)] {
                store
                    .append_process(
                        EntityKind::Chain,
                        ProcessRecord::new(
                            name,
                            "/bin/rippled",
                            dir.path().join(format!("{name}.cfg")),
                            pid,
                        ),
                    )
                    .unwrap();
            }

            let witness = write_file(
                dir.path(),
                "w1.json",
                &witness_config("rDoorA", "rDoorB").to_string(),
            );
            store
                .append_process(
                    EntityKind::Witness,
                    ProcessRecord::new("w1", "/bin/witnessd", witness, 3),
                )
                .unwrap();

            let bootstrap = bootstrap_document(
                ("rDoorA", "rDoorB"),
                &[("rW1", 1)],
                &["rReward1", "rShared"],
                &["rShared", "rSubmit1"],
            );
            write_file(dir.path(), "bridge_bootstrap.json", &bootstrap.to_string());

            Self { dir, store }
        }

        fn request(&self, name: &str) -> BuildRequest {
            BuildRequest::new(
                name,
                ("A".to_string(), "B".to_string()),
                vec!["w1".to_string()],
                self.dir.path(),
            )
        }
    }

    fn submitted(calls: &[Call]) -> Vec<(String, &'static str)> {
        calls
            .iter()
            .filter_map(|call| match call {
                Call::Submit { chain, tx, .. } => Some((chain.clone(), tx.kind())),
                _ => None,
            })
            .collect()
    }

    fn funded(calls: &[Call]) -> Vec<(String, String)> {
        calls
            .iter()
            .filter_map(|call| match call {
                Call::Fund { chain, account } => Some((chain.clone(), account.clone())),
                _ => None,
            })
            .collect()
    }

    fn pair(chain: &str, account: &str) -> (String, String) {
        (chain.to_string(), account.to_string())
    }

    #[tokio::test]
    async fn build_activates_bridge_end_to_end() {
        let fixture = Fixture::new();
        let clients = MockClientFactory::new(&[("A", 5), ("B", 7)]);
        let funder = MockFunder::sharing_log(&clients);
        let log = clients.log();
        let deployer =
            BridgeDeployer::new(&fixture.store, clients, funder, FundingPolicy::Continue);

        let report = deployer.build(&fixture.request("br1")).await.unwrap();

        let record = fixture.store.find_bridge("br1").unwrap();
        assert_eq!(record, report.record);
        assert_eq!(
            record.account_create_amounts,
            ("7".to_string(), "5".to_string())
        );
        assert_eq!(
            record.door_accounts,
            ("rDoorA".to_string(), "rDoorB".to_string())
        );
        assert_eq!(record.bridge_currencies, (Issue::native(), Issue::native()));
        assert_eq!(record.witness_count, 1);
        assert_eq!(record.signature_reward, "100");

        let calls = log.lock().unwrap().clone();
        assert_eq!(
            submitted(&calls),
            vec![
                ("A".to_string(), "XChainCreateBridge"),
                ("A".to_string(), "SignerListSet"),
                ("B".to_string(), "XChainCreateBridge"),
                ("B".to_string(), "SignerListSet"),
            ]
        );
        let accepts = calls
            .iter()
            .filter(|call| matches!(call, Call::Accept { .. }))
            .count();
        assert_eq!(accepts, 4);

        let expected_funding = vec![
            pair("A", "rReward1"),
            pair("B", "rReward1"),
            pair("A", "rShared"),
            pair("B", "rShared"),
            pair("A", "rSubmit1"),
            pair("B", "rSubmit1"),
        ];
        assert_eq!(funded(&calls), expected_funding);
        assert_eq!(report.funded, expected_funding);
        assert_eq!(report.submitted.len(), 4);
    }

    #[tokio::test]
    async fn transactions_carry_side_specific_parameters() {
        let fixture = Fixture::new();
        let clients = MockClientFactory::new(&[("A", 5), ("B", 7)]);
        let funder = MockFunder::sharing_log(&clients);
        let log = clients.log();
        let deployer =
            BridgeDeployer::new(&fixture.store, clients, funder, FundingPolicy::Continue);

        deployer
            .build(&fixture.request("br1").with_signature_reward("250"))
            .await
            .unwrap();

        let calls = log.lock().unwrap().clone();
        let txs: Vec<(&Transaction, &str)> = calls
            .iter()
            .filter_map(|call| match call {
                Call::Submit { tx, secret, .. } => Some((tx, secret.as_str())),
                _ => None,
            })
            .collect();

        match txs[0] {
            (
                Transaction::XChainCreateBridge {
                    account,
                    signature_reward,
                    min_account_create_amount,
                    ..
                },
                secret,
            ) => {
                assert_eq!(account, "rDoorA");
                assert_eq!(signature_reward, "250");
                assert_eq!(min_account_create_amount, "7");
                assert_eq!(secret, "srDoorASeed");
            }
            other => panic!("expected bridge creation, got {other:?}"),
        }
        match txs[1] {
            (Transaction::SignerListSet { signer_quorum, signer_entries, .. }, _) => {
                assert_eq!(*signer_quorum, 1);
                assert_eq!(signer_entries.len(), 1);
            }
            other => panic!("expected signer list, got {other:?}"),
        }
        match txs[2] {
            (
                Transaction::XChainCreateBridge {
                    account,
                    min_account_create_amount,
                    ..
                },
                secret,
            ) => {
                assert_eq!(account, "rDoorB");
                assert_eq!(min_account_create_amount, "5");
                assert_eq!(secret, "srDoorBSeed");
            }
            other => panic!("expected bridge creation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rebuild_is_refused_without_transactions() {
        let fixture = Fixture::new();
        let clients = MockClientFactory::new(&[("A", 5), ("B", 7)]);
        let funder = MockFunder::sharing_log(&clients);
        let log = clients.log();
        let deployer =
            BridgeDeployer::new(&fixture.store, clients, funder, FundingPolicy::Continue);

        deployer.build(&fixture.request("br1")).await.unwrap();
        assert!(fixture.store.load().unwrap().bridge_exists("br1"));
        let calls_after_first = log.lock().unwrap().len();

        let err = deployer.build(&fixture.request("br1")).await.unwrap_err();
        assert!(matches!(
            err,
            DeployError::BridgeExists(ref name) if name == "br1"
        ));
        assert!(err.is_precondition());
        assert_eq!(log.lock().unwrap().len(), calls_after_first);
    }

    #[tokio::test]
    async fn preconditions_leave_registry_untouched() {
        let fixture = Fixture::new();
        let clients = MockClientFactory::new(&[]);
        let funder = MockFunder::sharing_log(&clients);
        let log = clients.log();
        let deployer =
            BridgeDeployer::new(&fixture.store, clients, funder, FundingPolicy::Continue);
        let before = fixture.store.load().unwrap();

        let mut missing_chain = fixture.request("br1");
        missing_chain.chains.1 = "C".to_string();
        assert!(matches!(
            deployer.build(&missing_chain).await,
            Err(DeployError::ChainNotRunning(ref name)) if name == "C"
        ));

        let mut same_chain = fixture.request("br1");
        same_chain.chains.1 = "A".to_string();
        assert!(matches!(
            deployer.build(&same_chain).await,
            Err(DeployError::SameChain(_))
        ));

        let mut missing_witness = fixture.request("br1");
        missing_witness.witnesses.push("w2".to_string());
        assert!(matches!(
            deployer.build(&missing_witness).await,
            Err(DeployError::WitnessNotRunning(ref name)) if name == "w2"
        ));

        let mut no_witness = fixture.request("br1");
        no_witness.witnesses.clear();
        assert!(matches!(
            deployer.build(&no_witness).await,
            Err(DeployError::NoWitnesses)
        ));

        assert_eq!(fixture.store.load().unwrap(), before);
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn master_key_is_disabled_after_each_signer_list() {
        let fixture = Fixture::new();
        let clients = MockClientFactory::new(&[("A", 5), ("B", 7)]);
        let funder = MockFunder::sharing_log(&clients);
        let log = clients.log();
        let deployer =
            BridgeDeployer::new(&fixture.store, clients, funder, FundingPolicy::Continue);

        deployer
            .build(&fixture.request("br1").with_master_key_disabled(true))
            .await
            .unwrap();

        let calls = log.lock().unwrap().clone();
        assert_eq!(
            submitted(&calls),
            vec![
                ("A".to_string(), "XChainCreateBridge"),
                ("A".to_string(), "SignerListSet"),
                ("A".to_string(), "AccountSet"),
                ("B".to_string(), "XChainCreateBridge"),
                ("B".to_string(), "SignerListSet"),
                ("B".to_string(), "AccountSet"),
            ]
        );
    }

    #[tokio::test]
    async fn rejected_transaction_stops_build_and_keeps_record() {
        let fixture = Fixture::new();
        let clients = MockClientFactory::new(&[("A", 5), ("B", 7)]).reject("B", "SignerListSet");
        let funder = MockFunder::sharing_log(&clients);
        let log = clients.log();
        let deployer =
            BridgeDeployer::new(&fixture.store, clients, funder, FundingPolicy::Continue);

        let err = deployer.build(&fixture.request("br1")).await.unwrap_err();
        match err {
            DeployError::Transaction { step, chain, .. } => {
                assert_eq!(step, "SignerListSet");
                assert_eq!(chain, "B");
            }
            other => panic!("expected transaction failure, got {other:?}"),
        }

        assert!(fixture.store.load().unwrap().bridge_exists("br1"));
        assert!(funded(&log.lock().unwrap()).is_empty());
    }

    #[tokio::test]
    async fn mismatched_bootstrap_doors_fail_before_transactions() {
        let fixture = Fixture::new();
        let bootstrap = bootstrap_document(("rOther", "rDoorB"), &[("rW1", 1)], &[], &[]);
        let path = write_file(fixture.dir.path(), "other.json", &bootstrap.to_string());

        let clients = MockClientFactory::new(&[("A", 5), ("B", 7)]);
        let funder = MockFunder::sharing_log(&clients);
        let log = clients.log();
        let deployer =
            BridgeDeployer::new(&fixture.store, clients, funder, FundingPolicy::Continue);

        let mut request = fixture.request("br1");
        request.bootstrap = path;
        assert!(matches!(
            deployer.build(&request).await,
            Err(DeployError::Bootstrap { .. })
        ));
        assert!(submitted(&log.lock().unwrap()).is_empty());
    }

    #[tokio::test]
    async fn continue_policy_attempts_every_account() {
        let fixture = Fixture::new();
        let clients = MockClientFactory::new(&[("A", 5), ("B", 7)]);
        let funder = MockFunder::sharing_log(&clients).fail("A", "rShared");
        let log = clients.log();
        let deployer =
            BridgeDeployer::new(&fixture.store, clients, funder, FundingPolicy::Continue);

        let err = deployer.build(&fixture.request("br1")).await.unwrap_err();
        match err {
            DeployError::Funding { failures } => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].chain, "A");
                assert_eq!(failures[0].account, "rShared");
            }
            other => panic!("expected funding failure, got {other:?}"),
        }
        assert_eq!(funded(&log.lock().unwrap()).len(), 6);
    }

    #[tokio::test]
    async fn abort_policy_stops_at_first_failure() {
        let fixture = Fixture::new();
        let clients = MockClientFactory::new(&[("A", 5), ("B", 7)]);
        let funder = MockFunder::sharing_log(&clients).fail("A", "rShared");
        let log = clients.log();
        let deployer = BridgeDeployer::new(&fixture.store, clients, funder, FundingPolicy::Abort);

        let err = deployer.build(&fixture.request("br1")).await.unwrap_err();
        assert!(matches!(
            err,
            DeployError::Funding { ref failures } if failures.len() == 1
        ));
        assert_eq!(
            funded(&log.lock().unwrap()),
            vec![pair("A", "rReward1"), pair("B", "rReward1"), pair("A", "rShared")]
        );
    }
}
