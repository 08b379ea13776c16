//! Recording ledger and funder doubles for deployer tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use xbridge_ledger::{LedgerClient, LedgerError, LedgerResult, SubmitOutcome, Transaction};
use xbridge_registry::ChainRecord;

use crate::{
    connector::ClientFactory,
    errors::{DeployError, DeployResult},
    funding::AccountFunder,
};

/// Something a double was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Reserve {
        chain: String,
    },
    Submit {
        chain: String,
        tx: Transaction,
        secret: String,
    },
    Accept {
        chain: String,
    },
    Fund {
        chain: String,
        account: String,
    },
}

/// Calls from every double sharing it, in the order they were made.
pub(crate) type CallLog = Arc<Mutex<Vec<Call>>>;

/// Hands out [`MockLedger`]s with a fixed reserve per chain.
#[derive(Debug, Default)]
pub(crate) struct MockClientFactory {
    reserves: HashMap<String, u64>,
    rejected: HashSet<(String, &'static str)>,
    log: CallLog,
}

impl MockClientFactory {
    pub(crate) fn new(reserves: &[(&str, u64)]) -> Self {
        Self {
            reserves: reserves
                .iter()
                .map(|(chain, reserve)| (chain.to_string(), *reserve))
                .collect(),
            ..Default::default()
        }
    }

    /// Makes `chain` reject every transaction of `kind`.
    pub(crate) fn reject(mut self, chain: &str, kind: &'static str) -> Self {
        self.rejected.insert((chain.to_string(), kind));
        self
    }

    pub(crate) fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl ClientFactory for MockClientFactory {
    fn client_for(&self, chain: &ChainRecord) -> LedgerResult<Box<dyn LedgerClient>> {
        Ok(Box::new(MockLedger {
            chain: chain.name.clone(),
            reserve: self.reserves.get(&chain.name).copied().unwrap_or(10),
            rejected: self
                .rejected
                .iter()
                .filter(|(c, _)| *c == chain.name)
                .map(|(_, kind)| *kind)
                .collect(),
            log: self.log.clone(),
        }))
    }
}

#[derive(Debug)]
pub(crate) struct MockLedger {
    chain: String,
    reserve: u64,
    rejected: HashSet<&'static str>,
    log: CallLog,
}

impl MockLedger {
    fn record(&self, call: Call) {
        self.log.lock().unwrap().push(call);
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn reserve_base(&self) -> LedgerResult<u64> {
        self.record(Call::Reserve {
            chain: self.chain.clone(),
        });
        Ok(self.reserve)
    }

    async fn submit(&self, tx: &Transaction, secret: &str) -> LedgerResult<SubmitOutcome> {
        self.record(Call::Submit {
            chain: self.chain.clone(),
            tx: tx.clone(),
            secret: secret.to_string(),
        });

        let engine_result = if self.rejected.contains(tx.kind()) {
            "tecNO_PERMISSION"
        } else {
            "tesSUCCESS"
        };

        Ok(SubmitOutcome {
            engine_result: engine_result.to_string(),
            engine_result_message: String::new(),
            hash: None,
        })
    }

    async fn accept_ledger(&self) -> LedgerResult<()> {
        self.record(Call::Accept {
            chain: self.chain.clone(),
        });
        Ok(())
    }
}

/// Records funding requests; fails for the `(chain, account)` pairs it is told to.
#[derive(Debug, Default)]
pub(crate) struct MockFunder {
    failing: HashSet<(String, String)>,
    log: CallLog,
}

impl MockFunder {
    /// A funder writing into the same log as `clients`.
    pub(crate) fn sharing_log(clients: &MockClientFactory) -> Self {
        Self {
            failing: HashSet::new(),
            log: clients.log(),
        }
    }

    pub(crate) fn fail(mut self, chain: &str, account: &str) -> Self {
        self.failing.insert((chain.to_string(), account.to_string()));
        self
    }
}

#[async_trait]
impl AccountFunder for MockFunder {
    async fn fund_account(&self, chain: &str, account: &str) -> DeployResult<()> {
        self.log.lock().unwrap().push(Call::Fund {
            chain: chain.to_string(),
            account: account.to_string(),
        });

        if self
            .failing
            .contains(&(chain.to_string(), account.to_string()))
        {
            return Err(DeployError::Transaction {
                step: "Payment",
                chain: chain.to_string(),
                source: LedgerError::Rejected {
                    engine_result: "tecUNFUNDED_PAYMENT".to_string(),
                    message: "insufficient funds".to_string(),
                },
            });
        }

        Ok(())
    }
}
