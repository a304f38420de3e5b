use std::collections::HashMap;
use std::io::{Read, Write};

use super::amount::Amount;
use super::cash_ledger::CashLedger;
use super::config::{CommitPolicy, LedgerConfig};
use super::error::{ContractError, Error, RecordError};
use super::invocation::{function, CashCall, Invocation, LoanCall};
use super::loan_broker::LoanBroker;
use super::outcome::Outcome;
use super::record::LoanRecord;
use super::settlement::Settlement;
use super::state::{InMemoryState, StateStore};
use super::Decimal;

/// Which contract a deployed instance runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractKind {
    Cash,
    Loan,
}

impl std::fmt::Display for ContractKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractKind::Cash => write!(f, "cash"),
            ContractKind::Loan => write!(f, "loan"),
        }
    }
}

struct Deployment {
    kind: ContractKind,
    state: Box<dyn StateStore>,
}

/// In-process host for contract instances.
///
/// Each deployed instance owns its own store. Invocations are executed one at
/// a time; a loan instance settles on another instance through the host.
pub struct Ledger {
    config: LedgerConfig,
    deployments: HashMap<String, Deployment>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl Ledger {
    /// Create a `Ledger` with no deployed contracts
    pub fn new(config: LedgerConfig) -> Self {
        log::trace!("Ledger initialized with {} commit policy", config.commit_policy);
        Self {
            config,
            deployments: HashMap::new(),
        }
    }

    /// Create a `Ledger` with a cash instance and a loan instance over fresh
    /// in-memory stores. The cash genesis accounts are seeded.
    pub fn with_contracts(
        config: LedgerConfig,
        cash_contract: &str,
        loan_contract: &str,
    ) -> Result<Self, ContractError> {
        let mut ledger = Self::new(config);
        ledger.deploy(cash_contract, ContractKind::Cash, Box::new(InMemoryState::new()))?;
        ledger.deploy(loan_contract, ContractKind::Loan, Box::new(InMemoryState::new()))?;
        Ok(ledger)
    }

    /// Registers a contract instance under `name` and runs its initializer.
    pub fn deploy(
        &mut self,
        name: &str,
        kind: ContractKind,
        state: Box<dyn StateStore>,
    ) -> Result<(), ContractError> {
        if self.deployments.contains_key(name) {
            return Err(ContractError::AlreadyDeployed {
                contract: name.to_string(),
            });
        }
        self.deployments
            .insert(name.to_string(), Deployment { kind, state });
        log::debug!("Deployed {kind} contract {name}");

        self.execute(&Invocation::new(name, function::INIT, Vec::<String>::new()))?;
        Ok(())
    }

    /// Deployed instances and what they run.
    pub fn contracts(&self) -> impl Iterator<Item = (&str, ContractKind)> {
        self.deployments
            .iter()
            .map(|(name, deployment)| (name.as_str(), deployment.kind))
    }

    /// Read access to an instance's store.
    pub fn state(&self, contract: &str) -> Option<&dyn StateStore> {
        self.deployments
            .get(contract)
            .map(|deployment| deployment.state.as_ref())
    }

    /// Balance of `account` on a cash instance, `None` if never credited.
    pub fn balance(
        &self,
        contract: &str,
        account: &str,
    ) -> Result<Option<Decimal>, ContractError> {
        let state = self.state(contract).ok_or_else(|| unknown_contract(contract))?;
        CashLedger::new(self.config.commit_policy).balance(state, account)
    }

    /// Loan terms stored on a loan instance, `None` if never offered.
    pub fn loan(
        &self,
        contract: &str,
        loan_id: &str,
    ) -> Result<Option<LoanRecord>, ContractError> {
        let state = self.state(contract).ok_or_else(|| unknown_contract(contract))?;
        LoanBroker::new(self.config.commit_policy).loan(state, loan_id)
    }

    /// Invokes `function` on `contract` with string arguments.
    pub fn invoke<S: AsRef<str>>(
        &mut self,
        contract: &str,
        function: &str,
        args: &[S],
    ) -> Result<Vec<u8>, ContractError> {
        let invocation =
            Invocation::new(contract, function, args.iter().map(AsRef::<str>::as_ref));
        self.execute(&invocation)
    }

    /// Executes a framed invocation and returns its payload.
    pub fn execute(&mut self, invocation: &Invocation) -> Result<Vec<u8>, ContractError> {
        log::trace!("Executing {invocation}");
        let mut deployment = self
            .deployments
            .remove(&invocation.contract)
            .ok_or_else(|| unknown_contract(&invocation.contract))?;

        let policy = self.config.commit_policy;
        let result = match deployment.kind {
            ContractKind::Cash => CashCall::try_from(invocation).and_then(|call| {
                CashLedger::new(policy).handle(deployment.state.as_mut(), call)
            }),
            ContractKind::Loan => LoanCall::try_from(invocation).and_then(|call| {
                let mut router = Router {
                    caller: &invocation.contract,
                    deployments: &mut self.deployments,
                    policy,
                };
                LoanBroker::new(policy).handle(deployment.state.as_mut(), &mut router, call)
            }),
        };

        self.deployments
            .insert(invocation.contract.clone(), deployment);
        result
    }

    /// Replays an invocation script from any source (File, `TcpStream`, etc.).
    ///
    /// Rows are `contract,function,arg...` without a header; blank lines and
    /// lines starting with `#` are skipped. A failing invocation is logged and
    /// recorded in its `Outcome`, then the replay continues. Unreadable input
    /// or a row without a function name stops the replay.
    pub fn process_invocations<R: Read>(&mut self, reader: R) -> Result<Vec<Outcome>, Error> {
        log::info!(
            "Starting invocation replay ({} commit policy)",
            self.config.commit_policy
        );

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut outcomes = Vec::new();
        let mut succeeded = 0u64;
        let mut failed = 0u64;
        let mut index = 0u64;

        for result in csv_reader.records() {
            let record = result?;
            index += 1;
            let row = record.position().map_or(index, csv::Position::line);

            let invocation = match (record.get(0), record.get(1)) {
                (Some(contract), Some(function))
                    if !contract.is_empty() && !function.is_empty() =>
                {
                    Invocation::new(contract, function, record.iter().skip(2))
                }
                _ => return Err(RecordError::Malformed { row }.into()),
            };

            match self.execute(&invocation) {
                Ok(payload) => {
                    succeeded += 1;
                    outcomes.push(Outcome::succeeded(row, &invocation, &payload));
                }
                Err(e) => {
                    log::warn!("[row {row}] - Failed {invocation}: {e}");
                    failed += 1;
                    outcomes.push(Outcome::failed(row, &invocation, &e));
                }
            }
        }

        log::info!("Replay complete: {succeeded} succeeded, {failed} failed");
        Ok(outcomes)
    }

    /// Writes outcomes as CSV to any sink (Stdout, File, `TcpStream`, etc.).
    pub fn export_outcomes<W: Write>(outcomes: &[Outcome], writer: W) -> Result<(), Error> {
        log::info!("Exporting {} outcomes", outcomes.len());

        let mut csv_writer = csv::Writer::from_writer(writer);
        for outcome in outcomes {
            csv_writer.serialize(outcome)?;
        }
        csv_writer.flush()?;

        log::trace!("Export complete");
        Ok(())
    }
}

fn unknown_contract(contract: &str) -> ContractError {
    ContractError::UnknownContract {
        contract: contract.to_string(),
    }
}

/// Routes a loan instance's settlement to another deployed cash instance.
/// The calling instance is checked out of the registry while it runs.
struct Router<'a> {
    caller: &'a str,
    deployments: &'a mut HashMap<String, Deployment>,
    policy: CommitPolicy,
}

impl Settlement for Router<'_> {
    fn transfer(
        &mut self,
        contract: &str,
        from: &str,
        to: &str,
        amount: Amount,
    ) -> Result<(), ContractError> {
        if contract == self.caller {
            return Err(ContractError::UnsupportedCall {
                contract: contract.to_string(),
                function: function::TRANSFER.to_string(),
            });
        }
        let deployment = self
            .deployments
            .get_mut(contract)
            .ok_or_else(|| unknown_contract(contract))?;

        match deployment.kind {
            ContractKind::Cash => {
                log::debug!("[settle] {} -> {contract}: {from} pays {to} {amount}", self.caller);
                CashLedger::new(self.policy).transfer(deployment.state.as_mut(), from, to, amount)
            }
            ContractKind::Loan => Err(ContractError::UnsupportedCall {
                contract: contract.to_string(),
                function: function::TRANSFER.to_string(),
            }),
        }
    }
}
