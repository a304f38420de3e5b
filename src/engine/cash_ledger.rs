use super::amount::Amount;
use super::config::CommitPolicy;
use super::error::ContractError;
use super::invocation::{CashCall, Debit};
use super::record::{self, AccountRecord};
use super::state::{StateStore, WriteSet};
use super::Decimal;

/// Accounts seeded by [`CashLedger::initialize`]: the private bank currency
/// pool and the central bank pool.
pub const GENESIS_ACCOUNTS: [&str; 2] = ["pbc", "cb"];

/// Balance given to each genesis account.
pub const GENESIS_BALANCE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// The account-balance contract.
///
/// Owns account records keyed by party identifier and moves value between
/// them. No operation ever commits a negative balance. The ledger itself is
/// stateless: every operation works on the store it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct CashLedger {
    policy: CommitPolicy,
}

impl CashLedger {
    pub fn new(policy: CommitPolicy) -> Self {
        Self { policy }
    }

    /// Executes a validated call and returns its payload.
    pub fn handle(
        &self,
        state: &mut dyn StateStore,
        call: CashCall,
    ) -> Result<Vec<u8>, ContractError> {
        match call {
            CashCall::Init => self.initialize(state).map(|()| Vec::new()),
            CashCall::Transfer(transfer) => self
                .transfer(state, transfer.from(), transfer.to(), transfer.amount())
                .map(|()| Vec::new()),
            CashCall::TransferMany(transfer) => self
                .transfer_many(state, transfer.receiver(), transfer.debits())
                .map(|_| Vec::new()),
            CashCall::Query(query) => self.query(state, query.key()),
        }
    }

    /// Seeds the genesis accounts, overwriting whatever they held before.
    pub fn initialize(&self, state: &mut dyn StateStore) -> Result<(), ContractError> {
        let seed = AccountRecord::new(GENESIS_BALANCE);
        for account in GENESIS_ACCOUNTS {
            store_account(state, account, &seed)?;
        }
        log::info!(
            "[init] seeded {} with {GENESIS_BALANCE} each",
            GENESIS_ACCOUNTS.join(", ")
        );
        Ok(())
    }

    /// Moves `amount` from `from` to `to`.
    ///
    /// `from` must exist and cover the amount; `to` is created on first
    /// credit. Both records are staged and written together, nothing is
    /// written on failure. A self-transfer only checks funds.
    pub fn transfer(
        &self,
        state: &mut dyn StateStore,
        from: &str,
        to: &str,
        amount: Amount,
    ) -> Result<(), ContractError> {
        log::trace!("[transfer] from={from} to={to} amount={amount}");
        let mut writes = WriteSet::new(state, CommitPolicy::Atomic);

        let mut source = load_existing(&writes, from)?;
        source.debit(from, amount)?;
        store_account(&mut writes, from, &source)?;

        let mut destination = self.load_or_empty(&writes, to)?;
        destination.credit(to, amount.value())?;
        store_account(&mut writes, to, &destination)?;

        writes.commit()?;
        log::trace!(
            "[transfer] from={from} to={to} amount={amount} -> from_balance={} to_balance={}",
            source.balance(),
            destination.balance()
        );
        Ok(())
    }

    /// Moves funds from several senders, in order, to one receiver.
    ///
    /// Each sender must exist and cover its own amount. The receiver is
    /// credited once with the sum after every sender was debited. Under
    /// `CommitPolicy::Immediate` each sender's debit is written as soon as it
    /// is computed, so a failure on a later sender leaves earlier debits in
    /// place and the receiver uncredited. Returns the credited total.
    pub fn transfer_many(
        &self,
        state: &mut dyn StateStore,
        receiver: &str,
        debits: &[Debit],
    ) -> Result<Decimal, ContractError> {
        log::trace!(
            "[transferN2A] receiver={receiver} senders={} policy={}",
            debits.len(),
            self.policy
        );
        let mut writes = WriteSet::new(state, self.policy);
        let mut total = Decimal::ZERO;

        for debit in debits {
            let sender = debit.sender();

            let mut account = load_existing(&writes, sender)?;
            account.debit(sender, debit.amount())?;
            store_account(&mut writes, sender, &account)?;

            total = total
                .checked_add(debit.amount().value())
                .ok_or_else(|| ContractError::Overflow {
                    account: receiver.to_string(),
                })?;

            log::trace!(
                "[transferN2A] sender={sender} amount={} -> new_balance={}",
                debit.amount(),
                account.balance()
            );
        }

        let mut destination = self.load_or_empty(&writes, receiver)?;
        destination.credit(receiver, total)?;
        store_account(&mut writes, receiver, &destination)?;

        writes.commit()?;
        log::trace!(
            "[transferN2A] receiver={receiver} total={total} -> new_balance={}",
            destination.balance()
        );
        Ok(total)
    }

    /// Returns the account record exactly as stored.
    pub fn query(&self, state: &dyn StateStore, account: &str) -> Result<Vec<u8>, ContractError> {
        state
            .get(account)?
            .ok_or_else(|| ContractError::EntityNotFound {
                key: account.to_string(),
            })
    }

    /// Decoded balance of `account`, `None` if it was never credited.
    pub fn balance(
        &self,
        state: &dyn StateStore,
        account: &str,
    ) -> Result<Option<Decimal>, ContractError> {
        Ok(load(state, account)?.map(|record| record.balance()))
    }

    /// Loads a credit target; an absent account starts at zero.
    ///
    /// Under `CommitPolicy::Immediate` a failed read also counts as zero. The
    /// atomic policy refuses to overwrite a balance it could not read.
    fn load_or_empty(
        &self,
        state: &dyn StateStore,
        account: &str,
    ) -> Result<AccountRecord, ContractError> {
        match load(state, account) {
            Ok(Some(record)) => Ok(record),
            Ok(None) => {
                log::debug!("Creating account {account} on first credit");
                Ok(AccountRecord::new(Decimal::ZERO))
            }
            Err(ContractError::Store(err)) if self.policy == CommitPolicy::Immediate => {
                log::warn!("Treating unreadable account {account} as empty: {err}");
                Ok(AccountRecord::new(Decimal::ZERO))
            }
            Err(err) => Err(err),
        }
    }
}

fn load(state: &dyn StateStore, account: &str) -> Result<Option<AccountRecord>, ContractError> {
    state
        .get(account)?
        .map(|bytes| record::decode(account, &bytes))
        .transpose()
}

fn load_existing(state: &dyn StateStore, account: &str) -> Result<AccountRecord, ContractError> {
    load(state, account)?.ok_or_else(|| ContractError::EntityNotFound {
        key: account.to_string(),
    })
}

fn store_account(
    state: &mut dyn StateStore,
    account: &str,
    record: &AccountRecord,
) -> Result<(), ContractError> {
    let bytes = record::encode(account, record)?;
    state.put(account, bytes)?;
    Ok(())
}
