use crate::engine::Decimal;

/// Top-level error type for replaying invocation scripts.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Record error: {0}")]
    Record(#[from] RecordError),
}

/// Errors while framing a raw script row into an `Invocation` (hard errors).
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Malformed invocation on row {row}: expected `contract,function[,args...]`")]
    Malformed { row: u64 },
}

/// Failures raised by the state store itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to get state for {key}: {reason}")]
    Read { key: String, reason: String },

    #[error("Failed to put state for {key}: {reason}")]
    Write { key: String, reason: String },
}

/// Soft errors returned by a contract invocation.
/// The replay logs and records them, then moves on to the next row.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("Incorrect number of arguments for {function}: expecting {expected}, got {got}")]
    ArgumentCount {
        function: String,
        expected: String,
        got: usize,
    },

    #[error("Invalid transaction amount {value:?}, expecting a non-negative decimal value")]
    InvalidAmount { value: String },

    #[error("Amount {value:?} is outside the range and precision of a decimal amount")]
    AmountOutOfRange { value: String },

    #[error("Entity {key} not found")]
    EntityNotFound { key: String },

    #[error("Account {account} balance is insufficient: has {balance}, requested {requested}")]
    InsufficientFunds {
        account: String,
        balance: Decimal,
        requested: Decimal,
    },

    #[error("Crediting account {account} would exceed the largest representable balance")]
    Overflow { account: String },

    #[error("Record {key} could not be encoded or decoded: {source}")]
    Codec {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to invoke contract {contract}. Got error: {source}")]
    Invocation {
        contract: String,
        #[source]
        source: Box<ContractError>,
    },

    #[error("Contract {contract} has no function {function:?}")]
    UnknownFunction { contract: String, function: String },

    #[error("Contract {contract} is not deployed")]
    UnknownContract { contract: String },

    #[error("Contract {contract} is already deployed")]
    AlreadyDeployed { contract: String },

    #[error("Contract {contract} cannot serve {function} from this caller")]
    UnsupportedCall { contract: String, function: String },
}

impl ContractError {
    /// Walks nested invocation failures down to the error raised by the remote contract.
    pub fn root_cause(&self) -> &ContractError {
        match self {
            ContractError::Invocation { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
