use std::fmt;
use thiserror::Error;

/// Which address field a format check ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    Victim,
    New,
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressField::Victim => f.write_str("victim"),
            AddressField::New => f.write_str("zkSync Era"),
        }
    }
}

/// Failures of the wallet signing step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningError {
    #[error("Wallet is not connected")]
    NotConnected,
    /// The wallet refused to sign. The text is whatever the wallet reported.
    #[error("{0}")]
    Rejected(String),
    #[error("Wallet did not answer the signing request in time")]
    Timeout,
}

/// Every way a claim submission can fail. The `Display` text is what the
/// user sees in the failure notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error("{0}")]
    Incomplete(String),

    #[error("This form does not collect transaction references")]
    ReferencesNotCollected,

    #[error("Wrong {0} address format")]
    Format(AddressField),

    #[error("Submit Failed: {0} is not allowed for compensation.")]
    NotAllowListed(String),

    #[error("The new address cannot be the same as the victim address")]
    SameAddress,

    #[error("The new address is an invalid Ethereum address")]
    InvalidDestination,

    #[error(transparent)]
    Signing(#[from] SigningError),

    #[error("Signer does not match victim address")]
    SignerMismatch,

    #[error("{0}")]
    Submission(String),

    #[error("Network Error")]
    ServerResponse,
}

impl From<reqwest::Error> for ClaimError {
    fn from(err: reqwest::Error) -> Self {
        ClaimError::Submission(err.to_string())
    }
}
