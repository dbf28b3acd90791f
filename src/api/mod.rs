//! Endpoint modules. Each one owns a clone of the shared pipeline and maps a
//! method call to a single request.

use crate::core::errors::MudrexError;

pub mod assets;
pub mod fees;
pub mod leverage;
pub mod orders;
pub mod positions;
pub mod types;
pub mod wallet;

pub use assets::Assets;
pub use fees::Fees;
pub use leverage::Leverage;
pub use orders::Orders;
pub use positions::Positions;
pub use wallet::Wallet;

/// Reject empty identifiers before a request is built or admitted
pub(crate) fn require_id(name: &str, value: &str) -> Result<(), MudrexError> {
    if value.trim().is_empty() {
        return Err(MudrexError::InvalidParameters(format!(
            "{} must not be empty",
            name
        )));
    }
    Ok(())
}
