pub mod handlers;

use actix_web::error as actix_error;

use crate::utils::error::WalletError;

/// Map domain errors onto HTTP responses. Validation problems are the
/// caller's fault; oracle trouble is upstream; everything else is ours.
pub fn to_http_error(error: WalletError) -> actix_web::Error {
    match error {
        WalletError::InvalidMnemonic(_)
        | WalletError::UnsupportedChainType(_)
        | WalletError::InvalidParameter(_)
        | WalletError::DescriptorLengthMismatch { .. } => {
            actix_error::ErrorBadRequest(error.to_string())
        }
        WalletError::DecryptionFailed => actix_error::ErrorUnauthorized(error.to_string()),
        WalletError::NoFaceDetected => actix_error::ErrorUnprocessableEntity(error.to_string()),
        WalletError::BalanceQueryFailed(_) => actix_error::ErrorBadGateway(error.to_string()),
        WalletError::Derivation(_) | WalletError::Config(_) | WalletError::Init(_) => {
            actix_error::ErrorInternalServerError(error.to_string())
        }
    }
}
