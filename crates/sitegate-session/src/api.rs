//! Auth service collaborator trait.
//!
//! The trait lives here so the session layer stays transport-agnostic;
//! concrete HTTP implementations live with the embedding application, and
//! tests use in-memory fakes.

use crate::state::BearerToken;
use sitegate_types::{ApiError, PrincipalRecord, Tenant};
use std::future::Future;

/// Successful credential exchange.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    /// The authenticated user in wire form.
    pub user: PrincipalRecord,
    /// The tenant the account belongs to, if the backend reports one.
    pub tenant: Option<Tenant>,
    /// Bearer token for subsequent calls.
    pub token: BearerToken,
}

/// The auth service: credential exchange and principal verification.
///
/// Error mapping is the implementation's job: a 401 becomes
/// [`ApiError::AuthenticationRejected`], a refusal with a message becomes
/// [`ApiError::ValidationFailed`], transport failures become the network
/// variants.
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a token and the authenticated user.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>> + Send;

    /// Fetches the authoritative current principal for a token.
    ///
    /// The server copy wins over anything cached locally; role and
    /// permission changes only take effect through this call.
    fn current_principal(
        &self,
        token: &BearerToken,
    ) -> impl Future<Output = Result<PrincipalRecord, ApiError>> + Send;
}
