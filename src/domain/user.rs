use serde::{Deserialize, Serialize};

/// The identity attached to an active session: the minimal user record a
/// page needs. Resolved per request by the session provider; absence is
/// the normal signed-out case, not a fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    pub name: String,
}
