use serde::Serialize;

use matreq_core::UserId;

use crate::Role;

/// Resolved authenticated actor for one request.
///
/// Produced once by the session resolver, read-only afterwards, discarded
/// with the response. The role carries the stored wire string verbatim, so
/// an account with a corrupted role value still resolves; it just ranks 0
/// everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}
