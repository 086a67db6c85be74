use crate::domain::code::ReturnCode;
use crate::domain::profile::Profile;

#[derive(Debug, Clone, PartialEq)]
/// Parsed outcome of one provisioning call.
pub struct Response<T> {
    pub code: ReturnCode,
    pub messages: Vec<String>,
    pub data: T,
}

/// Response with no operation-specific data.
pub type BaseResponse = Response<()>;

/// Response of a profile-wide number query; `data` stays a sequence even
/// when a single number matched.
pub type QueryNumbersResponse = Response<Vec<NumberEntry>>;

/// Response of the single-phone lookup; a multi-entry server result is
/// collapsed to its first entry.
pub type NumberProfileResponse = Response<Option<NumberEntry>>;

/// Response of a profile query.
pub type ProfileQueryResponse = Response<Option<ProfileQueryData>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberEntry {
    pub customer_id: i64,
    pub created: String,
    pub status: String,
    pub tn: String,
    pub profile_id: String,
    pub tier: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileQueryData {
    pub customer_id: i64,
    pub created: String,
    pub is_in_use: bool,
    pub profile: Profile,
}
