//! Typed Rust client for the Neustar PathFinder SOAP provisioning API.
//!
//! The crate wraps the legacy XML-RPC-shaped SOAP interface behind a small
//! set of typed, async operations: activate and deactivate telephone numbers,
//! create and update DNS routing profiles, and query provisioning state. The
//! design follows three layers: a domain layer of strong types, a transport
//! layer for the SOAP/XML wire format, and a client layer orchestrating
//! requests.
//!
//! ```rust,no_run
//! use pathfinder_provisioning::{Client, Profile, Record, Regexp};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pathfinder_provisioning::ProvisioningError> {
//!     let client = Client::new("https://pathfinder.example.com/nrs-pi/services/SIPIX/SendRequest");
//!
//!     let mut profile = Profile::new("MyProfile");
//!     profile.add_record(Record::new(
//!         10,
//!         1,
//!         "E2U+pstn:tel",
//!         Regexp::new("^.*$", "tel:+15551234567"),
//!     ));
//!
//!     client.create_profile(&profile).await?;
//!     client.activate_phone_number("+15158675309", "MyProfile").await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Client, ClientBuilder, ProvisioningError};
pub use domain::{
    ApiError, ApiErrorKind, BaseResponse, NumberEntry, NumberProfileResponse, ParsedPhoneNumber,
    Profile, ProfileQueryData, ProfileQueryResponse, QueryNumbersResponse, Record, Regexp,
    Response, ReturnCode, ValidationError,
};
