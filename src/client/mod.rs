//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::Rng;
use tracing::debug;
use xmltree::Element;

use crate::domain::phone;
use crate::domain::{
    ApiError, BaseResponse, NumberProfileResponse, Profile, ProfileQueryResponse,
    QueryNumbersResponse, Response, ValidationError,
};
use crate::transport::xml::{push_child, text_element};
use crate::transport::{
    build_envelope, decode_base, decode_query_numbers, decode_query_profile, encode_phone_number,
    encode_profile, xml,
};

const DEFAULT_OPERATION: &str = "Request";
const DEFAULT_NAMESPACE: &str = "http://www.neustar.biz/sip_ix/prov";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_xml<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_xml<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.post(url).body(body).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`Client`].
///
/// This error preserves:
/// - validation failures raised before any network call,
/// - HTTP-level failures (non-200 status or transport failures),
/// - parse failures for malformed or unexpectedly shaped responses,
/// - application-level failures carried in the response's return code.
pub enum ProvisioningError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-200 HTTP status returned by the server, with the raw body.
    #[error("unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The service answered with a non-success return code.
    #[error("API error: {0}")]
    Api(ApiError),

    /// Response body could not be parsed as a provisioning response.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the inputs was rejected before a request was made.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`Client`].
///
/// Use this when you need to customize the operation label, namespace,
/// timeout, or user-agent.
pub struct ClientBuilder {
    address: String,
    operation: String,
    namespace: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a builder targeting the given service address.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            operation: DEFAULT_OPERATION.to_owned(),
            namespace: DEFAULT_NAMESPACE.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the SOAP operation label wrapping every request body.
    pub fn operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = operation.into();
        self
    }

    /// Override the default XML namespace emitted on the operation element.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`Client`], validating the service address.
    pub fn build(self) -> Result<Client, ProvisioningError> {
        if url::Url::parse(&self.address).is_err() {
            return Err(ValidationError::InvalidAddress {
                input: self.address,
            }
            .into());
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| ProvisioningError::Transport(Box::new(err)))?;

        Ok(Client {
            address: self.address,
            operation: self.operation,
            namespace: self.namespace,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Client for the PathFinder telephone-number provisioning service.
///
/// Each operation is a single request/response exchange: the typed inputs are
/// rendered into a SOAP envelope, POSTed to the configured address, and the
/// response's return code decides between a typed result and a typed error.
/// The client holds only immutable configuration; concurrent calls on clones
/// of one client are fully independent.
pub struct Client {
    address: String,
    operation: String,
    namespace: String,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("address", &self.address)
            .field("operation", &self.operation)
            .field("namespace", &self.namespace)
            .field("http", &"<dyn HttpTransport>")
            .finish()
    }
}

impl Client {
    /// Create a client with the default operation label and namespace.
    ///
    /// For more customization, use [`Client::builder`].
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            operation: DEFAULT_OPERATION.to_owned(),
            namespace: DEFAULT_NAMESPACE.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(address: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(address)
    }

    /// Change the activation status of a phone number under a profile.
    pub async fn change_phone_number_status(
        &self,
        phone: &str,
        profile_id: &str,
        status: &str,
    ) -> Result<BaseResponse, ProvisioningError> {
        let parsed = phone::parse(phone)?;
        let mut body = encode_phone_number("ChangeTN", parsed);
        push_child(&mut body, text_element("Status", status));
        push_child(&mut body, text_element("DNSProfileID", profile_id));

        let root = self.send_request(body).await?;
        check_return_code(
            decode_base(&root).map_err(|err| ProvisioningError::Parse(Box::new(err)))?,
        )
    }

    /// List every phone number activated under a profile.
    ///
    /// `data` stays a sequence even when a single number matched.
    pub async fn get_activated_phone_numbers(
        &self,
        profile_id: &str,
    ) -> Result<QueryNumbersResponse, ProvisioningError> {
        let mut body = Element::new("QueryTN");
        push_child(&mut body, text_element("DNSProfileID", profile_id));

        let root = self.send_request(body).await?;
        check_return_code(
            decode_query_numbers(&root).map_err(|err| ProvisioningError::Parse(Box::new(err)))?,
        )
    }

    /// Look up the provisioning entry for a single phone number.
    ///
    /// When the server answers with several entries, only the first is
    /// returned; callers depend on this truncation.
    pub async fn get_profile_for_phone_number(
        &self,
        phone: &str,
    ) -> Result<NumberProfileResponse, ProvisioningError> {
        let parsed = phone::parse(phone)?;
        let body = encode_phone_number("QueryTN", parsed);

        let root = self.send_request(body).await?;
        let response = check_return_code(
            decode_query_numbers(&root).map_err(|err| ProvisioningError::Parse(Box::new(err)))?,
        )?;

        Ok(Response {
            code: response.code,
            messages: response.messages,
            data: response.data.into_iter().next(),
        })
    }

    /// Deactivate a phone number.
    pub async fn deactivate_phone_number(
        &self,
        phone: &str,
    ) -> Result<BaseResponse, ProvisioningError> {
        let parsed = phone::parse(phone)?;
        let body = encode_phone_number("Deactivate", parsed);

        let root = self.send_request(body).await?;
        check_return_code(
            decode_base(&root).map_err(|err| ProvisioningError::Parse(Box::new(err)))?,
        )
    }

    /// Activate a phone number under a profile.
    pub async fn activate_phone_number(
        &self,
        phone: &str,
        profile_id: &str,
    ) -> Result<BaseResponse, ProvisioningError> {
        let parsed = phone::parse(phone)?;
        let mut body = encode_phone_number("Activate", parsed);
        push_child(&mut body, text_element("Status", "active"));
        push_child(&mut body, text_element("DNSProfileID", profile_id));

        let root = self.send_request(body).await?;
        check_return_code(
            decode_base(&root).map_err(|err| ProvisioningError::Parse(Box::new(err)))?,
        )
    }

    /// Query a provisioning profile by id.
    pub async fn find_profile(
        &self,
        profile_id: &str,
    ) -> Result<ProfileQueryResponse, ProvisioningError> {
        let mut body = Element::new("QueryDNSProfile");
        push_child(&mut body, text_element("ProfileID", profile_id));

        let root = self.send_request(body).await?;
        check_return_code(
            decode_query_profile(&root).map_err(|err| ProvisioningError::Parse(Box::new(err)))?,
        )
    }

    /// Create a provisioning profile.
    ///
    /// Fails with [`ValidationError::NoProfileRecords`] before any network
    /// call when the profile has no records.
    pub async fn create_profile(
        &self,
        profile: &Profile,
    ) -> Result<BaseResponse, ProvisioningError> {
        self.define_or_update_profile("DefineDNSProfile", profile)
            .await
    }

    /// Update a provisioning profile.
    ///
    /// Fails with [`ValidationError::NoProfileRecords`] before any network
    /// call when the profile has no records.
    pub async fn update_profile(
        &self,
        profile: &Profile,
    ) -> Result<BaseResponse, ProvisioningError> {
        self.define_or_update_profile("UpdateDNSProfile", profile)
            .await
    }

    async fn define_or_update_profile(
        &self,
        method: &str,
        profile: &Profile,
    ) -> Result<BaseResponse, ProvisioningError> {
        if profile.records.is_empty() {
            return Err(ValidationError::NoProfileRecords.into());
        }

        let body = encode_profile(method, profile);
        let root = self.send_request(body).await?;
        check_return_code(
            decode_base(&root).map_err(|err| ProvisioningError::Parse(Box::new(err)))?,
        )
    }

    async fn send_request(&self, mut body: Element) -> Result<Element, ProvisioningError> {
        let transaction_id = generate_transaction_id();
        debug!(
            method = body.name.as_str(),
            transaction_id = transaction_id.as_str(),
            "sending provisioning request"
        );
        push_child(&mut body, text_element("TransactionID", transaction_id));

        let envelope = build_envelope(&self.operation, &body, Some(&self.namespace))
            .map_err(|err| ProvisioningError::Parse(Box::new(err)))?;

        let response = self
            .http
            .post_xml(&self.address, envelope)
            .await
            .map_err(ProvisioningError::Transport)?;

        if response.status != 200 {
            return Err(ProvisioningError::HttpStatus {
                status: response.status,
                body: response.body,
            });
        }
        debug!(status = response.status, "provisioning response received");

        xml::parse(&response.body).map_err(|err| ProvisioningError::Parse(Box::new(err)))
    }
}

fn check_return_code<T>(response: Response<T>) -> Result<Response<T>, ProvisioningError> {
    if response.code.is_success() {
        Ok(response)
    } else {
        Err(ProvisioningError::Api(ApiError::from_response(
            response.code,
            response.messages,
        )))
    }
}

// Correlation id: current millis plus a zero-padded 3-digit random suffix.
// Not collision-free, and not meant to be.
fn generate_transaction_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let entropy = rand::thread_rng().gen_range(1..=999u32);
    format!("{millis}{entropy:03}")
}
