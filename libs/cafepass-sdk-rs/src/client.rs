//! CafePass client implementation.

use cafepass_types::{FormState, NameRule, WaitlistKind, validate};
#[cfg(feature = "client")]
use cafepass_types::{ErrorBody, ErrorCode, SignupCounts, SubmissionResponse, messages};

use crate::error::CafepassError;

/// Configuration for the CafePass client.
#[derive(Debug, Clone)]
pub struct CafepassConfig {
    /// Origin serving the API (e.g., "https://cafepass.ca"). `/api` is appended.
    pub base_url: String,

    /// Must match the service's `REQUIRE_USER_NAME` so local validation agrees with it.
    pub name_rule: NameRule,
}

/// CafePass client for front ends.
pub struct CafepassClient {
    base_url: String,
    name_rule: NameRule,
    #[cfg(feature = "client")]
    http_client: reqwest::Client,
}

impl CafepassClient {
    /// Create a new CafePass client.
    ///
    /// Fails with `CafepassError::Config` when `base_url` is not an http(s) URL.
    pub fn new(config: CafepassConfig) -> Result<Self, CafepassError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();

        if base_url.is_empty() {
            return Err(CafepassError::Config("base_url is required".into()));
        }

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CafepassError::Config(format!(
                "base_url must start with http:// or https://, got '{base_url}'"
            )));
        }

        Ok(Self {
            base_url,
            name_rule: config.name_rule,
            #[cfg(feature = "client")]
            http_client: reqwest::Client::new(),
        })
    }

    /// Run the service's validation rules locally.
    pub fn validate(&self, kind: WaitlistKind, form: &FormState) -> Result<(), CafepassError> {
        validate(kind, form, self.name_rule)?;
        Ok(())
    }

    #[cfg(feature = "client")]
    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/waitlist/{}", self.base_url, path)
    }

    /// Submit a waitlist form.
    ///
    /// The form is validated first; an invalid form returns
    /// `CafepassError::Validation` without any network call.
    #[cfg(feature = "client")]
    pub async fn submit(
        &self,
        kind: WaitlistKind,
        form: &FormState,
    ) -> Result<SubmissionResponse, CafepassError> {
        self.validate(kind, form)?;

        let response = self
            .http_client
            .post(self.endpoint(kind.path_segment()))
            .json(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Fetch the sign-up counts. A count the service could not read is `None`.
    #[cfg(feature = "client")]
    pub async fn counts(&self) -> Result<SignupCounts, CafepassError> {
        let response = self.http_client.get(self.endpoint("counts")).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }
}

/// Decode the service's `{code, message}` error body, falling back on the status.
#[cfg(feature = "client")]
async fn api_error(response: reqwest::Response) -> CafepassError {
    let status = response.status();

    match response.json::<ErrorBody>().await {
        Ok(body) => CafepassError::Api {
            code: body.code,
            message: body.message,
        },
        Err(_) => CafepassError::Api {
            code: if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                ErrorCode::RateLimited
            } else {
                ErrorCode::UnexpectedFailure
            },
            message: messages::UNEXPECTED.into(),
        },
    }
}
