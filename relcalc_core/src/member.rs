//! # Membership Client
//!
//! Login and membership lookup against the WordPress site that hosts
//! the calculator suite: JWT authentication via the `jwt-auth` plugin
//! and plan lookup via the ARMember REST API. Premium calculators are
//! gated on holding a paid plan (Bronze, Silver or Gold tier).
//!
//! The JWT payload is decoded locally only to read the user id out of
//! the claims; the signature is the server's concern, the token is just
//! passed back as a bearer credential.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Site hosting the authentication and membership endpoints.
pub const DEFAULT_BASE_URL: &str = "https://reliabilitymanagement.co.uk";

const TOKEN_PATH: &str = "/wp-json/jwt-auth/v1/token";
const MEMBERSHIPS_PATH: &str = "/wp-json/armember/v1/arm_member_memberships";

/// Successful login response from the JWT endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_email: String,
    pub user_display_name: String,
}

/// Claims carried in the JWT payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenClaims {
    pub data: ClaimsData,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClaimsData {
    pub user: ClaimsUser,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClaimsUser {
    pub id: String,
}

/// A membership plan held by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct MembershipEnvelope {
    #[serde(default)]
    response: MembershipDetails,
}

#[derive(Debug, Default, Deserialize)]
struct MembershipDetails {
    #[serde(default)]
    plans: Vec<Plan>,
}

/// Whether a plan name denotes a paid tier.
pub fn is_paid_plan(name: &str) -> bool {
    let name = name.to_lowercase();
    ["bronze", "silver", "gold"]
        .iter()
        .any(|tier| name.contains(tier))
}

/// Whether any of the plans is a paid tier.
pub fn has_paid_plan(plans: &[Plan]) -> bool {
    plans.iter().any(|plan| is_paid_plan(&plan.name))
}

/// Decode the user id claims from a JWT without verifying the signature.
pub fn decode_claims(token: &str) -> CalcResult<TokenClaims> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| CalcError::auth_failed("Token is not a JWT"))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| CalcError::auth_failed(format!("Token payload is not base64: {}", e)))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| CalcError::auth_failed(format!("Token claims are malformed: {}", e)))
}

/// HTTP client for the membership endpoints.
#[derive(Debug, Clone)]
pub struct MemberClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MemberClient {
    /// Build a client against [`DEFAULT_BASE_URL`].
    ///
    /// The ARMember API key is supplied by the caller; it is never
    /// stored in configuration files.
    pub fn new(api_key: impl Into<String>) -> CalcResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> CalcResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("relcalc/{}", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| CalcError::auth_failed(format!("Failed to create HTTP client: {}", e)))?;
        Ok(MemberClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Authenticate and return the JWT and user identity.
    pub async fn login(&self, username: &str, password: &str) -> CalcResult<LoginResponse> {
        let url = format!("{}{}", self.base_url, TOKEN_PATH);
        tracing::debug!(%url, %username, "requesting auth token");

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(|e| CalcError::auth_failed(format!("Network error: {}", e)))?;

        if !response.status().is_success() {
            return Err(CalcError::auth_failed(format!(
                "Login rejected with status {}",
                response.status()
            )));
        }

        response
            .json::<LoginResponse>()
            .await
            .map_err(|e| CalcError::auth_failed(format!("Failed to parse login response: {}", e)))
    }

    /// Fetch the membership plans held by a user.
    pub async fn member_plans(&self, user_id: &str) -> CalcResult<Vec<Plan>> {
        let url = format!("{}{}", self.base_url, MEMBERSHIPS_PATH);
        tracing::debug!(%url, %user_id, "fetching member plans");

        let response = self
            .client
            .get(&url)
            .query(&[("arm_api_key", self.api_key.as_str()), ("arm_user_id", user_id)])
            .send()
            .await
            .map_err(|e| CalcError::auth_failed(format!("Network error: {}", e)))?;

        if !response.status().is_success() {
            return Err(CalcError::auth_failed(format!(
                "Membership lookup failed with status {}",
                response.status()
            )));
        }

        let envelope = response
            .json::<MembershipEnvelope>()
            .await
            .map_err(|e| CalcError::auth_failed(format!("Failed to parse membership response: {}", e)))?;
        Ok(envelope.response.plans)
    }
}

/// A logged-in user, persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub token: String,
    pub user_email: String,
    pub user_display_name: String,
    pub plans: Vec<Plan>,
}

impl UserSession {
    pub fn new(login: LoginResponse, plans: Vec<Plan>) -> Self {
        UserSession {
            token: login.token,
            user_email: login.user_email,
            user_display_name: login.user_display_name,
            plans,
        }
    }

    /// Whether this user can use the premium calculators.
    pub fn has_paid_plan(&self) -> bool {
        has_paid_plan(&self.plans)
    }

    pub fn save(&self, path: &std::path::Path) -> CalcResult<()> {
        crate::settings::save_json(path, self)
    }

    pub fn load(path: &std::path::Path) -> CalcResult<Self> {
        crate::settings::load_json(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paid_plan_names() {
        assert!(is_paid_plan("Gold Membership"));
        assert!(is_paid_plan("silver (annual)"));
        assert!(is_paid_plan("BRONZE"));
        assert!(!is_paid_plan("Free Trial"));
    }

    #[test]
    fn test_has_paid_plan_over_list() {
        let plans = vec![
            Plan {
                id: 1,
                name: "Free Trial".to_string(),
            },
            Plan {
                id: 4,
                name: "Silver Membership".to_string(),
            },
        ];
        assert!(has_paid_plan(&plans));
        assert!(!has_paid_plan(&plans[..1]));
    }

    #[test]
    fn test_decode_claims() {
        let payload = URL_SAFE_NO_PAD.encode(r#"{"data":{"user":{"id":"42"}}}"#);
        let token = format!("header.{}.signature", payload);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.data.user.id, "42");
    }

    #[test]
    fn test_decode_claims_rejects_non_jwt() {
        assert!(decode_claims("not-a-token").is_err());
    }
}
