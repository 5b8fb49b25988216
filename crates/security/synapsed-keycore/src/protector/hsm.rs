//! HSM Secret Protector: delegates wrapping/unwrapping to a remote
//! hardware security module over HTTPS, authenticated with a bearer
//! API key. The HSM never returns plaintext key material across the
//! wire for `protect` — it returns an opaque, HSM-internal token, which
//! this backend tags with `"H1:"` so it round-trips through the Key
//! Store like any other protected blob.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{BackendHealth, HSM_TAG, SecretProtector};
use crate::config::CoreConfig;
use crate::error::{CoreError, Result};
use crate::model::KeyPurpose;
use async_trait::async_trait;

#[derive(Debug, Serialize)]
struct WrapRequest<'a> {
    purpose: &'a str,
    plaintext_b64: String,
}

#[derive(Debug, Deserialize)]
struct WrapResponse {
    token: String,
}

#[derive(Debug, Serialize)]
struct UnwrapRequest<'a> {
    purpose: &'a str,
    token: String,
}

#[derive(Debug, Deserialize)]
struct UnwrapResponse {
    plaintext_b64: String,
}

pub struct HsmProtector {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HsmProtector {
    pub fn from_config(config: &CoreConfig) -> Result<Self> {
        if config.hsm.endpoint.is_empty() {
            return Err(CoreError::InvalidParameter("hsm.endpoint must be set when hsm_enabled".into()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.hsm.timeout_secs))
            .build()
            .map_err(|e| CoreError::InvalidParameter(format!("failed to build HSM client: {e}")))?;
        Ok(Self { client, endpoint: config.hsm.endpoint.clone(), api_key: config.hsm.api_key.clone() })
    }
}

#[async_trait]
impl SecretProtector for HsmProtector {
    async fn protect(&self, purpose: KeyPurpose, plaintext: &[u8]) -> Result<Vec<u8>> {
        use base64::Engine;
        let purpose = purpose.to_string();
        let request = WrapRequest { purpose: &purpose, plaintext_b64: base64::engine::general_purpose::STANDARD.encode(plaintext) };
        let response: WrapResponse = self
            .client
            .post(format!("{}/v1/wrap", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let mut out = Vec::with_capacity(HSM_TAG.len() + response.token.len());
        out.extend_from_slice(HSM_TAG);
        out.extend_from_slice(response.token.as_bytes());
        Ok(out)
    }

    async fn unprotect(&self, purpose: KeyPurpose, blob: &[u8]) -> Result<Vec<u8>> {
        use base64::Engine;
        if !blob.starts_with(HSM_TAG) {
            return Err(CoreError::PrimitiveFailure("not an HSM-protected blob".into()));
        }
        let token = String::from_utf8(blob[HSM_TAG.len()..].to_vec())
            .map_err(|_| CoreError::PrimitiveFailure("HSM token is not valid UTF-8".into()))?;
        let purpose = purpose.to_string();
        let request = UnwrapRequest { purpose: &purpose, token };
        let response: UnwrapResponse = self
            .client
            .post(format!("{}/v1/unwrap", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        base64::engine::general_purpose::STANDARD
            .decode(response.plaintext_b64)
            .map_err(|e| CoreError::PrimitiveFailure(format!("HSM returned malformed plaintext: {e}")))
    }

    async fn health(&self) -> Result<BackendHealth> {
        let url = format!("{}/v1/health", self.endpoint);
        match self.client.get(url).bearer_auth(&self.api_key).send().await {
            Ok(resp) if resp.status().is_success() => {
                Ok(BackendHealth { backend: "hsm", available: true, detail: self.endpoint.clone() })
            }
            Ok(resp) => Ok(BackendHealth {
                backend: "hsm",
                available: false,
                detail: format!("unexpected status {}", resp.status()),
            }),
            Err(e) => Ok(BackendHealth { backend: "hsm", available: false, detail: e.to_string() }),
        }
    }
}
