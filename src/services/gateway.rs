//! Payment gateway adapter
//!
//! Isolates the payment processor's order-creation REST call and its
//! HMAC-SHA256 callback-signature scheme. The adapter is constructed once
//! with validated configuration and injected into the payment service.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::time::Duration;
use utoipa::ToSchema;

use crate::{
    config::PaymentConfig,
    error::{AppError, AppResult},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
struct GatewayCredentials {
    key_id: String,
    key_secret: String,
}

/// Order descriptor returned by the gateway
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GatewayOrder {
    pub id: String,
    /// Amount in minor currency units (paise for INR)
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: Option<String>,
}

#[derive(Clone)]
pub struct PaymentGateway {
    credentials: Option<GatewayCredentials>,
    base_url: String,
    http: reqwest::Client,
}

impl PaymentGateway {
    pub fn new(config: &PaymentConfig) -> AppResult<Self> {
        let credentials = match (&config.key_id, &config.key_secret) {
            (Some(key_id), Some(key_secret)) => Some(GatewayCredentials {
                key_id: key_id.clone(),
                key_secret: key_secret.clone(),
            }),
            _ => {
                tracing::warn!("Payment gateway credentials are not configured; payment endpoints will be rejected");
                None
            }
        };

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            credentials,
            base_url: config.api_base_url.clone(),
            http,
        })
    }

    fn credentials(&self) -> AppResult<&GatewayCredentials> {
        self.credentials.as_ref().ok_or_else(|| {
            AppError::Configuration("Payment gateway is not configured".to_string())
        })
    }

    /// Public key identifier handed to the client for checkout initiation
    pub fn key_id(&self) -> AppResult<&str> {
        Ok(&self.credentials()?.key_id)
    }

    /// Create an order with the gateway. Amount is in minor currency units.
    pub async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
        notes: JsonValue,
    ) -> AppResult<GatewayOrder> {
        let credentials = self.credentials()?;

        let body = serde_json::json!({
            "amount": amount_minor,
            "currency": currency,
            "receipt": receipt,
            "notes": notes,
        });

        let response = self
            .http
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&credentials.key_id, Some(&credentials.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("Order request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Gateway(format!("Failed to read gateway response: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::Gateway(format!(
                "Gateway returned HTTP {}: {}",
                status, text
            )));
        }

        serde_json::from_str(&text)
            .map_err(|e| AppError::Gateway(format!("Invalid gateway response: {}", e)))
    }

    /// Verify a payment callback signature: HMAC-SHA256 over
    /// `"{order_id}|{payment_id}"` with the key secret, hex-encoded.
    pub fn verify_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> AppResult<bool> {
        let credentials = self.credentials()?;
        let payload = format!("{}|{}", order_id, payment_id);
        Ok(verify_hmac_sha256_hex(
            payload.as_bytes(),
            &credentials.key_secret,
            signature,
        ))
    }
}

pub fn verify_hmac_sha256_hex(payload: &[u8], secret: &str, signature: &str) -> bool {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(v) => v,
        Err(_) => return false,
    };
    mac.update(payload);
    let computed = hex::encode(mac.finalize().into_bytes());
    secure_eq(computed.as_bytes(), signature.trim().as_bytes())
}

/// Constant-time byte comparison
pub fn secure_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0_u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    fn sign(payload: &str, secret: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn secure_eq_behaves_correctly() {
        assert!(secure_eq(b"abc", b"abc"));
        assert!(!secure_eq(b"abc", b"abd"));
        assert!(!secure_eq(b"abc", b"ab"));
    }

    #[test]
    fn valid_signature_verifies() {
        let signature = sign("order_abc|pay_xyz", "secret");
        assert!(verify_hmac_sha256_hex(
            b"order_abc|pay_xyz",
            "secret",
            &signature
        ));
    }

    #[test]
    fn any_single_character_mutation_fails() {
        let secret = "secret";
        let signature = sign("order_abc|pay_xyz", secret);

        assert!(!verify_hmac_sha256_hex(b"order_abd|pay_xyz", secret, &signature));
        assert!(!verify_hmac_sha256_hex(b"order_abc|pay_xyw", secret, &signature));

        let mut mutated = signature.clone().into_bytes();
        mutated[0] = if mutated[0] == b'0' { b'1' } else { b'0' };
        let mutated = String::from_utf8(mutated).unwrap();
        assert!(!verify_hmac_sha256_hex(b"order_abc|pay_xyz", secret, &mutated));
    }

    #[test]
    fn garbage_signature_fails() {
        assert!(!verify_hmac_sha256_hex(
            b"order_abc|pay_xyz",
            "secret",
            "deadbeef"
        ));
    }

    #[test]
    fn unconfigured_gateway_rejects_use() {
        let gateway = PaymentGateway::new(&crate::config::PaymentConfig::default()).unwrap();
        assert!(matches!(
            gateway.key_id(),
            Err(crate::error::AppError::Configuration(_))
        ));
        assert!(matches!(
            gateway.verify_signature("o", "p", "s"),
            Err(crate::error::AppError::Configuration(_))
        ));
    }
}
