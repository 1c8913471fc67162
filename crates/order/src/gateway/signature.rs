use hmac::{Hmac, Mac};
use sha2::Sha256;
use shared::errors::ServiceError;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 over `"{gateway_order_id}|{payment_id}"`, hex encoded.
#[derive(Clone)]
pub struct PaymentSignature {
    secret: String,
}

impl PaymentSignature {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn mac(&self, gateway_order_id: &str, payment_id: &str) -> Result<HmacSha256, ServiceError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| ServiceError::Internal(format!("Invalid signature key: {e}")))?;
        mac.update(gateway_order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());
        Ok(mac)
    }

    pub fn sign(&self, gateway_order_id: &str, payment_id: &str) -> Result<String, ServiceError> {
        let mac = self.mac(gateway_order_id, payment_id)?;
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Constant-time comparison. Malformed hex is a mismatch.
    pub fn verify(
        &self,
        gateway_order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<bool, ServiceError> {
        let Ok(provided) = hex::decode(signature.trim()) else {
            return Ok(false);
        };

        let mac = self.mac(gateway_order_id, payment_id)?;
        Ok(mac.verify_slice(&provided).is_ok())
    }
}
