use crate::{
    abstract_trait::PaymentGatewayTrait, domain::requests::CreateIntentRequest,
    gateway::signature::PaymentSignature, model::PaymentIntent,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::time::Duration;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct RazorpayCredentials {
    pub key_id: String,
    pub key_secret: String,
}

#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    /// `None` disables intent creation.
    pub credentials: Option<RazorpayCredentials>,
    pub signature_secret: Option<String>,
    pub api_base: String,
    pub currency: String,
    pub timeout: Duration,
}

pub struct RazorpayGateway {
    config: RazorpayConfig,
    signature: Option<PaymentSignature>,
    client: reqwest::Client,
}

impl RazorpayGateway {
    pub fn new(config: RazorpayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build payment gateway HTTP client")?;

        let signature = config.signature_secret.clone().map(PaymentSignature::new);

        if config.credentials.is_none() {
            info!("💳 Razorpay credentials not set, gateway checkout disabled");
        }

        Ok(Self {
            config,
            signature,
            client,
        })
    }
}

#[async_trait]
impl PaymentGatewayTrait for RazorpayGateway {
    fn key_id(&self) -> Option<String> {
        self.config
            .credentials
            .as_ref()
            .map(|creds| creds.key_id.clone())
    }

    fn currency(&self) -> String {
        self.config.currency.clone()
    }

    async fn create_intent(
        &self,
        req: &CreateIntentRequest,
    ) -> Result<PaymentIntent, ServiceError> {
        let Some(creds) = &self.config.credentials else {
            return Err(ServiceError::GatewayUnavailable(
                "Razorpay payment is not configured".into(),
            ));
        };

        let url = format!("{}/orders", self.config.api_base.trim_end_matches('/'));

        info!(
            "💳 Requesting Razorpay order for receipt {} ({} {})",
            req.receipt, req.amount, req.currency
        );

        let response = self
            .client
            .post(&url)
            .basic_auth(&creds.key_id, Some(&creds.key_secret))
            .json(req)
            .send()
            .await
            .map_err(|e| {
                error!("❌ Razorpay request for {} failed: {e}", req.receipt);
                ServiceError::GatewayUnavailable(if e.is_timeout() {
                    "Payment gateway timed out".into()
                } else {
                    "Payment gateway unreachable".into()
                })
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("❌ Razorpay rejected {} with {status}: {body}", req.receipt);
            return Err(ServiceError::GatewayUnavailable(format!(
                "Payment gateway returned {status}"
            )));
        }

        let intent = response.json::<PaymentIntent>().await.map_err(|e| {
            error!("❌ Unreadable Razorpay response for {}: {e}", req.receipt);
            ServiceError::GatewayUnavailable("Payment gateway returned an invalid response".into())
        })?;

        info!("✅ Razorpay order {} created", intent.id);
        Ok(intent)
    }

    fn verify_signature(
        &self,
        gateway_order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<bool, ServiceError> {
        let Some(signer) = &self.signature else {
            return Err(ServiceError::GatewayUnavailable(
                "Payment verification is not configured".into(),
            ));
        };

        signer.verify(gateway_order_id, payment_id, signature)
    }
}
