use std::time::Duration;

use anyhow::{Context, bail};
use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::remote::responses::{BalanceResponse, OrderRequest, OrderResponse, PriceResponse};
use crate::traits::{BrokerageApi, OrderAck, OrderTicket};

/// Generic REST brokerage client. Vendor signing schemes are deliberately
/// out of scope; authentication is a single API key header.
#[derive(Clone)]
pub struct RestBrokerClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestBrokerClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::builder()
                .user_agent("signal-trade-gateway/0.1.0")
                .timeout(Duration::from_secs(10))
                .build()
                .expect("failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl BrokerageApi for RestBrokerClient {
    async fn fetch_price(&self, asset: &str) -> anyhow::Result<f64> {
        let url = format!("{}/price/{}", self.base_url, asset);
        let resp = self
            .client
            .get(&url)
            .header("X-API-KEY", &self.api_key)
            .send()
            .await
            .context("failed to send price request")?;

        if !resp.status().is_success() {
            bail!("price request for {} returned {}", asset, resp.status());
        }

        let data = resp
            .json::<PriceResponse>()
            .await
            .context("failed to parse price response")?;
        Ok(data.price)
    }

    async fn fetch_balance(&self) -> anyhow::Result<f64> {
        let url = format!("{}/account/balance", self.base_url);
        let resp = self
            .client
            .get(&url)
            .header("X-API-KEY", &self.api_key)
            .send()
            .await
            .context("failed to send balance request")?;

        if !resp.status().is_success() {
            bail!("balance request returned {}", resp.status());
        }

        let data = resp
            .json::<BalanceResponse>()
            .await
            .context("failed to parse balance response")?;
        Ok(data.balance)
    }

    async fn place_order(&self, ticket: &OrderTicket) -> anyhow::Result<OrderAck> {
        let url = format!("{}/orders", self.base_url);
        let body = OrderRequest {
            pair: ticket.asset.clone(),
            side: ticket.side.as_str().to_string(),
            order_type: "market".to_string(),
            volume: ticket.quantity,
            validate: ticket.dry_run,
        };

        info!(
            "placing {} order: {} {} (dry_run={})",
            body.order_type, ticket.side, ticket.asset, ticket.dry_run
        );

        let resp = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("failed to send order request")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            bail!("order request returned {}: {}", status, text);
        }

        let data = resp
            .json::<OrderResponse>()
            .await
            .context("failed to parse order response")?;
        Ok(OrderAck {
            order_id: data.order_id,
            status: data.status,
        })
    }
}
