use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PriceResponse {
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct BalanceResponse {
    pub balance: f64,
}

#[derive(Debug, Serialize)]
pub struct OrderRequest {
    pub pair: String,
    pub side: String,
    #[serde(rename = "ordertype")]
    pub order_type: String,
    pub volume: f64,
    pub validate: bool,
}

#[derive(Debug, Deserialize)]
pub struct OrderResponse {
    #[serde(rename = "order_id", default)]
    pub order_id: String,
    pub status: String,
}
