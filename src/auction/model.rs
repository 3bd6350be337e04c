use serde::{Deserialize, Serialize};

/// 진행 중 경매 상태값
pub const STATUS_OPEN: &str = "OPEN";

// 판매자 요약
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: i64,
    pub nickname: String,
    #[serde(default)]
    pub reputation_score: f64,
}

// 경매 상세 스냅샷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionDetail {
    pub auction_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub start_price: Option<i64>,
    #[serde(default)]
    pub current_highest_bid: Option<i64>,
    #[serde(default)]
    pub buy_now_price: Option<i64>,
    #[serde(default)]
    pub bid_count: i64,
    pub status: String,
    pub start_at: String,
    pub end_at: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub seller: Seller,
}

impl AuctionDetail {
    pub fn is_open(&self) -> bool {
        self.status == STATUS_OPEN
    }
}
