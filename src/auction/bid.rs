/// 입찰가 입력 필드
/// 경매 스냅샷에서 제안 입찰가를 계산해 채우고, 이후에는 사용자가 자유롭게 수정한다.
// region:    --- Imports
use super::model::AuctionDetail;
use std::sync::Arc;

// endregion: --- Imports

// region:    --- Suggestion
/// 최고 입찰가 위로 제안하는 호가 단위
pub const BID_INCREMENT: i64 = 1000;

/// 제안 입찰가
/// 최고 입찰가가 있으면 최고 입찰가 + 호가 단위, 없으면 시작가
/// 더한 값이 범위를 넘으면 제안하지 않는다.
pub fn suggest_bid_amount(auction: &AuctionDetail) -> Option<i64> {
    if let Some(highest) = auction.current_highest_bid {
        return highest.checked_add(BID_INCREMENT);
    }
    auction.start_price
}

// endregion: --- Suggestion

// region:    --- Bid Amount Field
/// 입찰가 입력값
///
/// 시드는 스냅샷이 바뀔 때(`Arc` 동일성 기준)만 일어나므로 같은 스냅샷으로
/// 다시 그려도 사용자가 입력한 값은 유지된다.
#[derive(Debug, Default)]
pub struct BidAmountField {
    value: String,
    seeded_from: Option<Arc<AuctionDetail>>,
}

impl BidAmountField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// 사용자 입력
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// 스냅샷으로 시드, 새 스냅샷이면 true
    pub fn seed_from(&mut self, snapshot: &Arc<AuctionDetail>) -> bool {
        if let Some(previous) = &self.seeded_from {
            if Arc::ptr_eq(previous, snapshot) {
                return false;
            }
        }
        self.seeded_from = Some(Arc::clone(snapshot));
        if let Some(amount) = suggest_bid_amount(snapshot) {
            self.value = amount.to_string();
        }
        true
    }
}

// endregion: --- Bid Amount Field
