/// 경매 상세 화면 흐름
/// 1. 라우트 파라미터에서 경매 id 추출
/// 2. 상세 조회 및 응답 분류
/// 3. 화면 상태 선택 (로딩, 오류, 비어 있음, 로드됨)
// region:    --- Imports
use super::bid::BidAmountField;
use super::model::AuctionDetail;
use crate::api::{parse_rs_data, ApiClient};
use crate::cancel::CancelToken;
use crate::error::ViewError;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::sync::Arc;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Route & Urls
/// 라우트 파라미터, 프레임워크에 따라 배열로 들어올 수 있다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteParam {
    Single(String),
    Many(Vec<String>),
}

/// 경매 id 추출, 없거나 양의 정수가 아니면 None
pub fn resolve_auction_id(param: Option<&RouteParam>) -> Option<i64> {
    let raw = match param? {
        RouteParam::Single(value) => value.as_str(),
        RouteParam::Many(values) => values.first()?.as_str(),
    };
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

pub fn auction_detail_path(auction_id: i64) -> String {
    format!("/api/auctions/{}", auction_id)
}

/// 이미지 주소 해석
/// `http://`, `https://`로 시작하면 그대로, 아니면 API 기본 주소 기준으로 만든다.
pub fn resolve_image_url(api: &ApiClient, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    api.build_api_url(url)
}

// endregion: --- Route & Urls

// region:    --- Fetch
/// 경매 상세 조회
pub async fn fetch_auction_detail(
    api: &ApiClient,
    auction_id: i64,
) -> Result<AuctionDetail, ViewError> {
    info!("{:<12} --> 경매 상세 조회 id: {}", "Detail", auction_id);
    let response = api
        .get(&auction_detail_path(auction_id), HeaderMap::new())
        .await
        .map_err(|e| {
            warn!("{:<12} --> 경매 상세 네트워크 오류: {}", "Detail", e);
            ViewError::NetworkFailure
        })?;

    let status = response.status();
    let parsed = parse_rs_data::<AuctionDetail>(response).await;

    if status.is_success() && parsed.error_message.is_none() {
        if let Some(rs_data) = parsed.rs_data {
            if rs_data.is_success() {
                if let Some(auction) = rs_data.data {
                    return Ok(auction);
                }
            }
        }
        warn!("{:<12} --> 경매 상세 응답에 데이터 없음", "Detail");
        return Err(ViewError::ApplicationError(None));
    }

    if status == StatusCode::NOT_FOUND {
        warn!("{:<12} --> 존재하지 않는 경매 id: {}", "Detail", auction_id);
        return Err(ViewError::NotFound);
    }

    warn!(
        "{:<12} --> 경매 상세 조회 실패: status={}, msg={:?}",
        "Detail", status, parsed.error_message
    );
    Err(ViewError::ApplicationError(parsed.error_message))
}

// endregion: --- Fetch

// region:    --- View State
/// 상세 화면 상태
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Loading,
    Error(ViewError),
    Empty,
    Loaded(Arc<AuctionDetail>),
}

/// 한 번의 조회 요청
#[derive(Debug, Clone)]
pub struct LoadTicket {
    pub auction_id: i64,
    pub token: CancelToken,
}

/// 경매 상세 화면
///
/// 화면이 살아 있는 동안 유지되며, id가 바뀔 때마다 이전 요청의 토큰을 취소한다.
#[derive(Debug)]
pub struct AuctionDetailPage {
    view: DetailView,
    bid_amount: BidAmountField,
    token: Option<CancelToken>,
}

impl Default for AuctionDetailPage {
    fn default() -> Self {
        Self::new()
    }
}

impl AuctionDetailPage {
    pub fn new() -> Self {
        Self {
            view: DetailView::Loading,
            bid_amount: BidAmountField::new(),
            token: None,
        }
    }

    pub fn view(&self) -> &DetailView {
        &self.view
    }

    pub fn bid_amount(&self) -> &BidAmountField {
        &self.bid_amount
    }

    /// 조회 시작
    ///
    /// 잘못된 id면 요청 없이 오류 상태로 끝나고 None을 돌려준다.
    pub fn begin(&mut self, param: Option<&RouteParam>) -> Option<LoadTicket> {
        if let Some(previous) = self.token.take() {
            previous.cancel();
        }

        let Some(auction_id) = resolve_auction_id(param) else {
            warn!("{:<12} --> 잘못된 경매 id: {:?}", "Detail", param);
            self.view = DetailView::Error(ViewError::InvalidInput);
            return None;
        };

        let token = CancelToken::new();
        self.token = Some(token.clone());
        self.view = DetailView::Loading;
        Some(LoadTicket { auction_id, token })
    }

    /// 조회 결과 반영, 취소된 요청이면 false
    pub fn apply(&mut self, ticket: &LoadTicket, result: Result<AuctionDetail, ViewError>) -> bool {
        if ticket.token.is_cancelled() {
            info!(
                "{:<12} --> 지난 요청 결과 무시 id: {}",
                "Detail", ticket.auction_id
            );
            return false;
        }

        self.view = match result {
            Ok(auction) => {
                let snapshot = Arc::new(auction);
                self.bid_amount.seed_from(&snapshot);
                DetailView::Loaded(snapshot)
            }
            Err(e) => DetailView::Error(e),
        };
        true
    }

    /// id 해석부터 결과 반영까지 한 번에 실행
    pub async fn load(&mut self, api: &ApiClient, param: Option<&RouteParam>) -> &DetailView {
        if let Some(ticket) = self.begin(param) {
            let result = fetch_auction_detail(api, ticket.auction_id).await;
            self.apply(&ticket, result);
        }
        &self.view
    }

    /// 화면 해제, 진행 중인 요청 결과는 버려진다.
    /// 기다리던 요청이 있었다면 보여줄 것이 없는 상태가 된다.
    pub fn unmount(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
        if self.view == DetailView::Loading {
            self.view = DetailView::Empty;
        }
    }
}

impl Drop for AuctionDetailPage {
    fn drop(&mut self) {
        self.unmount();
    }
}

// endregion: --- View State
