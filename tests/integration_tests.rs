use auction_web::api::ApiClient;
use auction_web::auction::detail::{fetch_auction_detail, AuctionDetailPage, DetailView, RouteParam};
use auction_web::auth::resolve_identity;
use auction_web::error::ViewError;
use auction_web::handlers::{create_router, AppState};
use auction_web::storage::{
    CredentialStore, MemoryStore, ACCESS_TOKEN_KEY, API_KEY, WS_ACCESS_TOKEN_KEY,
};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use reqwest::redirect::Policy;
use reqwest::Client;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

// region:    --- Stub Backend

/// 라우터를 임의 포트로 띄우고 기본 주소를 돌려준다.
async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn auction_json(auction_id: i64) -> serde_json::Value {
    json!({
        "auctionId": auction_id,
        "name": "빈티지 필름 카메라",
        "description": "작동 확인 완료",
        "categoryName": "디지털",
        "startPrice": 10000,
        "currentHighestBid": 50000,
        "buyNowPrice": null,
        "bidCount": 5,
        "status": "OPEN",
        "startAt": "2026-10-01T10:00:00",
        "endAt": "2026-10-08T10:00:00",
        "imageUrls": ["/media/camera.png"],
        "seller": { "id": 9, "nickname": "카메라상점", "reputationScore": 42.5 }
    })
}

async fn stub_auction(Path(auction_id): Path<i64>) -> Response {
    match auction_id {
        42 => Json(json!({
            "resultCode": "200-1",
            "msg": "성공",
            "data": auction_json(42)
        }))
        .into_response(),
        13 => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "resultCode": "500-1", "msg": "일시적인 오류입니다." })),
        )
            .into_response(),
        7 => (StatusCode::OK, "not json").into_response(),
        998 => (StatusCode::NOT_FOUND, "not json").into_response(),
        997 => StatusCode::NOT_FOUND.into_response(),
        996 => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "resultCode": "200-1",
                "msg": "성공",
                "data": auction_json(996)
            })),
        )
            .into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "resultCode": "404-1", "msg": "해당 데이터가 없습니다." })),
        )
            .into_response(),
    }
}

async fn stub_me(State(hits): State<Arc<AtomicUsize>>, headers: HeaderMap) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    let authorization = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let api_key = headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    match (authorization, api_key) {
        ("Bearer tok123", _) => Json(json!({ "id": 1, "nickname": "구매자" })).into_response(),
        ("Bearer seller-token", _) => {
            Json(json!({ "id": 9, "nickname": "카메라상점" })).into_response()
        }
        ("Bearer broken", _) => (StatusCode::OK, "<html>").into_response(),
        (_, "key-1") => Json(json!({ "id": 2, "nickname": "키회원" })).into_response(),
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

/// 스텁 백엔드 실행, 내 정보 조회 횟수 카운터도 함께 돌려준다.
async fn spawn_backend() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route("/api/auctions/:id", get(stub_auction))
        .route("/api/v1/members/me", get(stub_me))
        .with_state(Arc::clone(&hits));
    (spawn(router).await, hits)
}

/// 화면 서버 실행
async fn spawn_app(backend_url: &str, store: Arc<MemoryStore>) -> String {
    let state = AppState::new(ApiClient::new(backend_url), store);
    spawn(create_router(state)).await
}

fn no_redirect_client() -> Client {
    Client::builder().redirect(Policy::none()).build().unwrap()
}

// endregion: --- Stub Backend

// region:    --- Identity Resolver

/// 자격 증명이 없으면 요청 없이 조용히 실패
#[tokio::test]
async fn test_resolve_identity_without_credentials() {
    let (backend, hits) = spawn_backend().await;
    let api = ApiClient::new(backend);
    let store = MemoryStore::new();

    let result = resolve_identity(&api, &store).await;
    assert!(!result.ok);
    assert!(result.me.is_none());
    assert!(result.error_message.is_none());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

/// API 키만으로도 신원 확인
#[tokio::test]
async fn test_resolve_identity_with_api_key() {
    let (backend, hits) = spawn_backend().await;
    let api = ApiClient::new(backend);
    let store = MemoryStore::new();
    store.set(API_KEY, "key-1").unwrap();

    let result = resolve_identity(&api, &store).await;
    assert!(result.ok);
    assert_eq!(result.me.unwrap().nickname, "키회원");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

/// 인증 실패와 파싱 실패 메시지
#[tokio::test]
async fn test_resolve_identity_failures() {
    let (backend, _) = spawn_backend().await;
    let api = ApiClient::new(backend);

    let store = MemoryStore::new();
    store.set(ACCESS_TOKEN_KEY, "expired").unwrap();
    let result = resolve_identity(&api, &store).await;
    assert_eq!(result.error_message.as_deref(), Some("인증이 필요합니다."));

    store.set(ACCESS_TOKEN_KEY, "broken").unwrap();
    let result = resolve_identity(&api, &store).await;
    assert_eq!(
        result.error_message.as_deref(),
        Some("응답 파싱에 실패했습니다.")
    );
}

// endregion: --- Identity Resolver

// region:    --- Auction Detail

/// 최고 입찰가 + 1000으로 입찰가 시드
#[tokio::test]
async fn test_detail_seeds_bid_amount() {
    let (backend, _) = spawn_backend().await;
    let api = ApiClient::new(backend);

    let mut page = AuctionDetailPage::new();
    let view = page
        .load(&api, Some(&RouteParam::Single("42".to_string())))
        .await
        .clone();
    match view {
        DetailView::Loaded(auction) => assert_eq!(auction.auction_id, 42),
        other => panic!("unexpected view: {:?}", other),
    }
    assert_eq!(page.bid_amount().value(), "51000");
}

/// 404는 본문과 관계없이 존재하지 않는 경매
#[tokio::test]
async fn test_detail_not_found() {
    let (backend, _) = spawn_backend().await;
    let api = ApiClient::new(backend);

    let result = fetch_auction_detail(&api, 999).await;
    assert_eq!(result, Err(ViewError::NotFound));
    assert_eq!(
        result.unwrap_err().to_string(),
        "존재하지 않는 경매입니다."
    );

    // JSON이 아닌 본문, 빈 본문, 성공 봉투도 404면 모두 NotFound
    for auction_id in [998, 997, 996] {
        let result = fetch_auction_detail(&api, auction_id).await;
        assert_eq!(result, Err(ViewError::NotFound), "auction {}", auction_id);
    }
}

/// 백엔드 메시지, 파싱 실패, 네트워크 오류 분류
#[tokio::test]
async fn test_detail_error_classification() {
    let (backend, _) = spawn_backend().await;
    let api = ApiClient::new(backend);

    let result = fetch_auction_detail(&api, 13).await.unwrap_err();
    assert_eq!(result.to_string(), "일시적인 오류입니다.");

    let result = fetch_auction_detail(&api, 7).await.unwrap_err();
    assert_eq!(result.to_string(), "상세 정보를 불러오지 못했습니다.");

    let offline = ApiClient::new("http://127.0.0.1:9");
    let result = fetch_auction_detail(&offline, 42).await.unwrap_err();
    assert_eq!(result, ViewError::NetworkFailure);
}

// endregion: --- Auction Detail

// region:    --- Web Surface

/// 콜백 성공: 토큰 저장 후 루트로 303 이동
#[tokio::test]
async fn test_oauth_callback_success_redirects_home() {
    let (backend, _) = spawn_backend().await;
    let store = Arc::new(MemoryStore::new());
    let app = spawn_app(&backend, Arc::clone(&store)).await;

    let response = no_redirect_client()
        .get(format!("{}/oauth/callback?accessToken=tok123", app))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get("location").unwrap(), "/");
    assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("tok123"));
    assert_eq!(store.get(WS_ACCESS_TOKEN_KEY).as_deref(), Some("tok123"));
    assert_eq!(store.get(API_KEY), None);
}

/// 콜백 실패: 확인 오류 메시지를 그대로 표시
#[tokio::test]
async fn test_oauth_callback_failure_shows_message() {
    let (backend, _) = spawn_backend().await;
    let store = Arc::new(MemoryStore::new());
    let app = spawn_app(&backend, Arc::clone(&store)).await;

    let response = no_redirect_client()
        .get(format!("{}/oauth/callback?accessToken=expired", app))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("인증이 필요합니다."));
    assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("expired"));
}

/// 토큰 없이 들어와도 기존 세션으로 로그인
#[tokio::test]
async fn test_oauth_callback_uses_existing_session() {
    let (backend, hits) = spawn_backend().await;
    let store = Arc::new(MemoryStore::new());
    store.set(ACCESS_TOKEN_KEY, "tok123").unwrap();
    let app = spawn_app(&backend, Arc::clone(&store)).await;

    let response = no_redirect_client()
        .get(format!("{}/oauth/callback", app))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

/// 같은 키가 여러 번 오면 첫 값을 디코딩해서 쓴다
#[tokio::test]
async fn test_oauth_callback_takes_first_query_value() {
    let (backend, _) = spawn_backend().await;
    let store = Arc::new(MemoryStore::new());
    let app = spawn_app(&backend, Arc::clone(&store)).await;

    let response = no_redirect_client()
        .get(format!(
            "{}/oauth/callback?accessToken=%20tok123%20&accessToken=expired&apiKey=",
            app
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("tok123"));
    assert_eq!(store.get(API_KEY), None);
}

/// 존재하지 않는 경매 화면과 목록 링크
#[tokio::test]
async fn test_detail_page_not_found() {
    let (backend, _) = spawn_backend().await;
    let app = spawn_app(&backend, Arc::new(MemoryStore::new())).await;

    let response = Client::new()
        .get(format!("{}/auctions/999", app))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response.text().await.unwrap();
    assert!(body.contains("존재하지 않는 경매입니다."));
    assert!(body.contains("href=\"/auctions\""));
}

/// 잘못된 id는 백엔드 호출 없이 오류
#[tokio::test]
async fn test_detail_page_invalid_id() {
    let (backend, _) = spawn_backend().await;
    let app = spawn_app(&backend, Arc::new(MemoryStore::new())).await;

    let response = Client::new()
        .get(format!("{}/auctions/abc", app))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.text().await.unwrap();
    assert!(body.contains("잘못된 접근입니다."));
}

/// 판매자 본인에게는 입찰 폼을 숨긴다
#[tokio::test]
async fn test_detail_page_hides_bid_form_from_seller() {
    let (backend, _) = spawn_backend().await;
    let store = Arc::new(MemoryStore::new());
    let app = spawn_app(&backend, Arc::clone(&store)).await;
    let client = no_redirect_client();

    let body = client
        .get(format!("{}/auctions/42", app))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("입찰하기"));
    assert!(body.contains("value=\"51000\""));
    assert!(body.contains(&format!("src=\"{}/media/camera.png\"", backend)));

    let response = client
        .get(format!("{}/oauth/callback?accessToken=seller-token", app))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = client
        .get(format!("{}/auctions/42", app))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!body.contains("입찰하기"));
    assert!(body.contains("카메라상점"));
}

/// 저장된 판매자 세션으로 처음 상세 화면에 들어와도 입찰 폼을 숨긴다
#[tokio::test]
async fn test_detail_page_hides_bid_form_on_first_visit() {
    let (backend, hits) = spawn_backend().await;
    let store = Arc::new(MemoryStore::new());
    store.set(ACCESS_TOKEN_KEY, "seller-token").unwrap();
    let app = spawn_app(&backend, store).await;
    let client = Client::new();

    let body = client
        .get(format!("{}/auctions/42", app))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!body.contains("입찰하기"));
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // 확인된 프로필은 다음 요청에서 다시 조회하지 않는다.
    client
        .get(format!("{}/auctions/42", app))
        .send()
        .await
        .unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

/// 홈 화면 인사
#[tokio::test]
async fn test_home_page_greets_member() {
    let (backend, _) = spawn_backend().await;
    let store = Arc::new(MemoryStore::new());
    store.set(API_KEY, "key-1").unwrap();
    let app = spawn_app(&backend, store).await;

    let body = Client::new()
        .get(format!("{}/", app))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("키회원님, 환영합니다."));
}

// endregion: --- Web Surface
