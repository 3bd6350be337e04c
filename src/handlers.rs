// region:    --- Imports
use crate::api::ApiClient;
use crate::auction::detail::{AuctionDetailPage, DetailView, RouteParam};
use crate::auth::AuthContext;
use crate::cancel::CancelToken;
use crate::error::ViewError;
use crate::session::{BootstrapState, CredentialBundle, SessionBootstrap};
use crate::storage::CredentialStore;
use crate::view;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

// endregion: --- Imports

// region:    --- App State
/// 한 명의 사용자가 쓰는 화면 서버 상태
/// 저장소와 인증 컨텍스트는 모든 요청이 함께 쓴다.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub store: Arc<dyn CredentialStore>,
    pub auth: AuthContext,
}

impl AppState {
    pub fn new(api: ApiClient, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            api,
            store,
            auth: AuthContext::new(),
        }
    }
}

// endregion: --- App State

// region:    --- Router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_home))
        .route("/auctions/:id", get(handle_auction_detail))
        .route("/oauth/callback", get(handle_oauth_callback))
        .layer(cors)
        .with_state(state)
}

// endregion: --- Router

// region:    --- Page Handlers

/// 홈 화면
pub async fn handle_home(State(state): State<AppState>) -> impl IntoResponse {
    info!("{:<12} --> 홈 화면", "Handler");
    let result = state.auth.refresh(&state.api, state.store.as_ref()).await;
    Html(view::render_home_page(result.me.as_ref()))
}

/// 경매 상세 화면
pub async fn handle_auction_detail(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> impl IntoResponse {
    info!("{:<12} --> 경매 상세 화면 id: {}", "Handler", raw_id);
    let mut page = AuctionDetailPage::new();
    page.load(&state.api, Some(&RouteParam::Single(raw_id)))
        .await;

    // 확인된 프로필이 없으면 판매자 여부를 가리기 위해 신원을 확인한다.
    if state.auth.snapshot().me.is_none() {
        state.auth.refresh(&state.api, state.store.as_ref()).await;
    }

    let status = match page.view() {
        DetailView::Error(ViewError::NotFound) => StatusCode::NOT_FOUND,
        DetailView::Error(ViewError::InvalidInput) => StatusCode::BAD_REQUEST,
        _ => StatusCode::OK,
    };
    let html = view::render_detail_page(&page, state.auth.viewer_id(), &state.api);
    (status, Html(html))
}

/// OAuth 콜백 화면
pub async fn handle_oauth_callback(
    State(state): State<AppState>,
    uri: Uri,
) -> Response {
    info!("{:<12} --> OAuth 콜백", "Handler");
    let bundle = CredentialBundle::from_query(uri.query());
    let token = CancelToken::new();

    let mut bootstrap = SessionBootstrap::new(&state.api, state.store.as_ref(), &state.auth);
    match bootstrap.run(bundle, &token).await {
        // 303 응답이라 콜백 주소는 방문 기록에 화면으로 남지 않는다.
        BootstrapState::Redirected { location } => Redirect::to(location).into_response(),
        other => Html(view::render_callback_page(other)).into_response(),
    }
}

// endregion: --- Page Handlers
