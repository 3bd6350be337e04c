// region:    --- Imports
use auction_web::api::ApiClient;
use auction_web::config::AppConfig;
use auction_web::handlers::{create_router, AppState};
use auction_web::storage::FileStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // 설정 로드
    let config = AppConfig::from_env();
    info!(
        "{:<12} --> API 기본 주소: {}",
        "Main", config.api_base_url
    );

    // 자격 증명 저장소 열기
    let store = match FileStore::open(&config.credential_store_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("{:<12} --> 자격 증명 저장소 열기 실패: {:?}", "Main", e);
            return Err(e.into());
        }
    };
    info!(
        "{:<12} --> 자격 증명 저장소: {}",
        "Main",
        store.path().display()
    );

    let state = AppState::new(ApiClient::new(config.api_base_url.clone()), store);

    // 라우터 설정
    let routes_all = create_router(state);

    // 리스너 생성
    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
