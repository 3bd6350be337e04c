/// OAuth 콜백 세션 부트스트랩
/// 1. 리다이렉트 URL에서 자격 증명 추출
/// 2. 저장소에 저장
/// 3. 신원 확인 후 루트로 이동하거나 오류 표시
// region:    --- Imports
use crate::api::ApiClient;
use crate::auth::{resolve_identity, AuthContext};
use crate::cancel::CancelToken;
use crate::error::{StoreError, MSG_LOGIN_FAILED};
use crate::storage::{CredentialStore, ACCESS_TOKEN_KEY, API_KEY, WS_ACCESS_TOKEN_KEY};
use tracing::{info, warn};
use url::form_urlencoded;

// endregion: --- Imports

// region:    --- Credential Bundle
/// 로그인 성공 후 이동할 경로
pub const HOME_PATH: &str = "/";

/// 리다이렉트 URL에서 꺼낸 자격 증명 묶음
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialBundle {
    pub api_key: Option<String>,
    pub access_token: Option<String>,
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

impl CredentialBundle {
    /// URL 쿼리 문자열에서 추출, 같은 키가 여러 번 나오면 첫 값을 쓴다.
    pub fn from_query(query: Option<&str>) -> Self {
        let query = query.unwrap_or_default();
        let first = |name: &str| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        };
        Self {
            api_key: normalize(first("apiKey").as_deref()),
            access_token: normalize(first("accessToken").as_deref()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.api_key.is_none() && self.access_token.is_none()
    }

    /// 있는 값만 저장, 액세스 토큰은 실시간 전송용 키에도 복사한다.
    pub fn persist(&self, store: &dyn CredentialStore) -> Result<(), StoreError> {
        if let Some(api_key) = &self.api_key {
            store.set(API_KEY, api_key)?;
        }
        if let Some(access_token) = &self.access_token {
            store.set(ACCESS_TOKEN_KEY, access_token)?;
            store.set(WS_ACCESS_TOKEN_KEY, access_token)?;
        }
        Ok(())
    }
}

// endregion: --- Credential Bundle

// region:    --- Bootstrap State Machine
/// 부트스트랩 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapState {
    Bootstrapping,
    /// 현재 기록을 대체하며 이동
    Redirected { location: String },
    Failed(String),
}

impl BootstrapState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BootstrapState::Bootstrapping)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            BootstrapState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// 콜백 화면 한 번의 부트스트랩
pub struct SessionBootstrap<'a> {
    api: &'a ApiClient,
    store: &'a dyn CredentialStore,
    auth: &'a AuthContext,
    state: BootstrapState,
}

impl<'a> SessionBootstrap<'a> {
    pub fn new(api: &'a ApiClient, store: &'a dyn CredentialStore, auth: &'a AuthContext) -> Self {
        Self {
            api,
            store,
            auth,
            state: BootstrapState::Bootstrapping,
        }
    }

    /// 부트스트랩 실행
    ///
    /// 토큰이 없어도 신원 확인을 시도한다. 기존 세션이 저장되어 있으면 그대로 로그인된다.
    /// 확인 도중 토큰이 취소되면 결과를 버리고 `Bootstrapping`에 머문다.
    pub async fn run(&mut self, bundle: CredentialBundle, token: &CancelToken) -> &BootstrapState {
        if self.state.is_terminal() {
            return &self.state;
        }

        info!(
            "{:<12} --> 콜백 처리 시작: api_key={}, access_token={}",
            "Session",
            bundle.api_key.is_some(),
            bundle.access_token.is_some()
        );
        if bundle.is_empty() {
            info!("{:<12} --> 토큰 없음, 저장된 세션으로 확인", "Session");
        }

        if let Err(e) = bundle.persist(self.store) {
            // 저장에 실패해도 기존 세션으로 확인을 계속한다.
            warn!("{:<12} --> 자격 증명 저장 실패: {}", "Session", e);
        }

        let result = resolve_identity(self.api, self.store).await;
        if token.is_cancelled() {
            info!("{:<12} --> 화면이 내려가 결과를 버림", "Session");
            return &self.state;
        }

        self.state = if result.ok {
            self.auth.set_me(result.me);
            info!("{:<12} --> 로그인 성공, 루트로 이동", "Session");
            BootstrapState::Redirected {
                location: HOME_PATH.to_string(),
            }
        } else {
            let message = result
                .error_message
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| MSG_LOGIN_FAILED.to_string());
            warn!("{:<12} --> 로그인 실패: {}", "Session", message);
            BootstrapState::Failed(message)
        };
        &self.state
    }
}

// endregion: --- Bootstrap State Machine
