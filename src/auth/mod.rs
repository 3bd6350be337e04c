/// 회원 인증 상태 확인
/// 1. 신원 확인 (내 정보 조회)
/// 2. 인증 컨텍스트 (확인된 프로필 보관)
// region:    --- Imports
use crate::api::{auth_headers, safe_json, ApiClient};
use crate::error::ViewError;
use crate::storage::{CredentialStore, ACCESS_TOKEN_KEY, API_KEY};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Model
/// 내 정보 조회 엔드포인트
pub const MEMBERS_ME_PATH: &str = "/api/v1/members/me";

/// 로그인한 회원 프로필
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberMe {
    pub id: i64,
    pub nickname: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub reputation_score: Option<f64>,
}

/// 신원 확인 결과
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityResult {
    pub ok: bool,
    pub me: Option<MemberMe>,
    pub error_message: Option<String>,
}

impl IdentityResult {
    fn success(me: MemberMe) -> Self {
        Self {
            ok: true,
            me: Some(me),
            error_message: None,
        }
    }

    /// 로그인하지 않은 상태, 오류로 취급하지 않는다.
    fn anonymous() -> Self {
        Self {
            ok: false,
            me: None,
            error_message: None,
        }
    }

    fn failure(error: ViewError) -> Self {
        Self {
            ok: false,
            me: None,
            error_message: Some(error.to_string()),
        }
    }
}

// endregion: --- Model

// region:    --- Identity Resolver
/// 내 정보 조회
///
/// 저장된 자격 증명이 하나도 없으면 요청 없이 `Ok(None)`을 돌려준다.
pub async fn fetch_me(
    api: &ApiClient,
    store: &dyn CredentialStore,
) -> Result<Option<MemberMe>, ViewError> {
    let api_key = store.get_trimmed(API_KEY);
    let access_token = store.get_trimmed(ACCESS_TOKEN_KEY);
    if api_key.is_none() && access_token.is_none() {
        info!("{:<12} --> 저장된 자격 증명 없음", "Auth");
        return Ok(None);
    }

    let response = api
        .get(MEMBERS_ME_PATH, auth_headers(store))
        .await
        .map_err(|e| {
            warn!("{:<12} --> 내 정보 조회 네트워크 오류: {}", "Auth", e);
            ViewError::NetworkFailure
        })?;

    if !response.status().is_success() {
        warn!(
            "{:<12} --> 내 정보 조회 실패: status={}",
            "Auth",
            response.status()
        );
        return Err(ViewError::Unauthorized);
    }

    let me = safe_json::<MemberMe>(response)
        .await
        .ok_or(ViewError::ParseFailure)?;
    info!("{:<12} --> 내 정보 조회 성공: id={}", "Auth", me.id);
    Ok(Some(me))
}

/// 신원 확인
///
/// 재시도와 캐시가 없고 호출마다 독립적이다.
pub async fn resolve_identity(api: &ApiClient, store: &dyn CredentialStore) -> IdentityResult {
    match fetch_me(api, store).await {
        Ok(Some(me)) => IdentityResult::success(me),
        Ok(None) => IdentityResult::anonymous(),
        Err(e) => IdentityResult::failure(e),
    }
}

// endregion: --- Identity Resolver

// region:    --- Auth Context
/// 현재 사용자 인증 상태
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub me: Option<MemberMe>,
    pub loading: bool,
}

/// 확인된 프로필을 보관하는 공유 컨텍스트
#[derive(Clone, Default)]
pub struct AuthContext {
    state: Arc<RwLock<AuthState>>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// 현재 사용자 id, 확인된 프로필이 없으면 None
    pub fn viewer_id(&self) -> Option<i64> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.me.as_ref().map(|me| me.id)
    }

    pub fn set_me(&self, me: Option<MemberMe>) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.me = me;
        state.loading = false;
    }

    /// 신원을 다시 확인하고 결과를 반영
    pub async fn refresh(&self, api: &ApiClient, store: &dyn CredentialStore) -> IdentityResult {
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            state.loading = true;
        }
        let result = resolve_identity(api, store).await;
        self.set_me(result.me.clone());
        result
    }
}

// endregion: --- Auth Context
