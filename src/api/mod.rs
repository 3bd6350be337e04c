/// 백엔드 API 호출 도우미
/// 1. URL 조립
/// 2. 인증 헤더 구성
/// 3. 응답 본문 파싱 (JSON, RsData 봉투)
// region:    --- Imports
use crate::storage::{CredentialStore, ACCESS_TOKEN_KEY, API_KEY};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

// endregion: --- Imports

// region:    --- Constants
/// API 키 헤더 이름
pub const API_KEY_HEADER: &str = "x-api-key";

// endregion: --- Constants

// region:    --- Api Client
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    /// 기본 주소와 경로 사이에 `/`를 정확히 하나 둔다.
    pub fn build_api_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    /// GET 요청 전송
    pub async fn get(&self, path: &str, headers: HeaderMap) -> Result<Response, reqwest::Error> {
        let url = self.build_api_url(path);
        debug!("{:<12} --> GET {}", "Api", url);
        self.http.get(url).headers(headers).send().await
    }
}

/// 저장된 자격 증명으로 인증 헤더 구성
pub fn auth_headers(store: &dyn CredentialStore) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Some(api_key) = store.get_trimmed(API_KEY) {
        match HeaderValue::from_str(&api_key) {
            Ok(value) => {
                headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
            }
            Err(_) => warn!("{:<12} --> 헤더로 쓸 수 없는 API 키 무시", "Api"),
        }
    }

    if let Some(token) = store.get_trimmed(ACCESS_TOKEN_KEY) {
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => warn!("{:<12} --> 헤더로 쓸 수 없는 액세스 토큰 무시", "Api"),
        }
    }

    headers
}

// endregion: --- Api Client

// region:    --- Response Parsing
/// 본문을 JSON으로 파싱, 실패하면 None
pub async fn safe_json<T: DeserializeOwned>(response: Response) -> Option<T> {
    let bytes = response.bytes().await.ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// 백엔드 공통 응답 봉투
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsData<T> {
    #[serde(default)]
    pub result_code: String,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

impl<T> RsData<T> {
    /// 결과 코드가 없거나 `2`로 시작하면 성공
    pub fn is_success(&self) -> bool {
        self.result_code.is_empty() || self.result_code.starts_with('2')
    }
}

/// RsData 파싱 결과
#[derive(Debug)]
pub struct ParsedRsData<T> {
    pub rs_data: Option<RsData<T>>,
    pub error_message: Option<String>,
}

/// 본문을 RsData 봉투로 파싱
///
/// 상태 코드가 2xx가 아니거나 결과 코드가 실패를 나타내면 `msg`를 오류 메시지로 돌려준다.
/// 본문이 봉투 형태가 아니면 둘 다 None이다.
pub async fn parse_rs_data<T: DeserializeOwned>(response: Response) -> ParsedRsData<T> {
    let ok = response.status().is_success();
    let rs_data: Option<RsData<T>> = safe_json(response).await;
    let error_message = rs_data
        .as_ref()
        .filter(|rs| !ok || !rs.is_success())
        .map(|rs| rs.msg.trim().to_string())
        .filter(|msg| !msg.is_empty());
    ParsedRsData {
        rs_data,
        error_message,
    }
}

// endregion: --- Response Parsing
