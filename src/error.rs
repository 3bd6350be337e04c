// region:    --- Imports
use thiserror::Error;

// endregion: --- Imports

// region:    --- Messages
pub const MSG_INVALID_ACCESS: &str = "잘못된 접근입니다.";
pub const MSG_AUCTION_NOT_FOUND: &str = "존재하지 않는 경매입니다.";
pub const MSG_DETAIL_LOAD_FAILED: &str = "상세 정보를 불러오지 못했습니다.";
pub const MSG_NETWORK_ERROR: &str = "네트워크 오류가 발생했습니다.";
pub const MSG_AUTH_REQUIRED: &str = "인증이 필요합니다.";
pub const MSG_PARSE_FAILED: &str = "응답 파싱에 실패했습니다.";
pub const MSG_LOGIN_FAILED: &str = "로그인에 실패했습니다.";

// endregion: --- Messages

// region:    --- View Error
/// 화면 경계에서 처리되는 오류
///
/// `Display` 결과가 그대로 사용자에게 노출되는 메시지다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("{}", MSG_INVALID_ACCESS)]
    InvalidInput,
    #[error("{}", MSG_AUCTION_NOT_FOUND)]
    NotFound,
    #[error("{}", MSG_AUTH_REQUIRED)]
    Unauthorized,
    #[error("{}", MSG_PARSE_FAILED)]
    ParseFailure,
    #[error("{}", MSG_NETWORK_ERROR)]
    NetworkFailure,
    /// 백엔드가 내려준 메시지, 없으면 기본 문구
    #[error("{}", .0.as_deref().unwrap_or(MSG_DETAIL_LOAD_FAILED))]
    ApplicationError(Option<String>),
}

// endregion: --- View Error

// region:    --- Store Error
/// 자격 증명 저장소 오류
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage format error: {0}")]
    Format(#[from] serde_json::Error),
}

// endregion: --- Store Error
