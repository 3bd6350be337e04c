// region:    --- Imports
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// endregion: --- Imports

// region:    --- Cancel Token
/// 화면이 내려가거나 입력이 바뀌면 취소되는 토큰
///
/// 네트워크 요청 자체를 중단하지는 않는다. 비동기 단계가 끝날 때마다
/// `is_cancelled`를 확인해서 결과를 버린다.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

// endregion: --- Cancel Token
