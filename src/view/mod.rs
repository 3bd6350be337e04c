/// 서버 렌더링 화면
/// 1. 홈
/// 2. 경매 상세
/// 3. OAuth 콜백
// region:    --- Imports
use crate::api::ApiClient;
use crate::auction::detail::{resolve_image_url, AuctionDetailPage, DetailView};
use crate::auction::model::AuctionDetail;
use crate::auth::MemberMe;
use crate::session::BootstrapState;
use std::fmt::Write;

// endregion: --- Imports

// region:    --- Helpers
/// 경매 목록 경로
pub const AUCTION_LIST_PATH: &str = "/auctions";

/// 천 단위 구분 기호를 넣은 금액, 값이 없으면 `-`
pub fn format_number(value: Option<i64>) -> String {
    let Some(value) = value else {
        return "-".to_string();
    };
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// 현재 사용자가 판매자인지
pub fn is_seller(viewer_id: Option<i64>, auction: &AuctionDetail) -> bool {
    viewer_id == Some(auction.seller.id)
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

// endregion: --- Helpers

// region:    --- Home
pub fn render_home_page(me: Option<&MemberMe>) -> String {
    let body = match me {
        Some(me) => format!(
            "<div class=\"page\"><main class=\"container\"><div class=\"card\">{}님, 환영합니다.</div><a class=\"btn\" href=\"{}\">경매 목록</a></main></div>",
            escape_html(&me.nickname),
            AUCTION_LIST_PATH
        ),
        None => format!(
            "<div class=\"page\"><main class=\"container\"><div class=\"card\">로그인이 필요합니다.</div><a class=\"btn\" href=\"{}\">경매 목록</a></main></div>",
            AUCTION_LIST_PATH
        ),
    };
    document("경매", &body)
}

// endregion: --- Home

// region:    --- Auction Detail
/// 경매 상세 화면
/// 로딩, 오류, 비어 있음, 로드됨 순서로 하나만 그린다.
pub fn render_detail_page(
    page: &AuctionDetailPage,
    viewer_id: Option<i64>,
    api: &ApiClient,
) -> String {
    let body = match page.view() {
        DetailView::Loading => "<div class=\"card\"><div class=\"skeleton\" style=\"width: 60%\"></div><div class=\"skeleton\" style=\"width: 90%; margin-top: 12px\"></div></div>".to_string(),
        DetailView::Error(e) => format!(
            "<div class=\"card\"><div class=\"error\">{}</div><div class=\"actions\" style=\"margin-top: 16px\"><a class=\"btn btn-ghost\" href=\"{}\">목록으로 이동</a></div></div>",
            escape_html(&e.to_string()),
            AUCTION_LIST_PATH
        ),
        DetailView::Empty => "<div class=\"empty\">경매 정보를 찾을 수 없습니다.</div>".to_string(),
        DetailView::Loaded(auction) => render_loaded(
            auction,
            page.bid_amount().value(),
            is_seller(viewer_id, auction),
            api,
        ),
    };
    let title = match page.view() {
        DetailView::Loaded(auction) => auction.name.clone(),
        _ => "경매 상세".to_string(),
    };
    document(&title, &body)
}

fn render_loaded(auction: &AuctionDetail, bid_amount: &str, seller: bool, api: &ApiClient) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"page\"><section class=\"grid-2\">");

    // 이미지
    html.push_str("<div class=\"card\"><h2 style=\"margin-top: 0\">이미지</h2>");
    if auction.image_urls.is_empty() {
        html.push_str("<div class=\"empty\">등록된 이미지가 없습니다.</div>");
    } else {
        html.push_str("<div class=\"grid-2\">");
        for (index, url) in auction.image_urls.iter().enumerate() {
            let _ = write!(
                html,
                "<div class=\"panel\"><img alt=\"경매 이미지 {}\" src=\"{}\" style=\"width: 100%; border-radius: 12px\"></div>",
                index + 1,
                escape_html(&resolve_image_url(api, url))
            );
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");

    // 상세 정보
    let _ = write!(
        html,
        "<div class=\"card\"><div class=\"tag\">{}</div><h1 style=\"margin-top: 8px\">{}</h1><p>{}</p>",
        escape_html(&auction.status),
        escape_html(&auction.name),
        escape_html(&auction.description)
    );
    let _ = write!(
        html,
        "<div class=\"muted\">시작가 {}원 · 현재가 {}원</div>",
        format_number(auction.start_price),
        format_number(auction.current_highest_bid)
    );
    if auction.buy_now_price.is_some() {
        let _ = write!(
            html,
            "<div class=\"muted\">즉시구매 {}원</div>",
            format_number(auction.buy_now_price)
        );
    }
    let _ = write!(
        html,
        "<div class=\"muted\">입찰 {}회 · 시작 {} · 종료 {}</div>",
        auction.bid_count,
        escape_html(&auction.start_at),
        escape_html(&auction.end_at)
    );

    // 판매자 본인에게는 입찰 폼을 숨긴다.
    // 입찰 버튼에는 아직 연결된 동작이 없다.
    if !seller {
        let _ = write!(
            html,
            "<div class=\"panel\" style=\"margin-top: 16px\"><div class=\"field\"><label class=\"label\" for=\"bidAmount\">입찰가</label><input id=\"bidAmount\" class=\"input\" type=\"number\" min=\"0\" step=\"1000\" value=\"{}\"></div><div class=\"actions\" style=\"margin-top: 12px\"><button class=\"btn btn-primary\" type=\"button\">입찰하기</button></div></div>",
            escape_html(bid_amount)
        );
    }

    if let Some(category) = auction.category_name.as_deref().filter(|c| !c.is_empty()) {
        let _ = write!(
            html,
            "<div class=\"tag\" style=\"margin-top: 8px\">{}</div>",
            escape_html(category)
        );
    }
    let _ = write!(
        html,
        "<div style=\"margin-top: 16px\">판매자: <strong>{}</strong> (평판 {})</div>",
        escape_html(&auction.seller.nickname),
        auction.seller.reputation_score
    );
    let status_text = if auction.is_open() {
        "진행 중인 경매입니다. 새로고침으로 최신 상태를 확인하세요."
    } else {
        "종료된 경매입니다."
    };
    let _ = write!(
        html,
        "<div class=\"panel\" style=\"margin-top: 16px\">{}</div>",
        status_text
    );

    html.push_str("</div></section></div>");
    html
}

// endregion: --- Auction Detail

// region:    --- OAuth Callback
/// 콜백 화면, 실패하면 오류 메시지를 함께 보여준다.
pub fn render_callback_page(state: &BootstrapState) -> String {
    let mut body = String::from(
        "<div class=\"page\"><main class=\"container\"><div class=\"panel\"><div class=\"skeleton\" style=\"width: 40%\"></div><div class=\"skeleton\" style=\"width: 70%; margin-top: 12px\"></div>",
    );
    if let Some(message) = state.error_message() {
        let _ = write!(
            body,
            "<div style=\"margin-top: 16px\"><div class=\"error\">{}</div></div>",
            escape_html(message)
        );
    }
    body.push_str("</div></main></div>");
    document("로그인", &body)
}

// endregion: --- OAuth Callback
