//! Display labels for HTTP status codes.

use std::borrow::Cow;
use std::collections::BTreeMap;

const KOREAN_LABELS: &[(u16, &str)] = &[
    (100, "계속"),
    (101, "프로토콜 전환"),
    (102, "처리 중"),
    (103, "사전 로딩"),
    (200, "성공"),
    (201, "생성됨"),
    (202, "허용됨"),
    (203, "신뢰할 수 없는 정보"),
    (204, "콘텐츠 없음"),
    (205, "콘텐츠 재설정"),
    (206, "부분 콘텐츠"),
    (207, "다중 상태"),
    (208, "이미 보고됨"),
    (226, "IM 사용됨"),
    (300, "다중 선택"),
    (301, "영구 이동"),
    (302, "임시 이동"),
    (303, "기타 위치 보기"),
    (304, "수정되지 않음"),
    (307, "임시 리다이렉션"),
    (308, "영구 리다이렉션"),
    (400, "잘못된 요청"),
    (401, "인증 필요"),
    (402, "결제 필요"),
    (403, "접근 금지"),
    (404, "찾을 수 없음"),
    (405, "허용되지 않는 메소드"),
    (406, "허용되지 않음"),
    (407, "프록시 인증 필요"),
    (408, "요청 시간 초과"),
    (409, "충돌"),
    (410, "사라짐"),
    (411, "길이 필요"),
    (412, "전제 조건 실패"),
    (413, "요청 본문이 너무 큼"),
    (414, "요청 URI가 너무 김"),
    (415, "지원되지 않는 미디어 유형"),
    (416, "처리할 수 없는 요청 범위"),
    (417, "예상 실패"),
    (418, "나는 찻주전자입니다"),
    (421, "잘못된 요청 대상"),
    (422, "처리할 수 없는 엔티티"),
    (423, "잠김"),
    (424, "의존 실패"),
    (425, "너무 이른 요청"),
    (426, "업그레이드 필요"),
    (428, "전제 조건 필요"),
    (429, "너무 많은 요청"),
    (431, "요청 헤더 필드가 너무 큼"),
    (451, "법적 사유로 이용 불가"),
    (500, "내부 서버 오류"),
    (501, "구현되지 않음"),
    (502, "잘못된 게이트웨이"),
    (503, "서비스 이용 불가"),
    (504, "게이트웨이 시간 초과"),
    (505, "지원되지 않는 HTTP 버전"),
    (506, "가변 협상"),
    (507, "저장 공간 부족"),
    (508, "루프 감지됨"),
    (510, "확장되지 않음"),
    (511, "네트워크 인증 필요"),
];

/// Maps HTTP status codes to the message shown to users.
///
/// Codes missing from the table have no label; the client reports them with
/// an empty message instead of inventing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTable(BTreeMap<u16, Cow<'static, str>>);

impl StatusTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The default table, with Korean labels for every registered status code.
    pub fn korean() -> Self {
        Self(
            KOREAN_LABELS
                .iter()
                .map(|&(code, label)| (code, Cow::Borrowed(label)))
                .collect(),
        )
    }

    pub fn with_label(mut self, code: u16, label: impl Into<Cow<'static, str>>) -> Self {
        self.0.insert(code, label.into());
        self
    }

    pub fn label(&self, code: u16) -> Option<&str> {
        self.0.get(&code).map(|label| label.as_ref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
