//! PBT テスト共通ユーティリティ

use proptest::prelude::*;
use shiguredo_http11_framing::{Flags, MessageKind, MessageState, ParserSettings};

// ========================================
// フラグ生成
// ========================================

/// LENIENT を含む任意のフラグ組み合わせ
pub fn flags() -> impl Strategy<Value = Flags> {
    any::<u16>().prop_map(Flags::from_bits_truncate)
}

/// 確定済みのメッセージ種類
pub fn resolved_kind() -> impl Strategy<Value = MessageKind> {
    prop_oneof![Just(MessageKind::Request), Just(MessageKind::Response)]
}

/// ステータスコード (1xx / 204 / 304 を多めに含める)
pub fn status_code() -> impl Strategy<Value = u16> {
    prop_oneof![
        100u16..=199,
        Just(204u16),
        Just(304u16),
        200u16..=599,
    ]
}

/// HTTP バージョン
pub fn version() -> impl Strategy<Value = (u8, u8)> {
    prop_oneof![Just((1u8, 1u8)), Just((1, 0)), Just((0, 9)), (0u8..=9, 0u8..=9)]
}

// ========================================
// メッセージ状態生成
// ========================================

/// ヘッダー完了直前の任意のメッセージ状態
///
/// Content-Length の値と `CONTENT_LENGTH_PRESENT` は常に一致させる。
pub fn message_state() -> impl Strategy<Value = MessageState> {
    (
        resolved_kind(),
        flags(),
        version(),
        status_code(),
        proptest::option::of(prop_oneof![Just(0u64), any::<u64>()]),
    )
        .prop_map(|(kind, flags, (major, minor), status_code, content_length)| {
            build_state(kind, flags, major, minor, status_code, content_length)
        })
}

/// 指定した値からメッセージ状態を組み立てる
pub fn build_state(
    kind: MessageKind,
    flags: Flags,
    major: u8,
    minor: u8,
    status_code: u16,
    content_length: Option<u64>,
) -> MessageState {
    let settings = ParserSettings {
        kind,
        lenient: flags.contains(Flags::LENIENT),
    };
    let mut state = MessageState::with_settings(settings);
    state.insert_flags(flags - Flags::CONTENT_LENGTH_PRESENT);
    state.set_version(major, minor).unwrap();
    if kind == MessageKind::Response {
        state.set_status_code(status_code).unwrap();
    }
    if let Some(len) = content_length {
        state.set_content_length(len);
    }
    state.on_message_begin();
    state
}
