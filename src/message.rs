//! メッセージ状態の定義
//!
//! 1 接続につき 1 つの [`MessageState`] を持ち、メッセージごとに論理的にリセットして再利用する。
//! トークナイザーはスタートラインとヘッダーを解釈しながらこの状態を更新し、
//! 決められたチェックポイントで判定処理を呼び出す。

use std::ops::Range;

use crate::error::Error;
use crate::flags::Flags;
use crate::framing::BodyFraming;
use crate::method::Method;
use crate::settings::ParserSettings;

/// メッセージの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// リクエスト
    Request,
    /// レスポンス
    Response,
    /// 未確定 (リクエストとレスポンスの両方を受け付ける)
    Either,
}

/// メッセージ境界の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinishState {
    /// メッセージの途中
    Incomplete,
    /// メッセージ境界 (ここで接続が閉じても安全)
    Safe,
}

/// 接続終了時の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EofOutcome {
    /// メッセージ境界で閉じられた
    Clean,
    /// close-delimited ボディが接続終了により完了した
    MessageComplete { keep_alive: bool },
}

/// メッセージ状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageState {
    settings: ParserSettings,
    pub(crate) kind: MessageKind,
    pub(crate) method: Option<Method>,
    pub(crate) pending_token: Option<Range<usize>>,
    pub(crate) http_major: u8,
    pub(crate) http_minor: u8,
    pub(crate) status_code: u16,
    pub(crate) content_length: Option<u64>,
    pub(crate) flags: Flags,
    pub(crate) upgrade: bool,
    pub(crate) finish_state: FinishState,
    /// 現在のメッセージで選択されたボディフレーミング
    pub(crate) framing: Option<BodyFraming>,
}

impl Default for MessageState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageState {
    /// 種類未確定の状態を作成
    pub fn new() -> Self {
        Self::with_settings(ParserSettings::default())
    }

    /// 種類を指定して作成
    pub fn with_kind(kind: MessageKind) -> Self {
        Self::with_settings(ParserSettings {
            kind,
            ..ParserSettings::default()
        })
    }

    /// 設定を指定して作成
    pub fn with_settings(settings: ParserSettings) -> Self {
        let flags = if settings.lenient {
            Flags::LENIENT
        } else {
            Flags::empty()
        };
        Self {
            kind: settings.kind,
            settings,
            method: None,
            pending_token: None,
            http_major: 0,
            http_minor: 0,
            status_code: 0,
            content_length: None,
            flags,
            upgrade: false,
            finish_state: FinishState::Safe,
            framing: None,
        }
    }

    /// 作成時の設定
    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    /// 作成直後の状態に戻す
    pub fn reset(&mut self) {
        *self = Self::with_settings(self.settings.clone());
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// 解決済みのリクエストメソッド
    pub fn method(&self) -> Option<Method> {
        self.method
    }

    /// 種類未確定のまま保留しているトークンの範囲
    pub fn pending_token(&self) -> Option<Range<usize>> {
        self.pending_token.clone()
    }

    pub fn http_major(&self) -> u8 {
        self.http_major
    }

    pub fn http_minor(&self) -> u8 {
        self.http_minor
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Content-Length の値 (ヘッダーがなければ `None`)
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// プロトコル切り替えが発生するか
    ///
    /// ヘッダー完了時に [`before_headers_complete`](Self::before_headers_complete) で確定する。
    pub fn upgrade(&self) -> bool {
        self.upgrade
    }

    pub fn finish_state(&self) -> FinishState {
        self.finish_state
    }

    /// 現在のメッセージで選択されたボディフレーミング
    pub fn framing(&self) -> Option<BodyFraming> {
        self.framing
    }

    /// フラグを立てる
    ///
    /// `CONTENT_LENGTH_PRESENT` は無視される。
    /// 値と一緒に [`set_content_length`](Self::set_content_length) で立てること。
    pub fn insert_flags(&mut self, flags: Flags) {
        self.flags.insert(flags - Flags::CONTENT_LENGTH_PRESENT);
    }

    /// フラグを下ろす
    ///
    /// `CONTENT_LENGTH_PRESENT` は無視される。メッセージ完了時に値と一緒に下りる。
    pub fn remove_flags(&mut self, flags: Flags) {
        self.flags.remove(flags - Flags::CONTENT_LENGTH_PRESENT);
    }

    /// 寛容モードを切り替える (接続単位で保持される)
    pub fn set_lenient(&mut self, lenient: bool) {
        self.flags.set(Flags::LENIENT, lenient);
    }

    /// ボディを読まないことを指定 (HEAD リクエストへのレスポンスなど)
    pub fn set_skip_body(&mut self) {
        self.flags.insert(Flags::SKIP_BODY);
    }

    /// HTTP バージョンを設定
    pub fn set_version(&mut self, major: u8, minor: u8) -> Result<(), Error> {
        if major > 9 || minor > 9 {
            return Err(Error::InvalidVersion { major, minor });
        }
        self.http_major = major;
        self.http_minor = minor;
        Ok(())
    }

    /// ステータスコードを設定
    pub fn set_status_code(&mut self, status_code: u16) -> Result<(), Error> {
        if !(100..=999).contains(&status_code) {
            return Err(Error::InvalidStatusCode(status_code));
        }
        self.status_code = status_code;
        Ok(())
    }

    /// Content-Length を設定
    ///
    /// 値と `CONTENT_LENGTH_PRESENT` フラグは常に一緒に更新する。
    pub fn set_content_length(&mut self, content_length: u64) {
        self.content_length = Some(content_length);
        self.flags.insert(Flags::CONTENT_LENGTH_PRESENT);
    }

    /// メッセージ開始
    pub fn on_message_begin(&mut self) {
        self.finish_state = FinishState::Incomplete;
    }

    /// メッセージ単位の状態をクリア
    pub(crate) fn clear_message(&mut self) {
        self.flags &= Flags::CONNECTION_SCOPED;
        self.content_length = None;
        self.upgrade = false;
        self.pending_token = None;
        self.method = None;
        self.framing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state() {
        let state = MessageState::new();
        assert_eq!(state.kind(), MessageKind::Either);
        assert_eq!(state.finish_state(), FinishState::Safe);
        assert_eq!(state.content_length(), None);
        assert!(state.flags().is_empty());
        assert!(!state.upgrade());
    }

    #[test]
    fn lenient_settings() {
        let state = MessageState::with_settings(ParserSettings::request().lenient(true));
        assert_eq!(state.kind(), MessageKind::Request);
        assert!(state.flags().contains(Flags::LENIENT));
    }

    fn content_length_consistent(state: &MessageState) -> bool {
        state.flags().contains(Flags::CONTENT_LENGTH_PRESENT) == state.content_length().is_some()
    }

    #[test]
    fn flag_setters_keep_content_length_consistent() {
        let mut state = MessageState::with_kind(MessageKind::Response);
        state.insert_flags(Flags::CONTENT_LENGTH_PRESENT | Flags::CHUNKED);
        assert!(content_length_consistent(&state));
        assert!(state.flags().contains(Flags::CHUNKED));

        state.set_content_length(5);
        assert!(content_length_consistent(&state));

        state.remove_flags(Flags::all());
        assert!(content_length_consistent(&state));
        assert_eq!(state.flags(), Flags::CONTENT_LENGTH_PRESENT);
        assert_eq!(state.content_length(), Some(5));

        state.set_version(1, 1).unwrap();
        state.set_status_code(200).unwrap();
        assert_eq!(
            state.on_headers_complete(),
            BodyFraming::ContentLength(5)
        );

        state.after_message_complete();
        assert!(content_length_consistent(&state));
        assert_eq!(state.content_length(), None);
    }

    #[test]
    fn reset_keeps_settings() {
        let settings = ParserSettings::response().lenient(true);
        let mut state = MessageState::with_settings(settings.clone());
        state.set_lenient(false);
        state.set_skip_body();
        state.reset();
        assert_eq!(state.settings(), &settings);
        assert_eq!(state.kind(), MessageKind::Response);
        assert_eq!(state.flags(), Flags::LENIENT);
    }

    #[test]
    fn content_length_zero_is_present() {
        let mut state = MessageState::with_kind(MessageKind::Response);
        state.set_content_length(0);
        assert_eq!(state.content_length(), Some(0));
        assert!(state.flags().contains(Flags::CONTENT_LENGTH_PRESENT));
    }

    #[test]
    fn invalid_version() {
        let mut state = MessageState::new();
        assert_eq!(
            state.set_version(1, 10),
            Err(Error::InvalidVersion {
                major: 1,
                minor: 10
            })
        );
        assert!(state.set_version(1, 1).is_ok());
        assert_eq!((state.http_major(), state.http_minor()), (1, 1));
    }

    #[test]
    fn invalid_status_code() {
        let mut state = MessageState::new();
        assert_eq!(
            state.set_status_code(99),
            Err(Error::InvalidStatusCode(99))
        );
        assert_eq!(
            state.set_status_code(1000),
            Err(Error::InvalidStatusCode(1000))
        );
        assert!(state.set_status_code(204).is_ok());
        assert_eq!(state.status_code(), 204);
    }

    #[test]
    fn reset_restores_settings() {
        let mut state = MessageState::with_settings(ParserSettings::default().lenient(true));
        state.set_lenient(false);
        state.set_content_length(10);
        state.on_message_begin();
        state.reset();
        assert_eq!(state, MessageState::with_settings(ParserSettings::default().lenient(true)));
    }
}
