//! ボディフレーミングの判定
//!
//! RFC 9112 Section 6.3 (旧 RFC 7230 Section 3.3.3) の優先順位に従い、
//! ヘッダー完了時にボディの読み取り方法を 1 つ選ぶ。
//! 判定の順序そのものが曖昧なフレーミングの悪用 (リクエストスマグリング) を防ぐため、
//! 順序を入れ替えてはならない。

use crate::flags::Flags;
use crate::log::{debug, warning};
use crate::message::{MessageKind, MessageState};

/// ボディの読み取り方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyFraming {
    /// ボディなし、メッセージはここで完了
    NoBody,
    /// 以降のバイト列は別プロトコル (Upgrade / CONNECT トンネル)
    ///
    /// メッセージはここで完了し、呼び出し側は以降のバイト列を HTTP として解釈してはならない。
    UpgradeHandoff,
    /// Transfer-Encoding: chunked
    ///
    /// Content-Length があっても無視する。
    Chunked,
    /// Content-Length で指定された固定長
    ContentLength(u64),
    /// 接続が閉じるまでがボディ (close-delimited)
    UntilEof,
    /// chunked で終わらない Transfer-Encoding を持つリクエスト
    ///
    /// RFC 9112 Section 6.3: ボディ長を確定できないため、
    /// 呼び出し側は 400 (Bad Request) を返して接続を閉じなければならない。
    InvalidTransferEncoding,
}

impl BodyFraming {
    /// 文法層に渡す数値コード
    ///
    /// - 0: ボディなし
    /// - 1: プロトコル切り替え (一時停止)
    /// - 2: chunked
    /// - 3: Content-Length
    /// - 4: close-delimited
    /// - 5: 不正な Transfer-Encoding
    pub fn code(&self) -> u8 {
        match self {
            BodyFraming::NoBody => 0,
            BodyFraming::UpgradeHandoff => 1,
            BodyFraming::Chunked => 2,
            BodyFraming::ContentLength(_) => 3,
            BodyFraming::UntilEof => 4,
            BodyFraming::InvalidTransferEncoding => 5,
        }
    }

    /// 呼び出し側がボディを読む必要があるか
    pub fn has_body(&self) -> bool {
        matches!(
            self,
            BodyFraming::Chunked | BodyFraming::ContentLength(_) | BodyFraming::UntilEof
        )
    }

    /// 呼び出し側がこの接続での HTTP 解析を止める必要があるか
    pub fn is_pause(&self) -> bool {
        matches!(
            self,
            BodyFraming::UpgradeHandoff | BodyFraming::InvalidTransferEncoding
        )
    }
}

impl MessageState {
    /// ボディの読み取り方法を決定する
    ///
    /// [`before_headers_complete`](Self::before_headers_complete) の直後に呼び出すこと。
    /// 結果はメッセージ完了まで保持される。
    pub fn after_headers_complete(&mut self) -> BodyFraming {
        let framing = self.resolve_framing();
        match framing {
            BodyFraming::InvalidTransferEncoding => {
                warning!("request with non-chunked final Transfer-Encoding rejected");
            }
            _ => {
                debug!("body framing resolved: {:?}", framing);
            }
        }
        self.framing = Some(framing);
        framing
    }

    /// プロトコル切り替えとボディフレーミングを順に判定する
    pub fn on_headers_complete(&mut self) -> BodyFraming {
        self.before_headers_complete();
        self.after_headers_complete()
    }

    fn resolve_framing(&self) -> BodyFraming {
        let flags = self.flags;
        let has_body = flags.contains(Flags::CHUNKED) || self.content_length.is_some_and(|n| n > 0);

        if self.upgrade
            && (flags.intersects(Flags::METHOD_IS_CONNECT | Flags::SKIP_BODY) || !has_body)
        {
            return BodyFraming::UpgradeHandoff;
        }

        if flags.contains(Flags::SKIP_BODY) {
            BodyFraming::NoBody
        } else if flags.contains(Flags::CHUNKED) {
            BodyFraming::Chunked
        } else if flags.contains(Flags::TRANSFER_ENCODING_PRESENT) {
            if self.kind == MessageKind::Request && !flags.contains(Flags::LENIENT) {
                BodyFraming::InvalidTransferEncoding
            } else if self.status_forbids_body() {
                // 1xx / 204 / 304 は close-delimited にしない
                BodyFraming::NoBody
            } else {
                BodyFraming::UntilEof
            }
        } else if !flags.contains(Flags::CONTENT_LENGTH_PRESENT) {
            if self.message_needs_eof() {
                BodyFraming::UntilEof
            } else {
                BodyFraming::NoBody
            }
        } else {
            match self.content_length {
                Some(0) | None => BodyFraming::NoBody,
                Some(len) => BodyFraming::ContentLength(len),
            }
        }
    }

    /// RFC 9112 Section 6.3: 1xx / 204 / 304 レスポンスはヘッダーに関係なくボディを持たない
    fn status_forbids_body(&self) -> bool {
        self.kind != MessageKind::Request
            && (self.status_code / 100 == 1 || self.status_code == 204 || self.status_code == 304)
    }

    /// ボディが接続終了で区切られるか
    ///
    /// リクエストは常に false。
    /// レスポンスでは 1xx / 204 / 304 / HEAD へのレスポンスは false、
    /// chunked で終わらない Transfer-Encoding は true、
    /// chunked か Content-Length があれば false、どちらもなければ true。
    pub fn message_needs_eof(&self) -> bool {
        if self.kind == MessageKind::Request {
            return false;
        }

        let flags = self.flags;
        if self.status_forbids_body() || flags.contains(Flags::SKIP_BODY) {
            return false;
        }

        if flags.contains(Flags::TRANSFER_ENCODING_PRESENT) && !flags.contains(Flags::CHUNKED) {
            return true;
        }

        !flags.intersects(Flags::CHUNKED | Flags::CONTENT_LENGTH_PRESENT)
    }
}
