//! メソッド / プロトコルトークンの解決
//!
//! リレーのように同じバイト列からリクエストとレスポンスのどちらかを自動判別する場合、
//! スタートラインの最初のトークンはメソッドかプロトコル (`HTTP/`) かが文法上まだ決まらない。
//! 種類が未確定の間は最初のトークン範囲を保留し、種類が確定した時点でまとめて渡す。
//!
//! ```rust
//! use shiguredo_http11_framing::{Flags, MessageKind, MessageState, Method};
//!
//! let buf = b"CONNECT example.com:443 HTTP/1.1\r\n";
//! let mut state = MessageState::with_kind(MessageKind::Request);
//! state.on_method_or_protocol(buf, 0..7, &mut ());
//! assert_eq!(state.method(), Some(Method::Connect));
//! assert!(state.flags().contains(Flags::METHOD_IS_CONNECT));
//! ```

use std::ops::Range;

use crate::flags::Flags;
use crate::log::debug;
use crate::message::{MessageKind, MessageState};

/// HTTP メソッド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
    /// 上記以外の拡張メソッド
    Extension,
}

impl Method {
    /// トークンからメソッドを判定 (大文字小文字を区別する)
    pub fn from_token(token: &[u8]) -> Self {
        match token {
            b"GET" => Method::Get,
            b"HEAD" => Method::Head,
            b"POST" => Method::Post,
            b"PUT" => Method::Put,
            b"DELETE" => Method::Delete,
            b"CONNECT" => Method::Connect,
            b"OPTIONS" => Method::Options,
            b"TRACE" => Method::Trace,
            b"PATCH" => Method::Patch,
            _ => Method::Extension,
        }
    }

    /// 標準メソッド名を取得 (拡張メソッドは `None`)
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            Method::Get => Some("GET"),
            Method::Head => Some("HEAD"),
            Method::Post => Some("POST"),
            Method::Put => Some("PUT"),
            Method::Delete => Some("DELETE"),
            Method::Connect => Some("CONNECT"),
            Method::Options => Some("OPTIONS"),
            Method::Trace => Some("TRACE"),
            Method::Patch => Some("PATCH"),
            Method::Extension => None,
        }
    }
}

/// 解決済みトークンの通知先
///
/// どちらもデフォルトでは何もしない。
pub trait StartLineHandler {
    /// リクエストのメソッドトークン
    fn on_method(&mut self, _method: &[u8]) {}

    /// レスポンスのプロトコルトークン
    fn on_protocol(&mut self, _protocol: &[u8]) {}
}

impl StartLineHandler for () {}

impl MessageState {
    /// スタートラインの最初のトークン範囲 `span` を受け取る
    ///
    /// 種類が未確定の場合は最初の範囲だけを保留して戻る。
    /// 種類が確定していれば、保留中の範囲 (なければ `span`) を `handler` に渡す。
    pub fn on_method_or_protocol<H>(&mut self, buf: &[u8], span: Range<usize>, handler: &mut H)
    where
        H: StartLineHandler + ?Sized,
    {
        if self.kind == MessageKind::Either {
            if self.pending_token.is_none() {
                self.pending_token = Some(span);
            }
            return;
        }

        let start = self
            .pending_token
            .take()
            .map_or(span.start, |pending| pending.start);
        self.dispatch_token(buf, start..span.end, handler);
    }

    /// 上流の文法でメッセージの種類が確定したことを通知する
    ///
    /// 種類の遷移は Either からの一方向のみで、確定済みの場合は何もしない。
    /// 保留中のトークンがあれば `buf[pending.start..token_end]` を直ちに渡す。
    pub fn resolve_kind<H>(
        &mut self,
        kind: MessageKind,
        buf: &[u8],
        token_end: usize,
        handler: &mut H,
    ) where
        H: StartLineHandler + ?Sized,
    {
        if self.kind != MessageKind::Either || kind == MessageKind::Either {
            return;
        }
        self.kind = kind;
        debug!("message kind resolved: {:?}", kind);

        if let Some(pending) = self.pending_token.take() {
            self.dispatch_token(buf, pending.start..token_end, handler);
        }
    }

    fn dispatch_token<H>(&mut self, buf: &[u8], range: Range<usize>, handler: &mut H)
    where
        H: StartLineHandler + ?Sized,
    {
        let token = buf.get(range).unwrap_or_default();

        if self.kind == MessageKind::Response {
            handler.on_protocol(token);
            return;
        }

        // 前のメッセージの判定を持ち越さないよう、呼び出しごとに必ず更新する
        let method = Method::from_token(token);
        self.flags
            .set(Flags::METHOD_IS_CONNECT, method == Method::Connect);
        self.method = Some(method);
        handler.on_method(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        methods: Vec<Vec<u8>>,
        protocols: Vec<Vec<u8>>,
    }

    impl StartLineHandler for Recorder {
        fn on_method(&mut self, method: &[u8]) {
            self.methods.push(method.to_vec());
        }

        fn on_protocol(&mut self, protocol: &[u8]) {
            self.protocols.push(protocol.to_vec());
        }
    }

    #[test]
    fn from_token() {
        assert_eq!(Method::from_token(b"GET"), Method::Get);
        assert_eq!(Method::from_token(b"CONNECT"), Method::Connect);
        assert_eq!(Method::from_token(b"connect"), Method::Extension);
        assert_eq!(Method::from_token(b"CONNECTX"), Method::Extension);
        assert_eq!(Method::from_token(b"PROPFIND"), Method::Extension);
        assert_eq!(Method::Connect.as_str(), Some("CONNECT"));
        assert_eq!(Method::Extension.as_str(), None);
    }

    #[test]
    fn request_dispatches_method() {
        let buf = b"GET / HTTP/1.1\r\n";
        let mut state = MessageState::with_kind(MessageKind::Request);
        let mut recorder = Recorder::default();
        state.on_method_or_protocol(buf, 0..3, &mut recorder);
        assert_eq!(recorder.methods, vec![b"GET".to_vec()]);
        assert!(recorder.protocols.is_empty());
        assert_eq!(state.method(), Some(Method::Get));
        assert!(!state.flags().contains(Flags::METHOD_IS_CONNECT));
    }

    #[test]
    fn response_dispatches_protocol() {
        let buf = b"HTTP/1.1 200 OK\r\n";
        let mut state = MessageState::with_kind(MessageKind::Response);
        let mut recorder = Recorder::default();
        state.on_method_or_protocol(buf, 0..4, &mut recorder);
        assert_eq!(recorder.protocols, vec![b"HTTP".to_vec()]);
        assert!(recorder.methods.is_empty());
        assert_eq!(state.method(), None);
    }

    #[test]
    fn either_holds_first_span() {
        let buf = b"CONNECT host:443 HTTP/1.1\r\n";
        let mut state = MessageState::new();
        let mut recorder = Recorder::default();

        state.on_method_or_protocol(buf, 0..4, &mut recorder);
        state.on_method_or_protocol(buf, 4..7, &mut recorder);
        assert_eq!(state.pending_token(), Some(0..4));
        assert!(recorder.methods.is_empty());

        state.resolve_kind(MessageKind::Request, buf, 7, &mut recorder);
        assert_eq!(state.kind(), MessageKind::Request);
        assert_eq!(state.pending_token(), None);
        assert_eq!(recorder.methods, vec![b"CONNECT".to_vec()]);
        assert!(state.flags().contains(Flags::METHOD_IS_CONNECT));
    }

    #[test]
    fn either_resolves_to_response() {
        let buf = b"HTTP/1.1 200 OK\r\n";
        let mut state = MessageState::new();
        let mut recorder = Recorder::default();
        state.on_method_or_protocol(buf, 0..2, &mut recorder);
        state.resolve_kind(MessageKind::Response, buf, 4, &mut recorder);
        assert_eq!(recorder.protocols, vec![b"HTTP".to_vec()]);
        assert!(!state.flags().contains(Flags::METHOD_IS_CONNECT));
    }

    #[test]
    fn resolve_is_one_way() {
        let mut state = MessageState::with_kind(MessageKind::Request);
        state.resolve_kind(MessageKind::Response, b"", 0, &mut ());
        assert_eq!(state.kind(), MessageKind::Request);

        let mut state = MessageState::new();
        state.resolve_kind(MessageKind::Either, b"", 0, &mut ());
        assert_eq!(state.kind(), MessageKind::Either);
    }

    #[test]
    fn connect_flag_cleared_by_next_method() {
        let buf = b"CONNECTGET";
        let mut state = MessageState::with_kind(MessageKind::Request);
        state.on_method_or_protocol(buf, 0..7, &mut ());
        assert!(state.flags().contains(Flags::METHOD_IS_CONNECT));
        state.on_method_or_protocol(buf, 7..10, &mut ());
        assert!(!state.flags().contains(Flags::METHOD_IS_CONNECT));
    }

    #[test]
    fn out_of_range_span_is_empty_token() {
        let mut state = MessageState::with_kind(MessageKind::Request);
        let mut recorder = Recorder::default();
        state.on_method_or_protocol(b"GET", 0..10, &mut recorder);
        assert_eq!(recorder.methods, vec![Vec::new()]);
        assert_eq!(state.method(), Some(Method::Extension));
    }
}
