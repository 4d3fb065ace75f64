use crate::message::MessageKind;

/// パーサーの接続単位の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserSettings {
    /// 解析するメッセージの種類 (デフォルト: Either)
    pub kind: MessageKind,
    /// 寛容モード (デフォルト: false)
    ///
    /// 有効にすると、chunked で終わらない Transfer-Encoding を持つリクエストを
    /// 拒否せず、接続が閉じるまでをボディとして扱う。
    pub lenient: bool,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            kind: MessageKind::Either,
            lenient: false,
        }
    }
}

impl ParserSettings {
    /// リクエスト専用の設定を作成
    pub fn request() -> Self {
        Self {
            kind: MessageKind::Request,
            ..Self::default()
        }
    }

    /// レスポンス専用の設定を作成
    pub fn response() -> Self {
        Self {
            kind: MessageKind::Response,
            ..Self::default()
        }
    }

    /// 寛容モードを設定
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }
}
