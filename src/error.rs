use std::fmt;

/// メッセージ状態の更新エラー
///
/// ボディフレーミングの判定結果 (不正な Transfer-Encoding を含む) はエラーではなく
/// [`BodyFraming`](crate::BodyFraming) として返す。
/// ここに含まれるのはトークナイザーから渡された値そのものが不正な場合のみ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Content-Length の値が数値として解釈できない
    InvalidContentLength(String),
    /// 複数の Content-Length ヘッダーの値が一致しない
    MismatchedContentLength { first: u64, second: u64 },
    /// Transfer-Encoding の値が不正 (空のコーディングを含む)
    InvalidTransferEncoding(String),
    /// HTTP バージョンが不正
    InvalidVersion { major: u8, minor: u8 },
    /// ステータスコードが 3 桁ではない
    InvalidStatusCode(u16),
    /// メッセージの途中で接続が閉じられた
    InvalidEofState,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidContentLength(value) => {
                write!(f, "invalid Content-Length: {:?}", value)
            }
            Error::MismatchedContentLength { first, second } => {
                write!(f, "mismatched Content-Length: {} != {}", first, second)
            }
            Error::InvalidTransferEncoding(value) => {
                write!(f, "invalid Transfer-Encoding: {:?}", value)
            }
            Error::InvalidVersion { major, minor } => {
                write!(f, "invalid HTTP version: {}.{}", major, minor)
            }
            Error::InvalidStatusCode(code) => write!(f, "invalid status code: {}", code),
            Error::InvalidEofState => write!(f, "invalid EOF state"),
        }
    }
}

impl std::error::Error for Error {}
