//! フレーミングに関係するヘッダーの記録
//!
//! トークナイザーが切り出したヘッダー名と値を受け取り、判定に必要なフラグと
//! Content-Length だけを [`MessageState`] に反映する。
//! 名前は ASCII の大文字小文字を区別せずに比較する。

use crate::error::Error;
use crate::flags::Flags;
use crate::message::MessageState;

/// 判定に関係するヘッダーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecialHeader {
    Connection,
    ContentLength,
    TransferEncoding,
    Upgrade,
}

impl SpecialHeader {
    fn classify(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("connection") || name.eq_ignore_ascii_case("proxy-connection")
        {
            Some(SpecialHeader::Connection)
        } else if name.eq_ignore_ascii_case("content-length") {
            Some(SpecialHeader::ContentLength)
        } else if name.eq_ignore_ascii_case("transfer-encoding") {
            Some(SpecialHeader::TransferEncoding)
        } else if name.eq_ignore_ascii_case("upgrade") {
            Some(SpecialHeader::Upgrade)
        } else {
            None
        }
    }
}

impl MessageState {
    /// ヘッダーを 1 つ記録する
    ///
    /// 判定に関係しないヘッダーは無視する。
    pub fn on_header(&mut self, name: &str, value: &str) -> Result<(), Error> {
        match SpecialHeader::classify(name) {
            Some(SpecialHeader::Connection) => {
                self.record_connection(value);
                Ok(())
            }
            Some(SpecialHeader::ContentLength) => self.record_content_length(value),
            Some(SpecialHeader::TransferEncoding) => self.record_transfer_encoding(value),
            Some(SpecialHeader::Upgrade) => {
                self.flags.insert(Flags::UPGRADE_PRESENT);
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn record_connection(&mut self, value: &str) {
        for token in value.split(',') {
            let token = token.trim();
            if token.eq_ignore_ascii_case("close") {
                self.flags.insert(Flags::CONNECTION_CLOSE);
            } else if token.eq_ignore_ascii_case("keep-alive") {
                self.flags.insert(Flags::CONNECTION_KEEP_ALIVE);
            } else if token.eq_ignore_ascii_case("upgrade") {
                self.flags.insert(Flags::CONNECTION_UPGRADE);
            }
        }
    }

    fn record_content_length(&mut self, value: &str) -> Result<(), Error> {
        let parsed = parse_content_length_value(value)?;

        // RFC 9110 Section 8.6: 同じ値の繰り返しは許容する
        if let Some(first) = self.content_length {
            if first != parsed {
                return Err(Error::MismatchedContentLength {
                    first,
                    second: parsed,
                });
            }
        }

        self.set_content_length(parsed);
        Ok(())
    }

    fn record_transfer_encoding(&mut self, value: &str) -> Result<(), Error> {
        let mut last = None;
        for coding in value.split(',') {
            let coding = coding.trim();
            if coding.is_empty() {
                return Err(Error::InvalidTransferEncoding(value.to_string()));
            }
            last = Some(coding);
        }

        self.flags.insert(Flags::TRANSFER_ENCODING_PRESENT);

        // 最後のコーディングだけが chunked かどうかを決める
        let chunked = last.is_some_and(|coding| coding.eq_ignore_ascii_case("chunked"));
        self.flags.set(Flags::CHUNKED, chunked);
        Ok(())
    }
}

/// Content-Length 値をパース
fn parse_content_length_value(input: &str) -> Result<u64, Error> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidContentLength(input.to_string()));
    }
    trimmed
        .parse::<u64>()
        .map_err(|_| Error::InvalidContentLength(input.to_string()))
}
