//! # shiguredo_http11_framing
//!
//! HTTP/1.x メッセージのフレーミング判定ライブラリ (Sans I/O)
//!
//! バイト列のトークナイズは行わず、トークナイザーが切り出したスタートラインとヘッダーから
//! 次の 3 つを判定する。
//!
//! - メッセージボディの区切り方 (Content-Length / chunked / 接続終了 / なし)
//! - 別プロトコルへの切り替え (Upgrade / CONNECT トンネル)
//! - メッセージ完了後に接続を維持できるか
//!
//! ## 特徴
//!
//! - **Sans I/O**: ソケットもタイマーも持たない
//! - **判定順序の固定**: chunked は常に Content-Length より優先し、
//!   曖昧な Transfer-Encoding を持つリクエストは拒否する
//! - **パイプライン対応**: 1 接続 1 状態をメッセージごとにリセットして再利用する
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_http11_framing::{BodyFraming, MessageKind, MessageState};
//!
//! let buf = b"POST /upload HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
//!
//! let mut state = MessageState::with_kind(MessageKind::Request);
//! state.on_message_begin();
//! state.on_method_or_protocol(buf, 0..4, &mut ());
//! state.set_version(1, 1).unwrap();
//! state.on_header("Content-Length", "5").unwrap();
//!
//! // ヘッダー完了
//! state.before_headers_complete();
//! assert_eq!(state.after_headers_complete(), BodyFraming::ContentLength(5));
//!
//! // 5 バイト読み終えたらメッセージ完了
//! let keep_alive = state.after_message_complete();
//! assert!(keep_alive);
//! ```

mod error;
mod flags;
mod framing;
mod header;
mod keep_alive;
mod log;
mod message;
mod method;
mod settings;
mod upgrade;

pub use error::Error;
pub use flags::Flags;
pub use framing::BodyFraming;
pub use message::{EofOutcome, FinishState, MessageKind, MessageState};
pub use method::{Method, StartLineHandler};
pub use settings::ParserSettings;
