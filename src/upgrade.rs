//! プロトコル切り替えの判定
//!
//! ヘッダー完了時、ボディフレーミングを決める前に 1 度だけ呼び出す。
//! ヘッダー完了を観測する側が確定済みの [`MessageState::upgrade`] を参照できるようにするため。

use crate::flags::Flags;
use crate::message::{MessageKind, MessageState};

impl MessageState {
    /// プロトコル切り替えが発生するかを確定する
    ///
    /// - Upgrade ヘッダーと `Connection: upgrade` が両方ある場合、
    ///   リクエストなら常に切り替え、レスポンスなら 101 Switching Protocols のときだけ切り替える。
    ///   101 以外のレスポンスでは対応プロトコルの告知にすぎない。
    /// - それ以外は CONNECT リクエストのときだけ切り替える。
    ///
    /// 確定した値を返す。
    pub fn before_headers_complete(&mut self) -> bool {
        self.upgrade = if self
            .flags
            .contains(Flags::UPGRADE_PRESENT | Flags::CONNECTION_UPGRADE)
        {
            self.kind == MessageKind::Request || self.status_code == 101
        } else {
            self.flags.contains(Flags::METHOD_IS_CONNECT)
        };
        self.upgrade
    }
}
