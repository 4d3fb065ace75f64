//! 接続の持続判定とメッセージ完了処理

use crate::error::Error;
use crate::flags::Flags;
use crate::framing::BodyFraming;
use crate::log::{debug, warning};
use crate::message::{EofOutcome, FinishState, MessageState};

impl MessageState {
    /// 現在のメッセージの後も接続を維持できるか
    ///
    /// HTTP/1.1 以降は `Connection: close` がなければ維持、
    /// HTTP/1.0 以前は `Connection: keep-alive` があるときだけ維持する。
    /// ただしボディが接続終了で区切られる場合は常に維持できない。
    pub fn should_keep_alive(&self) -> bool {
        let candidate = if self.http_major > 0 && self.http_minor > 0 {
            !self.flags.contains(Flags::CONNECTION_CLOSE)
        } else {
            self.flags.contains(Flags::CONNECTION_KEEP_ALIVE)
        };
        candidate && !self.message_needs_eof()
    }

    /// メッセージ完了
    ///
    /// キープアライブ判定を返し、次のメッセージのために状態をリセットする。
    /// `LENIENT` 以外のフラグ、Content-Length、upgrade、保留中のトークンはすべてクリアされる。
    /// 戻り値が false の場合、呼び出し側は送信済みデータをフラッシュした後に接続を閉じること。
    pub fn after_message_complete(&mut self) -> bool {
        let keep_alive = self.should_keep_alive();
        self.finish_state = FinishState::Safe;
        self.clear_message();
        debug!("message complete: keep_alive={}", keep_alive);
        keep_alive
    }

    /// 接続が閉じられたことを通知する
    ///
    /// メッセージ境界であれば [`EofOutcome::Clean`]、
    /// close-delimited ボディの読み取り中であればメッセージを完了させる。
    /// それ以外の状態で閉じられた場合はメッセージが途切れているためエラー。
    pub fn on_eof(&mut self) -> Result<EofOutcome, Error> {
        match (self.finish_state, self.framing) {
            (FinishState::Safe, _) => Ok(EofOutcome::Clean),
            (FinishState::Incomplete, Some(BodyFraming::UntilEof)) => {
                let keep_alive = self.after_message_complete();
                Ok(EofOutcome::MessageComplete { keep_alive })
            }
            (FinishState::Incomplete, _) => {
                warning!("connection closed mid-message: framing={:?}", self.framing);
                Err(Error::InvalidEofState)
            }
        }
    }
}
