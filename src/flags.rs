//! メッセージフラグの定義

use bitflags::bitflags;

bitflags! {
    /// ヘッダーから導出されるメッセージ属性
    ///
    /// `LENIENT` 以外はメッセージ完了時にすべてクリアされる。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u16 {
        /// Connection: keep-alive
        const CONNECTION_KEEP_ALIVE = 1 << 0;
        /// Connection: close
        const CONNECTION_CLOSE = 1 << 1;
        /// Connection: upgrade
        const CONNECTION_UPGRADE = 1 << 2;
        /// 最後の転送コーディングが chunked
        const CHUNKED = 1 << 3;
        /// Upgrade ヘッダーあり
        const UPGRADE_PRESENT = 1 << 4;
        /// Content-Length ヘッダーあり (値が 0 でも立つ)
        const CONTENT_LENGTH_PRESENT = 1 << 5;
        /// ボディを読まない (HEAD へのレスポンスなど)
        const SKIP_BODY = 1 << 6;
        /// 寛容モード (接続単位)
        const LENIENT = 1 << 8;
        /// Transfer-Encoding ヘッダーあり
        const TRANSFER_ENCODING_PRESENT = 1 << 9;
        /// メソッドが CONNECT
        const METHOD_IS_CONNECT = 1 << 10;
    }
}

impl Flags {
    /// メッセージをまたいで保持されるフラグ
    pub const CONNECTION_SCOPED: Flags = Flags::LENIENT;
}
