#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_http11_framing::{
    BodyFraming, EofOutcome, FinishState, Flags, MessageKind, MessageState, ParserSettings,
};

#[derive(Arbitrary, Debug)]
enum Kind {
    Request,
    Response,
}

#[derive(Arbitrary, Debug)]
enum HeaderName {
    Connection,
    ProxyConnection,
    ContentLength,
    TransferEncoding,
    Upgrade,
    Other(String),
}

impl HeaderName {
    fn as_str(&self) -> &str {
        match self {
            HeaderName::Connection => "Connection",
            HeaderName::ProxyConnection => "Proxy-Connection",
            HeaderName::ContentLength => "Content-Length",
            HeaderName::TransferEncoding => "Transfer-Encoding",
            HeaderName::Upgrade => "Upgrade",
            HeaderName::Other(name) => name,
        }
    }
}

#[derive(Arbitrary, Debug)]
struct FuzzMessage {
    method: Vec<u8>,
    connect: bool,
    major: u8,
    minor: u8,
    status_code: u16,
    skip_body: bool,
    headers: Vec<(HeaderName, String)>,
    eof_after_headers: bool,
}

#[derive(Arbitrary, Debug)]
struct FuzzConnection {
    kind: Kind,
    lenient: bool,
    messages: Vec<FuzzMessage>,
}

fuzz_target!(|input: FuzzConnection| {
    let kind = match input.kind {
        Kind::Request => MessageKind::Request,
        Kind::Response => MessageKind::Response,
    };
    let mut state = MessageState::with_settings(ParserSettings {
        kind,
        lenient: input.lenient,
    });

    for message in input.messages.iter().take(16) {
        state.on_message_begin();
        if kind == MessageKind::Request {
            let token: &[u8] = if message.connect {
                b"CONNECT"
            } else {
                &message.method
            };
            state.on_method_or_protocol(token, 0..token.len(), &mut ());
            assert_eq!(
                state.flags().contains(Flags::METHOD_IS_CONNECT),
                token == b"CONNECT"
            );
        }
        let _ = state.set_version(message.major, message.minor);
        if kind == MessageKind::Response {
            let _ = state.set_status_code(message.status_code);
        }
        if message.skip_body {
            state.set_skip_body();
        }
        for (name, value) in message.headers.iter().take(32) {
            let _ = state.on_header(name.as_str(), value);
        }

        let framing = state.on_headers_complete();

        if state.flags().contains(Flags::CHUNKED) {
            assert!(!matches!(framing, BodyFraming::ContentLength(_)));
        }
        if let BodyFraming::ContentLength(len) = framing {
            assert_eq!(state.content_length(), Some(len));
        }
        if kind == MessageKind::Request {
            assert!(!state.message_needs_eof());
        }
        if state.flags().contains(Flags::METHOD_IS_CONNECT) {
            assert_eq!(framing, BodyFraming::UpgradeHandoff);
        }

        if message.eof_after_headers {
            match state.on_eof() {
                Ok(EofOutcome::MessageComplete { keep_alive }) => {
                    assert_eq!(framing, BodyFraming::UntilEof);
                    assert!(!keep_alive || kind == MessageKind::Request);
                }
                Ok(EofOutcome::Clean) => unreachable!("message in progress"),
                Err(_) => assert_ne!(framing, BodyFraming::UntilEof),
            }
            return;
        }

        let keep_alive = state.after_message_complete();
        assert_eq!(state.finish_state(), FinishState::Safe);
        assert_eq!(state.flags() - Flags::LENIENT, Flags::empty());
        assert_eq!(state.flags().contains(Flags::LENIENT), input.lenient);
        assert_eq!(state.content_length(), None);
        assert!(!state.upgrade());
        if framing.is_pause() || !keep_alive {
            return;
        }
    }
});
