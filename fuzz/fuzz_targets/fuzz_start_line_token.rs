#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_http11_framing::{Flags, MessageKind, MessageState, StartLineHandler};

#[derive(Arbitrary, Debug)]
struct FuzzToken {
    buf: Vec<u8>,
    first_end: usize,
    token_end: usize,
    is_response: bool,
}

#[derive(Default)]
struct Collect {
    methods: Vec<Vec<u8>>,
    protocols: Vec<Vec<u8>>,
}

impl StartLineHandler for Collect {
    fn on_method(&mut self, method: &[u8]) {
        self.methods.push(method.to_vec());
    }

    fn on_protocol(&mut self, protocol: &[u8]) {
        self.protocols.push(protocol.to_vec());
    }
}

fuzz_target!(|input: FuzzToken| {
    let len = input.buf.len();
    let first_end = input.first_end % (len + 1);
    let token_end = first_end + input.token_end % (len - first_end + 1);

    let mut state = MessageState::new();
    let mut collect = Collect::default();

    state.on_method_or_protocol(&input.buf, 0..first_end, &mut collect);
    assert_eq!(state.pending_token(), Some(0..first_end));

    let kind = if input.is_response {
        MessageKind::Response
    } else {
        MessageKind::Request
    };
    state.resolve_kind(kind, &input.buf, token_end, &mut collect);
    assert_eq!(state.pending_token(), None);

    let token = &input.buf[..token_end];
    if input.is_response {
        assert_eq!(collect.protocols, vec![token.to_vec()]);
        assert!(!state.flags().contains(Flags::METHOD_IS_CONNECT));
    } else {
        assert_eq!(collect.methods, vec![token.to_vec()]);
        assert_eq!(
            state.flags().contains(Flags::METHOD_IS_CONNECT),
            token == b"CONNECT"
        );
    }
});
