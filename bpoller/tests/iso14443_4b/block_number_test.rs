#[path = "../common/mod.rs"]
mod common;

use bpoller::buffer::FrameBuffer;
use bpoller::iso14443_4b::Iso14443_4bPoller;
use bpoller::test_support::ScriptedIso14443_3b;
use proptest::prelude::*;

use common::fixtures;

proptest! {
    #[test]
    fn block_number_tracks_successful_exchanges(n in 0usize..24) {
        let mut lower = ScriptedIso14443_3b::selected(fixtures::sample_iso14443_3b_data());
        lower.push_response(fixtures::ats_payload());
        for i in 0..n {
            lower.push_response(fixtures::i_block(((i + 1) % 2) as u8, &[i as u8]));
        }
        let mut poller = Iso14443_4bPoller::new(lower);
        poller.read_ats().unwrap();

        let mut rx = FrameBuffer::new(8);
        for i in 0..n {
            prop_assert_eq!(poller.block_number(), (i % 2) as u8);
            poller.send_block(&[0xAB], &mut rx, 4096).unwrap();
            prop_assert_eq!(rx.as_slice(), &[i as u8]);
        }
        prop_assert_eq!(poller.block_number(), (n % 2) as u8);
    }
}
