#[path = "../common/mod.rs"]
mod common;

use bpoller::buffer::FrameBuffer;
use bpoller::iso14443_3b::{config as config_3b, Iso14443_3bError, Iso14443_3bTransceiver};
use bpoller::iso14443_4b::{config, Iso14443_4bPoller, Iso14443_4bPollerEvent};
use bpoller::poller::{run_until_stop, Poller};
use bpoller::protocol::crc::with_crc_b;
use bpoller::transceiver::MockTransceiver;
use bpoller::{Command, NfcError, NfcEvent};

use common::{fixtures, helpers};

#[test]
fn detect_read_ats_and_exchange_over_crc_frames() {
    helpers::init_logger();
    let mut mock = MockTransceiver::new();
    helpers::queue_iso14443_3b_select(&mut mock);
    mock.push_response_with_crc(&fixtures::ats_payload());
    mock.push_response_with_crc(&fixtures::i_block(1, &[0x90, 0x00]));

    let mut poller = Iso14443_4bPoller::new(helpers::iso14443_3b_over_mock(mock));
    assert!(poller.detect(NfcEvent::PollerReady));
    poller.request_ats().unwrap();

    poller.set_callback(|ev| {
        assert_eq!(ev.event, Iso14443_4bPollerEvent::Ready);
        let mut rx = FrameBuffer::new(16);
        ev.instance.send_block(&[0x00, 0xA4], &mut rx, 4096).unwrap();
        assert_eq!(rx.as_slice(), &[0x90, 0x00]);
        Command::Stop
    });
    assert_eq!(run_until_stop(&mut poller, 5), 1);

    let mock = poller.into_inner().into_inner();
    assert_eq!(mock.sent[0], with_crc_b(config_3b::WUPB));
    assert_eq!(
        mock.sent[1],
        with_crc_b(&[0x1D, 0x11, 0x22, 0x33, 0x44, 0x00, 0x08, 0x01, 0x00])
    );
    assert_eq!(mock.sent[2], with_crc_b(config::RATS));
    assert_eq!(mock.sent[3], with_crc_b(&[0x02, 0x00, 0xA4]));
    assert_eq!(mock.fwts[2], config::ATS_FWT_FC);
    assert_eq!(mock.timing(), Some(config_3b::TIMING));
}

#[test]
fn corrupted_crc_surfaces_as_crc_error() {
    let mut mock = MockTransceiver::new();
    helpers::queue_iso14443_3b_select(&mut mock);
    let mut ats = with_crc_b(&fixtures::ats_payload());
    let last = ats.len() - 1;
    ats[last] ^= 0xFF;
    mock.push_response(ats);

    let mut lower = helpers::iso14443_3b_over_mock(mock);
    lower.select(None).unwrap();
    let mut poller = Iso14443_4bPoller::new(lower);
    let events = helpers::record_events(&mut poller);

    poller.request_ats().unwrap();
    poller.run(NfcEvent::PollerReady);
    assert_eq!(
        *events.borrow(),
        vec![Iso14443_4bPollerEvent::Error(
            bpoller::iso14443_4b::Iso14443_4bError::Crc
        )]
    );
}

#[test]
fn detect_fails_without_card() {
    let mut poller = Iso14443_4bPoller::new(helpers::iso14443_3b_over_mock(MockTransceiver::new()));
    assert!(!poller.detect(NfcEvent::PollerReady));
    assert!(poller.data().is_none());
}

#[test]
fn halt_sends_hltb() {
    let mut mock = MockTransceiver::new();
    helpers::queue_iso14443_3b_select(&mut mock);
    mock.push_error(NfcError::Timeout);
    let mut lower = helpers::iso14443_3b_over_mock(mock);
    lower.select(None).unwrap();
    assert_eq!(lower.halt(), Err(Iso14443_3bError::Timeout));
    assert_eq!(
        lower.transceiver().sent[2],
        with_crc_b(&[0x50, 0x11, 0x22, 0x33, 0x44])
    );
}
