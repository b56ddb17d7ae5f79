#[path = "../common/mod.rs"]
mod common;

use bpoller::poller::{run_until_stop, Poller};
use bpoller::protocol::crc::with_crc_b;
use bpoller::st25tb::{St25tbError, St25tbPollerEvent, St25tbPollerState, St25tbType};
use bpoller::transceiver::MockTransceiver;
use bpoller::{Command, NfcError, NfcEvent};

use common::{fixtures, helpers};

const PRODUCT_02K: u8 = 0x0F;

#[test]
fn select_then_full_read_of_2k_card() {
    helpers::init_logger();
    let mut mock = MockTransceiver::new();
    helpers::queue_st25tb_select(&mut mock);
    helpers::queue_st25tb_read(&mut mock, PRODUCT_02K, 64);
    let mut poller = helpers::st25tb_over_mock(mock);
    let events = helpers::record_events(&mut poller);

    poller.run(NfcEvent::PollerReady);
    assert_eq!(poller.state(), St25tbPollerState::Selected);
    assert!(poller.data().is_none());

    poller.run(NfcEvent::PollerReady);
    assert_eq!(poller.state(), St25tbPollerState::Read);
    assert_eq!(
        *events.borrow(),
        vec![St25tbPollerEvent::Ready, St25tbPollerEvent::ReadSuccessful]
    );

    let data = poller.data().unwrap();
    assert_eq!(data.uid, fixtures::st25tb_uid(PRODUCT_02K));
    assert_eq!(data.card_type, St25tbType::Type02k);
    assert_eq!(data.blocks.len(), 64);
    assert_eq!(data.block(63), Some(fixtures::block_value(63)));
    assert_eq!(data.system_otp_block, 0xFFFF_FFFE);

    let sent = &poller.transceiver().sent;
    assert_eq!(sent[0], with_crc_b(&[0x06, 0x00]));
    assert_eq!(sent[1], with_crc_b(&[0x0E, fixtures::CHIP_ID]));
    assert_eq!(sent[2], with_crc_b(&[0x0B]));
    assert_eq!(sent[3], with_crc_b(&[0x08, 0x00]));
    assert_eq!(sent.last().unwrap(), &with_crc_b(&[0x08, 0xFF]));
}

#[test]
fn data_reflects_last_successful_read() {
    let mut mock = MockTransceiver::new();
    helpers::queue_st25tb_select(&mut mock);
    helpers::queue_st25tb_read(&mut mock, 0x0C, 16);
    let mut poller = helpers::st25tb_over_mock(mock);
    helpers::record_events(&mut poller);

    poller.run(NfcEvent::PollerReady);
    poller.run(NfcEvent::PollerReady);
    let first = poller.data().cloned().unwrap();
    assert_eq!(first.card_type, St25tbType::Type512At);

    // Read state keeps reporting the stored image without radio traffic
    let sent_before = poller.transceiver().sent.len();
    poller.run(NfcEvent::PollerReady);
    assert_eq!(poller.transceiver().sent.len(), sent_before);
    assert_eq!(poller.data(), Some(&first));
}

#[test]
fn read_interrupted_mid_memory_keeps_previous_data_absent() {
    let mut mock = MockTransceiver::new();
    helpers::queue_st25tb_select(&mut mock);
    mock.push_response_with_crc(&fixtures::st25tb_uid_wire(PRODUCT_02K));
    mock.push_response_with_crc(&fixtures::block_value(0).to_le_bytes());
    mock.push_error(NfcError::IncompleteFrame);
    let mut poller = helpers::st25tb_over_mock(mock);
    let events = helpers::record_events(&mut poller);

    poller.run(NfcEvent::PollerReady);
    poller.run(NfcEvent::PollerReady);
    assert_eq!(poller.state(), St25tbPollerState::Idle);
    assert_eq!(
        events.borrow().last(),
        Some(&St25tbPollerEvent::Error(St25tbError::Framing))
    );
    assert!(poller.data().is_none());
}

#[test]
fn run_until_stop_ends_after_read() {
    let mut mock = MockTransceiver::new();
    helpers::queue_st25tb_select(&mut mock);
    helpers::queue_st25tb_read(&mut mock, 0x0C, 16);
    let mut poller = helpers::st25tb_over_mock(mock);
    poller.set_callback(|ev| match ev.event {
        St25tbPollerEvent::ReadSuccessful => Command::Stop,
        _ => Command::Continue,
    });

    assert_eq!(run_until_stop(&mut poller, 10), 2);
    assert_eq!(poller.data().map(|d| d.blocks.len()), Some(16));
}

#[test]
fn completion_then_reselect() {
    let mut mock = MockTransceiver::new();
    helpers::queue_st25tb_select(&mut mock);
    mock.push_error(NfcError::Timeout); // COMPLETION has no answer
    helpers::queue_st25tb_select(&mut mock);
    let mut poller = helpers::st25tb_over_mock(mock);

    assert_eq!(poller.select(None), Ok(fixtures::CHIP_ID));
    poller.completion().unwrap();
    assert_eq!(poller.chip_id(), None);
    assert_eq!(poller.select(None), Ok(fixtures::CHIP_ID));
    assert_eq!(poller.transceiver().sent[2], with_crc_b(&[0x0F]));
}
