// helpers.rs: mock setups and event recording shared by integration tests

use std::cell::RefCell;
use std::rc::Rc;

use bpoller::iso14443_3b::Iso14443_3bPoller;
use bpoller::poller::Poller;
use bpoller::st25tb::St25tbPoller;
use bpoller::transceiver::MockTransceiver;
use bpoller::utils::RecordingDelay;
use bpoller::Command;

use super::fixtures;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Install a callback that records every event and answers `Continue`.
pub fn record_events<P>(poller: &mut P) -> Rc<RefCell<Vec<P::Event>>>
where
    P: Poller,
    P::Event: 'static,
{
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    poller.set_callback(move |ev| {
        sink.borrow_mut().push(ev.event);
        Command::Continue
    });
    events
}

/// Queue the ATQB and ATTRIB answers of a successful ISO 14443-3B select.
pub fn queue_iso14443_3b_select(mock: &mut MockTransceiver) {
    mock.push_response_with_crc(&fixtures::atqb_payload());
    mock.push_response_with_crc(&[0x00]);
}

pub fn iso14443_3b_over_mock(mock: MockTransceiver) -> Iso14443_3bPoller<MockTransceiver> {
    Iso14443_3bPoller::new(mock)
}

/// Queue INITIATE and SELECT answers for `fixtures::CHIP_ID`.
pub fn queue_st25tb_select(mock: &mut MockTransceiver) {
    mock.push_response_with_crc(&[fixtures::CHIP_ID]);
    mock.push_response_with_crc(&[fixtures::CHIP_ID]);
}

/// Queue a full memory read: UID, every user block, then the system block.
pub fn queue_st25tb_read(mock: &mut MockTransceiver, product_code: u8, blocks: usize) {
    mock.push_response_with_crc(&fixtures::st25tb_uid_wire(product_code));
    for i in 0..blocks {
        mock.push_response_with_crc(&fixtures::block_value(i).to_le_bytes());
    }
    mock.push_response_with_crc(&0xFFFF_FFFEu32.to_le_bytes());
}

pub fn st25tb_over_mock(mock: MockTransceiver) -> St25tbPoller<MockTransceiver, RecordingDelay> {
    St25tbPoller::with_delay(mock, RecordingDelay::new())
}
