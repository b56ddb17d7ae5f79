#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use bpoller::poller::Poller;
use bpoller::st25tb::{config, St25tbError, St25tbPollerEvent, St25tbPollerState};
use bpoller::transceiver::MockTransceiver;
use bpoller::{NfcError, NfcEvent};

use common::{fixtures, helpers};

#[test]
fn failed_selects_stay_idle_and_pause() {
    helpers::init_logger();
    let mut poller = helpers::st25tb_over_mock(MockTransceiver::new());
    let events = helpers::record_events(&mut poller);

    for tick in 1..=3 {
        poller.run(NfcEvent::PollerReady);
        assert_eq!(poller.state(), St25tbPollerState::Idle);
        assert_eq!(events.borrow().len(), tick);
        assert_eq!(poller.delay().pauses.len(), tick);
    }

    assert!(events
        .borrow()
        .iter()
        .all(|ev| *ev == St25tbPollerEvent::Error(St25tbError::Timeout)));
    assert_eq!(poller.delay().total(), Duration::from_millis(300));
    assert!(poller.data().is_none());
}

#[test]
fn select_mismatch_is_collision_or_select() {
    let mut mock = MockTransceiver::new();
    mock.push_response_with_crc(&[fixtures::CHIP_ID]);
    mock.push_response_with_crc(&[fixtures::CHIP_ID ^ 0x01]);
    let mut poller = helpers::st25tb_over_mock(mock);
    let events = helpers::record_events(&mut poller);

    poller.run(NfcEvent::PollerReady);
    assert_eq!(
        *events.borrow(),
        vec![St25tbPollerEvent::Error(St25tbError::CollisionOrSelect)]
    );
    assert_eq!(
        poller.delay().pauses,
        vec![Duration::from_millis(config::ERROR_BACKOFF_MS.into())]
    );
}

#[test]
fn radio_errors_map_onto_st25tb_errors() {
    for &radio_err in NfcError::ALL.iter() {
        let mut mock = MockTransceiver::new();
        mock.push_error(radio_err);
        let mut poller = helpers::st25tb_over_mock(mock);
        let events = helpers::record_events(&mut poller);

        poller.run(NfcEvent::PollerReady);
        assert_eq!(poller.state(), St25tbPollerState::Idle);
        assert_eq!(poller.last_error(), Some(St25tbError::from(radio_err)));
        assert_eq!(
            *events.borrow(),
            vec![St25tbPollerEvent::Error(St25tbError::from(radio_err))]
        );
    }
}

#[test]
fn detect_is_repeatable_and_side_effect_free() {
    let mut mock = MockTransceiver::new();
    mock.push_response_with_crc(&[fixtures::CHIP_ID]);
    mock.push_response_with_crc(&[fixtures::CHIP_ID]);
    let mut poller = helpers::st25tb_over_mock(mock);

    assert!(poller.detect(NfcEvent::PollerReady));
    assert!(poller.detect(NfcEvent::PollerReady));
    assert_eq!(poller.state(), St25tbPollerState::Idle);
    assert_eq!(poller.chip_id(), None);
    assert!(poller.data().is_none());
    assert!(poller.delay().pauses.is_empty());

    // Queue exhausted: nothing answers
    assert!(!poller.detect(NfcEvent::PollerReady));
}

#[test]
fn field_events_are_ignored() {
    let mut poller = helpers::st25tb_over_mock(MockTransceiver::new());
    let events = helpers::record_events(&mut poller);
    assert_eq!(poller.run(NfcEvent::FieldOn), bpoller::Command::Continue);
    assert_eq!(poller.run(NfcEvent::FieldOff), bpoller::Command::Continue);
    assert!(events.borrow().is_empty());
    assert!(poller.transceiver().sent.is_empty());
}
