use bpoller::protocol::Ats;

#[test]
fn minimal_ats_uses_defaults() {
    let ats = Ats::parse(&[0x01]).unwrap();
    assert_eq!(ats.t0, 0);
    assert_eq!(ats.fsc(), 32);
    assert_eq!(ats.fwi(), 4);
    assert!(ats.historical_bytes().is_empty());
}

#[test]
fn full_ats_interface_bytes() {
    let ats = Ats::parse(&hex::decode("0778807102aabb").unwrap()).unwrap();
    assert_eq!(ats.fsc(), 256);
    assert_eq!(ats.ta_1, Some(0x80));
    assert_eq!(ats.tb_1, Some(0x71));
    assert_eq!(ats.tc_1, Some(0x02));
    assert_eq!(ats.fwi(), 7);
    assert_eq!(ats.fwt_fc(), 4096 << 7);
    assert_eq!(ats.historical_bytes(), &[0xAA, 0xBB]);
}

#[test]
fn length_byte_must_match() {
    assert!(Ats::parse(&[]).is_err());
    assert!(Ats::parse(&[0x05, 0x70]).is_err());
}
