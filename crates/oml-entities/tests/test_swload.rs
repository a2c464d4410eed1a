mod common;

use std::time::Duration;

use oml_config::BtsType;
use oml_core::debug;
use oml_entities::nm::swload::{LoadState, MemOpener, SwLoadErr};
use oml_entities::nm::{NmEvent, SwLoadEvent};
use oml_pdus::enums::nm_msg_type::NmMsgType;
use oml_pdus::frame::FomMessage;
use common::{ComponentTest, default_test_config, sw_image};

const IMAGE: &str = "/sw/BTSBMC76.SWI";

fn files(body_lines: usize) -> MemOpener {
    let mut files = MemOpener::new();
    files.insert(IMAGE, sw_image("BTSBMC76.SWI", "V2.0", body_lines));
    files
}

/// Sequence byte of a BS-11 load segment
fn seg_seq(fom: &FomMessage) -> u8 {
    assert_eq!(fom.known_type(), Some(NmMsgType::LoadSeg));
    fom.attr_data[3]
}

#[test]
fn test_load_window_of_four() {
    debug::setup_logging_verbose();
    // Header plus three lines: exactly one window
    let mut test = ComponentTest::new(default_test_config(BtsType::Bs11), files(3));

    test.software_load(IMAGE).unwrap();
    assert_eq!(test.load_state(), LoadState::AwaitInitAck);
    let sent = test.take_sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].known_type(), Some(NmMsgType::LoadInit));
    // FILE_ID and FILE_VERSION go out with 8-bit lengths
    let mut expected = vec![0x12, 12];
    expected.extend_from_slice(b"BTSBMC76.SWI");
    expected.extend_from_slice(&[0x13, 4]);
    expected.extend_from_slice(b"V2.0");
    expected.extend_from_slice(&[0x39, 4]);
    assert_eq!(sent[0].attr_data, expected);

    let events = test.rx_load_msg(NmMsgType::LoadInitAck);
    assert_eq!(events, vec![NmEvent::SwLoad(SwLoadEvent::InitAck)]);
    assert_eq!(test.load_state(), LoadState::AwaitSegAck);
    let sent = test.take_sent();
    assert_eq!(sent.len(), 4);
    let seqs: Vec<u8> = sent.iter().map(seg_seq).collect();
    assert_eq!(seqs, vec![1, 2, 3, 0]);

    // Last segment is already out, so the ACK completes the transfer
    let events = test.rx_load_msg(NmMsgType::LoadSegAck);
    assert_eq!(events, vec![NmEvent::SwLoad(SwLoadEvent::SegAck)]);
    assert_eq!(test.load_state(), LoadState::AwaitEndAck);
    let sent = test.take_sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].known_type(), Some(NmMsgType::LoadEnd));

    let events = test.rx_load_msg(NmMsgType::LoadEndAck);
    assert_eq!(events, vec![NmEvent::SwLoad(SwLoadEvent::EndAck)]);
    assert_eq!(test.load_state(), LoadState::Idle);
    assert!(test.take_sent().is_empty());
}

#[test]
fn test_load_multiple_windows() {
    debug::setup_logging_verbose();
    let mut test = ComponentTest::new(default_test_config(BtsType::Bs11), files(5));
    test.software_load(IMAGE).unwrap();
    test.take_sent();

    test.rx_load_msg(NmMsgType::LoadInitAck);
    assert_eq!(test.take_sent().len(), 4);
    let progress = test.link.nm().load_progress().unwrap();
    assert!(progress > 0 && progress < 100, "progress {}", progress);

    test.rx_load_msg(NmMsgType::LoadSegAck);
    let seqs: Vec<u8> = test.take_sent().iter().map(seg_seq).collect();
    assert_eq!(seqs, vec![1, 0]);
    assert_eq!(test.link.nm().load_progress(), Some(100));
    assert_eq!(test.load_state(), LoadState::AwaitSegAck);

    test.rx_load_msg(NmMsgType::LoadSegAck);
    assert_eq!(test.take_sent()[0].known_type(), Some(NmMsgType::LoadEnd));
}

#[test]
fn test_forced_init_nack() {
    debug::setup_logging_verbose();
    let mut cfg = default_test_config(BtsType::Bs11);
    cfg.swload.forced = true;
    let mut test = ComponentTest::new(cfg, files(10));
    test.software_load(IMAGE).unwrap();
    test.take_sent();

    let events = test.rx_load_msg(NmMsgType::LoadInitNack);
    assert_eq!(events, vec![NmEvent::SwLoad(SwLoadEvent::InitAck)]);
    assert_eq!(test.load_state(), LoadState::AwaitSegAck);
    assert_eq!(test.take_sent().len(), 4);
}

#[test]
fn test_init_nack() {
    let mut test = ComponentTest::new(default_test_config(BtsType::Bs11), files(10));
    test.software_load(IMAGE).unwrap();
    test.take_sent();

    let events = test.rx_load_msg(NmMsgType::LoadInitNack);
    assert_eq!(events, vec![NmEvent::SwLoad(SwLoadEvent::InitNack)]);
    assert_eq!(test.load_state(), LoadState::Error);
    assert!(test.take_sent().is_empty());
}

#[test]
fn test_end_nack_forced_and_not() {
    for forced in [false, true] {
        let mut cfg = default_test_config(BtsType::Bs11);
        cfg.swload.forced = forced;
        let mut test = ComponentTest::new(cfg, files(1));
        test.software_load(IMAGE).unwrap();
        test.rx_load_msg(NmMsgType::LoadInitAck);
        test.rx_load_msg(NmMsgType::LoadSegAck);
        assert_eq!(test.load_state(), LoadState::AwaitEndAck);

        let events = test.rx_load_msg(NmMsgType::LoadEndNack);
        if forced {
            assert_eq!(events, vec![NmEvent::SwLoad(SwLoadEvent::EndAck)]);
            assert_eq!(test.load_state(), LoadState::Idle);
        } else {
            assert_eq!(events, vec![NmEvent::SwLoad(SwLoadEvent::EndNack)]);
            assert_eq!(test.load_state(), LoadState::Error);
        }
    }
}

#[test]
fn test_busy_start_keeps_session() {
    let mut test = ComponentTest::new(default_test_config(BtsType::Bs11), files(10));
    test.software_load(IMAGE).unwrap();
    test.rx_load_msg(NmMsgType::LoadInitAck);
    test.take_sent();

    let res = test.software_load(IMAGE);
    assert!(matches!(res, Err(SwLoadErr::Busy)));
    assert_eq!(test.load_state(), LoadState::AwaitSegAck);
    assert!(test.take_sent().is_empty());

    // The running session carries on
    test.rx_load_msg(NmMsgType::LoadSegAck);
    assert_eq!(test.take_sent().len(), 4);
}

#[test]
fn test_nanobts_load_unsupported() {
    let mut test = ComponentTest::new(default_test_config(BtsType::NanoBts), files(1));
    let res = test.software_load(IMAGE);
    assert!(matches!(res, Err(SwLoadErr::UnsupportedBtsType(BtsType::NanoBts))));
    assert!(test.take_sent().is_empty());
}

#[test]
fn test_activate() {
    let mut test = ComponentTest::new(default_test_config(BtsType::Bs11), files(1));
    test.software_activate(IMAGE).unwrap();
    let sent = test.take_sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].known_type(), Some(NmMsgType::ActivateSw));
    assert_eq!(test.load_state(), LoadState::AwaitActivateAck);

    let events = test.rx_load_msg(NmMsgType::ActivateSwAck);
    assert_eq!(events, vec![NmEvent::SwLoad(SwLoadEvent::ActivateAck)]);
    assert_eq!(test.load_state(), LoadState::Idle);

    // A further ACK outside a session is tolerated
    assert!(test.rx_load_msg(NmMsgType::ActivateSwAck).is_empty());
}

#[test]
fn test_activate_nack_then_restart() {
    debug::setup_logging_verbose();
    let mut test = ComponentTest::new(default_test_config(BtsType::Bs11), files(1));
    test.software_activate(IMAGE).unwrap();
    assert_eq!(test.take_sent()[0].known_type(), Some(NmMsgType::ActivateSw));

    let events = test.rx_load_msg(NmMsgType::ActivateSwNack);
    assert_eq!(events, vec![NmEvent::SwLoad(SwLoadEvent::ActivateNack)]);
    assert_eq!(test.load_state(), LoadState::Error);
    assert!(test.take_sent().is_empty());

    // Error is left by a fresh start
    test.software_load(IMAGE).unwrap();
    assert_eq!(test.load_state(), LoadState::AwaitInitAck);
    let sent = test.take_sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].known_type(), Some(NmMsgType::LoadInit));
}

#[test]
fn test_ack_timeout() {
    debug::setup_logging_verbose();
    let mut cfg = default_test_config(BtsType::Bs11);
    cfg.swload.ack_timeout = Some(Duration::from_secs(10));
    let mut test = ComponentTest::new(cfg, files(10));
    test.software_load(IMAGE).unwrap();

    assert!(test.advance(Duration::from_secs(5)).is_empty());
    assert_eq!(test.load_state(), LoadState::AwaitInitAck);

    // Any progress restarts the timer
    test.rx_load_msg(NmMsgType::LoadInitAck);
    assert!(test.advance(Duration::from_secs(9)).is_empty());

    let events = test.advance(Duration::from_secs(2));
    assert_eq!(events, vec![NmEvent::SwLoad(SwLoadEvent::Timeout)]);
    assert_eq!(test.load_state(), LoadState::Error);
    assert_eq!(test.link.nm().load_progress(), None);
}

#[test]
fn test_no_timeout_by_default() {
    let mut test = ComponentTest::new(default_test_config(BtsType::Bs11), files(10));
    test.software_load(IMAGE).unwrap();
    assert!(test.advance(Duration::from_secs(3600)).is_empty());
    assert_eq!(test.load_state(), LoadState::AwaitInitAck);
}

#[test]
fn test_abort() {
    let mut test = ComponentTest::new(default_test_config(BtsType::Bs11), files(10));
    test.software_load(IMAGE).unwrap();
    test.rx_load_msg(NmMsgType::LoadInitAck);
    test.take_sent();

    test.link.nm_mut().abort_load();
    assert_eq!(test.load_state(), LoadState::Idle);
    assert!(test.rx_load_msg(NmMsgType::LoadSegAck).is_empty());
    assert!(test.take_sent().is_empty());
}
