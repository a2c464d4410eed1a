mod common;

use oml_config::BtsType;
use oml_core::debug;
use oml_entities::nm::swload::{LoadState, MemOpener, SwLoadErr};
use oml_entities::nm::{NmEvent, SwLoadEvent};
use oml_pdus::enums::nm_msg_type::NmMsgType;
use common::{ComponentTest, default_test_config, sw_image};

const MANIFEST: &str = "/sw/BTSBMC76.SWL";

fn manifest_files(entries: &[&str]) -> MemOpener {
    let mut files = MemOpener::new();
    let mut manifest = b"@(#)BTSBMC76.SWL:V2.0\r\n".to_vec();
    for id in entries {
        manifest.extend_from_slice(format!("    {}:V2.0\r\n", id).as_bytes());
        files.insert(format!("/sw/{}", id), sw_image(id, "V2.0", 2));
    }
    files.insert(MANIFEST, manifest);
    files
}

/// Runs one image of `lines` lines through init, one window and end, up to the End-Ack
fn complete_one_load(test: &mut ComponentTest, expected_id: &[u8], lines: usize) -> Vec<NmEvent> {
    let sent = test.take_sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].known_type(), Some(NmMsgType::LoadInit));
    assert_eq!(&sent[0].attr_data[2..2 + expected_id.len()], expected_id);

    assert_eq!(test.rx_load_msg(NmMsgType::LoadInitAck), vec![NmEvent::SwLoad(SwLoadEvent::InitAck)]);
    assert_eq!(test.take_sent().len(), lines);
    assert_eq!(test.rx_load_msg(NmMsgType::LoadSegAck), vec![NmEvent::SwLoad(SwLoadEvent::SegAck)]);
    assert_eq!(test.take_sent()[0].known_type(), Some(NmMsgType::LoadEnd));
    test.rx_load_msg(NmMsgType::LoadEndAck)
}

#[test]
fn test_list_of_two_ends_with_activate() {
    debug::setup_logging_verbose();
    let files = manifest_files(&["BTSBMC76.SWI", "BTSCSP76.SWI"]);
    let mut test = ComponentTest::new(default_test_config(BtsType::Bs11), files);

    test.software_list(MANIFEST).unwrap();
    assert!(test.link.nm().list_active());

    // The list file goes up first, its header line plus two entries
    let events = complete_one_load(&mut test, b"BTSBMC76.SWL", 3);
    assert!(events.is_empty());
    assert_eq!(test.load_state(), LoadState::AwaitInitAck);

    // End-Ack of each image is swallowed and the next load starts
    let events = complete_one_load(&mut test, b"BTSBMC76.SWI", 3);
    assert!(events.is_empty());
    assert_eq!(test.load_state(), LoadState::AwaitInitAck);

    // After the last image the list itself is activated
    let events = complete_one_load(&mut test, b"BTSCSP76.SWI", 3);
    assert!(events.is_empty());
    assert_eq!(test.load_state(), LoadState::AwaitActivateAck);
    let sent = test.take_sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].known_type(), Some(NmMsgType::ActivateSw));
    assert_eq!(&sent[0].attr_data[2..14], b"BTSBMC76.SWL");

    let events = test.rx_load_msg(NmMsgType::ActivateSwAck);
    assert_eq!(events, vec![NmEvent::SwLoad(SwLoadEvent::ActivateAck)]);
    assert_eq!(test.load_state(), LoadState::Idle);
    assert!(!test.link.nm().list_active());
}

#[test]
fn test_empty_list_sends_nothing() {
    let mut files = MemOpener::new();
    files.insert(MANIFEST, b"\r\n\r\n".to_vec());
    let mut test = ComponentTest::new(default_test_config(BtsType::Bs11), files);
    let res = test.software_list(MANIFEST);
    assert!(matches!(res, Err(SwLoadErr::ManifestParse { .. })));
    assert!(test.take_sent().is_empty());
    assert!(!test.link.nm().list_active());
}

#[test]
fn test_missing_list() {
    let mut test = ComponentTest::new(default_test_config(BtsType::Bs11), MemOpener::new());
    let res = test.software_list(MANIFEST);
    assert!(matches!(res, Err(SwLoadErr::FileOpen { .. })));
}

#[test]
fn test_failure_ends_list() {
    let files = manifest_files(&["BTSBMC76.SWI", "BTSCSP76.SWI"]);
    let mut test = ComponentTest::new(default_test_config(BtsType::Bs11), files);
    test.software_list(MANIFEST).unwrap();
    let sent = test.take_sent();
    assert_eq!(&sent[0].attr_data[2..14], b"BTSBMC76.SWL");

    let events = test.rx_load_msg(NmMsgType::LoadInitNack);
    assert_eq!(events, vec![NmEvent::SwLoad(SwLoadEvent::InitNack)]);
    assert_eq!(test.load_state(), LoadState::Error);
    assert!(!test.link.nm().list_active());
    assert!(test.take_sent().is_empty());
}

#[test]
fn test_missing_image_aborts_list() {
    debug::setup_logging_verbose();
    let mut files = manifest_files(&["BTSBMC76.SWI"]);
    // Second entry has no image behind it
    files.insert(
        MANIFEST,
        b"@(#)BTSBMC76.SWL:V2.0\r\n    BTSBMC76.SWI:V2.0\r\n    BTSGONE.SWI:V2.0\r\n".to_vec(),
    );
    let mut test = ComponentTest::new(default_test_config(BtsType::Bs11), files);
    test.software_list(MANIFEST).unwrap();

    let events = complete_one_load(&mut test, b"BTSBMC76.SWL", 3);
    assert!(events.is_empty());
    let events = complete_one_load(&mut test, b"BTSBMC76.SWI", 3);
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], NmEvent::SwlAborted { reason } if reason.contains("BTSGONE.SWI")));
    assert!(!test.link.nm().list_active());
    assert_eq!(test.load_state(), LoadState::Idle);
    assert!(test.take_sent().is_empty());
}
