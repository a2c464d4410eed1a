mod common;

use oml_config::BtsType;
use oml_core::{ObjClass, ObjectAddress, debug};
use oml_entities::nm::NmEvent;
use oml_entities::nm::components::object_registry::{ManagedObject, NmState};
use oml_entities::nm::swload::MemOpener;
use oml_pdus::enums::nm_msg_type::NmMsgType;
use common::{ComponentTest, default_test_config};

const STATECHG: u8 = NmMsgType::StateChgEventRep as u8;

fn new_test() -> ComponentTest {
    ComponentTest::new(default_test_config(BtsType::Bs11), MemOpener::new())
}

#[test]
fn test_state_report_changes_once() {
    debug::setup_logging_verbose();
    let mut test = new_test();
    let addr = ObjectAddress::channel(0, 1, 5);
    // OPER_STATE enabled, AVAIL_STATUS "not installed"
    let report = [0x24, 0x02, 0x07, 0x00, 0x01, 0x07];

    let events = test.rx_fom(STATECHG, addr, &report);
    assert_eq!(events.len(), 1);
    let NmEvent::OperationalChange(change) = &events[0] else {
        panic!("expected OperationalChange, got {:?}", events[0]);
    };
    assert_eq!(change.object, ManagedObject::Channel { trx: 1, ts: 5 });
    assert_eq!(change.address, addr);
    assert_eq!(change.old, NmState::default());
    assert_eq!(change.new, NmState { administrative: 0, operational: 2, availability: 7 });

    // Identical report is idempotent
    assert!(test.rx_fom(STATECHG, addr, &report).is_empty());
    assert_eq!(test.link.nm().registry.state_of(&addr).unwrap().operational, 2);
}

#[test]
fn test_state_report_without_attributes() {
    let mut test = new_test();
    let addr = ObjectAddress::bts(0);
    assert!(test.rx_fom(STATECHG, addr, &[]).is_empty());
    assert_eq!(test.link.nm().registry.state_of(&addr).unwrap(), NmState::default());
}

#[test]
fn test_state_report_empty_availability_is_ok() {
    let mut test = new_test();
    let addr = ObjectAddress::radio_carrier(0, 0);
    let events = test.rx_fom(STATECHG, addr, &[0x07, 0x00, 0x00]);
    let NmEvent::OperationalChange(change) = &events[0] else {
        panic!("expected OperationalChange, got {:?}", events);
    };
    assert_eq!(change.new.availability, 0xff);
}

#[test]
fn test_state_report_unknown_object() {
    debug::setup_logging_verbose();
    let mut test = new_test();
    // Config has two TRX
    assert!(test.rx_fom(STATECHG, ObjectAddress::radio_carrier(0, 2), &[0x24, 0x02]).is_empty());
    assert!(test.rx_fom(STATECHG, ObjectAddress::channel(0, 0, 8), &[0x24, 0x02]).is_empty());
    let gprs = ObjectAddress::new(ObjClass::GprsNse, 0, 0xff, 0xff);
    assert!(test.rx_fom(STATECHG, gprs, &[0x24, 0x02]).is_empty());
}

#[test]
fn test_state_report_bs11_objects() {
    let mut test = new_test();
    let pa1 = ObjectAddress::new(ObjClass::Bs11, 0x09, 0xff, 0x01);
    let events = test.rx_fom(STATECHG, pa1, &[0x24, 0x01]);
    assert!(matches!(&events[0], NmEvent::OperationalChange(c) if c.object == ManagedObject::Bs11Pa(1)));

    let envabtse = ObjectAddress::new(ObjClass::Bs11Envabtse, 0, 3, 0xff);
    let events = test.rx_fom(STATECHG, envabtse, &[0x24, 0x01]);
    assert!(matches!(&events[0], NmEvent::OperationalChange(c) if c.object == ManagedObject::Bs11Envabtse(3)));
}

#[test]
fn test_adm_state_ack_always_reported() {
    debug::setup_logging_verbose();
    let mut test = new_test();
    let addr = ObjectAddress::bts(0);
    let ack = NmMsgType::ChgAdmStateAck.into_raw();

    for _ in 0..2 {
        let events = test.rx_fom(ack, addr, &[0x04, 0x02]);
        assert_eq!(events.len(), 1);
        let NmEvent::AdministrativeChange(change) = &events[0] else {
            panic!("expected AdministrativeChange, got {:?}", events[0]);
        };
        assert_eq!(change.new.administrative, 2);
    }

    // ADM_STATE is required
    assert!(test.rx_fom(ack, addr, &[]).is_empty());
}
