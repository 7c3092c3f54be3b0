use std::sync::Arc;

use courier_model::context::resolve;
use courier_model::{ContextInstance, CurrentSlot, ModelError};

#[derive(Debug, PartialEq, Eq)]
struct Client {
    name: &'static str,
}

static CLIENT: CurrentSlot<Client> = CurrentSlot::new();

impl ContextInstance for Client {
    const NAME: &'static str = "Client";

    fn slot() -> &'static CurrentSlot<Self> {
        &CLIENT
    }
}

// The ambient slot is process-wide, so everything touching it runs in one test.
#[test]
fn ambient_slot_lifecycle() {
    Client::reset_current();
    let err = Client::require_current().unwrap_err();
    match err {
        ModelError::NotConfigured { what, hint } => {
            assert_eq!(what, "Client");
            assert!(hint.contains("Client::set_current"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(resolve::<Client>(None).is_err());

    let first = Arc::new(Client { name: "first" });
    assert!(Client::set_current(Arc::clone(&first)).is_none());
    assert_eq!(Client::get_current().unwrap().name, "first");
    assert_eq!(resolve::<Client>(None).unwrap().name, "first");

    let explicit = Arc::new(Client { name: "explicit" });
    assert_eq!(resolve(Some(explicit)).unwrap().name, "explicit");

    let previous = Client::set_current(Arc::new(Client { name: "second" })).unwrap();
    assert!(Arc::ptr_eq(&previous, &first));
    assert_eq!(Client::require_current().unwrap().name, "second");

    assert!(Client::reset_current().is_some());
    assert!(Client::get_current().is_none());
}

#[test]
fn standalone_slot() {
    let slot: CurrentSlot<u32> = CurrentSlot::default();
    assert!(slot.get_current().is_none());
    slot.set_current(Arc::new(7));
    assert_eq!(*slot.get_current().unwrap(), 7);
    assert_eq!(slot.reset().as_deref(), Some(&7));
    assert!(slot.get_current().is_none());
}
