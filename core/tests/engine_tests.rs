use slotted::errors::SlotError;
use slotted::ops::{self, WriteMode};
use slotted::record::accessor;
use slotted::{Descriptor, Engine, Record, Value};

#[test]
fn engine_session_flow() {
    let engine = Engine::new().with_write_mode(WriteMode::Lenient);
    let mut session = engine.new_session();
    assert_eq!(session.mode(), WriteMode::Lenient);

    session.eval("new o").expect("command should evaluate");
    session.eval("def o.x 1 -w").expect("define should succeed");
    session.eval("set o.x 99").expect("lenient write is silent");

    let record = session.record("o").expect("binding should exist");
    assert_eq!(ops::read(&record, "x").expect("slot exists"), Value::Number(1.0));
}

#[test]
fn embedded_records_mix_with_session_bindings() {
    let mut session = Engine::new().new_session();

    let counter = Record::new().into_ref();
    ops::write(&counter, "$n", Value::Number(0.0), WriteMode::Strict).expect("backing slot");
    let (reader, writer) = accessor::serial("$n");
    ops::define(&counter, "next", Descriptor::accessor_pair(reader, writer))
        .expect("accessor slot");
    session.bind("counter", counter);

    session.eval("get counter.next").expect("first read");
    session.eval("get counter.next").expect("second read");
    assert_eq!(session.output(), ["counter.next -> 0", "counter.next -> 1"]);
}

#[test]
fn descriptors_survive_the_copy_round_trip() {
    let source = Record::new().into_ref();
    ops::define(
        &source,
        "x",
        Descriptor::data(Value::Number(1.0))
            .writable(false)
            .enumerable(false),
    )
    .expect("define");

    let target = Record::new().into_ref();
    ops::copy_own(&source, &target, true);

    let descriptor = ops::descriptor_of(&target, "x").expect("copied slot");
    assert_eq!(descriptor.writable, Some(false));
    assert_eq!(descriptor.enumerable, Some(false));
    assert!(matches!(
        ops::write(&target, "x", Value::Number(2.0), WriteMode::Strict),
        Err(SlotError::NotWritable { .. })
    ));
}

#[test]
fn locked_slots_refuse_redefinition_but_accept_value_writes() {
    let record = Record::new().into_ref();
    ops::define(
        &record,
        "x",
        Descriptor::data(Value::Number(1.0)).configurable(false),
    )
    .expect("define");

    assert!(matches!(
        ops::define(&record, "x", Descriptor::data(Value::Number(2.0)).enumerable(false)),
        Err(SlotError::NotConfigurable { .. })
    ));
    ops::define(&record, "x", Descriptor::data(Value::Number(2.0))).expect("value-only change");
    assert_eq!(ops::read(&record, "x").expect("slot exists"), Value::Number(2.0));
}
