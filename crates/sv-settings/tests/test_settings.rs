//! Settings scenarios: values of any shape written across scenarios and
//! units, read back with fallback and `today` bounds.

use sv_core::{Error, Value};
use sv_repository::{Query, Record, RepositoryConfig};
use sv_settings::Settings;
use sv_time::Timestamp;

fn date(y: i32, m: u32, d: u32) -> Timestamp {
    Timestamp::from_ymd(y, m, d).unwrap()
}

fn loaded() -> Settings {
    let cfg = RepositoryConfig::default()
        .with_base_scenario("base")
        .with_current_scenario("SCENARIO1")
        .with_default_unit("simulation");
    let mut s = Settings::new(cfg).unwrap();
    s.set_today(date(2099, 12, 31));
    let errors = s.set([
        Record::new("setting XYZ", 55).scenario("SCENARIO1").unit("UnitA").date(date(2022, 12, 25)),
        Record::new("$setting XYZ", "55").scenario("SCENARIO1").unit("UnitA").date(date(2022, 12, 25)),
        Record::new("$setting ABC", "66").scenario("SCENARIO1").unit("UnitA"),
        Record::new("$setting XYZ", "5555").scenario("SCENARIO1").unit("UnitA").date(date(2024, 1, 2)),
        Record::new("$setting XYZ", "555").scenario("SCENARIO1").unit("UnitA").date(date(2023, 2, 25)),
        Record::new("$setting XYZ2", 77).unit("UnitA").date(date(2022, 12, 25)),
        Record::new("$setting XYZ2", 7777).scenario("SCENARIO1").unit("UnitA").date(date(2024, 1, 2)),
        Record::new("$setting XYZ2", 777).scenario("SCENARIO1").unit("UnitA").date(date(2023, 2, 25)),
    ]);
    assert!(errors.is_empty(), "{errors:?}");
    s
}

fn q(name: &str) -> Query {
    Query::new(name).scenario("SCENARIO1").unit("UnitA")
}

fn text(s: &str) -> Option<Value> {
    Some(Value::from(s))
}

#[test]
fn immutable_setting_rejects_rewrite() {
    let mut s = loaded();
    let errors = s.set([Record::new("$setting XYZ", 9999)
        .scenario("SCENARIO1")
        .unit("UnitA")
        .date(date(2022, 12, 25))]);
    assert!(matches!(errors.as_slice(), [Error::ImmutableConflict { .. }]));
    assert_eq!(s.get(&q("$setting XYZ").date(date(2022, 12, 25))).unwrap(), text("55"));

    let strict = s.set_strict([Record::new("$setting ABC", "67").scenario("SCENARIO1").unit("UnitA")]);
    assert!(strict.is_err());
}

#[test]
fn wrong_key_components_are_not_found() {
    let s = loaded();
    let at = date(2022, 12, 24);
    assert_eq!(
        s.get(&Query::new("$setting XYZ").scenario("SCENARIOAAA").unit("UnitA").date(at)).unwrap(),
        None
    );
    assert_eq!(
        s.get(&Query::new("$setting XYZ").scenario("SCENARIO1").unit("UnitBBB").date(at)).unwrap(),
        None
    );
    assert_eq!(s.get(&q("$setting CCC").date(at)).unwrap(), None);
}

#[test]
fn point_reads_keep_the_stored_shape() {
    let s = loaded();
    let read = |name: &str, y, m, d| s.get(&q(name).date(date(y, m, d))).unwrap();

    assert_eq!(read("setting XYZ", 2022, 12, 25), Some(Value::from(55)));
    assert_eq!(read("$setting XYZ", 2022, 12, 24), None);
    assert_eq!(read("$setting XYZ", 2022, 12, 25), text("55"));
    assert_eq!(read("$setting XYZ", 2023, 2, 24), text("55"));
    assert_eq!(read("$setting XYZ", 2023, 2, 25), text("555"));
    assert_eq!(read("$setting XYZ", 2024, 1, 1), text("555"));
    assert_eq!(read("$setting XYZ", 2024, 1, 2), text("5555"));
    assert_eq!(read("$setting XYZ", 2099, 1, 1), text("5555"));
    assert_eq!(
        s.get(&Query::new("$setting XYZ").scenario("sCeNaRiO1").unit("UnitA").date(date(2022, 12, 25)))
            .unwrap(),
        text("55")
    );

    for at in [Timestamp::EPOCH, date(2099, 1, 1)] {
        assert_eq!(s.get(&q("$setting ABC").date(at)).unwrap(), text("66"));
    }

    assert_eq!(read("$setting XYZ2", 2022, 12, 24), None);
    assert_eq!(
        s.get(&Query::new("$setting XYZ2").unit("UnitA").date(date(2022, 12, 25))).unwrap(),
        Some(Value::from(77))
    );
    assert_eq!(read("$setting XYZ2", 2023, 2, 25), Some(Value::from(777)));
    assert_eq!(read("$setting XYZ2", 2099, 1, 1), Some(Value::from(7777)));
}

#[test]
fn range_reads() {
    let s = loaded();
    let all = q("$setting XYZ").date(Timestamp::EPOCH).end_date(date(2099, 12, 31));
    assert_eq!(
        s.get_range(&all).unwrap(),
        vec![Value::from("55"), Value::from("555"), Value::from("5555")]
    );
    let none = q("$setting XYZ").date(date(2025, 1, 1)).end_date(date(2026, 1, 1));
    assert!(s.get_range(&none).unwrap().is_empty());
    let inverted = q("$setting XYZ").date(date(2026, 1, 1)).end_date(date(2025, 1, 1));
    assert!(matches!(s.get_range(&inverted), Err(Error::InvalidRange { .. })));
}

#[test]
fn mutable_settings_accept_updates_and_new_shapes() {
    let mut s = loaded();
    let errors = s.set([
        Record::new("setting XYZ", 5555).scenario("SCENARIO1").unit("UnitA").date(date(2022, 12, 25)),
        Record::new(
            "setting XYZ",
            Value::record([("a", Value::from(888)), ("b", Value::list([555]))]),
        )
        .scenario("SCENARIO1")
        .unit("UnitA")
        .date(date(2022, 12, 27)),
    ]);
    assert!(errors.is_empty());

    let read = |d| s.get(&q("setting XYZ").date(date(2022, 12, d))).unwrap();
    assert_eq!(read(25), Some(Value::from(5555)));
    assert_eq!(read(26), Some(Value::from(5555)));
    let expected = Value::record([("a", Value::from(888)), ("b", Value::list([555]))]);
    assert_eq!(read(27), Some(expected.clone()));
    assert_eq!(read(28), Some(expected));
}

#[test]
fn future_reads_fail() {
    let mut s = loaded();
    s.set_today(date(2023, 1, 1));
    assert!(matches!(
        s.get(&q("$setting XYZ").date(date(2023, 1, 2))),
        Err(Error::FutureDate { .. })
    ));
    assert_eq!(s.get(&q("$setting XYZ")).unwrap(), text("55"));
}

#[test]
fn is_defined_ignores_dates() {
    let s = loaded();
    assert!(s.is_defined(&q("$setting XYZ")).unwrap());
    assert!(s.is_defined(&q("$setting XYZ").date(Timestamp::EPOCH)).unwrap());
    assert!(!s.is_defined(&q("$setting nothing")).unwrap());
}
