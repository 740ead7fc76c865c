use serde_json::{Value as JsonValue, json};
use shelf_core::{
    ApiObject, MapperError, Shape, Value, api_object, decode, encode, wire_enum,
};

wire_enum! {
    enum UserType: "UserType" as str {
        Root = "root",
        Admin = "admin",
        User = "user",
        Guest = "guest",
    }
}

api_object! {
    struct Progress {
        "id" => Shape::string(),
        "library_item_id" => Shape::string(),
        "progress" => Shape::float(),
        "is_finished" => Shape::bool(),
        "last_update" => Shape::date_time(),
        "finished_at" => Shape::optional(Shape::date_time()),
    }
}

api_object! {
    struct Account {
        "id" => Shape::string(),
        "username" => Shape::string(),
        "type" => Shape::enumeration::<UserType>(),
        "email" => Shape::optional(Shape::string()),
        "created_at" => Shape::date_time(),
        "media_progress" => Shape::list(Shape::nested::<Progress>()),
        "libraries_accessible" => Shape::list(Shape::string()),
        "extra" => Shape::mapping(Shape::string(), Shape::any()),
    }
}

api_object! {
    struct Entry {
        "id" => Shape::string(),
        "size" => Shape::int(),
        "added_at" => Shape::date_time(),
    }
}

api_object! {
    struct PreciseEntry: Entry {
        "size" => Shape::float(),
        "checksum" => Shape::optional(Shape::string()),
    }
}

fn object(payload: serde_json::Map<String, JsonValue>) -> JsonValue {
    JsonValue::Object(payload)
}

#[test]
fn round_trip_reproduces_iso_payloads() {
    let payload = json!({
        "id": "usr_1",
        "username": "root",
        "type": "root",
        "email": null,
        "createdAt": "2024-01-01T00:00:00Z",
        "mediaProgress": [{
            "id": "mp_1",
            "libraryItemId": "li_1",
            "progress": 0.5,
            "isFinished": false,
            "lastUpdate": "2024-02-03T04:05:06.789Z",
            "finishedAt": null,
        }],
        "librariesAccessible": ["lib_1", "lib_2"],
        "extra": {"theme": {"dark": true}, "volume": 0.8},
    });

    let account = decode::<Account>(&payload).unwrap();
    assert_eq!(object(encode(&account, true).unwrap()), payload);
}

#[test]
fn millisecond_timestamps_normalise_to_iso() {
    let from_millis = decode::<Progress>(&json!({
        "lastUpdate": 1_700_000_000_000_i64,
        "finishedAt": 0,
    }))
    .unwrap();
    let from_iso = decode::<Progress>(&json!({
        "lastUpdate": "2023-11-14T22:13:20Z",
        "finishedAt": "",
    }))
    .unwrap();

    assert_eq!(from_millis, from_iso);
    assert_eq!(
        object(encode(&from_millis, true).unwrap()),
        json!({"lastUpdate": "2023-11-14T22:13:20Z", "finishedAt": null})
    );
}

#[test]
fn absent_or_null_optionals_never_fail() {
    let absent = decode::<Account>(&json!({"id": "usr_2"})).unwrap();
    assert_eq!(absent.record().get("email"), None);

    let nulls = decode::<Account>(&json!({
        "id": "usr_2",
        "email": null,
        "type": null,
        "createdAt": null,
        "mediaProgress": null,
    }))
    .unwrap();
    for field in ["email", "type", "created_at", "media_progress"] {
        assert_eq!(nulls.record().get(field), Some(&Value::Null), "{field}");
    }
}

#[test]
fn compact_encoding_never_emits_null() {
    let account = decode::<Account>(&json!({
        "id": "usr_3",
        "email": null,
        "mediaProgress": [{"id": "mp", "finishedAt": null}],
    }))
    .unwrap();

    let compact = object(encode(&account, false).unwrap());
    assert_eq!(compact, json!({"id": "usr_3", "mediaProgress": [{"id": "mp"}]}));

    let full = encode(&account, true).unwrap();
    let mut keys: Vec<_> = full.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["email", "id", "mediaProgress"]);
}

#[test]
fn rejected_keys_are_kept_but_not_re_emitted() {
    let account = decode::<Account>(&json!({
        "id": "usr_4",
        "seriesHideFromContinueListening": [],
        "hasOpenIDLink": false,
    }))
    .unwrap();

    let rejected = account.record().rejected();
    assert_eq!(rejected.get("hasOpenIDLink"), Some(&json!(false)));
    assert_eq!(rejected.len(), 2);

    let wire = encode(&account, true).unwrap();
    assert!(!wire.contains_key("hasOpenIDLink"));
    assert!(!wire.contains_key("seriesHideFromContinueListening"));
}

#[test]
fn subclass_shape_overrides_the_ancestor() {
    let payload = json!({"id": "e1", "size": 1.5, "addedAt": 0, "checksum": "abc"});

    let err = decode::<Entry>(&payload).unwrap_err();
    assert!(matches!(err, MapperError::MalformedShape { .. }));

    let precise = decode::<PreciseEntry>(&payload).unwrap();
    assert_eq!(precise.record().f64("size"), Some(1.5));
    assert_eq!(precise.record().get("added_at"), Some(&Value::Null));
    assert_eq!(
        object(encode(&precise, false).unwrap()),
        json!({"id": "e1", "size": 1.5, "checksum": "abc"})
    );
}

#[test]
fn mutation_after_decode_is_encoded() {
    let mut account = decode::<Account>(&json!({"id": "usr_5", "type": "guest"})).unwrap();
    assert_eq!(account.record().variant::<UserType>("type"), Some(UserType::Guest));

    let record = account.record_mut();
    record.set("type", UserType::Admin).unwrap();
    record.set("username", "admin").unwrap();

    assert_eq!(
        object(encode(&account, false).unwrap()),
        json!({"id": "usr_5", "username": "admin", "type": "admin"})
    );
}

#[test]
fn type_without_declarations_collects_everything() {
    api_object! {
        struct Opaque {}
    }

    let opaque = decode::<Opaque>(&json!({"a": 1, "b": [true]})).unwrap();
    assert_eq!(opaque.record().rejected().len(), 2);
    assert!(encode(&opaque, true).unwrap().is_empty());
}

#[test]
fn wire_order_is_preserved() {
    let decoded = shelf_core::decode_value(
        &json!({"z": 1, "a": 2}),
        &Shape::mapping(Shape::string(), Shape::int()),
    )
    .unwrap();
    let keys: Vec<_> = decoded
        .as_map()
        .unwrap()
        .iter()
        .filter_map(|(key, _)| key.as_str())
        .collect();
    assert_eq!(keys, ["z", "a"]);

    let entry = decode::<Entry>(&json!({"zone": "b", "size": 3, "id": "e1", "alpha": true}))
        .unwrap();
    let rejected: Vec<_> = entry.record().rejected().keys().map(String::as_str).collect();
    assert_eq!(rejected, ["zone", "alpha"]);

    let wire: Vec<_> = encode(&entry, false).unwrap().keys().cloned().collect();
    assert_eq!(wire, ["id", "size"]);
}
