use std::sync::{Arc, Mutex};

use aqb::{fn_, functions, value, AqlError, AqlValue, Arity, Registry, ToAql};

#[test]
fn test_fixed_arity() {
    assert_eq!(functions::floor(vec![1.5]).unwrap().to_aql(), "FLOOR(1.5)");
    assert!(matches!(
        functions::floor(vec![1.5, 2.5]),
        Err(AqlError::ArityMismatch(_))
    ));
    assert_eq!(functions::rand(Vec::<AqlValue>::new()).unwrap().to_aql(), "RAND()");
}

#[test]
fn test_variadic_arity() {
    assert!(matches!(
        functions::concat(Vec::<AqlValue>::new()),
        Err(AqlError::ArityMismatch(_))
    ));
    assert_eq!(
        functions::concat(vec!["a.first", "a.last"]).unwrap().to_aql(),
        "CONCAT(a.first, a.last)"
    );
    assert!(matches!(
        functions::concat_separator(vec!["\"-\""]),
        Err(AqlError::ArityMismatch(_))
    ));
    assert_eq!(
        functions::concat_separator(vec!["\"-\"", "a", "b"])
            .unwrap()
            .to_aql(),
        "CONCAT_SEPARATOR(\"-\", a, b)"
    );
}

#[test]
fn test_arity_alternatives() {
    assert!(matches!(
        functions::substring(vec!["s"]),
        Err(AqlError::ArityMismatch(_))
    ));
    assert_eq!(
        functions::substring(vec![AqlValue::from("s"), 1.into()])
            .unwrap()
            .to_aql(),
        "SUBSTRING(s, 1)"
    );
    assert_eq!(
        functions::substring(vec![AqlValue::from("s"), 1.into(), 2.into()])
            .unwrap()
            .to_aql(),
        "SUBSTRING(s, 1, 2)"
    );
}

#[test]
fn test_arity_ranges() {
    // DATE_TIMESTAMP accepts one argument or three through seven.
    assert!(functions::date_timestamp(vec![0]).is_ok());
    assert!(matches!(
        functions::date_timestamp(vec![2016, 1]),
        Err(AqlError::ArityMismatch(_))
    ));
    assert!(functions::date_timestamp(vec![2016, 1, 1]).is_ok());
    assert!(functions::date_timestamp(vec![2016, 1, 1, 0, 0, 0, 0]).is_ok());
    assert!(matches!(
        functions::date_timestamp(vec![2016, 1, 1, 0, 0, 0, 0, 0]),
        Err(AqlError::ArityMismatch(_))
    ));
}

#[test]
fn test_arguments_are_normalized() {
    assert_eq!(
        functions::length(vec![vec![1, 2, 3]]).unwrap().to_aql(),
        "LENGTH([1, 2, 3])"
    );
    let condition = value("x").unwrap().gt(1).unwrap();
    assert_eq!(
        functions::to_bool(vec![condition]).unwrap().to_aql(),
        "TO_BOOL((x > 1))"
    );
}

#[test]
fn test_deprecation_diagnostics_are_injectable() {
    let messages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&messages);
    let registry = Registry::with_deprecation_handler(Box::new(move |message| {
        sink.lock().unwrap().push(message.to_string());
    }));

    let call = registry
        .call("SKIPLIST", vec![AqlValue::from("c"), AqlValue::from(1)])
        .unwrap();
    assert_eq!(call.to_aql(), "SKIPLIST(c, 1)");
    assert_eq!(
        messages.lock().unwrap().as_slice(),
        ["The AQL function SKIPLIST is deprecated"]
    );

    // The diagnostic never changes the produced node.
    let silent = functions::skiplist(vec![AqlValue::from("c"), AqlValue::from(1)]).unwrap();
    assert_eq!(call, silent);
}

#[test]
fn test_non_deprecated_calls_stay_silent() {
    let messages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&messages);
    let registry = Registry::with_deprecation_handler(Box::new(move |message| {
        sink.lock().unwrap().push(message.to_string());
    }));

    registry.call("LENGTH", vec![AqlValue::from("x")]).unwrap();
    assert!(messages.lock().unwrap().is_empty());
}

#[test]
fn test_unknown_builtins_are_rejected() {
    assert!(matches!(
        Registry::new().call("NO_SUCH_FUNCTION", Vec::new()),
        Err(AqlError::MalformedToken(_))
    ));
}

#[test]
fn test_custom_functions() {
    let custom = fn_("my::func", Some(vec![Arity::Exactly(2)])).unwrap();
    assert_eq!(custom.call(vec![1, 2]).unwrap().to_aql(), "my::func(1, 2)");
    assert!(matches!(
        custom.call(vec![1]),
        Err(AqlError::ArityMismatch(_))
    ));

    let unchecked = fn_("my::other", None).unwrap();
    assert!(unchecked.call(Vec::<AqlValue>::new()).is_ok());
    assert!(unchecked.call(vec![1, 2, 3, 4]).is_ok());

    assert!(matches!(
        fn_("not a name", None),
        Err(AqlError::MalformedToken(_))
    ));
}

#[test]
fn test_registry_lookup() {
    let registry = Registry::new();
    let concat = registry.get("CONCAT").unwrap();
    assert_eq!(concat.name, "CONCAT");
    assert!(!concat.deprecated);
    assert!(registry.get("SKIPLIST").unwrap().deprecated);
    assert!(registry.get("NOPE").is_none());
}
