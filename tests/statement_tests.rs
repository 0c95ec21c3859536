use aqb::{
    collect, collect_with_count_into, filter, for_, insert, let_, let_many, limit, limit_offset,
    remove, replace, return_, return_distinct, sort, update, upsert, value, AqlError, AqlValue,
    Collection, PartialStatement, ToAql,
};
use serde_json::json;

#[test]
fn test_chain_composition() {
    let iteration = for_("x").in_(vec![1, 2, 3]).unwrap();
    let condition = value("x").unwrap().gt(1).unwrap();
    let full = iteration
        .filter(condition.clone())
        .unwrap()
        .return_("x")
        .unwrap();

    let expected = format!(
        "{} {} {}",
        iteration.to_aql(),
        filter(condition).unwrap().to_aql(),
        return_("x").unwrap().to_aql()
    );
    assert_eq!(full.to_aql(), expected);
    assert_eq!(full.to_aql(), "FOR x IN [1, 2, 3] FILTER (x > 1) RETURN x");
}

#[test]
fn test_chain_prefixes_are_reusable() {
    let iteration = for_("x").in_("xs").unwrap();
    let plain = iteration.return_("x").unwrap();
    let limited = iteration.limit(2).unwrap().return_("x").unwrap();

    assert_eq!(iteration.to_aql(), "FOR x IN xs");
    assert_eq!(plain.to_aql(), "FOR x IN xs RETURN x");
    assert_eq!(limited.to_aql(), "FOR x IN xs LIMIT 2 RETURN x");
}

#[test]
fn test_for_requires_a_valid_variable() {
    assert!(matches!(
        for_("not valid").in_("xs"),
        Err(AqlError::MalformedToken(_))
    ));
}

#[test]
fn test_iteration_over_subquery() {
    let inner = for_("y").in_("ys").unwrap().return_("y").unwrap();
    let outer = for_("x").in_(inner).unwrap().return_("x").unwrap();
    assert_eq!(outer.to_aql(), "FOR x IN (FOR y IN ys RETURN y) RETURN x");
}

#[test]
fn test_let_clause() {
    assert_eq!(let_("x", 42).unwrap().to_aql(), "LET x = 42");
    assert_eq!(
        let_many(vec![("a", 1), ("b", 2)]).unwrap().to_aql(),
        "LET a = 1, b = 2"
    );
    let sub = for_("x").in_("xs").unwrap().return_("x").unwrap();
    assert_eq!(
        let_("all", sub).unwrap().to_aql(),
        "LET all = (FOR x IN xs RETURN x)"
    );
}

#[test]
fn test_let_rejects_bad_definitions() {
    assert!(matches!(
        let_many(Vec::<(&str, AqlValue)>::new()),
        Err(AqlError::Structural(_))
    ));
    assert!(matches!(
        let_("not valid", 1),
        Err(AqlError::MalformedToken(_))
    ));
}

#[test]
fn test_return_clauses() {
    assert_eq!(return_("x").unwrap().to_aql(), "RETURN x");
    assert_eq!(
        return_distinct("x").unwrap().to_aql(),
        "RETURN DISTINCT x"
    );
    let chain = for_("x").in_("xs").unwrap().return_distinct("x").unwrap();
    assert_eq!(chain.to_aql(), "FOR x IN xs RETURN DISTINCT x");
}

#[test]
fn test_collect_clause() {
    assert_eq!(
        collect("cls", "doc.category").unwrap().to_aql(),
        "COLLECT cls = doc.category"
    );
}

#[test]
fn test_collect_into() {
    let grouped = collect("cls", "doc.category").unwrap();
    assert_eq!(
        grouped.into_("groups").unwrap().to_aql(),
        "COLLECT cls = doc.category INTO groups"
    );
    assert_eq!(
        grouped
            .into_expr("names", "doc.name")
            .unwrap()
            .to_aql(),
        "COLLECT cls = doc.category INTO names = doc.name"
    );
    assert_eq!(
        grouped
            .into_("groups")
            .unwrap()
            .keep(["doc"])
            .unwrap()
            .to_aql(),
        "COLLECT cls = doc.category INTO groups KEEP doc"
    );
}

#[test]
fn test_collect_keep_rejects_empty_lists() {
    let grouped = collect("cls", "doc.category").unwrap().into_("g").unwrap();
    assert!(matches!(
        grouped.keep(Vec::<String>::new()),
        Err(AqlError::Structural(_))
    ));
}

#[test]
fn test_collect_with_count() {
    let chain = for_("doc")
        .in_("docs")
        .unwrap()
        .collect_with_count_into("total")
        .unwrap()
        .return_("total")
        .unwrap();
    assert_eq!(
        chain.to_aql(),
        "FOR doc IN docs COLLECT WITH COUNT INTO total RETURN total"
    );
    assert_eq!(
        collect_with_count_into("n").unwrap().to_aql(),
        "COLLECT WITH COUNT INTO n"
    );
    assert_eq!(
        collect("cls", "doc.category")
            .unwrap()
            .with_count_into("n")
            .unwrap()
            .to_aql(),
        "COLLECT cls = doc.category WITH COUNT INTO n"
    );
}

#[test]
fn test_collect_options() {
    let grouped = collect("cls", "doc.category")
        .unwrap()
        .options(json!({"method": "\"sorted\""}))
        .unwrap();
    assert_eq!(
        grouped.to_aql(),
        "COLLECT cls = doc.category OPTIONS {method: \"sorted\"}"
    );
}

#[test]
fn test_collect_remains_chainable() {
    let chain = for_("doc")
        .in_("docs")
        .unwrap()
        .collect("cls", "doc.category")
        .unwrap()
        .into_("groups")
        .unwrap()
        .sort(vec!["cls"])
        .unwrap()
        .return_("groups")
        .unwrap();
    assert_eq!(
        chain.to_aql(),
        "FOR doc IN docs COLLECT cls = doc.category INTO groups SORT cls RETURN groups"
    );
}

#[test]
fn test_sort_clause() {
    let chain = for_("x").in_("xs").unwrap();
    assert_eq!(
        chain.sort(vec!["x.name"]).unwrap().to_aql(),
        "FOR x IN xs SORT x.name"
    );
    assert_eq!(
        chain
            .sort(vec![
                AqlValue::from("x.name"),
                "ASC".into(),
                "x.age".into(),
                "DESC".into(),
            ])
            .unwrap()
            .to_aql(),
        "FOR x IN xs SORT x.name ASC, x.age DESC"
    );
    // Direction keywords are case-insensitive and upper-cased on output.
    assert_eq!(
        sort(vec![AqlValue::from("x"), "desc".into()])
            .unwrap()
            .to_aql(),
        "SORT x DESC"
    );
}

#[test]
fn test_sort_rejects_misplaced_directions() {
    assert!(matches!(
        sort(vec![AqlValue::from("ASC")]),
        Err(AqlError::Structural(_))
    ));
    assert!(matches!(
        sort(vec![
            AqlValue::from("x"),
            "ASC".into(),
            "DESC".into(),
        ]),
        Err(AqlError::Structural(_))
    ));
    assert!(matches!(
        sort(Vec::<AqlValue>::new()),
        Err(AqlError::Structural(_))
    ));
}

#[test]
fn test_limit_clause() {
    assert_eq!(limit(5).unwrap().to_aql(), "LIMIT 5");
    assert_eq!(limit_offset(10, 5).unwrap().to_aql(), "LIMIT 10, 5");
}

#[test]
fn test_remove_clause() {
    let removal = remove("doc").unwrap().in_("users").unwrap();
    assert_eq!(removal.to_aql(), "REMOVE doc IN users");
    assert_eq!(
        removal.return_old("removed").unwrap().to_aql(),
        "REMOVE doc IN users LET removed = `OLD` RETURN removed"
    );
}

#[test]
fn test_options_are_immutable_attachments() {
    let base = remove("doc").unwrap().in_("users").unwrap();
    let synced = base.options(json!({"waitForSync": true})).unwrap();
    let tolerant = base.options(json!({"ignoreErrors": true})).unwrap();

    assert_ne!(synced, tolerant);
    assert_eq!(base.to_aql(), "REMOVE doc IN users");
    assert_eq!(
        synced.to_aql(),
        "REMOVE doc IN users OPTIONS {waitForSync: true}"
    );
    assert_eq!(
        tolerant.to_aql(),
        "REMOVE doc IN users OPTIONS {ignoreErrors: true}"
    );
}

#[test]
fn test_options_must_be_objects() {
    let base = remove("doc").unwrap().in_("users").unwrap();
    assert!(matches!(
        base.options(42),
        Err(AqlError::MalformedLiteral(_))
    ));
}

#[test]
fn test_insert_clause() {
    let inserted = insert(json!({"name": "\"Dave\""}))
        .unwrap()
        .into_("users")
        .unwrap();
    assert_eq!(inserted.to_aql(), "INSERT {name: \"Dave\"} INTO users");
    assert_eq!(
        inserted.return_new("created").unwrap().to_aql(),
        "INSERT {name: \"Dave\"} INTO users LET created = `NEW` RETURN created"
    );
}

#[test]
fn test_update_clause() {
    assert_eq!(
        update("doc").unwrap().in_("users").unwrap().to_aql(),
        "UPDATE doc IN users"
    );
    assert_eq!(
        update("doc")
            .unwrap()
            .with_(json!({"age": 42}))
            .unwrap()
            .in_("users")
            .unwrap()
            .to_aql(),
        "UPDATE doc WITH {age: 42} IN users"
    );
}

#[test]
fn test_replace_clause() {
    assert_eq!(
        replace("doc").unwrap().in_("users").unwrap().to_aql(),
        "REPLACE doc IN users"
    );
    assert_eq!(
        replace("doc")
            .unwrap()
            .with_(json!({"age": 42}))
            .unwrap()
            .in_("users")
            .unwrap()
            .return_old("previous")
            .unwrap()
            .to_aql(),
        "REPLACE doc WITH {age: 42} IN users LET previous = `OLD` RETURN previous"
    );
}

#[test]
fn test_upsert_clause() {
    let upserted = upsert(json!({"_key": "\"a\""}))
        .unwrap()
        .insert(json!({"_key": "\"a\"", "n": 1}))
        .unwrap()
        .update(json!({"n": 2}))
        .unwrap()
        .in_("counters")
        .unwrap();
    assert_eq!(
        upserted.to_aql(),
        "UPSERT {_key: \"a\"} INSERT {_key: \"a\", n: 1} UPDATE {n: 2} IN counters"
    );

    let replaced = upsert(json!({"_key": "\"a\""}))
        .unwrap()
        .insert(json!({"n": 1}))
        .unwrap()
        .replace(json!({"n": 2}))
        .unwrap()
        .in_("counters")
        .unwrap();
    assert_eq!(
        replaced.to_aql(),
        "UPSERT {_key: \"a\"} INSERT {n: 1} REPLACE {n: 2} IN counters"
    );
}

#[test]
fn test_mutation_at_the_end_of_a_chain() {
    let chain = for_("u")
        .in_("users")
        .unwrap()
        .filter(value("u.active").unwrap().eq(false).unwrap())
        .unwrap()
        .remove("u")
        .unwrap()
        .in_("users")
        .unwrap();
    assert_eq!(
        chain.to_aql(),
        "FOR u IN users FILTER (u.active == false) REMOVE u IN users"
    );
}

struct LoggedIn;

impl Collection for LoggedIn {
    fn name(&self) -> &str {
        "logged-in"
    }
}

#[test]
fn test_collection_targets() {
    let handle = remove("doc")
        .unwrap()
        .in_(AqlValue::collection(&LoggedIn))
        .unwrap();
    assert_eq!(handle.to_aql(), "REMOVE doc IN `logged-in`");

    assert!(matches!(
        remove("doc").unwrap().in_(vec![1, 2]),
        Err(AqlError::UnsupportedValue(_))
    ));
}

#[test]
fn test_filter_wraps_compound_conditions() {
    assert_eq!(
        filter(value("x").unwrap().gt(1).unwrap()).unwrap().to_aql(),
        "FILTER (x > 1)"
    );
    assert_eq!(filter("x").unwrap().to_aql(), "FILTER x");
}
