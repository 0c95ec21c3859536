use aqb::{
    add, eq, if_, not, num, raw, ref_, str_, value, AqlError, AqlValue, Expr, ToAql,
};

#[test]
fn test_string_literal_round_trip() {
    assert_eq!(str_("a\"b").to_aql(), "\"a\\\"b\"");
    assert_eq!(str_("").to_aql(), "\"\"");
    assert_eq!(str_("tab\there").to_aql(), "\"tab\\there\"");
}

#[test]
fn test_identifier_escaping() {
    assert_eq!(ref_("x").unwrap().to_aql(), "x");
    assert_eq!(ref_("for").unwrap().to_aql(), "`for`");
    assert_eq!(ref_("RETURN").unwrap().to_aql(), "`RETURN`");
    assert_eq!(ref_("totally-radical").unwrap().to_aql(), "`totally-radical`");
}

#[test]
fn test_reference_escaping() {
    assert_eq!(ref_("a.b[*]").unwrap().to_aql(), "a.b[*]");
    assert_eq!(ref_("doc.for").unwrap().to_aql(), "doc.`for`");
    assert_eq!(ref_("`for`.x").unwrap().to_aql(), "`for`.x");
    assert!(matches!(ref_("a..b"), Err(AqlError::MalformedToken(_))));
    assert!(matches!(ref_("über"), Err(AqlError::MalformedToken(_))));
}

#[test]
fn test_bind_parameters_pass_through() {
    assert_eq!(ref_("@value").unwrap().to_aql(), "@value");
    assert_eq!(ref_("@@collection").unwrap().to_aql(), "@@collection");
}

#[test]
fn test_nary_join() {
    assert_eq!(add(vec![1, 2, 3]).unwrap().to_aql(), "1 + 2 + 3");
}

#[test]
fn test_nary_method_forms() {
    let one = value(1).unwrap();
    assert_eq!(one.add(vec![2, 3]).unwrap().to_aql(), "1 + 2 + 3");
    // Chained calls nest instead of re-associating.
    let chained = one.add([2]).unwrap().add([3]).unwrap();
    assert_eq!(chained.to_aql(), "(1 + 2) + 3");
}

#[test]
fn test_nary_requires_an_operand() {
    assert!(matches!(
        add(Vec::<AqlValue>::new()),
        Err(AqlError::Structural(_))
    ));
}

#[test]
fn test_binary_operations() {
    let x = value("x").unwrap();
    assert_eq!(x.gt(5).unwrap().to_aql(), "x > 5");
    assert_eq!(x.lte("y").unwrap().to_aql(), "x <= y");
    assert_eq!(x.neq(true).unwrap().to_aql(), "x != true");
    assert_eq!(x.in_(vec![1, 2]).unwrap().to_aql(), "x in [1, 2]");
    assert_eq!(x.not_in(vec![1, 2]).unwrap().to_aql(), "x not in [1, 2]");
    assert_eq!(x.matches("\"^a\"").unwrap().to_aql(), "x =~ \"^a\"");
    assert_eq!(x.not_matches("\"^a\"").unwrap().to_aql(), "x !~ \"^a\"");
}

#[test]
fn test_compound_operands_are_wrapped() {
    let x = value("x").unwrap();
    let compound = x.gt(5).unwrap();
    assert_eq!(eq(compound.clone(), true).unwrap().to_aql(), "(x > 5) == true");
    assert_eq!(not(compound).unwrap().to_aql(), "!(x > 5)");
}

#[test]
fn test_unary_operations() {
    let x = value("x").unwrap();
    assert_eq!(x.not().to_aql(), "!x");
    assert_eq!(x.neg().to_aql(), "-x");
    assert_eq!(x.like().to_aql(), "like x");
}

#[test]
fn test_conditional() {
    let cond = value("x").unwrap().gt(5).unwrap();
    let expr = if_(cond, "\"big\"", "\"small\"").unwrap();
    assert_eq!(expr.to_aql(), "(x > 5) ? \"big\" : \"small\"");

    let staged = value("x").unwrap().then(1).unwrap().otherwise(2).unwrap();
    assert_eq!(staged.to_aql(), "x ? 1 : 2");
}

#[test]
fn test_property_access() {
    let doc = value("doc").unwrap();
    assert_eq!(doc.get(vec![0]).unwrap().to_aql(), "doc[0]");
    assert_eq!(doc.get(vec!["\"key\""]).unwrap().to_aql(), "doc[\"key\"]");
    let chained = doc
        .get(vec![AqlValue::from("\"a\""), 0.into()])
        .unwrap();
    assert_eq!(chained.to_aql(), "doc[\"a\"][0]");
}

#[test]
fn test_range_construction() {
    assert_eq!(value(1).unwrap().to(5).unwrap().to_aql(), "1..5");
    assert_eq!(value("x").unwrap().range("y").unwrap().to_aql(), "x..y");
}

#[test]
fn test_raw_passthrough() {
    assert_eq!(raw("x && y").to_aql(), "x && y");
    // Raw text is never treated as a compound operation.
    assert_eq!(
        aqb::filter(raw("x > 1")).unwrap().to_aql(),
        "FILTER x > 1"
    );
}

#[test]
fn test_keywords_are_upper_cased() {
    assert_eq!(Expr::keyword("asc").unwrap().to_aql(), "ASC");
    assert!(matches!(
        Expr::keyword("not a keyword"),
        Err(AqlError::MalformedToken(_))
    ));
}

#[test]
fn test_function_name_validation() {
    assert_eq!(
        Expr::function_call("my::fn", Vec::new()).unwrap().to_aql(),
        "my::fn()"
    );
    assert!(matches!(
        Expr::function_call("my fn", Vec::new()),
        Err(AqlError::MalformedToken(_))
    ));
}

#[test]
fn test_float_literals_must_be_finite() {
    assert!(num(1.25).is_ok());
    assert!(matches!(
        num(f64::INFINITY),
        Err(AqlError::MalformedLiteral(_))
    ));
}

#[test]
fn test_nodes_are_reusable() {
    let x = value("x").unwrap();
    let gt = x.gt(1).unwrap();
    let lt = x.lt(10).unwrap();
    assert_eq!(x.to_aql(), "x");
    assert_eq!(gt.and([lt]).unwrap().to_aql(), "(x > 1) && (x < 10)");
}
