use fast_json_pointer::{
    format_relative_pointer, parse_relative_pointer, ParseError, RelativeJsonPointer,
};

#[test]
fn parse_bare_offset() {
    assert_eq!(parse_relative_pointer("0").unwrap(), (0, Some(vec![])));
}

#[test]
fn parse_number_sign() {
    assert_eq!(parse_relative_pointer("0#").unwrap(), (0, None));
}

#[test]
fn parse_rejects_malformed_pointers() {
    // negative integer
    assert!(parse_relative_pointer("-1").is_err());
    // floating point offset: "0" parses, ".01" is not a pointer
    assert!(parse_relative_pointer("0.01").is_err());
    // negative zero
    assert!(parse_relative_pointer("-0").is_err());
    // empty string
    assert!(parse_relative_pointer("").is_err());
    // missing offset before #
    assert!(parse_relative_pointer("#").is_err());
    // a pointer cannot follow the number sign
    assert_eq!(
        parse_relative_pointer("0#/foo"),
        Err(ParseError::SymbolsAfterHash)
    );
}

#[test]
fn format_pointer_and_number_sign() {
    assert_eq!(
        format_relative_pointer(0, Some(&["foo".to_string()])),
        "0/foo"
    );
    assert_eq!(format_relative_pointer(0, None), "0#");
}

#[test]
fn hash_in_tail_is_an_ordinary_character() {
    let rel = RelativeJsonPointer::parse("0/#").unwrap();
    assert_eq!(rel.parts().unwrap(), &["#"]);
    assert!(!rel.is_index_ref());
    assert_eq!(rel.to_string(), "0/#");

    let rel = RelativeJsonPointer::parse("0/foo#").unwrap();
    assert_eq!(rel.parts().unwrap(), &["foo#"]);
    assert_eq!(rel.to_string(), "0/foo#");
}
