use crate::error::LiteralError;
use crate::literal::{parse_literal, parse_packed};
use crate::tests::{val, width};

#[test]
fn test_parse_separated_tokens() {
    assert_eq!(parse_literal("+1 0 -1 0 1"), Ok(73));
    assert_eq!(parse_literal("1,0,-1"), Ok(8));
    assert_eq!(parse_literal(" -1 ,\t1\n"), Ok(-2));
    assert_eq!(parse_literal("0"), Ok(0));
}

#[test]
fn test_parse_adjacent_tokens() {
    assert_eq!(parse_literal("1-10"), Ok(6));
    assert_eq!(parse_literal("+1+1"), Ok(4));
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse_literal(""), Err(LiteralError::Empty));
    assert_eq!(parse_literal(" , "), Err(LiteralError::Empty));
    assert_eq!(
        parse_literal("1 2"),
        Err(LiteralError::UnknownToken { offset: 2 })
    );
    assert_eq!(
        parse_literal("+"),
        Err(LiteralError::UnknownToken { offset: 0 })
    );
    assert_eq!(
        parse_literal("1 -0"),
        Err(LiteralError::UnknownToken { offset: 2 })
    );
}

#[test]
fn test_parse_overflow_boundary() {
    let forty = "1 ".repeat(40);
    assert_eq!(parse_literal(&forty), Ok(6_078_832_729_528_464_400));
    let forty_one = "1 ".repeat(41);
    assert_eq!(parse_literal(&forty_one), Err(LiteralError::Overflow));
    let negative = "-1 ".repeat(41);
    assert_eq!(parse_literal(&negative), Err(LiteralError::Overflow));
}

#[test]
fn test_parse_packed() {
    let packed = parse_packed("1 0 -1", width(3)).unwrap();
    assert_eq!(val(&packed), 8);
    assert_eq!(parse_packed("", width(3)), Err(LiteralError::Empty));
}
