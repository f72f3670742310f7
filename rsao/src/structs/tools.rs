use nom::{
    IResult, Parser,
    character::complete::{digit1, space0},
    combinator::all_consuming,
    number::complete::recognize_float,
    sequence::delimited,
};

/// Raw text of the "infinite" marker used by 8-byte fields.
pub const INFINITE_SENTINEL: &[u8; 8] = b" Infinit";
pub const INFINITE_VALUE: f64 = 9999.0;

fn unsigned_text(input: &str) -> IResult<&str, &str> {
    all_consuming(delimited(space0, digit1, space0)).parse(input)
}

fn float_text(input: &str) -> IResult<&str, &str> {
    all_consuming(delimited(space0, recognize_float, space0)).parse(input)
}

/// Blank-padded unsigned decimal, as written by FORTRAN `I` edit descriptors.
pub(crate) fn parse_unsigned(text: &str) -> Option<u64> {
    let (_, digits) = unsigned_text(text).ok()?;
    digits.parse().ok()
}

/// Fixed-point or exponent notation. Only finite values are numbers here, so
/// `inf`/`nan` words and exponents past the `f64` range are rejected.
pub(crate) fn parse_number(raw: &[u8]) -> Option<f64> {
    let text = std::str::from_utf8(raw).ok()?;
    let (_, number) = float_text(text).ok()?;
    number.parse().ok().filter(|v: &f64| v.is_finite())
}

/// Numeric element value, mapping the infinite marker before any parse.
pub(crate) fn parse_element(raw: &[u8]) -> Option<f64> {
    if raw == INFINITE_SENTINEL {
        return Some(INFINITE_VALUE);
    }
    parse_number(raw)
}
