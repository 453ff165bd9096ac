//! Parsers for attribute and CSS values.

use winnow::{
    ModalResult, Parser as _,
    ascii::{float, multispace0},
    combinator::{alt, delimited, opt},
};

use eve2gns_core::record::SourceCoord;

/// A coordinate: a number optionally followed by `%` or `px`.
pub(crate) fn coordinate(input: &mut &str) -> ModalResult<SourceCoord> {
    let value: f64 = float.parse_next(input)?;
    let percent = opt(alt(("%".value(true), "px".value(false)))).parse_next(input)?;

    Ok(match percent {
        Some(true) => SourceCoord::Percent(value),
        _ => SourceCoord::Absolute(value),
    })
}

/// Parses a complete coordinate value, allowing surrounding whitespace.
pub(crate) fn parse_coordinate(text: &str) -> Option<SourceCoord> {
    delimited(multispace0, coordinate, multispace0)
        .parse(text)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate_absolute() {
        assert_eq!(parse_coordinate("363"), Some(SourceCoord::Absolute(363.0)));
        assert_eq!(parse_coordinate(" 1011px "), Some(SourceCoord::Absolute(1011.0)));
        assert_eq!(parse_coordinate("12.5"), Some(SourceCoord::Absolute(12.5)));
    }

    #[test]
    fn test_parse_coordinate_percent() {
        assert_eq!(parse_coordinate("45%"), Some(SourceCoord::Percent(45.0)));
        assert_eq!(parse_coordinate("33.3%"), Some(SourceCoord::Percent(33.3)));
    }

    #[test]
    fn test_parse_coordinate_rejects_garbage() {
        assert_eq!(parse_coordinate(""), None);
        assert_eq!(parse_coordinate("left"), None);
        assert_eq!(parse_coordinate("10em"), None);
    }
}
