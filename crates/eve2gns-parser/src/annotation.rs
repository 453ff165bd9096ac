//! Text and position extraction for EVE-NG text objects.
//!
//! EVE-NG stores each text object as a fragment of HTML produced by its web
//! editor, for example:
//!
//! ```text
//! <div class="customShape customText" style="position: absolute; left: 1011px; top: 240px;">
//!   <p align="center">OSPF 11<br/>PHASE 3 DMVPN</p>
//! </div>
//! ```
//!
//! Only two things matter for conversion: the visible text (with `<br>` as
//! line breaks) and the `left`/`top` declarations of the first element that
//! carries both.

use log::trace;
use winnow::{
    ModalResult, Parser as _,
    combinator::{alt, delimited, preceded, repeat},
    token::{any, take_till, take_until, take_while},
};

use eve2gns_core::record::{SourceCoord, SourcePosition};

use crate::value::parse_coordinate;

/// Visible content of a text object.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Text with markup removed and `<br>` turned into newlines, trimmed
    pub text: String,
    /// Position from the element style, if any element declared one
    pub position: Option<SourcePosition>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Fragment<'a> {
    /// Everything between `<` and `>`
    Tag(&'a str),
    /// Entity name between `&` and `;`
    Entity(&'a str),
    Text(&'a str),
}

fn tag<'a>(input: &mut &'a str) -> ModalResult<Fragment<'a>> {
    delimited('<', take_till(0.., '>'), '>')
        .map(Fragment::Tag)
        .parse_next(input)
}

fn entity<'a>(input: &mut &'a str) -> ModalResult<Fragment<'a>> {
    delimited(
        '&',
        take_while(1..=10, |c: char| c.is_ascii_alphanumeric() || c == '#'),
        ';',
    )
    .map(Fragment::Entity)
    .parse_next(input)
}

fn text<'a>(input: &mut &'a str) -> ModalResult<Fragment<'a>> {
    take_till(1.., ['<', '&'])
        .map(Fragment::Text)
        .parse_next(input)
}

/// A lone `<` or `&` that does not start a tag or entity.
fn stray<'a>(input: &mut &'a str) -> ModalResult<Fragment<'a>> {
    any.take().map(Fragment::Text).parse_next(input)
}

fn fragment<'a>(input: &mut &'a str) -> ModalResult<Fragment<'a>> {
    alt((tag, entity, text, stray)).parse_next(input)
}

/// Value of the `style="..."` (or `style='...'`) attribute inside a tag.
fn style_attribute<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    preceded(
        (take_until(0.., "style="), "style="),
        alt((
            delimited('"', take_till(0.., '"'), '"'),
            delimited('\'', take_till(0.., '\''), '\''),
        )),
    )
    .parse_next(input)
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

/// Reads `left` and `top` from a CSS declaration list.
fn style_position(style: &str) -> Option<SourcePosition> {
    let mut left: Option<SourceCoord> = None;
    let mut top: Option<SourceCoord> = None;

    for declaration in style.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        match property.trim().to_ascii_lowercase().as_str() {
            "left" => left = parse_coordinate(value),
            "top" => top = parse_coordinate(value),
            _ => {}
        }
    }

    Some(SourcePosition::new(left?, top?))
}

/// Extracts the visible text and position from a text object's HTML.
///
/// # Examples
///
/// ```
/// # use eve2gns_parser::annotation::parse_annotation;
/// # use eve2gns_core::record::SourcePosition;
/// let html = r#"<div style="left: 10px; top: 20px;"><p>Core&amp;Edge<br/>Area 0 </p></div>"#;
/// let annotation = parse_annotation(html);
///
/// assert_eq!(annotation.text, "Core&Edge\nArea 0");
/// assert_eq!(annotation.position, Some(SourcePosition::absolute(10.0, 20.0)));
/// ```
pub fn parse_annotation(html: &str) -> Annotation {
    // Every input splits into fragments since `stray` accepts any character.
    let fragments: Vec<Fragment<'_>> = repeat(0.., fragment).parse(html).unwrap_or_default();

    let mut text = String::new();
    let mut position = None;

    for fragment in fragments {
        match fragment {
            Fragment::Tag(tag) => {
                if tag_name(tag) == "br" {
                    text.push('\n');
                }
                if position.is_none() {
                    let mut rest = tag;
                    if let Ok(style) = style_attribute(&mut rest) {
                        position = style_position(style);
                    }
                }
            }
            Fragment::Entity(name) => match decode_entity(name) {
                Some(c) => text.push(c),
                None => {
                    text.push('&');
                    text.push_str(name);
                    text.push(';');
                }
            },
            Fragment::Text(run) => text.push_str(run),
        }
    }

    let annotation = Annotation {
        text: text.trim().to_string(),
        position,
    };
    trace!(annotation:?; "Parsed text object");
    annotation
}
