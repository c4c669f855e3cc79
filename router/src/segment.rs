//! Pattern grammar of a single path segment.
//!
//! Segments are recognized in the following order:
//!
//! - `cms::name` contains an escaped colon and is static text (`cms:name`).
//! - `*` is a splat capturing one or more whole segments under `:splat`.
//! - `*.*` is an extension splat capturing the remaining path under `:path` and `:ext`.
//! - `?:name` is an optional named parameter.
//! - `:name` is a named parameter.
//! - Anything else containing a `:` is a regex segment, e.g. `:id:int`, `:id([0-9]+)_:name`, `cms_:id(.+).html`.
//! - Everything left is static text.

use std::borrow::Cow;

use regex::Regex;

use crate::{error::InsertError, escape};

pub(crate) const SPLAT: &str = ":splat";
pub(crate) const PATH: &str = ":path";
pub(crate) const EXT: &str = ":ext";

const INT_RULE: &str = "([0-9]+)";
const STRING_RULE: &str = r"([\w]+)";
const OPTIONAL_STRING_RULE: &str = r"([\w]*)";
const ANY_RULE: &str = "(.+)";

// prefix of the named groups wrapping every declared capture in a compiled expression.
const GROUP_PREFIX: &str = "__p";

/// Classification of a route segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Literal text, e.g. `users` or `api::v1`.
    Static,
    /// A required parameter matching any segment, e.g. `:id`.
    Named,
    /// A parameter that may be absent when it is the last segment, e.g. `?:id`.
    OptionalNamed,
    /// A wildcard capturing one or more segments, `*`.
    Splat,
    /// A wildcard capturing the remaining path and its extension, `*.*`.
    ExtensionSplat,
    /// A segment with one or more captures constrained by a regular expression.
    Regex,
}

/// Building block of a regex segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Piece {
    /// Text outside any capture, in regular expression syntax.
    Literal(String),
    /// A declared parameter and its expression.
    Capture { name: String, expr: String },
    /// A parenthesized group with no parameter name bound to it.
    Group(String),
}

/// A parsed route segment.
#[derive(Clone, Debug)]
pub(crate) struct Segment<'a> {
    pub(crate) text: &'a str,
    pub(crate) kind: SegmentKind,
    pub(crate) names: Vec<String>,
    pub(crate) optional: bool,
    pub(crate) pieces: Vec<Piece>,
}

impl Segment<'_> {
    /// Key of a static segment with escaped colons collapsed.
    pub(crate) fn key(&self) -> Cow<'_, str> {
        escape::unescape(self.text)
    }

    /// The unanchored expression of a regex segment. Empty for other kinds.
    pub(crate) fn expr(&self) -> String {
        self.pieces.iter().fold(String::new(), |mut expr, piece| {
            match piece {
                Piece::Literal(s) | Piece::Group(s) => expr.push_str(s),
                Piece::Capture { expr: e, .. } => expr.push_str(e),
            }
            expr
        })
    }

    /// Compiles the matcher a node of this segment tests incoming segments with.
    pub(crate) fn matcher(&self) -> Result<Option<Matcher>, InsertError> {
        match self.kind {
            SegmentKind::Static | SegmentKind::Named | SegmentKind::OptionalNamed => Ok(None),
            SegmentKind::Splat => Ok(Some(Matcher::Splat)),
            SegmentKind::ExtensionSplat => Ok(Some(Matcher::ExtensionSplat)),
            SegmentKind::Regex => PathRegex::new(self).map(|re| Some(Matcher::Pattern(re))),
        }
    }
}

/// Parses a single segment of a route pattern.
pub(crate) fn parse(text: &str) -> Result<Segment<'_>, InsertError> {
    let segment = |kind: SegmentKind, names: Vec<String>, optional: bool| Segment {
        text,
        kind,
        names,
        optional,
        pieces: Vec::new(),
    };

    if escape::is_escaped(text) {
        return Ok(segment(SegmentKind::Static, Vec::new(), false));
    }

    match text {
        "*" => return Ok(segment(SegmentKind::Splat, vec![SPLAT.to_owned()], false)),
        "*.*" => {
            return Ok(segment(
                SegmentKind::ExtensionSplat,
                vec![PATH.to_owned(), EXT.to_owned()],
                false,
            ))
        }
        _ => {}
    }

    if let Some(name) = text.strip_prefix('?').filter(|name| is_param(name)) {
        return Ok(segment(SegmentKind::OptionalNamed, vec![name.to_owned()], true));
    }

    if is_param(text) {
        return Ok(segment(SegmentKind::Named, vec![text.to_owned()], false));
    }

    if text.contains(':') {
        return regex_segment(text);
    }

    Ok(segment(SegmentKind::Static, Vec::new(), false))
}

// scan a segment like `cms_:id(.+)_:page:int.html` left to right.
fn regex_segment(text: &str) -> Result<Segment<'_>, InsertError> {
    let unbalanced = || InsertError::UnbalancedGroup {
        segment: text.to_owned(),
    };

    let mut names = Vec::new();
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut optional = false;
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        match c {
            '?' if rest[1..].starts_with(':') => {
                optional = true;
                rest = &rest[1..];
            }
            ':' => {
                let len = rest[1..].find(|c: char| !is_word(c)).unwrap_or(rest.len() - 1);
                if len == 0 {
                    return Err(InsertError::InvalidParamName {
                        segment: text.to_owned(),
                    });
                }

                let name = format!(":{}", &rest[1..=len]);
                rest = &rest[len + 1..];

                let expr = if let Some(r) = rest.strip_prefix(":int") {
                    rest = r;
                    INT_RULE.to_owned()
                } else if let Some(r) = rest.strip_prefix(":string") {
                    rest = r;
                    let rule = if optional { OPTIONAL_STRING_RULE } else { STRING_RULE };
                    rule.to_owned()
                } else if rest.starts_with('(') {
                    let (group, r) = rest.split_at(group_len(rest).ok_or_else(unbalanced)?);
                    rest = r;
                    group.to_owned()
                } else {
                    ANY_RULE.to_owned()
                };

                flush_literal(&mut literal, &mut pieces);
                names.push(name.clone());
                pieces.push(Piece::Capture { name, expr });
            }
            '(' => {
                let (group, r) = rest.split_at(group_len(rest).ok_or_else(unbalanced)?);
                rest = r;
                flush_literal(&mut literal, &mut pieces);
                pieces.push(Piece::Group(group.to_owned()));
            }
            ')' => return Err(unbalanced()),
            '\\' => {
                let len = rest[1..].chars().next().map_or(1, |c| 1 + c.len_utf8());
                literal.push_str(&rest[..len]);
                rest = &rest[len..];
            }
            c => {
                literal.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    flush_literal(&mut literal, &mut pieces);

    Ok(Segment {
        text,
        kind: SegmentKind::Regex,
        names,
        optional,
        pieces,
    })
}

fn flush_literal(literal: &mut String, pieces: &mut Vec<Piece>) {
    if !literal.is_empty() {
        pieces.push(Piece::Literal(std::mem::take(literal)));
    }
}

// length of the balanced group `s` starts with, including both parentheses.
fn group_len(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut class = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        match c {
            '\\' => escaped = true,
            '[' if !class => class = true,
            ']' if class => class = false,
            '(' if !class => depth += 1,
            ')' if !class => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// `^:\w+$`
fn is_param(s: &str) -> bool {
    s.strip_prefix(':')
        .is_some_and(|name| !name.is_empty() && name.chars().all(is_word))
}

/// Tests incoming path segments against a non static node.
#[derive(Clone, Debug)]
pub(crate) enum Matcher {
    /// Accepts any non empty segment.
    Splat,
    /// Accepts a remaining path with a `.` followed by an extension.
    ExtensionSplat,
    /// Accepts a segment matching the whole compiled expression.
    Pattern(PathRegex),
}

impl Matcher {
    /// `remaining` is the rest of the path starting at `segment`.
    pub(crate) fn is_match(&self, segment: &str, remaining: &str) -> bool {
        match self {
            Self::Splat => !segment.is_empty(),
            Self::ExtensionSplat => split_extension(remaining).is_some(),
            Self::Pattern(re) => re.is_match(segment),
        }
    }
}

/// Splits a path at its last `.` into path and extension.
///
/// Neither half may be empty and the extension can not span segments.
pub(crate) fn split_extension(path: &str) -> Option<(&str, &str)> {
    path.rsplit_once('.')
        .filter(|(path, ext)| !path.is_empty() && !ext.is_empty() && !ext.contains('/'))
}

/// Anchored expression of a regex segment.
///
/// Every declared capture is wrapped in a named group so nested or anonymous
/// groups never shift the position of the captures following them.
#[derive(Clone, Debug)]
pub(crate) struct PathRegex {
    re: Regex,
    groups: Vec<usize>,
}

impl PathRegex {
    fn new(segment: &Segment<'_>) -> Result<Self, InsertError> {
        let mut src = String::from("^(?:");
        let mut captures = 0;

        for piece in segment.pieces.iter() {
            match piece {
                Piece::Literal(s) | Piece::Group(s) => src.push_str(s),
                Piece::Capture { expr, .. } => {
                    src.push_str(&format!("(?P<{GROUP_PREFIX}{captures}>{expr})"));
                    captures += 1;
                }
            }
        }

        src.push_str(")$");

        let re = Regex::new(&src).map_err(|e| InsertError::InvalidRegex {
            segment: segment.text.to_owned(),
            expr: segment.expr(),
            reason: e.to_string(),
        })?;

        let groups = (0..captures)
            .map(|i| {
                let name = format!("{GROUP_PREFIX}{i}");
                re.capture_names()
                    .position(|n| n == Some(name.as_str()))
                    .unwrap_or_default()
            })
            .collect();

        Ok(Self { re, groups })
    }

    pub(crate) fn is_match(&self, segment: &str) -> bool {
        self.re.is_match(segment)
    }

    /// Values of the declared captures in declaration order.
    ///
    /// A capture that did not participate in the match yields an empty value.
    pub(crate) fn captures<'s>(&self, segment: &'s str) -> Option<Vec<&'s str>> {
        let caps = self.re.captures(segment)?;
        let values = self
            .groups
            .iter()
            .map(|&i| caps.get(i).map_or("", |m| m.as_str()))
            .collect();
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify() {
        let items = [
            ("admin", SegmentKind::Static),
            ("", SegmentKind::Static),
            ("::", SegmentKind::Static),
            ("cms::name", SegmentKind::Static),
            ("*", SegmentKind::Splat),
            ("*.*", SegmentKind::ExtensionSplat),
            ("?:id", SegmentKind::OptionalNamed),
            (":id", SegmentKind::Named),
            (":id:int", SegmentKind::Regex),
            ("?:id:int", SegmentKind::Regex),
            ("cms_:id(.+).html", SegmentKind::Regex),
        ];

        for (text, kind) in items {
            assert_eq!(parse(text).unwrap().kind, kind, "{text}");
        }
    }

    #[test]
    fn regexp_segment() {
        let items: [(&str, &[&str], &str, bool); 12] = [
            (":id", &[":id"], "", false),
            ("?:id", &[":id"], "", true),
            (":id:int", &[":id"], "([0-9]+)", false),
            ("?:id:int", &[":id"], "([0-9]+)", true),
            (":name:string", &[":name"], r"([\w]+)", false),
            ("?:name:string", &[":name"], r"([\w]*)", true),
            (":id([0-9]+)", &[":id"], "([0-9]+)", false),
            (":id([0-9]+)_:name", &[":id", ":name"], "([0-9]+)_(.+)", false),
            (":id(.+)_cms.html", &[":id"], "(.+)_cms.html", false),
            ("cms_:id(.+)_:page(.+).html", &[":id", ":page"], "cms_(.+)_(.+).html", false),
            (":app(a|b|c)", &[":app"], "(a|b|c)", false),
            (r":app\((a|b|c)\)", &[":app"], r"(.+)\((a|b|c)\)", false),
        ];

        for (text, names, expr, optional) in items {
            let segment = parse(text).unwrap();
            assert_eq!(segment.names, names, "{text}");
            assert_eq!(segment.expr(), expr, "{text}");
            assert_eq!(segment.optional, optional, "{text}");
        }
    }

    #[test]
    fn static_key() {
        assert_eq!(parse("::").unwrap().key(), ":");
        assert_eq!(parse("a::b::c").unwrap().key(), "a:b:c");
        assert_eq!(parse("plain").unwrap().key(), "plain");
    }

    #[test]
    fn invalid() {
        assert!(matches!(parse("a:"), Err(InsertError::InvalidParamName { .. })));
        assert!(matches!(parse(":-x"), Err(InsertError::InvalidParamName { .. })));
        assert!(matches!(parse(":id([0-9]+"), Err(InsertError::UnbalancedGroup { .. })));
        assert!(matches!(parse(":id)"), Err(InsertError::UnbalancedGroup { .. })));

        let segment = parse(":id([z-a])").unwrap();
        assert!(matches!(segment.matcher(), Err(InsertError::InvalidRegex { .. })));
    }

    #[test]
    fn captures_by_declaration() {
        let segment = parse(":id((a|b)c)_:name").unwrap();
        let Some(Matcher::Pattern(re)) = segment.matcher().unwrap() else {
            panic!("regex segment must compile to a pattern matcher");
        };

        assert_eq!(re.captures("bc_nike"), Some(vec!["bc", "nike"]));
        assert_eq!(re.captures("xc_nike"), None);
    }

    #[test]
    fn anchored() {
        let segment = parse(":id:int").unwrap();
        let matcher = segment.matcher().unwrap().unwrap();
        assert!(matcher.is_match("123", "123"));
        assert!(!matcher.is_match("a123", "a123"));
        assert!(!matcher.is_match("123a", "123a"));
    }

    #[test]
    fn extension() {
        assert_eq!(split_extension("nice/api.json"), Some(("nice/api", "json")));
        assert_eq!(split_extension("a.tar.gz"), Some(("a.tar", "gz")));
        assert_eq!(split_extension("a.b/c"), None);
        assert_eq!(split_extension("nodot"), None);
        assert_eq!(split_extension(".json"), None);
    }
}
