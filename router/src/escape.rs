use std::borrow::Cow;

use percent_encoding::percent_decode_str;

/// The escape sequence for a literal `:` inside a static segment.
pub(crate) const ESCAPED_COLON: &str = "::";

/// Returns `true` if the segment contains an escaped colon, i.e. '::'.
#[inline]
pub(crate) fn is_escaped(segment: &str) -> bool {
    segment.contains(ESCAPED_COLON)
}

/// Collapses every escaped colon ('::') of a segment into a literal ':'.
///
/// Segments without escapes are borrowed as is.
pub(crate) fn unescape(segment: &str) -> Cow<'_, str> {
    if is_escaped(segment) {
        Cow::Owned(segment.replace(ESCAPED_COLON, ":"))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Decodes percent-encoded octets of a request path.
///
/// Invalid utf-8 sequences produced by decoding are replaced with `U+FFFD`.
pub(crate) fn decode(path: &str) -> Cow<'_, str> {
    percent_decode_str(path).decode_utf8_lossy()
}

/// Removes escapes of a regular expression literal so it can be written into a path.
///
/// `\.` becomes `.` and `\(` becomes `(`. A trailing lone backslash is kept.
pub(crate) fn unescape_regex_literal(literal: &str) -> Cow<'_, str> {
    if !literal.contains('\\') {
        return Cow::Borrowed(literal);
    }

    let mut out = String::with_capacity(literal.len());
    let mut chars = literal.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push(chars.next().unwrap_or('\\')),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}
