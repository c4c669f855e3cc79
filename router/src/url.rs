//! Rendering of concrete paths from route patterns.

use crate::{
    error::BuildError,
    escape,
    segment::{self, Piece, Segment, SegmentKind},
};

/// Render `pattern` with values looked up from `pairs`. Later pairs win over earlier ones.
pub(crate) fn build<K, V>(pattern: &str, pairs: &[(K, V)]) -> Result<String, BuildError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let get = |key: &str| {
        pairs
            .iter()
            .rev()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    };

    let mut results = Vec::new();

    for text in pattern.split('/') {
        let segment = segment::parse(text)?;

        let require = |key: &str| {
            get(key).ok_or_else(|| BuildError::MissingParam {
                key: key.to_owned(),
                segment: text.to_owned(),
            })
        };

        match segment.kind {
            SegmentKind::Static => results.push(segment.key().into_owned()),
            SegmentKind::Splat => results.push(require(segment::SPLAT)?.to_owned()),
            SegmentKind::ExtensionSplat => {
                let path = require(segment::PATH)?;
                let ext = require(segment::EXT)?;
                results.push(format!("{path}.{ext}"));
            }
            SegmentKind::OptionalNamed => {
                if let Some(value) = get(segment.names[0].as_str()) {
                    results.push(value.to_owned());
                }
            }
            SegmentKind::Named => results.push(require(segment.names[0].as_str())?.to_owned()),
            SegmentKind::Regex => {
                if let Some(rendered) = render_regex(&segment, &get)? {
                    results.push(rendered);
                }
            }
        }
    }

    Ok(results.join("/"))
}

// an optional segment without any supplied capture is left out.
fn render_regex<'a>(
    segment: &Segment<'_>,
    get: impl Fn(&str) -> Option<&'a str>,
) -> Result<Option<String>, BuildError> {
    if segment.optional && segment.names.iter().all(|name| get(name.as_str()).is_none()) {
        return Ok(None);
    }

    let mut out = String::new();

    for piece in segment.pieces.iter() {
        match piece {
            Piece::Literal(literal) => out.push_str(&escape::unescape_regex_literal(literal)),
            Piece::Capture { name, .. } => {
                let value = get(name.as_str()).ok_or_else(|| BuildError::MissingParam {
                    key: name.clone(),
                    segment: segment.text.to_owned(),
                })?;
                out.push_str(value);
            }
            Piece::Group(_) => {
                return Err(BuildError::AnonymousGroup {
                    segment: segment.text.to_owned(),
                })
            }
        }
    }

    Ok(Some(out))
}
