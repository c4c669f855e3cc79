use core::fmt;

use std::error;

/// Represents errors that can occur when registering a route.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InsertError {
    /// Route pattern contains a doubled `/`, which would produce an empty segment.
    EmptySegment {
        /// The rejected pattern.
        pattern: String,
    },
    /// A parameter was declared without a name or with characters outside `[A-Za-z0-9_]`.
    InvalidParamName {
        /// The segment the parameter was declared in.
        segment: String,
    },
    /// A capture group inside a segment is missing its closing or opening parenthesis.
    UnbalancedGroup {
        /// The segment the group was declared in.
        segment: String,
    },
    /// The expression derived from a segment is not a valid regular expression.
    InvalidRegex {
        /// The segment the expression was derived from.
        segment: String,
        /// The derived expression.
        expr: String,
        /// Reason reported by the regex compiler.
        reason: String,
    },
    /// A handler for the method is already registered on the route.
    MethodConflict {
        /// The conflicting method.
        method: String,
        /// The route the handler is registered on.
        route: String,
    },
    /// The route name is already bound to a route.
    NameConflict {
        /// The conflicting name.
        name: String,
    },
    /// Handlers must be registered with a non-empty method.
    EmptyMethod,
    /// The node id was not produced by this router.
    UnknownNode,
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySegment { pattern } => write!(f, "multi-slash exist in route: {pattern:?}"),
            Self::InvalidParamName { segment } => write!(f, "wrong param format in segment: {segment:?}"),
            Self::UnbalancedGroup { segment } => write!(f, "unbalanced capture group in segment: {segment:?}"),
            Self::InvalidRegex { segment, expr, reason } => {
                write!(f, "wrong regexp format {expr:?} derived from segment {segment:?}: {reason}")
            }
            Self::MethodConflict { method, route } => write!(f, "{method} already defined on route: {route:?}"),
            Self::NameConflict { name } => write!(f, "route already has name {name:?}, can't set"),
            Self::EmptyMethod => f.write_str("handlers must be registered with a method"),
            Self::UnknownNode => f.write_str("node does not belong to this router"),
        }
    }
}

impl error::Error for InsertError {}

/// Represents errors that can occur when matching a path.
///
/// A path that matches no route is not an error. See [`Match::route`](crate::Match::route).
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchError {
    /// The path does not start with `/`.
    MissingLeadingSlash,
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MatchError::MissingLeadingSlash => "match error: path is not start with \"/\"",
        };

        f.write_str(msg)
    }
}

impl error::Error for MatchError {}

/// Represents errors that can occur when building a path from a route.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// A required parameter was not supplied.
    MissingParam {
        /// The missing parameter key, e.g. `:id`.
        key: String,
        /// The pattern segment that needs the parameter.
        segment: String,
    },
    /// A segment contains a group with no parameter name, so no value can be spliced into it.
    AnonymousGroup {
        /// The pattern segment containing the group.
        segment: String,
    },
    /// The node is not the terminal node of any registered pattern.
    NotEndpoint,
    /// No route is bound to the name.
    UnknownName {
        /// The requested name.
        name: String,
    },
    /// The stored pattern could not be parsed again.
    Parse(InsertError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParam { key, segment } => {
                write!(f, "the pairs doesn't exist the key {key} for segment {segment:?}")
            }
            Self::AnonymousGroup { segment } => write!(f, "segment {segment:?} contains a group without a name"),
            Self::NotEndpoint => f.write_str("node is not the endpoint of a route"),
            Self::UnknownName { name } => write!(f, "no route is named {name:?}"),
            Self::Parse(ref e) => fmt::Display::fmt(e, f),
        }
    }
}

impl error::Error for BuildError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InsertError> for BuildError {
    fn from(e: InsertError) -> Self {
        Self::Parse(e)
    }
}
