/// Matching behavior of a [`Router`](crate::Router).
///
/// Every switch is on by default.
///
/// ```rust
/// use trie_mux::{Options, Router};
///
/// let router = Router::<()>::with_options(Options::new().case_sensitive(false));
/// assert!(!router.options().is_case_sensitive());
/// assert!(router.options().is_path_clean());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    case_sensitive: bool,
    path_clean: bool,
    strict_slash: bool,
    use_encoded_path: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

impl Options {
    pub const fn new() -> Self {
        Self {
            case_sensitive: true,
            path_clean: true,
            strict_slash: true,
            use_encoded_path: true,
        }
    }

    /// When disabled, patterns and request paths are both lower cased before use.
    pub const fn case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = value;
        self
    }

    /// When enabled, runs of `/` in a request path collapse into one, e.g. `/a//b` is matched as `/a/b`.
    pub const fn path_clean(mut self, value: bool) -> Self {
        self.path_clean = value;
        self
    }

    /// When enabled, a path differing from a route only by a trailing `/` yields a redirect suggestion.
    ///
    /// When disabled such a path simply doesn't match.
    pub const fn strict_slash(mut self, value: bool) -> Self {
        self.strict_slash = value;
        self
    }

    /// When enabled, request paths are matched as given.
    ///
    /// When disabled, percent-encoded octets are decoded first, so `/path/foo%2Fbar/to` is
    /// matched as `/path/foo/bar/to`.
    pub const fn use_encoded_path(mut self, value: bool) -> Self {
        self.use_encoded_path = value;
        self
    }

    pub const fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub const fn is_path_clean(&self) -> bool {
        self.path_clean
    }

    pub const fn is_strict_slash(&self) -> bool {
        self.strict_slash
    }

    pub const fn is_use_encoded_path(&self) -> bool {
        self.use_encoded_path
    }
}
