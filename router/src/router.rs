use std::{borrow::Cow, fmt};

use tracing::trace;

use crate::{
    error::{BuildError, InsertError, MatchError},
    escape,
    options::Options,
    params::Params,
    segment::SegmentKind,
    suffix::SuffixExts,
    tree::{Node, NodeId, Tree},
    url,
};

/// A URL router.
///
/// See [the crate documentation](crate) for details.
#[derive(Clone)]
pub struct Router<H> {
    tree: Tree<H>,
    options: Options,
    suffix_exts: SuffixExts,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    /// Construct a new router with default [`Options`].
    pub fn new() -> Self {
        Self::with_options(Options::new())
    }

    /// Construct a new router with given [`Options`].
    pub fn with_options(options: Options) -> Self {
        Self {
            tree: Tree::new(),
            options,
            suffix_exts: SuffixExts::default(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Extensions used by [`Router::at`] for suffix fallback.
    pub fn suffix_exts(&self) -> &SuffixExts {
        &self.suffix_exts
    }

    pub fn suffix_exts_mut(&mut self) -> &mut SuffixExts {
        &mut self.suffix_exts
    }

    /// Insert a pattern and return the id of its terminal node.
    ///
    /// Inserting the same pattern again returns the same id.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trie_mux::Router;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::<()>::new();
    /// let a = router.insert("/users/:id")?;
    /// let b = router.insert("/users/:id")?;
    /// assert_eq!(a, b);
    /// # Ok(())
    /// # }
    /// ```
    pub fn insert(&mut self, pattern: &str) -> Result<NodeId, InsertError> {
        if self.options.is_case_sensitive() {
            self.tree.insert(pattern, pattern)
        } else {
            self.tree.insert(pattern, &pattern.to_lowercase())
        }
    }

    /// Register a handler for a method on a node.
    pub fn handle(&mut self, node: NodeId, method: &str, handler: H) -> Result<(), InsertError> {
        self.tree.handle(node, method, handler)
    }

    /// Insert a pattern and register a handler for a method on its terminal node.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trie_mux::Router;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.add("GET", "/home", "Welcome!")?;
    /// router.add("PUT", "/home", "Updated")?;
    ///
    /// let matched = router.at("/home")?;
    /// let route = matched.route.unwrap();
    /// assert_eq!(route.handler("GET"), Some(&"Welcome!"));
    /// assert_eq!(route.allow().collect::<Vec<_>>(), ["GET", "PUT"]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn add(&mut self, method: &str, pattern: &str, handler: H) -> Result<NodeId, InsertError> {
        let node = self.insert(pattern)?;
        self.handle(node, method, handler)?;
        Ok(node)
    }

    /// Bind a name to a node so paths can be built with [`Router::build_named`].
    pub fn name(&mut self, node: NodeId, name: &str) -> Result<(), InsertError> {
        self.tree.name(node, name)
    }

    /// Node bound to the name.
    pub fn named(&self, name: &str) -> Option<NodeId> {
        self.tree.named(name)
    }

    /// Read view of a node. `None` when the id was not produced by this router.
    pub fn route(&self, node: NodeId) -> Option<Route<'_, H>> {
        self.tree.get(node).map(|_| Route { tree: &self.tree, id: node })
    }

    /// Tries to find a route matching the given path.
    ///
    /// A path matching nothing is not an error. The returned [`Match`] carries no route and
    /// possibly a redirect suggestion in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trie_mux::Router;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.add("GET", "/abc/:id", 1)?;
    /// router.add("GET", "/abc/99", 2)?;
    ///
    /// let matched = router.at("/abc/123")?;
    /// assert_eq!(matched.params.get(":id"), Some("123"));
    /// assert_eq!(matched.route.unwrap().handler("GET"), Some(&1));
    ///
    /// let matched = router.at("/abc/99")?;
    /// assert!(matched.params.is_empty());
    /// assert_eq!(matched.route.unwrap().handler("GET"), Some(&2));
    ///
    /// assert!(router.at("abc").is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn at(&self, path: &str) -> Result<Match<'_, H>, MatchError> {
        self.at_with(path, &self.suffix_exts)
    }

    /// [`Router::at`] with a caller owned set of suffix extensions.
    pub fn at_with(&self, path: &str, exts: &SuffixExts) -> Result<Match<'_, H>, MatchError> {
        if !path.starts_with('/') {
            return Err(MatchError::MissingLeadingSlash);
        }

        let path = self.canonicalize(path);
        let lookup = self.tree.at(&path, self.options.is_strict_slash(), exts);

        match (lookup.node, lookup.redirect.as_deref()) {
            (Some(id), _) => trace!(path = %path, route = %self.tree.path(id), "route matched"),
            (None, Some(redirect)) => trace!(path = %path, redirect, "trailing slash redirect"),
            (None, None) => trace!(path = %path, "no route matched"),
        }

        Ok(Match {
            route: lookup.node.map(|id| Route { tree: &self.tree, id }),
            params: lookup.params,
            redirect: lookup.redirect,
        })
    }

    fn canonicalize<'p>(&self, path: &'p str) -> Cow<'p, str> {
        let path = if self.options.is_use_encoded_path() {
            Cow::Borrowed(path)
        } else {
            escape::decode(path)
        };

        let path = if self.options.is_path_clean() && path.contains("//") {
            Cow::Owned(clean(&path))
        } else {
            path
        };

        if self.options.is_case_sensitive() {
            path
        } else {
            Cow::Owned(path.to_lowercase())
        }
    }

    /// Build a path from the pattern of a node.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trie_mux::Router;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::<()>::new();
    /// let node = router.insert("/v1/shop/:id([0-9]+)_:name")?;
    ///
    /// let path = router.build_url(node, [(":id", "123"), (":name", "nike")])?;
    /// assert_eq!(path, "/v1/shop/123_nike");
    /// # Ok(())
    /// # }
    /// ```
    pub fn build_url<I, K, V>(&self, node: NodeId, pairs: I) -> Result<String, BuildError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let pattern = self
            .tree
            .get(node)
            .and_then(|node| node.pattern.as_deref())
            .ok_or(BuildError::NotEndpoint)?;
        let pairs = pairs.into_iter().collect::<Vec<_>>();
        url::build(pattern, &pairs)
    }

    /// Build a path from the pattern of a named node.
    pub fn build_named<I, K, V>(&self, name: &str, pairs: I) -> Result<String, BuildError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let node = self
            .named(name)
            .ok_or_else(|| BuildError::UnknownName { name: name.to_owned() })?;
        self.build_url(node, pairs)
    }
}

// collapse every run of '/' into one.
fn clean(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if c != '/' || !out.ends_with('/') {
            out.push(c);
        }
    }
    out
}

/// Result of [`Router::at`].
pub struct Match<'r, H> {
    /// The matched route. `None` when nothing matched.
    pub route: Option<Route<'r, H>>,
    /// Captured parameters. May be partially filled when nothing matched.
    pub params: Params,
    /// Suggested path differing from the requested one by a trailing `/`.
    ///
    /// Only present when nothing matched and [`Options::strict_slash`] is on.
    pub redirect: Option<String>,
}

impl<H> fmt::Debug for Match<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("route", &self.route)
            .field("params", &self.params)
            .field("redirect", &self.redirect)
            .finish()
    }
}

/// Read view of a node of a [`Router`].
pub struct Route<'r, H> {
    tree: &'r Tree<H>,
    id: NodeId,
}

impl<H> Clone for Route<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for Route<'_, H> {}

impl<H> fmt::Debug for Route<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("id", &self.id)
            .field("segment", &self.segment())
            .field("pattern", &self.pattern())
            .finish()
    }
}

impl<'r, H> Route<'r, H> {
    fn node(&self) -> &'r Node<H> {
        // a route is only handed out for ids of its tree.
        self.tree.node(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Handler registered for the method.
    pub fn handler(&self, method: &str) -> Option<&'r H> {
        self.node().handler(method)
    }

    /// Methods with a registered handler in registration order.
    pub fn allow(&self) -> impl Iterator<Item = &'r str> {
        self.node().handlers.iter().map(|(method, _)| method.as_ref())
    }

    /// The full pattern of the first route registered on this node.
    pub fn pattern(&self) -> Option<&'r str> {
        self.node().pattern.as_deref()
    }

    /// Raw pattern text of the segment this node was created from.
    pub fn segment(&self) -> &'r str {
        &self.node().segment
    }

    pub fn kind(&self) -> SegmentKind {
        self.node().kind
    }

    /// Parameter names captured by this node, with their leading colon.
    pub fn names(&self) -> &'r [String] {
        &self.node().names
    }

    pub fn is_endpoint(&self) -> bool {
        self.node().endpoint
    }

    pub fn is_optional(&self) -> bool {
        self.node().optional
    }

    /// Segments from the root down to this node joined by `/`.
    pub fn path(&self) -> String {
        self.tree.path(self.id)
    }

    /// Build a path from the pattern of this node. See [`Router::build_url`].
    pub fn build_url<I, K, V>(&self, pairs: I) -> Result<String, BuildError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let pattern = self.pattern().ok_or(BuildError::NotEndpoint)?;
        let pairs = pairs.into_iter().collect::<Vec<_>>();
        url::build(pattern, &pairs)
    }
}
