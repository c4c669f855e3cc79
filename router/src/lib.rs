//! A trie based url path router with named, optional, wildcard and regular expression segments.
//!
//!```rust
//!use trie_mux::Router;
//!
//!fn main() -> Result<(), Box<dyn std::error::Error>> {
//!    let mut router = Router::new();
//!    router.add("GET", "/home", "Welcome!")?;
//!    router.add("GET", "/users/:id", "A User")?;
//!
//!    let matched = router.at("/users/978")?;
//!    assert_eq!(matched.params.get(":id"), Some("978"));
//!    assert_eq!(matched.route.unwrap().handler("GET"), Some(&"A User"));
//!
//!    Ok(())
//!}
//!```
//!
//!# Segments
//!
//!A pattern is split on `/` and every segment is one of the following kinds. Captured values are
//!keyed by their name including the leading `:`.
//!
//!Named parameters like `:id` match any single segment.
//!
//!```rust
//!# use trie_mux::Router;
//!# fn main() -> Result<(), Box<dyn std::error::Error>> {
//!let mut router = Router::<()>::new();
//!router.insert("/v1/shop/:id/:name")?;
//!
//!let matched = router.at("/v1/shop/123/nike")?;
//!assert_eq!(matched.params.get(":id"), Some("123"));
//!assert_eq!(matched.params.get(":name"), Some("nike"));
//!# Ok(())
//!# }
//!```
//!
//!Optional parameters like `?:id` may be left out when they are the last segment of a path.
//!
//!```rust
//!# use trie_mux::Router;
//!# fn main() -> Result<(), Box<dyn std::error::Error>> {
//!let mut router = Router::<()>::new();
//!router.insert("/api/projects/:pid/members/?:mid")?;
//!
//!let matched = router.at("/api/projects/1/members")?;
//!assert!(matched.route.is_some());
//!assert!(!matched.params.contains_key(":mid"));
//!
//!let matched = router.at("/api/projects/1/members/2")?;
//!assert_eq!(matched.params.get(":mid"), Some("2"));
//!# Ok(())
//!# }
//!```
//!
//!Regular expression segments constrain their captures. `:int` and `:string` are shorthands for
//!`([0-9]+)` and `([\w]+)`, a parenthesized group right after a name is used as is and a name
//!without any of these captures `(.+)`. A segment may declare several captures and contain
//!literal text.
//!
//!```rust
//!# use trie_mux::Router;
//!# fn main() -> Result<(), Box<dyn std::error::Error>> {
//!let mut router = Router::<()>::new();
//!router.insert("/abc/:id:int")?;
//!router.insert("/v1/shop/cms_:id(.+)_:page(.+).html")?;
//!
//!assert_eq!(router.at("/abc/123")?.params.get(":id"), Some("123"));
//!assert!(router.at("/abc/xyz")?.route.is_none());
//!
//!let matched = router.at("/v1/shop/cms_123_1.html")?;
//!assert_eq!(matched.params.get(":id"), Some("123"));
//!assert_eq!(matched.params.get(":page"), Some("1"));
//!# Ok(())
//!# }
//!```
//!
//!A splat `*` captures one or more segments under `:splat`. When followed by more segments it
//!captures the shortest span that lets the rest of the path match. An extension splat `*.*`
//!captures the remaining path under `:path` and its extension under `:ext`.
//!
//!```rust
//!# use trie_mux::Router;
//!# fn main() -> Result<(), Box<dyn std::error::Error>> {
//!let mut router = Router::<()>::new();
//!router.insert("/cc/*/dd")?;
//!router.insert("/dl/*.*")?;
//!
//!assert_eq!(router.at("/cc/2009/11/dd")?.params.get(":splat"), Some("2009/11"));
//!
//!let matched = router.at("/dl/nice/api.json")?;
//!assert_eq!(matched.params.get(":path"), Some("nice/api"));
//!assert_eq!(matched.params.get(":ext"), Some("json"));
//!# Ok(())
//!# }
//!```
//!
//!A literal `:` is written as `::`. Any segment containing `::` is static text.
//!
//!```rust
//!# use trie_mux::Router;
//!# fn main() -> Result<(), Box<dyn std::error::Error>> {
//!let mut router = Router::<()>::new();
//!router.insert("/api/::/:ID")?;
//!
//!assert_eq!(router.at("/api/:/123")?.params.get(":ID"), Some("123"));
//!# Ok(())
//!# }
//!```
//!
//!# Priority
//!
//!Static segments are tried first, then named parameters and last regular expression and splat
//!segments. Within each group the segment registered first wins.
//!
//!# Suffix extensions
//!
//!When the last segment of a path matches nothing, the extensions of [`SuffixExts`] are stripped
//!in turn and the stripped one is captured under `:ext`.
//!
//!```rust
//!# use trie_mux::Router;
//!# fn main() -> Result<(), Box<dyn std::error::Error>> {
//!let mut router = Router::<()>::new();
//!router.insert("/customer/login")?;
//!
//!let matched = router.at("/customer/login.json")?;
//!assert!(matched.route.is_some());
//!assert_eq!(matched.params.get(":ext"), Some("json"));
//!# Ok(())
//!# }
//!```
//!
//!# Building paths
//!
//!A route's pattern can be rendered back into a path, directly from its node or by name.
//!
//!```rust
//!# use trie_mux::Router;
//!# fn main() -> Result<(), Box<dyn std::error::Error>> {
//!let mut router = Router::<()>::new();
//!let node = router.insert("/ee/:year/*/ff")?;
//!router.name(node, "archive")?;
//!
//!let path = router.build_named("archive", [(":year", "2009"), (":splat", "11")])?;
//!assert_eq!(path, "/ee/2009/11/ff");
//!# Ok(())
//!# }
//!```

#![forbid(unsafe_code)]

mod error;
mod escape;
mod options;
mod router;
mod segment;
mod suffix;
mod tree;
mod url;

pub mod mux;
pub mod params;

pub use error::{BuildError, InsertError, MatchError};
pub use mux::{Dispatch, Mux};
pub use options::Options;
pub use params::Params;
pub use router::{Match, Route, Router};
pub use segment::SegmentKind;
pub use suffix::{SuffixExts, SuffixIter};
pub use tree::NodeId;
