//! Method dispatch on top of [`Router`].
//!
//! [`Mux`] performs no I/O. It turns a method and a path into a [`Dispatch`] describing what a
//! server should do with the request.
//!
//! ```rust
//! use http::{Method, StatusCode};
//! use trie_mux::{mux::{Dispatch, Mux}, InsertError};
//!
//! # fn main() -> Result<(), InsertError> {
//! let mut mux = Mux::new();
//! mux.get("/users/:id", "show user")?;
//! mux.put("/users/:id", "update user")?;
//!
//! match mux.dispatch(&Method::GET, "/users/7") {
//!     Dispatch::Handler { handler, params } => {
//!         assert_eq!(*handler, "show user");
//!         assert_eq!(params.get(":id"), Some("7"));
//!     }
//!     _ => unreachable!(),
//! }
//!
//! let dispatch = mux.dispatch(&Method::DELETE, "/users/7");
//! assert_eq!(dispatch.status(), StatusCode::METHOD_NOT_ALLOWED);
//! assert!(matches!(dispatch, Dispatch::MethodNotAllowed { allow } if allow == "GET, PUT"));
//! # Ok(())
//! # }
//! ```

use http::{Method, StatusCode};

use crate::{
    error::{InsertError, MatchError},
    options::Options,
    params::Params,
    router::Router,
    tree::NodeId,
};

/// Router registering handlers per HTTP method.
#[derive(Clone)]
pub struct Mux<H> {
    router: Router<H>,
    default: Option<H>,
}

impl<H> Default for Mux<H> {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! method {
    ($($(#[$meta:meta])* $name:ident => $method:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(&mut self, pattern: &str, handler: H) -> Result<NodeId, InsertError> {
                self.handle(Method::$method, pattern, handler)
            }
        )*
    };
}

impl<H> Mux<H> {
    pub fn new() -> Self {
        Self::with_options(Options::new())
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            router: Router::with_options(options),
            default: None,
        }
    }

    pub fn router(&self) -> &Router<H> {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut Router<H> {
        &mut self.router
    }

    /// Handler used when no route or no method handler is found.
    pub fn default_handler(&mut self, handler: H) {
        self.default = Some(handler);
    }

    /// Register a handler for a method and pattern.
    pub fn handle(&mut self, method: Method, pattern: &str, handler: H) -> Result<NodeId, InsertError> {
        self.router.add(method.as_str(), pattern, handler)
    }

    /// Register a handler for a method given as text. The method is upper cased.
    pub fn handle_str(&mut self, method: &str, pattern: &str, handler: H) -> Result<NodeId, InsertError> {
        if method.is_empty() {
            return Err(InsertError::EmptyMethod);
        }
        self.router.add(&method.to_uppercase(), pattern, handler)
    }

    method! {
        /// Register a GET handler.
        get => GET,
        /// Register a HEAD handler.
        head => HEAD,
        /// Register a POST handler.
        post => POST,
        /// Register a PUT handler.
        put => PUT,
        /// Register a PATCH handler.
        patch => PATCH,
        /// Register a DELETE handler.
        delete => DELETE,
        /// Register an OPTIONS handler.
        options => OPTIONS,
    }

    /// Decide how a request should be served.
    pub fn dispatch(&self, method: &Method, path: &str) -> Dispatch<'_, H> {
        let matched = match self.router.at(path) {
            Ok(matched) => matched,
            Err(e) => return Dispatch::Malformed(e),
        };

        let Some(route) = matched.route else {
            // redirect for slash url:
            // route /a/b  path /a/b/ -> /a/b
            // route /a/b/ path /a/b  -> /a/b/
            if let Some(location) = matched.redirect {
                let status = if *method == Method::GET {
                    StatusCode::MOVED_PERMANENTLY
                } else {
                    StatusCode::TEMPORARY_REDIRECT
                };
                return Dispatch::Redirect { location, status };
            }

            return match self.default.as_ref() {
                Some(handler) => Dispatch::Handler {
                    handler,
                    params: matched.params,
                },
                None => Dispatch::NotFound,
            };
        };

        if let Some(handler) = route.handler(method.as_str()) {
            return Dispatch::Handler {
                handler,
                params: matched.params,
            };
        }

        let allow = || route.allow().collect::<Vec<_>>().join(", ");

        if *method == Method::OPTIONS {
            return Dispatch::Preflight { allow: allow() };
        }

        match self.default.as_ref() {
            Some(handler) => Dispatch::Handler {
                handler,
                params: matched.params,
            },
            None => Dispatch::MethodNotAllowed { allow: allow() },
        }
    }
}

/// Outcome of [`Mux::dispatch`].
#[derive(Debug)]
pub enum Dispatch<'a, H> {
    /// Call the handler with the captured params.
    Handler { handler: &'a H, params: Params },
    /// Redirect to the path differing by a trailing `/`.
    Redirect { location: String, status: StatusCode },
    /// Answer an OPTIONS request with the allowed methods of the route.
    Preflight { allow: String },
    /// The route exists but has no handler for the method.
    MethodNotAllowed { allow: String },
    /// No route matched.
    NotFound,
    /// The path can not be matched at all.
    Malformed(MatchError),
}

impl<H> Dispatch<'_, H> {
    /// Status code a server should answer with, [`StatusCode::OK`] for handlers.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Handler { .. } => StatusCode::OK,
            Self::Redirect { status, .. } => *status,
            Self::Preflight { .. } => StatusCode::NO_CONTENT,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Malformed(_) => StatusCode::NOT_IMPLEMENTED,
        }
    }
}
