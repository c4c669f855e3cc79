use trie_mux::{InsertError, Options, Router};

struct InsertTest(Vec<(&'static str, Result<(), InsertError>)>);

impl InsertTest {
    fn run(self) {
        let mut router = Router::new();
        for (route, expected) in self.0 {
            let got = router.add("GET", route, route.to_owned()).map(|_| ());
            assert_eq!(got, expected, "{route}");
        }
    }
}

fn empty_segment(pattern: &str) -> InsertError {
    InsertError::EmptySegment {
        pattern: pattern.to_owned(),
    }
}

fn param_name(segment: &str) -> InsertError {
    InsertError::InvalidParamName {
        segment: segment.to_owned(),
    }
}

fn unbalanced(segment: &str) -> InsertError {
    InsertError::UnbalancedGroup {
        segment: segment.to_owned(),
    }
}

fn method_conflict(route: &str) -> InsertError {
    InsertError::MethodConflict {
        method: "GET".to_owned(),
        route: route.to_owned(),
    }
}

#[test]
fn grammar() {
    InsertTest(vec![
        ("/", Ok(())),
        ("/admin", Ok(())),
        ("/admin/", Ok(())),
        ("/:id", Ok(())),
        ("/?:id", Ok(())),
        ("/*", Ok(())),
        ("/*.*", Ok(())),
        ("/a/:id:int", Ok(())),
        ("/a/?:id:int", Ok(())),
        ("/a/:name:string", Ok(())),
        ("/a/:id([0-9]+)_:name", Ok(())),
        ("/a/cms_:id(.+)_:page(.+).html", Ok(())),
        (r"/a/:app\((a|b|c)\)", Ok(())),
        ("/api/::/:ID", Ok(())),
        ("/api/cms::name::hello", Ok(())),
        ("no/leading/slash", Ok(())),
    ])
    .run();
}

#[test]
fn doubled_separator() {
    InsertTest(vec![
        ("/a//b", Err(empty_segment("/a//b"))),
        ("//", Err(empty_segment("//"))),
        ("/a/b//", Err(empty_segment("/a/b//"))),
        ("/a/b", Ok(())),
    ])
    .run();
}

#[test]
fn invalid_segment() {
    InsertTest(vec![
        ("/a/x:", Err(param_name("x:"))),
        ("/a/:-", Err(param_name(":-"))),
        ("/a/:id([0-9]+", Err(unbalanced(":id([0-9]+"))),
        ("/a/:id)", Err(unbalanced(":id)"))),
        ("/a/:id", Ok(())),
    ])
    .run();
}

#[test]
fn invalid_regex() {
    let mut router = Router::<()>::new();
    let err = router.insert("/a/:id([z-a])").unwrap_err();
    assert!(
        matches!(&err, InsertError::InvalidRegex { segment, expr, .. } if segment == ":id([z-a])" && expr == "([z-a])"),
        "{err}"
    );

    // nothing of the failed route is left behind.
    assert!(router.at("/a").unwrap().route.is_none());
    assert!(router.at("/a").unwrap().redirect.is_none());
}

#[test]
fn idempotent() {
    let mut router = Router::<()>::new();

    for pattern in ["/a", "/a/b", "/:id/*", "/v1/shop/:id([0-9]+)_:name", "/api/::/x", "/topic/?:auth:int"] {
        let a = router.insert(pattern).unwrap();
        let b = router.insert(pattern).unwrap();
        assert_eq!(a, b, "{pattern}");
    }

    // a missing leading slash reaches the same node.
    assert_eq!(router.insert("a/b").unwrap(), router.insert("/a/b").unwrap());

    // distinct segment text means distinct nodes.
    assert_ne!(router.insert("/:id").unwrap(), router.insert("/:name").unwrap());
}

#[test]
fn shared_prefix() {
    let mut router = Router::<()>::new();
    let b = router.insert("/a/b").unwrap();
    let c = router.insert("/a/b/c").unwrap();

    let b = router.route(b).unwrap();
    let c = router.route(c).unwrap();
    assert_eq!(c.path(), "/a/b/c");
    assert!(b.is_endpoint());
    assert_eq!(b.pattern(), Some("/a/b"));
}

#[test]
fn intermediate_node_is_not_endpoint() {
    let mut router = Router::new();
    router.add("GET", "/a/b/c", ()).unwrap();

    let matched = router.at("/a/b").unwrap();
    assert!(matched.route.is_none());
}

#[test]
fn method_conflicts() {
    InsertTest(vec![
        ("/a/:id", Ok(())),
        ("/a/:id", Err(method_conflict("/a/:id"))),
        ("a/:id", Err(method_conflict("/a/:id"))),
        ("/a/:name", Ok(())),
    ])
    .run();

    let mut router = Router::new();
    let node = router.insert("/a").unwrap();
    router.handle(node, "GET", 1).unwrap();
    router.handle(node, "POST", 2).unwrap();
    assert!(matches!(router.handle(node, "POST", 3), Err(InsertError::MethodConflict { .. })));
    assert_eq!(router.handle(node, "", 3), Err(InsertError::EmptyMethod));
}

#[test]
fn name_conflicts() {
    let mut router = Router::<()>::new();
    let a = router.insert("/a").unwrap();
    let b = router.insert("/b").unwrap();

    router.name(a, "home").unwrap();
    assert_eq!(
        router.name(b, "home"),
        Err(InsertError::NameConflict {
            name: "home".to_owned()
        })
    );
    router.name(b, "other").unwrap();

    assert_eq!(router.named("home"), Some(a));
    assert_eq!(router.named("other"), Some(b));
    assert_eq!(router.named("missing"), None);
}

#[test]
fn foreign_node() {
    let mut other = Router::<()>::new();
    let node = other.insert("/x/y/z").unwrap();

    let mut router = Router::<()>::new();
    assert_eq!(router.handle(node, "GET", ()), Err(InsertError::UnknownNode));
    assert_eq!(router.name(node, "x"), Err(InsertError::UnknownNode));
}

#[test]
fn case_insensitive_conflict() {
    let mut router = Router::with_options(Options::new().case_sensitive(false));
    router.add("GET", "/Users/:ID", ()).unwrap();
    assert!(matches!(
        router.add("GET", "/users/:id", ()),
        Err(InsertError::MethodConflict { .. })
    ));
}

#[test]
fn error_display() {
    assert_eq!(
        empty_segment("/a//b").to_string(),
        r#"multi-slash exist in route: "/a//b""#
    );
    assert_eq!(
        method_conflict("/a").to_string(),
        r#"GET already defined on route: "/a""#
    );
    assert_eq!(
        InsertError::NameConflict {
            name: "home".to_owned()
        }
        .to_string(),
        r#"route already has name "home", can't set"#
    );
}
