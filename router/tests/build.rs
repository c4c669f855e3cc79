use trie_mux::{BuildError, Router};

fn missing(key: &str, segment: &str) -> BuildError {
    BuildError::MissingParam {
        key: key.to_owned(),
        segment: segment.to_owned(),
    }
}

struct BuildTest {
    pattern: &'static str,
    builds: Vec<(Vec<(&'static str, &'static str)>, Result<&'static str, BuildError>)>,
}

impl BuildTest {
    fn run(self) {
        let mut router = Router::<()>::new();
        let node = router.insert(self.pattern).unwrap();

        for (pairs, expected) in self.builds {
            let got = router.build_url(node, pairs.iter().copied());
            assert_eq!(got, expected.map(str::to_owned), "{}", self.pattern);
        }
    }
}

#[test]
fn static_and_escape() {
    BuildTest {
        pattern: "/api/::/cms::name::hello",
        builds: vec![(vec![], Ok("/api/:/cms:name:hello"))],
    }
    .run();
}

#[test]
fn splat() {
    BuildTest {
        pattern: "/files/*",
        builds: vec![
            (vec![(":splat", "a/b/c")], Ok("/files/a/b/c")),
            (vec![], Err(missing(":splat", "*"))),
        ],
    }
    .run();
}

#[test]
fn extension_splat() {
    BuildTest {
        pattern: "/*.*",
        builds: vec![
            (vec![(":path", "nice/api"), (":ext", "json")], Ok("/nice/api.json")),
            (vec![(":ext", "json")], Err(missing(":path", "*.*"))),
            (vec![(":path", "nice/api")], Err(missing(":ext", "*.*"))),
        ],
    }
    .run();
}

#[test]
fn named_and_optional() {
    BuildTest {
        pattern: "/api/projects/:pid/members/?:mid",
        builds: vec![
            (vec![(":pid", "1")], Ok("/api/projects/1/members")),
            (vec![(":pid", "1"), (":mid", "2")], Ok("/api/projects/1/members/2")),
            (vec![(":mid", "2")], Err(missing(":pid", ":pid"))),
        ],
    }
    .run();
}

#[test]
fn regex() {
    BuildTest {
        pattern: "/v1/:v(.+)_cms/ttt_:id(.+)_:page(.+).html",
        builds: vec![
            (
                vec![(":v", "2"), (":id", "123"), (":page", "1")],
                Ok("/v1/2_cms/ttt_123_1.html"),
            ),
            (
                vec![(":v", "2"), (":id", "123")],
                Err(missing(":page", "ttt_:id(.+)_:page(.+).html")),
            ),
        ],
    }
    .run();

    BuildTest {
        pattern: "/topic/?:auth:int",
        builds: vec![(vec![], Ok("/topic")), (vec![(":auth", "9")], Ok("/topic/9"))],
    }
    .run();

    BuildTest {
        pattern: r"/v1/shop/:id\((a|b|c)\)",
        builds: vec![(
            vec![(":id", "123")],
            Err(BuildError::AnonymousGroup {
                segment: r":id\((a|b|c)\)".to_owned(),
            }),
        )],
    }
    .run();
}

#[test]
fn extra_pairs_ignored() {
    let mut router = Router::<()>::new();
    let node = router.insert("/a/:id").unwrap();
    assert_eq!(
        router.build_url(node, [(":x", "y"), (":id", "1")]),
        Ok("/a/1".to_owned())
    );

    let route = router.route(node).unwrap();
    assert_eq!(route.build_url([(":id", "2")]), Ok("/a/2".to_owned()));
}

#[test]
fn foreign_node() {
    let mut other = Router::<()>::new();
    let node = other.insert("/x/y/z").unwrap();

    let router = Router::<()>::new();
    assert_eq!(router.build_url(node, [(":x", "y")]), Err(BuildError::NotEndpoint));
}

#[test]
fn named() {
    let mut router = Router::<()>::new();
    let node = router.insert("/ee/:year/*/ff").unwrap();
    router.name(node, "archive").unwrap();

    assert_eq!(
        router.build_named("archive", [(":year", "2009"), (":splat", "11")]),
        Ok("/ee/2009/11/ff".to_owned())
    );
    assert_eq!(
        router.build_named("missing", [(":year", "2009")]),
        Err(BuildError::UnknownName {
            name: "missing".to_owned()
        })
    );
}

#[test]
fn error_display() {
    assert_eq!(
        missing(":id", ":id").to_string(),
        r#"the pairs doesn't exist the key :id for segment ":id""#
    );
}
