#![no_main]
use libfuzzer_sys::fuzz_target;
use trie_mux::{Options, Router};

fuzz_target!(|data: (Vec<(String, i32)>, String, bool)| {
    let mut router = Router::with_options(Options::new().case_sensitive(data.2));

    for (pattern, item) in data.0 {
        let Ok(node) = router.insert(&pattern) else {
            return;
        };
        let _ = router.handle(node, "GET", item);
    }

    if let Ok(matched) = router.at(&data.1) {
        if let Some(route) = matched.route {
            let _ = route.build_url(&matched.params);
        }
    }
});
