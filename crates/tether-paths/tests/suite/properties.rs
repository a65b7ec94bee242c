use proptest::prelude::*;
use std::path::Path;
use tether_paths::{match_prefixes, path_segments};

const PROPTEST_CASES: u32 = 128;

fn arb_path() -> impl Strategy<Value = String> {
    // A tiny alphabet keeps collisions between the two sides likely.
    prop::collection::vec(
        prop::sample::select(vec!["a", "b", "src", "main", "Foo.java", "pom.xml"]),
        1..6,
    )
    .prop_map(|segments| segments.join("/"))
}

fn arb_paths() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_path(), 0..12)
}

fn is_leading_prefix_of_any(prefix: &Path, paths: &[String]) -> bool {
    let prefix = path_segments(prefix);
    prefix.is_empty()
        || paths.iter().any(|path| {
            let segments = path_segments(Path::new(path));
            segments.len() > prefix.len() && segments[..prefix.len()] == prefix[..]
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn matching_is_deterministic(server in arb_paths(), ide in arb_paths()) {
        let first = match_prefixes(&server, &ide);
        let second = match_prefixes(&server, &ide);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prefixes_come_from_the_inputs(server in arb_paths(), ide in arb_paths()) {
        let found = match_prefixes(&server, &ide);
        prop_assert!(is_leading_prefix_of_any(&found.server_prefix, &server));
        prop_assert!(is_leading_prefix_of_any(&found.ide_prefix, &ide));
    }

    #[test]
    fn server_root_offset_is_recovered(ide in prop::collection::vec(arb_path(), 1..12)) {
        // Every IDE file exists on the server under one extra directory, and
        // the server has nothing else: that directory must be the answer.
        let server: Vec<String> = ide.iter().map(|path| format!("root/{path}")).collect();
        let found = match_prefixes(&server, &ide);
        prop_assert_eq!(tether_paths::to_slash(&found.server_prefix), "root");
        prop_assert!(found.ide_prefix.as_os_str().is_empty());
    }
}
