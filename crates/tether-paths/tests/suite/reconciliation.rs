use std::path::{Path, PathBuf};
use tether_paths::{match_prefixes, PrefixPair};

fn pair(ide: &str, server: &str) -> PrefixPair {
    PrefixPair::new(PathBuf::from(ide), PathBuf::from(server))
}

#[test]
fn ide_root_above_server_root() {
    let found = match_prefixes(["src/main/Foo.java"], ["proj/src/main/Foo.java"]);
    assert_eq!(found, pair("proj", ""));
}

#[test]
fn ambiguous_modules_resolve_the_same_way_every_time() {
    let server = ["moduleA/src/Foo.java", "moduleB/src/Foo.java"];
    let ide = ["src/Foo.java"];

    let first = match_prefixes(server, ide);
    assert_eq!(first, pair("", "moduleA"));
    for _ in 0..20 {
        assert_eq!(match_prefixes(server, ide), first);
    }

    // Input order on the server side must not matter either.
    let reversed = ["moduleB/src/Foo.java", "moduleA/src/Foo.java"];
    assert_eq!(match_prefixes(reversed, ide), first);
}

#[test]
fn disjoint_file_names_assume_identical_roots() {
    assert_eq!(match_prefixes(["Foo.java"], ["Bar.java"]), PrefixPair::default());
    assert_eq!(
        match_prefixes(["sq/src/main/java/File2.java"], ["local/src/main/java/File1.java"]),
        PrefixPair::default()
    );
}

#[test]
fn majority_prefix_beats_outlier() {
    let server = [
        "server/app/src/A.java",
        "server/app/src/B.java",
        "server/app/src/C.java",
        "legacy/src/D.java",
    ];
    let ide = [
        "work/src/A.java",
        "work/src/B.java",
        "work/src/C.java",
        "work/src/D.java",
    ];
    assert_eq!(match_prefixes(server, ide), pair("work", "server/app"));
}

#[test]
fn equal_scores_prefer_deeper_then_smaller_server_prefix() {
    // Four candidates share one common file name; the deepest ones win and
    // the smaller of the two breaks the remaining tie.
    let server = [
        "aq1/module2/pom.xml",
        "aq2/pom.xml",
        "pom.xml",
        "aq1/module1/pom.xml",
    ];
    assert_eq!(match_prefixes(server, ["pom.xml"]), pair("", "aq1/module1"));

    let server = ["aq2/pom.xml", "pom.xml"];
    assert_eq!(match_prefixes(server, ["pom.xml"]), pair("", "aq2"));
}

#[test]
fn totals_equal_up_to_rounding_still_use_the_tie_break() {
    // Ten hits worth 1/10 each add up to slightly less than the single 1.0
    // hit on `z`; the deeper `d1/d2` has to win regardless.
    let mut server = vec!["z/g.txt".to_string()];
    let mut ide = vec!["g.txt".to_string()];
    for i in 0..10 {
        server.push(format!("d1/d2/f{i}.txt"));
        for j in 0..9 {
            server.push(format!("o{j}/f{i}.txt"));
        }
        ide.push(format!("f{i}.txt"));
    }

    assert_eq!(match_prefixes(&server, &ide), pair("", "d1/d2"));
    server.reverse();
    assert_eq!(match_prefixes(&server, &ide), pair("", "d1/d2"));
}

#[test]
fn many_index_files_resolve_to_directory_structure() {
    let ide = [
        "local/sub/index.html",
        "local/sub/product1/index.html",
        "local/sub/product2/index.html",
        "local/sub/product3/index.html",
    ];
    let server = [
        "sq/index.html",
        "sq/news/index.html",
        "sq/news/product1/index.html",
        "sq/news/product2/index.html",
        "sq/news/product3/index.html",
        "sq/products/index.html",
        "sq/products/product1/index.html",
        "sq/products/product2/index.html",
        "sq/products/product3/index.html",
        "sq/company/index.html",
        "sq/company/jobs/index.html",
        "sq/company/news/index.html",
        "sq/company/contact/index.html",
    ];
    // `sq/news` and `sq/products` score the same; `sq/news` sorts first.
    assert_eq!(match_prefixes(server, ide), pair("local/sub", "sq/news"));
}

#[test]
fn most_corroborated_pair_wins() {
    let ide = [
        "local1/src/main/java/A.java",
        "local1/src/main/java/B.java",
        "local2/src/main/java/B.java",
    ];
    let server = [
        "sq1/src/main/java/A.java",
        "sq2/src/main/java/A.java",
        "sq1/src/main/java/B.java",
    ];
    assert_eq!(match_prefixes(server, ide), pair("local1", "sq1"));
}

#[test]
fn deep_match_outweighs_shallow_ones() {
    let ide = [
        "local1/pom.xml",
        "local1/build.properties",
        "local1/src/main/java/com/foo/A.java",
    ];
    let server = [
        "sq1/pom.xml",
        "sq1/build.properties",
        "sq2/src/main/java/com/foo/A.java",
    ];
    assert_eq!(match_prefixes(server, ide), pair("local1", "sq2"));
}

#[test]
fn ambiguous_matches_are_downweighted() {
    let ide = ["local1/pom.xml", "local1/build.properties", "local1/src/A.java"];
    let server = [
        "sq1/pom.xml",
        "sq1/build.properties",
        "sq2/pom.xml",
        "sq2/build.properties",
        "sq3/pom.xml",
        "sq3/build.properties",
        "sq4/src/A.java",
    ];
    assert_eq!(match_prefixes(server, ide), pair("local1", "sq4"));
}

#[test]
fn resolved_pair_translates_issue_paths() {
    let server = ["sq/src/main/java/File.java", "sq/src/main/java/Other.java"];
    let ide = ["local/src/main/java/File.java", "local/src/main/java/Other.java"];
    let found = match_prefixes(server, ide);

    let server_path = found
        .to_server_path(Path::new("local/src/main/java/File.java"))
        .unwrap();
    assert_eq!(tether_paths::to_slash(&server_path), "sq/src/main/java/File.java");

    let ide_path = found.to_ide_path(Path::new("sq/src/main/java/Other.java")).unwrap();
    assert_eq!(tether_paths::to_slash(&ide_path), "local/src/main/java/Other.java");
}

fn generate_children(parent: &str, count: usize, every_depth: usize, depth: usize) -> Vec<String> {
    if depth == 0 {
        return (0..count).map(|i| format!("{parent}/file{i}.txt")).collect();
    }
    if depth % every_depth == 0 {
        (0..count)
            .flat_map(|i| {
                generate_children(&format!("{parent}/folder{i}"), count, every_depth, depth - 1)
            })
            .collect()
    } else {
        generate_children(&format!("{parent}/extra{depth}"), count, every_depth, depth - 1)
    }
}

#[test]
fn wide_trees_resolve_deterministically() {
    let ide = generate_children("local/sub/src", 4, 3, 6);
    let server = generate_children("sq/src", 4, 3, 9);
    assert_eq!(ide.len(), 4usize.pow(3));
    assert_eq!(server.len(), 4usize.pow(4));

    let found = match_prefixes(&server, &ide);
    assert_eq!(found.ide_prefix, PathBuf::from("local/sub/src"));
    assert_eq!(
        tether_paths::to_slash(&found.server_prefix),
        "sq/src/folder0/extra8/extra7"
    );
    assert_eq!(match_prefixes(&server, &ide), found);
}
