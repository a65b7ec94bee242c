use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Barrier};
use std::thread;
use std::time::Duration;
use tether_storage::proto::{Project, ProjectList, ServerInfos};
use tether_storage::stores::{ProjectsStore, ServerInfoStore};
use tether_storage::{read_message, write_message, StorageRoot, SERVER_INFO_PB};

fn project_list(generation: usize) -> ProjectList {
    let projects_by_key = (0..50)
        .map(|i| {
            let key = format!("org:project-{i}");
            let project = Project {
                key: key.clone(),
                name: format!("Project {i} generation {generation}"),
            };
            (key, project)
        })
        .collect::<BTreeMap<_, _>>();
    ProjectList { projects_by_key }
}

#[test]
fn concurrent_writers_never_expose_partial_records() {
    let tmp = tempfile::tempdir().unwrap();
    let root = Arc::new(StorageRoot::new(tmp.path().join("global")));
    let store = Arc::new(ProjectsStore::new(root));
    store.store(&project_list(0)).unwrap();

    const WRITERS: usize = 4;
    const READERS: usize = 4;
    const ROUNDS: usize = 25;
    let expected: Vec<ProjectList> = (0..=WRITERS).map(project_list).collect();
    let expected = Arc::new(expected);
    let start = Arc::new(Barrier::new(WRITERS + READERS));

    let mut handles = Vec::new();
    for writer in 1..=WRITERS {
        let store = store.clone();
        let start = start.clone();
        handles.push(thread::spawn(move || {
            start.wait();
            let value = project_list(writer);
            for _ in 0..ROUNDS {
                store.store(&value).unwrap();
            }
        }));
    }
    for _ in 0..READERS {
        let store = store.clone();
        let start = start.clone();
        let expected = expected.clone();
        handles.push(thread::spawn(move || {
            start.wait();
            for _ in 0..ROUNDS {
                let seen = store.get_all().unwrap();
                assert!(expected.contains(&seen), "observed a record nobody wrote");
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let last = store.get_all().unwrap();
    assert!(expected[1..].contains(&last));
}

fn server_info(version: &str) -> ServerInfos {
    ServerInfos {
        id: "AX1".to_string(),
        version: version.to_string(),
        status: "UP".to_string(),
    }
}

fn build_tree(root: &StorageRoot, version: &str) -> tempfile::TempDir {
    let staging = root.create_staging_dir().unwrap();
    for name in ["a", "b", "c"] {
        write_message(
            &staging.path().join(name).join(SERVER_INFO_PB),
            &server_info(version),
        )
        .unwrap();
    }
    staging
}

#[test]
fn readers_see_the_old_or_the_new_tree_never_a_mix() {
    let tmp = tempfile::tempdir().unwrap();
    let root = Arc::new(StorageRoot::new(tmp.path().join("global")));
    let first = build_tree(&root, "0");
    root.replace_storage_with(first.path()).unwrap();

    let done = Arc::new(AtomicBool::new(false));
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let root = root.clone();
            let done = done.clone();
            thread::spawn(move || {
                let mut reads = 0usize;
                while !done.load(Ordering::SeqCst) || reads == 0 {
                    let versions: Vec<String> = root.read_action(|path| {
                        ["a", "b", "c"]
                            .iter()
                            .map(|name| {
                                read_message::<ServerInfos>(&path.join(name).join(SERVER_INFO_PB))
                                    .unwrap()
                                    .version
                            })
                            .collect()
                    });
                    assert!(
                        versions.iter().all(|v| *v == versions[0]),
                        "mixed tree observed: {versions:?}"
                    );
                    reads += 1;
                }
            })
        })
        .collect();

    for generation in 1..=20 {
        let staging = build_tree(&root, &generation.to_string());
        root.replace_storage_with(staging.path()).unwrap();
    }
    done.store(true, Ordering::SeqCst);
    for reader in readers {
        reader.join().unwrap();
    }

    let store = ServerInfoStore::new(Arc::new(StorageRoot::new(root.path().join("a"))));
    assert_eq!(store.get().unwrap().version, "20");
}

#[test]
fn swap_waits_for_in_flight_readers() {
    let tmp = tempfile::tempdir().unwrap();
    let root = Arc::new(StorageRoot::new(tmp.path().join("global")));
    let first = build_tree(&root, "old");
    root.replace_storage_with(first.path()).unwrap();

    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let reader = {
        let root = root.clone();
        thread::spawn(move || {
            root.read_action(|path| {
                entered_tx.send(()).unwrap();
                release_rx.recv().unwrap();
                read_message::<ServerInfos>(&path.join("a").join(SERVER_INFO_PB))
                    .unwrap()
                    .version
            })
        })
    };
    entered_rx.recv().unwrap();

    let swapped = Arc::new(AtomicBool::new(false));
    let swapper = {
        let root = root.clone();
        let swapped = swapped.clone();
        thread::spawn(move || {
            let staging = build_tree(&root, "new");
            root.replace_storage_with(staging.path()).unwrap();
            swapped.store(true, Ordering::SeqCst);
        })
    };

    thread::sleep(Duration::from_millis(100));
    assert!(!swapped.load(Ordering::SeqCst), "swap ran under a reader");

    release_tx.send(()).unwrap();
    assert_eq!(reader.join().unwrap(), "old");
    swapper.join().unwrap();
    assert!(swapped.load(Ordering::SeqCst));

    let version = root.read_action(|path| {
        read_message::<ServerInfos>(&path.join("b").join(SERVER_INFO_PB))
            .unwrap()
            .version
    });
    assert_eq!(version, "new");
}
