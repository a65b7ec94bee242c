use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tether_storage::proto::{ProjectComponents, Rules};
use tether_storage::{
    encode_for_fs, ConnectionStorage, StorageConfig, StorageError, GLOBAL_DIR, PROJECTS_DIR,
};

#[test]
fn connections_are_isolated_from_each_other() {
    let tmp = tempfile::tempdir().unwrap();
    let config = StorageConfig::new(tmp.path());
    let first = ConnectionStorage::open(&config, "https://a.example.com").unwrap();
    let second = ConnectionStorage::open(&config, "https://b.example.com").unwrap();

    first.global().rules.store(&Rules::default()).unwrap();
    first.global().status.store_current().unwrap();

    assert!(first.global().status.get().is_ok());
    assert!(second.global().status.get().is_err());
    assert_ne!(first.path(), second.path());
}

#[test]
fn files_land_at_the_documented_locations() {
    let tmp = tempfile::tempdir().unwrap();
    let connection = ConnectionStorage::at(tmp.path(), "conn").unwrap();
    connection.global().status.store_current().unwrap();
    connection
        .project("org:app")
        .unwrap()
        .components
        .store(&ProjectComponents {
            component: vec!["src/App.java".to_string()],
        })
        .unwrap();

    let base = tmp.path().join(encode_for_fs("conn"));
    assert!(base.join(GLOBAL_DIR).join("storage_status.pb").is_file());
    assert!(base
        .join(PROJECTS_DIR)
        .join(encode_for_fs("org:app"))
        .join("component_list.pb")
        .is_file());
}

#[test]
fn delete_removes_the_connection_tree() {
    let tmp = tempfile::tempdir().unwrap();
    let connection = ConnectionStorage::at(tmp.path(), "conn").unwrap();
    connection.global().status.store_current().unwrap();
    let project = connection.project("org:app").unwrap();
    project.status.store_current().unwrap();

    connection.delete().unwrap();

    assert!(!connection.path().exists());
    assert!(connection.global().status.get().unwrap_err().requires_update());
    assert!(project.status.get().unwrap_err().requires_update());

    // Deleting an absent tree is fine.
    connection.delete().unwrap();
}

#[test]
fn delete_while_writers_are_active() {
    const DELETES: usize = 200;

    let tmp = tempfile::tempdir().unwrap();
    let connection = Arc::new(ConnectionStorage::at(tmp.path(), "conn").unwrap());
    let project = connection.project("org:app").unwrap();
    let stop = Arc::new(AtomicBool::new(false));

    let writer = {
        let connection = Arc::clone(&connection);
        let stop = Arc::clone(&stop);
        thread::spawn(move || -> Result<usize, StorageError> {
            let mut writes = 0;
            loop {
                connection.global().status.store_current()?;
                project.status.store_current()?;
                writes += 1;
                if stop.load(Ordering::Relaxed) {
                    return Ok(writes);
                }
            }
        })
    };

    for _ in 0..DELETES {
        connection.delete().unwrap();
    }
    stop.store(true, Ordering::Relaxed);

    let writes = writer.join().unwrap().unwrap();
    assert!(writes > 0);

    // The last write may or may not have happened after the last delete;
    // either way the tree is complete or absent, never broken.
    match connection.global().status.get() {
        Ok(_) => {}
        Err(err) => assert!(err.requires_update(), "unexpected error: {err}"),
    }
}
