//! A source that is another link to the target's file still disappears on success.
#![cfg(unix)]

use crate::common::{names_in, with_temp_root, write_file};

#[test]
fn hard_linked_source_is_gone_after_success() {
    let td = with_temp_root();
    let src = write_file(td.path(), "source.txt", b"same inode");
    let tgt = td.path().join("target.txt");
    std::fs::hard_link(&src, &tgt).unwrap();

    atomic_rename::rename(&src, &tgt).unwrap();

    assert!(!src.exists(), "source must not exist after success");
    assert_eq!(std::fs::read(&tgt).unwrap(), b"same inode");
    assert_eq!(names_in(td.path()), vec!["target.txt".to_string()]);
}

#[test]
fn hard_linked_source_with_retrying_policy() {
    use atomic_rename::policy::Policy;
    use atomic_rename::AtomicRename;

    let td = with_temp_root();
    let src = write_file(td.path(), "source.txt", b"x");
    let tgt = td.path().join("target.txt");
    std::fs::hard_link(&src, &tgt).unwrap();
    let api = AtomicRename::new(
        crate::common::TestEmitter::default(),
        crate::common::TestAudit,
        Policy::retrying(),
    );

    let out = api.replace(&src, &tgt).unwrap();

    assert_eq!(out.attempts, 1);
    assert!(!src.exists());
}
