//! A missing source surfaces as NotFound and the target is left untouched.

use atomic_rename::ErrorKind;

use crate::common::{with_temp_root, write_file};

#[test]
fn missing_source_returns_not_found_and_keeps_target() {
    let td = with_temp_root();
    let tgt = write_file(td.path(), "target.txt", b"keep me");
    let src = td.path().join("nope.txt");

    let err = atomic_rename::rename(&src, &tgt).unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(!err.is_retryable());
    assert_eq!(err.from, src);
    assert_eq!(err.to, tgt);
    assert_eq!(std::fs::read(&tgt).unwrap(), b"keep me");
}

#[test]
fn missing_source_with_retrying_policy_fails_on_first_attempt() {
    use atomic_rename::policy::Policy;
    use atomic_rename::AtomicRename;

    let td = with_temp_root();
    let api = AtomicRename::new(
        crate::common::TestEmitter::default(),
        crate::common::TestAudit,
        Policy::retrying(),
    );

    let err = api
        .replace(&td.path().join("nope"), &td.path().join("target"))
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.attempts, 1);
    assert!(!td.path().join("target").exists());
}
