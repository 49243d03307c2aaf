//! Failed replaces have no observable effect on either path.

use atomic_rename::policy::Policy;
use atomic_rename::{AtomicRename, ErrorKind};

use crate::common::{names_in, with_temp_root, write_file, TestAudit, TestEmitter};

#[test]
fn cross_domain_failure_leaves_both_paths() {
    let td = with_temp_root();
    let src = write_file(td.path(), "source.txt", b"new");
    let tgt = write_file(td.path(), "target.txt", b"old");
    let mut policy = Policy::retrying();
    policy.force_exdev = Some(true);
    let facts = TestEmitter::default();
    let api = AtomicRename::new(facts.clone(), TestAudit, policy);

    let err = api.rename(&src, &tgt).unwrap_err();

    assert_eq!(err.kind, ErrorKind::CrossDomain);
    assert_eq!(err.attempts, 1, "cross-device errors are never retried");
    assert_eq!(std::fs::read(&src).unwrap(), b"new");
    assert_eq!(std::fs::read(&tgt).unwrap(), b"old");

    let evs = facts.events.lock().unwrap();
    assert!(evs.iter().any(|(_, event, decision, f)| {
        event == "rename.result"
            && decision == "failure"
            && f.get("error_id").and_then(|v| v.as_str()) == Some("E_EXDEV")
    }));
}

#[test]
fn not_found_failure_leaves_directory_unchanged() {
    let td = with_temp_root();
    write_file(td.path(), "target.txt", b"old");
    write_file(td.path(), "other.txt", b"bystander");
    let before = names_in(td.path());

    let err = atomic_rename::rename(td.path().join("ghost"), td.path().join("target.txt"))
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);

    assert_eq!(names_in(td.path()), before);
    assert_eq!(std::fs::read(td.path().join("target.txt")).unwrap(), b"old");
}

#[test]
fn target_without_file_name_is_rejected_without_side_effects() {
    let td = with_temp_root();
    let src = write_file(td.path(), "source.txt", b"data");

    let err = atomic_rename::rename(&src, td.path().join("..")).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unknown);
    assert_eq!(std::fs::read(&src).unwrap(), b"data");
}
