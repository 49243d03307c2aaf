//! Two threads per target racing replaces onto the same path.

use std::path::PathBuf;
use std::sync::{Arc, Barrier};
use std::thread;

use atomic_rename::policy::Policy;
use atomic_rename::AtomicRename;

use crate::common::{names_in, with_temp_root, TestAudit, TestEmitter};

const TARGETS: usize = 100;

#[test]
fn last_rename_wins_and_no_sources_remain() {
    let td = with_temp_root();
    let dir = td.path().to_path_buf();
    let api = Arc::new(AtomicRename::new(
        TestEmitter::default(),
        TestAudit,
        Policy::retrying(),
    ));
    let barrier = Arc::new(Barrier::new(TARGETS * 2));

    let mut handles = Vec::new();
    for i in 0..TARGETS {
        let tgt = dir.join(format!("target_{i}"));
        for side in ["a", "b"] {
            let src: PathBuf = dir.join(format!("source_{side}_{i}"));
            std::fs::write(&src, format!("{side}{i}")).unwrap();
            let (api, barrier, tgt) = (api.clone(), barrier.clone(), tgt.clone());
            handles.push(thread::spawn(move || {
                barrier.wait();
                api.rename(&src, &tgt).unwrap();
            }));
        }
    }
    for h in handles {
        h.join().unwrap();
    }

    let names = names_in(&dir);
    assert_eq!(names.len(), TARGETS);
    assert!(names.iter().all(|n| n.starts_with("target_")));
    for i in 0..TARGETS {
        let got = std::fs::read_to_string(dir.join(format!("target_{i}"))).unwrap();
        assert!(
            got == format!("a{i}") || got == format!("b{i}"),
            "target_{i} holds {got:?}"
        );
    }
}
