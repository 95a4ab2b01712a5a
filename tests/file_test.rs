#[cfg(test)]
mod tests {
    use rustf_utils::utils::file::{build_path, file_write, FileLock};
    use std::fs;
    use std::sync::Arc;
    use std::thread;
    use tempfile::tempdir;

    #[test]
    fn test_append_then_overwrite() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("audit.log");

        assert!(file_write(&target, b"first\n", false));
        assert!(file_write(&target, b"second\n", false));
        assert_eq!(fs::read_to_string(&target).unwrap(), "first\nsecond\n");

        assert!(file_write(&target, b"reset\n", true));
        assert_eq!(fs::read_to_string(&target).unwrap(), "reset\n");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nope").join("file.txt");

        assert!(!file_write(&target, b"data", false));
        assert!(!target.exists());
    }

    #[test]
    fn test_concurrent_appends_do_not_interleave() {
        let dir = tempdir().unwrap();
        let target = Arc::new(dir.path().join("shared.log"));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let target = Arc::clone(&target);
                thread::spawn(move || {
                    let line = format!("{}\n", i.to_string().repeat(64));
                    for _ in 0..20 {
                        assert!(file_write(target.as_path(), line.as_bytes(), false));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let content = fs::read_to_string(target.as_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 160);
        for line in lines {
            assert_eq!(line.len(), 64);
            let first = line.chars().next().unwrap();
            assert!(line.chars().all(|c| c == first));
        }
    }

    #[test]
    fn test_lock_contention_and_release() {
        let dir = tempdir().unwrap();
        let name = dir.path().join("nightly-import");

        let held = FileLock::try_acquire(&name).unwrap().expect("first lock");
        assert!(held.path().ends_with("nightly-import.lock"));
        assert!(FileLock::try_acquire(&name).unwrap().is_none());

        drop(held);
        let again = FileLock::try_acquire(&name).unwrap();
        assert!(again.is_some());
    }

    #[test]
    fn test_build_path_roundtrips_through_fs() {
        let dir = tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let joined = build_path(&[root, "report.csv"]);

        assert!(file_write(&joined, b"a,b\n", true));
        assert_eq!(fs::read_to_string(dir.path().join("report.csv")).unwrap(), "a,b\n");
    }
}
