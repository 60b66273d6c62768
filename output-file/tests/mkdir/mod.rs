// standard library
use std::os::unix::fs::PermissionsExt;

// internal crates
use output_file::errors::{Code, Error, OutputFileErr};
use output_file::mkdir::make_dirs;
use output_file::options::{MkdirOptions, Mode};

// external crates
use tempfile::tempdir;

fn mode_of(path: &std::path::Path) -> u32 {
    std::fs::metadata(path).unwrap().permissions().mode() & 0o777
}

pub mod make_dirs {
    use super::*;

    #[tokio::test]
    async fn creates_missing_chain() {
        let base = tempdir().unwrap();
        let target = base.path().join("a/b/c");

        let created = make_dirs(&target, &MkdirOptions::default()).await.unwrap();

        assert_eq!(created, Some(base.path().join("a")));
        assert!(base.path().join("a/b/c").is_dir());
    }

    #[tokio::test]
    async fn returns_none_when_chain_exists() {
        let base = tempdir().unwrap();
        let target = base.path().join("a/b");

        make_dirs(&target, &MkdirOptions::default()).await.unwrap();
        let created = make_dirs(&target, &MkdirOptions::default()).await.unwrap();

        assert_eq!(created, None);
    }

    #[tokio::test]
    async fn reports_shallowest_created_dir() {
        let base = tempdir().unwrap();
        std::fs::create_dir(base.path().join("a")).unwrap();
        let target = base.path().join("a/b/c");

        let created = make_dirs(&target, &MkdirOptions::default()).await.unwrap();

        assert_eq!(created, Some(base.path().join("a/b")));
    }

    #[tokio::test]
    async fn applies_exact_mode_to_each_created_dir() {
        let base = tempdir().unwrap();
        let target = base.path().join("a/b");
        let opts = MkdirOptions {
            mode: Some(Mode::new(0o745)),
            ..MkdirOptions::default()
        };

        make_dirs(&target, &opts).await.unwrap();

        assert_eq!(mode_of(&base.path().join("a")), 0o745);
        assert_eq!(mode_of(&base.path().join("a/b")), 0o745);
    }

    #[tokio::test]
    async fn leaves_existing_dirs_untouched() {
        let base = tempdir().unwrap();
        std::fs::create_dir(base.path().join("a")).unwrap();
        let existing_mode = mode_of(&base.path().join("a"));
        let opts = MkdirOptions {
            mode: Some(Mode::new(0o700)),
            ..MkdirOptions::default()
        };

        make_dirs(&base.path().join("a/b"), &opts).await.unwrap();

        assert_eq!(mode_of(&base.path().join("a")), existing_mode);
        assert_eq!(mode_of(&base.path().join("a/b")), 0o700);
    }

    #[tokio::test]
    async fn fails_through_regular_file() {
        let base = tempdir().unwrap();
        std::fs::write(base.path().join("blocker"), b"file").unwrap();

        let err = make_dirs(&base.path().join("blocker/sub"), &MkdirOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, OutputFileErr::CreateDirErr { .. }));
        assert_eq!(err.code(), Code::NotADirectory);
        assert!(!err.is_missing_path_component());
    }

    #[tokio::test]
    async fn existing_file_as_final_component_is_skipped() {
        let base = tempdir().unwrap();
        std::fs::write(base.path().join("blocker"), b"file").unwrap();

        let created = make_dirs(&base.path().join("blocker"), &MkdirOptions::default())
            .await
            .unwrap();

        assert_eq!(created, None);
    }
}
