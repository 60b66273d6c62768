// standard library
use std::env;
use std::path::{Path, PathBuf};

// internal crates
use output_file::errors::OutputFileErr;
use output_file::path::TargetPath;

// external crates
use url::Url;

pub mod resolve {
    use super::*;

    #[test]
    fn absolute_text_path_unchanged() {
        let target = TargetPath::from("/tmp/some/file.txt");
        assert_eq!(target.resolve().unwrap(), PathBuf::from("/tmp/some/file.txt"));
    }

    #[test]
    #[serial_test::serial(cwd)]
    fn relative_text_path_resolves_against_working_directory() {
        let target = TargetPath::from("some/file.txt");
        let expected = env::current_dir().unwrap().join("some/file.txt");
        assert_eq!(target.resolve().unwrap(), expected);
    }

    #[test]
    #[serial_test::serial(cwd)]
    fn dot_segments_are_normalized() {
        let target = TargetPath::from("a/./b/../c.txt");
        let expected = env::current_dir().unwrap().join("a/c.txt");
        assert_eq!(target.resolve().unwrap(), expected);
    }

    #[test]
    fn repeated_separators_are_collapsed() {
        let target = TargetPath::from("/tmp//some///file.txt");
        assert_eq!(target.resolve().unwrap(), PathBuf::from("/tmp/some/file.txt"));
    }

    #[test]
    fn byte_path_resolves() {
        let target = TargetPath::from(b"/tmp/byte-form.txt".as_slice());
        assert_eq!(target.resolve().unwrap(), PathBuf::from("/tmp/byte-form.txt"));
    }

    #[test]
    fn path_buf_becomes_byte_form() {
        let target = TargetPath::from(PathBuf::from("/tmp/from-pathbuf.txt"));
        assert!(matches!(target, TargetPath::Bytes { .. }));
        assert_eq!(target.resolve().unwrap(), PathBuf::from("/tmp/from-pathbuf.txt"));
    }

    #[test]
    fn file_url_resolves() {
        let url = Url::parse("file:///tmp/from-url.txt").unwrap();
        let target = TargetPath::from(url);
        assert_eq!(target.resolve().unwrap(), PathBuf::from("/tmp/from-url.txt"));
    }

    #[test]
    fn file_url_percent_encoding_is_decoded() {
        let url = Url::parse("file:///tmp/with%20space.txt").unwrap();
        let target = TargetPath::from(url);
        assert_eq!(target.resolve().unwrap(), PathBuf::from("/tmp/with space.txt"));
    }
}

pub mod empty {
    use super::*;

    #[test]
    fn text() {
        let err = TargetPath::from("").resolve().unwrap_err();
        assert!(matches!(err, OutputFileErr::EmptyPathErr { .. }));
        assert!(err.to_string().contains("text"));
    }

    #[test]
    fn bytes() {
        let err = TargetPath::from(b"".as_slice()).resolve().unwrap_err();
        assert!(matches!(err, OutputFileErr::EmptyPathErr { .. }));
        assert!(err.to_string().contains("byte"));
    }
}

pub mod nul_byte {
    use super::*;

    #[test]
    fn text() {
        let err = TargetPath::from("bad\0path").resolve().unwrap_err();
        assert!(matches!(err, OutputFileErr::NulBytePathErr { .. }));
    }

    #[test]
    fn bytes() {
        let err = TargetPath::from(b"bad\0path".as_slice()).resolve().unwrap_err();
        assert!(matches!(err, OutputFileErr::NulBytePathErr { .. }));
    }
}

pub mod trailing_separator {
    use super::*;

    #[test]
    fn text() {
        let err = TargetPath::from("dir/file.txt/").resolve().unwrap_err();
        assert!(matches!(err, OutputFileErr::TrailingSeparatorErr { .. }));
    }

    #[test]
    fn bytes() {
        let err = TargetPath::from(b"dir/".as_slice()).resolve().unwrap_err();
        assert!(matches!(err, OutputFileErr::TrailingSeparatorErr { .. }));
    }

    #[test]
    fn root_only() {
        let err = TargetPath::from("/").resolve().unwrap_err();
        assert!(matches!(err, OutputFileErr::TrailingSeparatorErr { .. }));
    }

    #[test]
    fn url_directory_form() {
        let url = Url::from_directory_path(Path::new("/tmp/somedir")).unwrap();
        let err = TargetPath::from(url).resolve().unwrap_err();
        assert!(matches!(err, OutputFileErr::TrailingSeparatorErr { .. }));
    }
}

pub mod url_scheme {
    use super::*;

    #[test]
    fn https_is_rejected() {
        let url = Url::parse("https://example.com/file.txt").unwrap();
        let err = TargetPath::from(url).resolve().unwrap_err();
        assert!(matches!(err, OutputFileErr::InvalidUrlSchemeErr { .. }));
    }

    #[test]
    fn data_is_rejected() {
        let url = Url::parse("data:text/plain,hello").unwrap();
        let err = TargetPath::from(url).resolve().unwrap_err();
        assert!(matches!(err, OutputFileErr::InvalidUrlSchemeErr { .. }));
    }

    #[test]
    fn file_url_with_remote_host_is_rejected() {
        let url = Url::parse("file://remotehost/share/file.txt").unwrap();
        let err = TargetPath::from(url).resolve().unwrap_err();
        assert!(matches!(err, OutputFileErr::UrlToPathErr { .. }));
    }
}
