use filebucket::{
    BinaryDetection, BucketOptionsBuilder, FilebucketError, GrepOptionsBuilder, OutputMode,
    PathCursor, collect_bucket_paths, discover_buckets, grep, render_path_tree, shared_path,
    write_path_tree,
};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::tempdir;
fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}
fn bucket_fixture(root: &Path) {
    fs::create_dir_all(root.join("bucket1/.git")).unwrap();
    write(root, "bucket1/org1/src/Main.rs", b"fn main() {}\nlet version = \"1.2\";\n");
    write(root, "bucket1/org1/readme.md", b"# readme\n");
    write(root, "bucket1/org1/.gitignore", b"");
    write(root, "bucket1/top.txt", b"top-level files are not shared\n");
    fs::create_dir_all(root.join("bucket2/.git")).unwrap();
    write(root, "bucket2/org2/src/main.rs", b"let version = \"2.0\";\n");
    write(root, "bucket2/org2/docs/a.md", b"docs\n");
    write(root, "bucket2/org2/blob.bin", b"\0\0version = \"9\"\0");
    write(root, "plain/org/x.txt", b"not a repository\n");
}
#[test]
fn test_discover_buckets() {
    let dir = tempdir().unwrap();
    bucket_fixture(dir.path());
    let options = BucketOptionsBuilder::new(dir.path()).build();
    let names: Vec<String> = discover_buckets(&options)
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(names, vec!["bucket1", "bucket2"]);
    let options = BucketOptionsBuilder::new(dir.path()).require_git(false).build();
    assert_eq!(discover_buckets(&options).unwrap().len(), 3);
}
#[test]
fn test_missing_bucket_path() {
    let dir = tempdir().unwrap();
    let options = BucketOptionsBuilder::new(dir.path().join("missing")).build();
    assert!(matches!(
        collect_bucket_paths(&options),
        Err(FilebucketError::Io { .. })
    ));
}
#[test]
fn test_shared_path() {
    let options = BucketOptionsBuilder::new(".").build();
    assert_eq!(
        shared_path("Org/Src/Main.rs", &options).as_deref(),
        Some("/src/main.rs")
    );
    assert_eq!(shared_path("top.txt", &options), None);
    assert_eq!(shared_path("org/sub/.gitignore", &options), None);
    let options = BucketOptionsBuilder::new(".").lowercase(false).build();
    assert_eq!(
        shared_path("Org/Src/Main.rs", &options).as_deref(),
        Some("/Src/Main.rs")
    );
}
#[test]
fn test_collect_and_build_tree() {
    let dir = tempdir().unwrap();
    bucket_fixture(dir.path());
    let options = BucketOptionsBuilder::new(dir.path()).build();
    let paths = collect_bucket_paths(&options).unwrap();
    assert_eq!(
        paths,
        vec![
            "/blob.bin",
            "/docs/a.md",
            "/readme.md",
            "/src/main.rs",
            "/src/main.rs"
        ]
    );
    let (json, count) = render_path_tree(paths).unwrap();
    assert_eq!(
        json,
        r#"{"blob.bin":1,"docs":{"a.md":1,"/":1},"readme.md":1,"src":{"main.rs":2,"/":2},"/":5}"#
    );
    assert_eq!(count, 5);
}
#[test]
fn test_collect_respects_options() {
    let dir = tempdir().unwrap();
    bucket_fixture(dir.path());
    let options = BucketOptionsBuilder::new(dir.path())
        .require_git(false)
        .lowercase(false)
        .ignore_patterns(vec!["*.bin".into()])
        .build();
    let paths = collect_bucket_paths(&options).unwrap();
    assert_eq!(
        paths,
        vec![
            "/docs/a.md",
            "/readme.md",
            "/src/Main.rs",
            "/src/main.rs",
            "/x.txt"
        ]
    );
}
#[test]
fn test_write_path_tree_to_sink() {
    let dir = tempdir().unwrap();
    bucket_fixture(dir.path());
    let options = BucketOptionsBuilder::new(dir.path()).build();
    let mut cursor = PathCursor::new(collect_bucket_paths(&options).unwrap());
    let mut sink = Vec::new();
    let count = write_path_tree(&mut cursor, &mut sink, OutputMode::Streaming).unwrap();
    assert_eq!(count, 5);
    let tree: serde_json::Value = serde_json::from_slice(&sink).unwrap();
    assert_eq!(tree["src"]["main.rs"], 2);
    assert_eq!(tree["/"], 5);
}
#[test]
fn test_grep_reports_captures() {
    let dir = tempdir().unwrap();
    bucket_fixture(dir.path());
    let options = GrepOptionsBuilder::new(dir.path(), r#"version = "(.*)""#).build();
    let sink = Mutex::new(Vec::new());
    let matches = grep(&options, &sink).unwrap();
    assert_eq!(matches, 2);
    let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    let mut lines: Vec<&str> = out.lines().collect();
    lines.sort();
    assert_eq!(
        lines,
        vec!["bucket1/org1/src/Main.rs:2 1.2", "bucket2/org2/src/main.rs:1 2.0"]
    );
}
#[test]
fn test_grep_filename_pattern_and_binary_detection() {
    let dir = tempdir().unwrap();
    bucket_fixture(dir.path());
    let options = GrepOptionsBuilder::new(dir.path(), "version")
        .filename_pattern(r"org2/")
        .binary_detection(BinaryDetection::None)
        .build();
    let sink = Mutex::new(Vec::new());
    assert_eq!(grep(&options, &sink).unwrap(), 2);
    let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    assert!(out.contains("bucket2/org2/blob.bin:1 version"));
    assert!(out.contains("bucket2/org2/src/main.rs:1 version"));
}
#[test]
fn test_grep_invalid_pattern() {
    let dir = tempdir().unwrap();
    let options = GrepOptionsBuilder::new(dir.path(), "(").build();
    let sink = Mutex::new(Vec::new());
    assert!(matches!(
        grep(&options, &sink),
        Err(FilebucketError::Pattern(_))
    ));
}
