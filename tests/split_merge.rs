use orange_splitter::core::planner::{plan_file_by_count, plan_file_by_max_size};
use orange_splitter::plugins::registry::{MergeContext, MergeRegistry};
use orange_splitter::{
    buffer_merge, fs_merge, split_by_parts, split_by_sizes, split_file, stream_merge, SplitMergeError,
    DEFAULT_STREAM_CHUNK_SIZE,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

fn write_source(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).expect("Failed to write source");
    path
}

fn file_name(p: &Path) -> String {
    p.file_name().unwrap().to_string_lossy().to_string()
}

#[tokio::test]
async fn split_ten_bytes_into_three_parts() {
    let dir = TempDir::new().unwrap();
    let src = write_source(dir.path(), "file", b"abcdefghij");

    let parts = split_by_parts(&src, 3).await.unwrap();

    let names: Vec<_> = parts.iter().map(|p| file_name(p)).collect();
    assert_eq!(names, vec!["file-chunk-0", "file-chunk-1", "file-chunk-2"]);
    let sizes: Vec<_> = parts.iter().map(|p| std::fs::metadata(p).unwrap().len()).collect();
    assert_eq!(sizes, vec![3, 3, 4]);
}

#[tokio::test]
async fn split_ten_bytes_by_max_four() {
    let dir = TempDir::new().unwrap();
    let src = write_source(dir.path(), "file", b"abcdefghij");

    let plan = plan_file_by_max_size(&src, 4).await.unwrap();
    let bounds: Vec<_> = plan.ranges.iter().map(|r| (r.start, r.end)).collect();
    assert_eq!(bounds, vec![(0, 4), (4, 8), (8, 10)]);

    let parts = split_by_sizes(&src, 4).await.unwrap();
    assert_eq!(std::fs::read(&parts[0]).unwrap(), b"abcd");
    assert_eq!(std::fs::read(&parts[1]).unwrap(), b"efgh");
    assert_eq!(std::fs::read(&parts[2]).unwrap(), b"ij");
}

#[tokio::test]
async fn fourteen_parts_use_two_digit_suffixes() {
    let dir = TempDir::new().unwrap();
    let src = write_source(dir.path(), "data.bin", &pattern(100));

    let parts = split_by_parts(&src, 14).await.unwrap();

    assert_eq!(parts.len(), 14);
    assert_eq!(file_name(&parts[0]), "data.bin-chunk-00");
    assert_eq!(file_name(&parts[9]), "data.bin-chunk-09");
    assert_eq!(file_name(&parts[13]), "data.bin-chunk-13");
}

#[tokio::test]
async fn split_file_with_precomputed_plan() {
    let dir = TempDir::new().unwrap();
    let data = pattern(1000);
    let src = write_source(dir.path(), "plan", &data);

    let plan = plan_file_by_count(&src, 7).await.unwrap();
    let parts = split_file(&src, &plan).await.unwrap();

    let joined: Vec<u8> = parts.iter().flat_map(|p| std::fs::read(p).unwrap()).collect();
    assert_eq!(joined, data);
}

#[tokio::test]
async fn round_trip_all_modes_and_strategies() {
    let dir = TempDir::new().unwrap();
    let data = pattern(300_001);

    let splits: Vec<(&str, bool, u64)> = vec![("count", true, 5), ("count1", true, 1), ("size", false, 65_536)];
    for (label, by_count, n) in splits {
        let src = write_source(dir.path(), &format!("src-{}", label), &data);
        let parts = if by_count {
            split_by_parts(&src, n).await.unwrap()
        } else {
            split_by_sizes(&src, n).await.unwrap()
        };

        let out_fs = fs_merge(&parts, dir.path().join(format!("{}-fs", label))).await.unwrap();
        let out_buf = buffer_merge(&parts, dir.path().join(format!("{}-buf", label))).await.unwrap();
        let out_stream = stream_merge(&parts, dir.path().join(format!("{}-stream", label)), 4096)
            .await
            .unwrap();

        for out in [&out_fs, &out_buf, &out_stream] {
            assert_eq!(std::fs::read(out).unwrap(), data, "{} via {}", label, out.display());
        }
        // source stays untouched
        assert_eq!(std::fs::read(&src).unwrap(), data);
    }
}

#[tokio::test]
async fn strategies_agree_on_arbitrary_input_lists() {
    let dir = TempDir::new().unwrap();
    let a = write_source(dir.path(), "a", b"first-");
    let b = write_source(dir.path(), "b", &pattern(5000));
    let c = write_source(dir.path(), "c", b"");

    // order and repetition are up to the caller
    let inputs = vec![b.clone(), a.clone(), c, b, a];
    let registry = MergeRegistry::with_defaults();
    let ctx = MergeContext { chunk_size: 7, events: None };

    let mut outputs = vec![];
    for name in registry.names() {
        let strategy = registry.get(name).unwrap();
        let out = strategy.merge(&inputs, &dir.path().join(format!("out-{}", name)), &ctx).await.unwrap();
        outputs.push(std::fs::read(out).unwrap());
    }

    let expected: Vec<u8> = inputs.iter().flat_map(|p| std::fs::read(p).unwrap()).collect();
    assert_eq!(outputs.len(), 3);
    for out in outputs {
        assert_eq!(out, expected);
    }
}

#[tokio::test]
async fn merge_overwrites_existing_output() {
    let dir = TempDir::new().unwrap();
    let a = write_source(dir.path(), "a", b"new");
    let out = write_source(dir.path(), "out", b"old and much longer content");

    fs_merge(&[a.clone()], &out).await.unwrap();
    assert_eq!(std::fs::read(&out).unwrap(), b"new");

    std::fs::write(&out, b"old and much longer content").unwrap();
    buffer_merge(&[a.clone()], &out).await.unwrap();
    assert_eq!(std::fs::read(&out).unwrap(), b"new");

    std::fs::write(&out, b"old and much longer content").unwrap();
    stream_merge(&[a], &out, DEFAULT_STREAM_CHUNK_SIZE).await.unwrap();
    assert_eq!(std::fs::read(&out).unwrap(), b"new");
}

#[tokio::test]
async fn invalid_part_count_fails_before_io() {
    // the path does not exist; the argument check must win
    let missing = PathBuf::from("/definitely/not/here");
    let err = split_by_parts(&missing, 0).await.unwrap_err();
    assert!(matches!(err, SplitMergeError::InvalidArgument(_)));
}

#[tokio::test]
async fn empty_file_fails_for_both_modes() {
    let dir = TempDir::new().unwrap();
    let src = write_source(dir.path(), "empty", b"");

    assert!(matches!(split_by_parts(&src, 2).await, Err(SplitMergeError::EmptyFile(_))));
    assert!(matches!(split_by_sizes(&src, 2).await, Err(SplitMergeError::EmptyFile(_))));
    assert!(!dir.path().join("empty-chunk-0").exists());
}

#[tokio::test]
async fn more_parts_than_bytes_fails() {
    let dir = TempDir::new().unwrap();
    let src = write_source(dir.path(), "tiny", b"ab");

    let err = split_by_parts(&src, 5).await.unwrap_err();
    assert!(matches!(err, SplitMergeError::TooManyParts(_)));
    assert!(!dir.path().join("tiny-chunk-0").exists());
}

#[tokio::test]
async fn directory_is_not_a_file() {
    let dir = TempDir::new().unwrap();

    assert!(matches!(split_by_parts(dir.path(), 2).await, Err(SplitMergeError::NotAFile(_))));
    assert!(matches!(split_by_sizes(dir.path(), 2).await, Err(SplitMergeError::NotAFile(_))));
}

#[tokio::test]
async fn missing_source_is_io_failure() {
    let dir = TempDir::new().unwrap();
    let err = split_by_parts(dir.path().join("nope"), 2).await.unwrap_err();
    assert!(matches!(err, SplitMergeError::Io { .. }));
}

#[tokio::test]
async fn empty_merge_list_fails_for_every_strategy() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    assert!(matches!(fs_merge(&[], &out).await, Err(SplitMergeError::InvalidArgument(_))));
    assert!(matches!(buffer_merge(&[], &out).await, Err(SplitMergeError::InvalidArgument(_))));
    assert!(matches!(
        stream_merge(&[], &out, DEFAULT_STREAM_CHUNK_SIZE).await,
        Err(SplitMergeError::InvalidArgument(_))
    ));
    assert!(!out.exists());
}

#[tokio::test]
async fn missing_input_fails_every_strategy() {
    let dir = TempDir::new().unwrap();
    let a = write_source(dir.path(), "a", b"data");
    let inputs = vec![a, dir.path().join("gone")];
    let out = dir.path().join("out");

    assert!(matches!(fs_merge(&inputs, &out).await, Err(SplitMergeError::Io { .. })));
    assert!(matches!(buffer_merge(&inputs, &out).await, Err(SplitMergeError::Io { .. })));
    assert!(matches!(stream_merge(&inputs, &out, 2).await, Err(SplitMergeError::Io { .. })));
}

#[tokio::test]
async fn unallocatable_stream_chunk_size_is_an_error() {
    let dir = TempDir::new().unwrap();
    let a = write_source(dir.path(), "a", b"data");

    let err = stream_merge(&[a], dir.path().join("out"), usize::MAX).await.unwrap_err();
    assert!(matches!(err, SplitMergeError::InvalidArgument(_)));
}

#[tokio::test]
async fn zero_byte_plan_is_rejected() {
    use orange_splitter::core::planner::plan_by_max_size;

    assert!(matches!(plan_by_max_size(0, 4), Err(SplitMergeError::TooManyParts(_))));

    let dir = TempDir::new().unwrap();
    let src = write_source(dir.path(), "src", b"abc");
    let plan = orange_splitter::PartPlan { total_size: 0, ranges: vec![] };
    assert!(matches!(split_file(&src, &plan).await, Err(SplitMergeError::InvalidArgument(_))));
}
