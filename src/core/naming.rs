use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const PART_SUFFIX: &str = "-chunk-";

/// Digits needed to print `part_count`, so that names sort in index order.
/// 4 parts -> 1, 14 parts -> 2.
pub fn pad_width(part_count: u64) -> usize {
    part_count.max(1).to_string().len()
}

/// `<source>-chunk-<index>`, index zero-padded to the width of `part_count`.
pub fn part_path(source: &Path, index: u64, part_count: u64) -> PathBuf {
    let mut name: OsString = source.as_os_str().to_owned();
    name.push(format!("{}{:0width$}", PART_SUFFIX, index, width = pad_width(part_count)));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_parts_single_digit() {
        let src = Path::new("dir/file");
        let names: Vec<_> = (0..3).map(|i| part_path(src, i, 3)).collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("dir/file-chunk-0"),
                PathBuf::from("dir/file-chunk-1"),
                PathBuf::from("dir/file-chunk-2"),
            ]
        );
    }

    #[test]
    fn fourteen_parts_two_digits() {
        let src = Path::new("file.bin");
        assert_eq!(part_path(src, 0, 14), PathBuf::from("file.bin-chunk-00"));
        assert_eq!(part_path(src, 9, 14), PathBuf::from("file.bin-chunk-09"));
        assert_eq!(part_path(src, 13, 14), PathBuf::from("file.bin-chunk-13"));
    }

    #[test]
    fn names_sort_in_index_order() {
        let src = Path::new("f");
        let names: Vec<String> = (0..120).map(|i| part_path(src, i, 120).display().to_string()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
