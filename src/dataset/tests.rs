use std::fs;
use std::time::Duration;

use super::core::{Dataset, DatasetError, write_results, write_timing};

#[test]
fn test_parse_basic() {
    let dataset = Dataset::parse(b"2\n6\n5 3 1 4 2 6").unwrap();
    assert_eq!(dataset.workers, 2);
    assert_eq!(dataset.values, vec![5, 3, 1, 4, 2, 6]);
}

#[test]
fn test_parse_empty_value_list() {
    let dataset = Dataset::parse(b"4\n0\n").unwrap();
    assert_eq!(dataset.workers, 4);
    assert!(dataset.values.is_empty());
}

#[test]
fn test_parse_mixed_whitespace() {
    // Any ASCII whitespace separates values, not just the canonical
    // newline/space layout
    let dataset = Dataset::parse(b"  3\t4\r\n10 20\n30\t40  ").unwrap();
    assert_eq!(dataset.workers, 3);
    assert_eq!(dataset.values, vec![10, 20, 30, 40]);
}

#[test]
fn test_parse_ignores_trailing_values() {
    let dataset = Dataset::parse(b"1\n2\n7 8 9 10 11").unwrap();
    assert_eq!(dataset.values, vec![7, 8]);
}

#[test]
fn test_parse_empty_input() {
    assert!(matches!(
        Dataset::parse(b""),
        Err(DatasetError::MissingHeader {
            field: "worker count"
        })
    ));
    assert!(matches!(
        Dataset::parse(b"   \n\t "),
        Err(DatasetError::MissingHeader {
            field: "worker count"
        })
    ));
}

#[test]
fn test_parse_missing_element_count() {
    assert!(matches!(
        Dataset::parse(b"4\n"),
        Err(DatasetError::MissingHeader {
            field: "element count"
        })
    ));
}

#[test]
fn test_parse_truncated_values() {
    assert!(matches!(
        Dataset::parse(b"2\n5\n1 2 3"),
        Err(DatasetError::Truncated {
            expected: 5,
            found: 3
        })
    ));
}

#[test]
fn test_parse_rejects_non_digit() {
    assert!(matches!(
        Dataset::parse(b"2\n3\n1 x 3"),
        Err(DatasetError::InvalidDigit {
            offset: 6,
            byte: b'x'
        })
    ));
    // Negative numbers are not unsigned
    assert!(matches!(
        Dataset::parse(b"1\n1\n-5"),
        Err(DatasetError::InvalidDigit { byte: b'-', .. })
    ));
}

#[test]
fn test_parse_rejects_overflow() {
    // u32::MAX + 1
    assert!(matches!(
        Dataset::parse(b"1\n1\n4294967296"),
        Err(DatasetError::Overflow { offset: 4 })
    ));
}

#[test]
fn test_parse_accepts_u32_max() {
    let dataset = Dataset::parse(b"1\n1\n4294967295").unwrap();
    assert_eq!(dataset.values, vec![u32::MAX]);
}

#[test]
fn test_load_missing_file() {
    let err = Dataset::load("/nonexistent/fmsort-input.txt").unwrap_err();
    assert!(matches!(err, DatasetError::Io { .. }));
    // The message carries the path
    assert!(err.to_string().contains("fmsort-input.txt"));
}

#[test]
fn test_write_results_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output.txt");

    write_results(&path, 2, &[1, 2, 3, 4, 5, 6]).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, "2\n6\n1 2 3 4 5 6 ");
}

#[test]
fn test_write_results_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output.txt");

    write_results(&path, 4, &[]).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, "4\n0\n");
}

#[test]
fn test_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.txt");

    let values: Vec<u32> = (0..1000).rev().collect();
    write_results(&path, 3, &values).unwrap();

    let dataset = Dataset::load(&path).unwrap();
    assert_eq!(dataset.workers, 3);
    assert_eq!(dataset.values, values);
}

#[test]
fn test_full_pipeline() {
    use crate::msort::SortRun;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "2\n6\n5 3 1 4 2 6").unwrap();

    let mut dataset = Dataset::load(&input).unwrap();
    let sort = SortRun::new(dataset.workers).unwrap();
    let elapsed = sort.execute(&mut dataset.values).unwrap();

    let output = dir.path().join("output.txt");
    write_results(&output, dataset.workers, &dataset.values).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "2\n6\n1 2 3 4 5 6 ");

    let time = dir.path().join("time.txt");
    write_timing(&time, elapsed).unwrap();
    let millis: f64 = fs::read_to_string(&time).unwrap().parse().unwrap();
    assert!(millis >= 0.0);
}

#[test]
fn test_write_timing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("time.txt");

    write_timing(&path, Duration::from_millis(1500)).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    let millis: f64 = written.parse().unwrap();
    assert_eq!(millis, 1500.0);

    write_timing(&path, Duration::from_micros(250)).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    let millis: f64 = written.parse().unwrap();
    assert!((millis - 0.25).abs() < 1e-9);
}
