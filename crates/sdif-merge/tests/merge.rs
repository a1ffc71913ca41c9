//! End-to-end merge engine tests.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::Local;
use tempfile::TempDir;

use sdif_directory::LocalCsvProvider;
use sdif_merge::{MergeError, MergeHandle, MergeOptions, MergeOutcome, run_merge};

const CLUB_CSV_HEADER: &str = "Club Code,Province,Club Name,Preferred Club Name";

struct Setup {
    _dir: TempDir,
    entries: PathBuf,
    output: PathBuf,
    report: PathBuf,
}

fn setup() -> Setup {
    let dir = tempfile::tempdir().expect("temp dir");
    let entries = dir.path().join("entries");
    fs::create_dir(&entries).expect("entries dir");
    let output = dir.path().join("output.sd3");
    let report = dir.path().join("report.txt");
    Setup {
        _dir: dir,
        entries,
        output,
        report,
    }
}

fn options(setup: &Setup) -> MergeOptions {
    MergeOptions::new(&setup.entries, &setup.output, &setup.report)
}

fn sd3(lines: &[&str]) -> String {
    let mut contents = lines.join("\n");
    contents.push('\n');
    contents
}

fn write_zip(path: &Path, members: &[(&str, &str)]) {
    let file = fs::File::create(path).expect("create zip");
    let mut writer = zip::ZipWriter::new(file);
    let zip_options = zip::write::SimpleFileOptions::default();
    for (name, contents) in members {
        writer.start_file(*name, zip_options).expect("start member");
        writer.write_all(contents.as_bytes()).expect("write member");
    }
    writer.finish().expect("finish zip");
}

fn output_lines(setup: &Setup) -> Vec<String> {
    fs::read_to_string(&setup.output)
        .expect("read output")
        .lines()
        .map(str::to_string)
        .collect()
}

/// C1 record with the given field values at their fixed offsets.
fn c1_record(province: &str, code: &str, name: &str, country: &str, code_suffix: &str) -> String {
    let mut line = vec![b' '; 160];
    place(&mut line, 0, "C1");
    place(&mut line, 11, province);
    place(&mut line, 13, code);
    place(&mut line, 17, name);
    place(&mut line, 139, country);
    place(&mut line, 149, code_suffix);
    String::from_utf8(line).expect("ascii record")
}

fn place(line: &mut [u8], offset: usize, value: &str) {
    line[offset..offset + value.len()].copy_from_slice(value.as_bytes());
}

#[test]
fn no_candidates_is_a_clean_noop() {
    let setup = setup();

    let outcome = run_merge(&options(&setup), None).expect("run merge");

    assert_eq!(outcome, MergeOutcome::NoInputFiles);
    assert!(!setup.output.exists(), "no output artifact is created");
    assert!(!setup.report.exists(), "no report artifact is created");
}

#[test]
fn single_file_merge_synthesizes_the_header() {
    let setup = setup();
    fs::write(
        setup.entries.join("meet1.sd3"),
        sd3(&["A0 original program", "B1 meet one", "D0 swimmer", "Z0 end"]),
    )
    .expect("write entry file");

    let outcome = run_merge(&options(&setup), None).expect("run merge");
    let MergeOutcome::Completed(summary) = outcome else {
        panic!("expected a completed merge");
    };
    assert_eq!(summary.files_processed, 1);

    let lines = output_lines(&setup);
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("A0"));
    assert_ne!(lines[0], "A0 original program");
    let today = Local::now().date_naive().format("%m%d%Y").to_string();
    assert_eq!(&lines[0][80..88], today);
    assert_eq!(lines[1], "B1 meet one");
    assert_eq!(lines[2], "D0 swimmer");
    assert_eq!(lines[3], "Z0 end");
}

#[test]
fn multi_file_merge_keeps_one_header_and_the_last_end_marker() {
    let setup = setup();
    fs::write(
        setup.entries.join("meet1.sd3"),
        sd3(&["A0 one", "B1 meet one", "D0 one", "Z0 one"]),
    )
    .expect("write entry file");
    fs::write(
        setup.entries.join("meet2.sd3"),
        sd3(&["A0 two", "B1 meet two", "D0 two", "Z0 two"]),
    )
    .expect("write entry file");

    let outcome = run_merge(&options(&setup), None).expect("run merge");
    let MergeOutcome::Completed(summary) = outcome else {
        panic!("expected a completed merge");
    };
    assert_eq!(summary.files_processed, 2);

    let lines = output_lines(&setup);
    assert_eq!(lines.len(), 5);
    assert_eq!(lines.iter().filter(|l| l.starts_with("A0")).count(), 1);
    assert_eq!(lines.iter().filter(|l| l.starts_with("B1")).count(), 1);
    assert_eq!(lines.iter().filter(|l| l.starts_with("Z0")).count(), 1);

    // Directory enumeration order is platform-dependent; derive the actual
    // processing order from the pass-through records.
    let first_is_one = lines.iter().position(|l| l == "D0 one")
        < lines.iter().position(|l| l == "D0 two");
    let (expected_meet, expected_end) = if first_is_one {
        ("B1 meet one", "Z0 two")
    } else {
        ("B1 meet two", "Z0 one")
    };
    assert_eq!(lines[1], expected_meet);
    assert_eq!(lines.last().map(String::as_str), Some(expected_end));

    let report = fs::read_to_string(&setup.report).expect("read report");
    assert!(report.contains("Processed file: meet1.sd3"));
    assert!(report.contains("Processed file: meet2.sd3"));
    assert!(report.contains("Processed 2 files"));
}

#[test]
fn unrecognized_record_types_pass_through_byte_identical() {
    let setup = setup();
    let odd_records = ["D3 extended data  ", "F0 relay athlete", "X", ""];
    fs::write(
        setup.entries.join("meet1.sd3"),
        sd3(&[
            "A0 one",
            "B1 meet",
            odd_records[0],
            odd_records[1],
            odd_records[2],
            odd_records[3],
            "Z0 end",
        ]),
    )
    .expect("write entry file");

    run_merge(&options(&setup), None).expect("run merge");

    let lines = output_lines(&setup);
    assert_eq!(&lines[2..6], &odd_records);
}

#[test]
fn corrections_rewrite_country_and_province_in_place() {
    let setup = setup();
    let original = c1_record("Q", "ABCD", "Dolphins Swim Club", "USA", "1");
    fs::write(
        setup.entries.join("meet1.sd3"),
        sd3(&["A0 one", "B1 meet", &original, "Z0 end"]),
    )
    .expect("write entry file");

    let csv_path = setup.entries.join("clubs.csv");
    fs::write(
        &csv_path,
        format!("{CLUB_CSV_HEADER}\nABCD1,B,Dolphins Swim Club,\n"),
    )
    .expect("write club csv");
    let provider = LocalCsvProvider::new(&csv_path);

    let mut merge_options = options(&setup);
    merge_options.fix_country = true;
    merge_options.fix_region = true;
    run_merge(&merge_options, Some(&provider)).expect("run merge");

    let lines = output_lines(&setup);
    let corrected = &lines[2];
    assert_eq!(corrected.len(), original.len());
    assert_eq!(&corrected[139..142], "CAN");
    assert_eq!(&corrected[11..12], "B");
    for (index, (before, after)) in original.bytes().zip(corrected.bytes()).enumerate() {
        if (11..12).contains(&index) || (139..142).contains(&index) {
            continue;
        }
        assert_eq!(before, after, "byte {index} changed unexpectedly");
    }
}

#[test]
fn ambiguous_club_codes_pass_through_unchanged() {
    let setup = setup();
    let original = c1_record("Q", "ABCD", "Dolphins Swim Club", "USA", "1");
    fs::write(
        setup.entries.join("meet1.sd3"),
        sd3(&["A0 one", "B1 meet", &original, "Z0 end"]),
    )
    .expect("write entry file");

    let csv_path = setup.entries.join("clubs.csv");
    fs::write(
        &csv_path,
        format!("{CLUB_CSV_HEADER}\nABCD1,B,Dolphins,\nABCD1,O,Dolphins East,\n"),
    )
    .expect("write club csv");
    let provider = LocalCsvProvider::new(&csv_path);

    let mut merge_options = options(&setup);
    merge_options.fix_country = true;
    merge_options.fix_region = true;
    run_merge(&merge_options, Some(&provider)).expect("run merge");

    let lines = output_lines(&setup);
    assert_eq!(lines[2], original);
}

#[test]
fn missing_end_marker_aborts_and_removes_the_output() {
    let setup = setup();
    fs::write(
        setup.entries.join("meet1.sd3"),
        sd3(&["A0 one", "B1 meet", "D0 swimmer"]),
    )
    .expect("write entry file");

    let error = run_merge(&options(&setup), None).expect_err("missing Z0 fails");

    assert!(matches!(error, MergeError::MissingEndMarker));
    assert!(!setup.output.exists(), "incomplete output is removed");
    let report = fs::read_to_string(&setup.report).expect("read report");
    assert!(report.contains("Merge aborted"));
}

#[test]
fn unwritable_report_aborts_before_the_output_is_created() {
    let setup = setup();
    fs::write(
        setup.entries.join("meet1.sd3"),
        sd3(&["A0 one", "B1 meet", "Z0 end"]),
    )
    .expect("write entry file");

    let mut merge_options = options(&setup);
    merge_options.report_path = setup.entries.join("missing").join("report.txt");
    let error = run_merge(&merge_options, None).expect_err("unwritable report fails");

    assert!(matches!(error, MergeError::ReportUnwritable { .. }));
    assert!(!setup.output.exists(), "no output artifact is left behind");
}

#[test]
fn unwritable_output_leaves_only_an_aborted_report() {
    let setup = setup();
    fs::write(
        setup.entries.join("meet1.sd3"),
        sd3(&["A0 one", "B1 meet", "Z0 end"]),
    )
    .expect("write entry file");

    let mut merge_options = options(&setup);
    merge_options.output_path = setup.entries.join("missing").join("output.sd3");
    let error = run_merge(&merge_options, None).expect_err("unwritable output fails");

    assert!(matches!(error, MergeError::OutputUnwritable { .. }));
    assert!(!merge_options.output_path.exists());
    let report = fs::read_to_string(&setup.report).expect("read report");
    assert!(report.contains("Merge aborted"));
}

#[test]
fn unavailable_club_table_aborts_before_any_output() {
    let setup = setup();
    fs::write(
        setup.entries.join("meet1.sd3"),
        sd3(&["A0 one", "B1 meet", "Z0 end"]),
    )
    .expect("write entry file");
    let provider = LocalCsvProvider::new(setup.entries.join("nowhere.csv"));

    let mut merge_options = options(&setup);
    merge_options.fix_region = true;
    let error = run_merge(&merge_options, Some(&provider)).expect_err("missing table fails");

    assert!(matches!(error, MergeError::DirectoryUnavailable { .. }));
    assert!(!setup.output.exists());
    assert!(!setup.report.exists());
}

#[test]
fn empty_club_table_aborts_when_a_fix_is_requested() {
    let setup = setup();
    fs::write(
        setup.entries.join("meet1.sd3"),
        sd3(&["A0 one", "B1 meet", "Z0 end"]),
    )
    .expect("write entry file");
    let csv_path = setup.entries.join("clubs.csv");
    fs::write(&csv_path, format!("{CLUB_CSV_HEADER}\n")).expect("write club csv");
    let provider = LocalCsvProvider::new(&csv_path);

    let mut merge_options = options(&setup);
    merge_options.fix_country = true;
    let error = run_merge(&merge_options, Some(&provider)).expect_err("empty table fails");

    assert!(matches!(error, MergeError::DirectoryUnavailable { .. }));
    assert!(!setup.output.exists());
}

#[test]
fn archive_members_merge_like_plain_files() {
    let contents = sd3(&["A0 one", "B1 meet", "D0 swimmer", "Z0 end"]);

    let plain = setup();
    fs::write(plain.entries.join("meet1.sd3"), &contents).expect("write entry file");
    run_merge(&options(&plain), None).expect("run plain merge");

    let zipped = setup();
    write_zip(
        &zipped.entries.join("meets.zip"),
        &[("meet1.sd3", &contents), ("notes.txt", "not sdif\n")],
    );
    let outcome = run_merge(&options(&zipped), None).expect("run zip merge");
    let MergeOutcome::Completed(summary) = outcome else {
        panic!("expected a completed merge");
    };
    assert_eq!(summary.files_processed, 1, "only the .sd3 member is selected");

    assert_eq!(output_lines(&plain), output_lines(&zipped));
    let report = fs::read_to_string(&zipped.report).expect("read report");
    assert!(report.contains("Processed file: meet1.sd3@meets.zip"));
}

#[test]
fn background_handle_reports_completion() {
    let setup = setup();
    fs::write(
        setup.entries.join("meet1.sd3"),
        sd3(&["A0 one", "B1 meet", "Z0 end"]),
    )
    .expect("write entry file");

    let handle = MergeHandle::spawn(options(&setup), None);
    let outcome = handle.join().expect("join merge");

    assert!(matches!(outcome, MergeOutcome::Completed(_)));
    assert!(setup.output.exists());
}
