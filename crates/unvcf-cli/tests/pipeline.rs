//! End-to-end tests for the split pipeline.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use indicatif::ProgressBar;
use tempfile::TempDir;

use unvcf_cli::pipeline::{split_vcf, write_summary_json};
use unvcf_model::{CleanupPolicy, InfoLayout, OutputKey, SplitOptions, SplitSummary};

const VCF: &str = "\
##fileformat=VCFv4.2
##source=unit-test
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total depth\">
##INFO=<ID=DB,Number=0,Type=Flag,Description=\"dbSNP membership, build 129\">
##INFO=<ID=AF,Number=A,Type=Float,Description=\"Allele frequency\">
##FILTER=<ID=q10,Description=\"Quality below 10\">
##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">
##FORMAT=<ID=AD,Number=2,Type=Integer,Description=\"Allelic depths\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tNA002\tNA001
1\t100\trs1\tA\tG\t50\tPASS\tDP=10;DB;AF=0.5\tGT:AD\t0/1:5,5\t0/0:9,0
1\t200\t.\tC\tT,G\t12\tq10\tAF=0.1,0.2\tGT\t1/2\t.
2\t300\t.\tG\tA\t.\t.\t.\tGT:AD\t./.:3\t1/1:0,7
";

fn write_input(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

fn split(input: &Path, destination: &Path, options: &SplitOptions) -> SplitSummary {
    split_vcf(input, destination, options, &ProgressBar::hidden()).expect("split succeeds")
}

fn read(destination: &Path, name: &str) -> String {
    fs::read_to_string(destination.join(name))
        .unwrap_or_else(|err| panic!("read {name}: {err}"))
}

#[test]
fn splits_into_per_field_tables() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "calls.vcf", VCF);
    let out = dir.path().join("out");
    let summary = split(&input, &out, &SplitOptions::default());

    assert_eq!(summary.records, 3);
    assert_eq!(summary.file_format, "VCFv4.2");
    assert_eq!(summary.samples, vec!["NA002", "NA001"]);
    assert_eq!((summary.info_fields, summary.format_fields, summary.filter_fields), (3, 2, 1));
    assert_eq!(summary.unstructured_lines, 1);
    assert!(summary.anomalies.is_clean());

    assert_eq!(
        read(&out, "calls.vcf.default.csv"),
        "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\n\
         1\t100\trs1\tA\tG\t50\tPASS\n\
         1\t200\t.\tC\tT,G\t12\tq10\n\
         2\t300\t.\tG\tA\t.\t."
    );
    assert_eq!(read(&out, "calls.vcf.info.DP.csv"), "DP\n10\n.\n.");
    assert_eq!(read(&out, "calls.vcf.info.DB.csv"), "DB\n1\n0\n0");
    assert_eq!(read(&out, "calls.vcf.info.AF.csv"), "AF\n0.5\n0.1,0.2\n.");
    assert_eq!(
        read(&out, "calls.vcf.sample.GT.csv"),
        "NA002\tNA001\n0/1\t0/0\n1/2\t.\n./.\t1/1"
    );
    assert_eq!(
        read(&out, "calls.vcf.sample.AD.csv"),
        "NA002\tNA001\n5,5\t9,0\n.\t.\n3,\t0,7"
    );
}

#[test]
fn every_output_has_one_line_per_record() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "calls.vcf", VCF);
    let out = dir.path().join("out");
    let summary = split(&input, &out, &SplitOptions::default());

    let written: Vec<_> = summary.written().collect();
    assert_eq!(written.len(), 6);
    for output in written {
        assert_eq!(output.rows, summary.records, "rows in {}", output.key);
        let text = fs::read_to_string(&output.path).unwrap();
        assert_eq!(text.lines().count() as u64, summary.records + 1);
        assert!(!text.ends_with('\n'));
    }
}

#[test]
fn outputs_are_listed_in_canonical_order() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "calls.vcf", VCF);
    let summary = split(&input, &dir.path().join("out"), &SplitOptions::default());

    let keys: Vec<String> = summary.outputs.iter().map(|o| o.key.to_string()).collect();
    insta::assert_debug_snapshot!(keys, @r#"
    [
        "default",
        "info:AF",
        "info:DB",
        "info:DP",
        "sample:AD",
        "sample:GT",
    ]
    "#);
}

#[test]
fn rerun_produces_identical_files() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "calls.vcf", VCF);
    let out = dir.path().join("out");

    let first = split(&input, &out, &SplitOptions::default());
    let before: Vec<Vec<u8>> = first
        .written()
        .map(|o| fs::read(&o.path).unwrap())
        .collect();
    let second = split(&input, &out, &SplitOptions::default());
    let after: Vec<Vec<u8>> = second
        .written()
        .map(|o| fs::read(&o.path).unwrap())
        .collect();

    assert_eq!(before, after);
}

#[test]
fn gzip_input_matches_plain_input() {
    let dir = TempDir::new().unwrap();
    let plain = write_input(&dir, "calls.vcf", VCF);
    let gz = dir.path().join("calls.vcf.gz");
    let mut encoder = GzEncoder::new(fs::File::create(&gz).unwrap(), Compression::default());
    encoder.write_all(VCF.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let out = dir.path().join("out");
    split(&plain, &out, &SplitOptions::default());
    let summary = split(&gz, &out, &SplitOptions::default());

    assert_eq!(summary.records, 3);
    assert_eq!(
        read(&out, "calls.vcf.gz.sample.AD.csv"),
        read(&out, "calls.vcf.sample.AD.csv")
    );
}

#[test]
fn combined_info_layout() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "calls.vcf", VCF);
    let out = dir.path().join("out");
    let options = SplitOptions::default()
        .with_info_layout(InfoLayout::Combined)
        .with_extension("tsv");
    let summary = split(&input, &out, &options);

    assert!(!out.join("calls.vcf.info.DP.tsv").exists());
    assert_eq!(
        read(&out, "calls.vcf.genotype.tsv"),
        "AF\tDB\tDP\n0.5\t1\t10\n0.1,0.2\t0\t.\n.\t0\t."
    );
    assert!(summary.outputs.iter().any(|o| o.key == OutputKey::InfoTable));
}

#[test]
fn malformed_header_is_fatal_before_any_output() {
    let dir = TempDir::new().unwrap();
    let text = "##fileformat=VCFv4.2\n##INFO=<Number=1,Type=Integer>\n#CHROM\tPOS\n";
    let input = write_input(&dir, "bad.vcf", text);
    let out = dir.path().join("out");

    let err = split_vcf(&input, &out, &SplitOptions::default(), &ProgressBar::hidden())
        .unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("could not parse meta-information line 2"), "{message}");
    assert!(!out.exists());
}

#[test]
fn missing_input_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = split_vcf(
        &dir.path().join("absent.vcf"),
        &dir.path().join("out"),
        &SplitOptions::default(),
        &ProgressBar::hidden(),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("absent.vcf"));
}

#[test]
fn header_without_samples_or_format_lines() {
    let dir = TempDir::new().unwrap();
    let text = "##fileformat=VCFv4.1\n\
                ##INFO=<ID=NS,Number=1,Type=Integer,Description=\"Samples\">\n\
                #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
                1\t5\t.\tA\tT\t.\tPASS\tNS=2;XX=1\n";
    let input = write_input(&dir, "sites.vcf", text);
    let out = dir.path().join("out");
    let summary = split(&input, &out, &SplitOptions::default().with_cleanup(CleanupPolicy::Keep));

    assert!(summary.samples.is_empty());
    // implicit GT is declared but has no sample columns to fill
    assert_eq!(summary.format_fields, 1);
    assert_eq!(summary.outputs.len(), 2);
    assert_eq!(read(&out, "sites.vcf.info.NS.csv"), "NS\n2");
    assert_eq!(summary.anomalies.unknown_info_keys, 1);
}

#[test]
fn summary_json_round_trips() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "calls.vcf", VCF);
    let summary = split(&input, &dir.path().join("out"), &SplitOptions::default());
    let json_path = dir.path().join("summary.json");
    write_summary_json(&json_path, &summary).unwrap();

    let parsed: SplitSummary =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed.records, summary.records);
    assert_eq!(parsed.outputs.len(), summary.outputs.len());
    assert_eq!(parsed.samples, summary.samples);
}
