//! Header scanning and the row source over plain and compressed files.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression as GzLevel;
use flate2::write::GzEncoder;
use unvcf_ingest::{
    HeaderOptions, IngestError, RowSource, UNKNOWN_FORMAT, open_vcf, read_header, read_vcf,
};
use unvcf_model::{Cardinality, Namespace, RawRow};

const VCF: &str = "##fileformat=VCFv4.2\n\
##contig=<ID=1,length=1000>\n\
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total Depth\">\n\
##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">\n\
##FORMAT=<ID=AD,Number=2,Type=Integer,Description=\"Allelic depths\">\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\tS2\n\
1\t100\trs1\tA\tG\t50\tPASS\tDP=10\tGT:AD\t0/1:5,5\t1/1:0,9\n\
1\t200\t.\tC\tT\t.\tq10\t.\tGT\t0/0\t./.\n";

fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    path
}

fn collect_rows<R: std::io::BufRead>(rows: RowSource<R>) -> Vec<RawRow> {
    rows.collect::<Result<_, _>>().expect("read rows")
}

#[test]
fn scans_header_and_stops_at_first_record() {
    let (header, rows) = read_vcf(VCF.as_bytes(), HeaderOptions::default()).expect("read vcf");
    assert_eq!(header.file_format, "VCFv4.2");
    assert_eq!(header.unstructured, vec!["##contig=<ID=1,length=1000>"]);
    assert_eq!(header.samples(), ["S1".to_string(), "S2".to_string()]);
    assert_eq!(header.fixed_columns(7).len(), 7);
    assert_eq!(header.fixed_columns(7)[0], "#CHROM");
    assert_eq!(header.line_count, 6);
    assert_eq!(
        header.registry.cardinality(Namespace::Format, "AD"),
        Some(Cardinality::Fixed(2))
    );

    let rows = collect_rows(rows);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].line_number, 7);
    assert_eq!(rows[1].line_number, 8);
    assert_eq!(rows[1].samples()[1], "./.");
}

#[test]
fn missing_file_format_falls_back_to_unknown() {
    let text = "##INFO=<ID=DP,Number=1,Type=Integer,Description=\"d\">\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";
    let header = read_header(&mut text.as_bytes(), HeaderOptions::default()).expect("header");
    assert_eq!(header.file_format, UNKNOWN_FORMAT);
    assert!(header.registry.contains(Namespace::Info, "DP"));
    assert!(header.samples().is_empty());
}

#[test]
fn implicit_genotype_is_added_once() {
    let text = "##fileformat=VCFv4.1\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\n";
    let header = read_header(&mut text.as_bytes(), HeaderOptions::default()).expect("header");
    let gt = header.registry.get(Namespace::Format, "GT").expect("GT");
    assert_eq!(gt.number, Cardinality::Fixed(1));

    let header = read_header(
        &mut text.as_bytes(),
        HeaderOptions {
            implicit_genotype: false,
        },
    )
    .expect("header");
    assert!(!header.registry.contains(Namespace::Format, "GT"));

    let (header, _) = read_vcf(VCF.as_bytes(), HeaderOptions::default()).expect("read vcf");
    assert_eq!(header.registry.len(Namespace::Format), 2);
}

#[test]
fn malformed_declaration_aborts_header() {
    let text = "##fileformat=VCFv4.2\n##INFO=ID=DP\n#CHROM\tPOS\n";
    let err = read_header(&mut text.as_bytes(), HeaderOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::MetaInfo { line_number: 2, .. }));
}

#[test]
fn header_without_column_line_is_rejected() {
    let text = "##fileformat=VCFv4.2\n##INFO=<ID=DP,Number=1>\n";
    let err = read_header(&mut text.as_bytes(), HeaderOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumnHeader { lines: 2 }));

    let err = read_header(&mut "".as_bytes(), HeaderOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::EmptyInput));
}

#[test]
fn crlf_and_invalid_utf8_are_tolerated() {
    let mut bytes = b"##fileformat=VCFv4.2\r\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\r\n".to_vec();
    bytes.extend_from_slice(b"1\t5\tid\xff\tA\tC\t.\tPASS\tDP=1\r\n");
    let (header, rows) = read_vcf(bytes.as_slice(), HeaderOptions::default()).expect("read vcf");
    assert_eq!(header.file_format, "VCFv4.2");
    assert_eq!(header.columns.last().map(String::as_str), Some("INFO"));
    let rows = collect_rows(rows);
    assert_eq!(rows[0].column(2), Some("id\u{fffd}"));
    assert_eq!(rows[0].info(), Some("DP=1"));
}

#[test]
fn record_line_numbers_follow_the_file() {
    let text = "##fileformat=VCFv4.2\r\n\
                #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\r\n\
                1\t1\t.\tA\tC\t.\tPASS\t.\r\n\
                \r\n\
                \n\
                1\t2\t.\tA\tC\t.\tPASS\t.\r\n\
                1\t3\t.\tA\tC\t.\tPASS\t.";
    let (header, rows) = read_vcf(text.as_bytes(), HeaderOptions::default()).expect("read vcf");
    assert_eq!(header.line_count, 2);
    let numbers: Vec<u64> = collect_rows(rows).iter().map(|row| row.line_number).collect();
    assert_eq!(numbers, vec![3, 6, 7]);
}

#[test]
fn reads_gzip_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut encoder = GzEncoder::new(Vec::new(), GzLevel::default());
    encoder.write_all(VCF.as_bytes()).expect("compress");
    let path = write_file(dir.path(), "calls.vcf.gz", &encoder.finish().expect("finish"));

    let (header, rows) = open_vcf(&path, HeaderOptions::default()).expect("open gz");
    assert_eq!(header.samples().len(), 2);
    assert_eq!(collect_rows(rows).len(), 2);
}

#[test]
fn reads_bzip2_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("calls.vcf.bz2");
    let file = File::create(&path).expect("create");
    let mut encoder = bzip2::write::BzEncoder::new(file, bzip2::Compression::default());
    encoder.write_all(VCF.as_bytes()).expect("compress");
    encoder.finish().expect("finish");

    let (header, rows) = open_vcf(&path, HeaderOptions::default()).expect("open bz2");
    assert_eq!(header.file_format, "VCFv4.2");
    assert_eq!(collect_rows(rows).len(), 2);
}

#[test]
fn missing_input_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = open_vcf(&dir.path().join("absent.vcf"), HeaderOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
