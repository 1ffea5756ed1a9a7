use std::path::Path;
use std::sync::Mutex;

use pretty_assertions::assert_eq;
use shipx_core::{
    ExtractionWarning, PackageRecord, RenderedDocument, ReportInfo, ReportPipeline, ShipxConfig,
    Stage, TableRows, TableSet, TableWriter, TextFileRenderer,
};

const PAGE_1: &str = "\
The UPS Store 4521
Drop Off Activity Report 01 Jan 2024 - 05 Jan 2024
Drop Off Packages 4x6 Pre-printed Shipping Label
Drop Off Date
Time Pickup Date Customer Service
01/02/2024 10:15 AM 01/05/2024 Acme Corp Ground 1Z999AA10123456784 2.5lb
01/02/2024 11:40 AM 01/05/2024 Jo Smith Next Day Air 1Z999AA10123456785 1.0lb ManWt
01/03/2024 2:05 PM 01/06/2024 Acme Corp 3 Day Select 1Z999AA10123456786 N/A Com
Page 1 of 3";

const PAGE_2: &str = "\
The UPS Store 4521
Drop Off Packages 4x6 Pre-printed Shipping Label
Drop Off Date
Time Pickup Date Customer Service
01/04/2024 9:05 AM 01/08/2024 Maria Lopez Ground 1Z999AA10123456787 12lb
Waybill (Air/Ground Shipping Doc)
Drop Off Date
Time Pickup Date Customer Service
01/04/2024 4:45 PM Jan 05, 2024 Next Day Air 1Z999AA10123456788 3.2lb
Enhanced Drop Off Packages
Drop Off Date Time Pickup Date Customer Service Tracking Number Weight
01/05/2024 8:30 AM 01/09/2024 Kim Lee Ground HRAB1234-2024-17 4lb
01/05/2024 8:45 AM 01/09/2024 Kim Lee Ground 1Z999AA10123456789 5lb
Page 2 of 3";

const MOBILE: &str = "\
Mobile Drop Off
Drop Off Date Time Pickup Date Customer Service Tracking Number Weight
01/05/2024 1:10 PM 01/09/2024 Sam Park Ground 1Z999AA10123456790 7.5lb
";

const SUMMARIES: &str = "\
Summary
Unknown service, not
Type International Ground Air specified Total Packages Weight
Drop Off Packages 0 5 2 0 7 24.7lb
Enhanced Drop Off Packages 0 2 0 0 2
9.0
Mobile Drop Off 0 1 0 0 1 7.5lb
Total: 0 8 2 0 10
Kiosk Summary
Unknown service, not
Type International Ground Air specified Total Packages Weight
10.0.0.12
(US-EN) Store 4521
Drop Off 0 5 2 0 7 24.7lb
Total: 0 5 2 0 7
Page 3 of 3";

fn report(with_mobile: bool) -> RenderedDocument {
    let mut page_3 = String::from("The UPS Store 4521\n");
    if with_mobile {
        page_3.push_str(MOBILE);
    }
    page_3.push_str(SUMMARIES);
    RenderedDocument::new(vec![PAGE_1.to_string(), PAGE_2.to_string(), page_3])
}

fn pipeline() -> ReportPipeline {
    ReportPipeline::new(&ShipxConfig::default()).unwrap()
}

fn packages<'a>(tables: &'a TableSet, name: &str) -> &'a [PackageRecord] {
    match tables.get(name).map(|t| &t.rows) {
        Some(TableRows::Packages(rows)) => rows,
        other => panic!("{name} is not a package table: {other:?}"),
    }
}

#[test]
fn test_extracts_every_table() {
    let extraction = pipeline().extract(&report(true));
    let tables = &extraction.tables;

    assert_eq!(
        extraction.report,
        ReportInfo {
            title: "Drop Off Activity Report".to_string(),
            date_range: Some("01 Jan 2024 - 05 Jan 2024".to_string()),
        }
    );
    assert_eq!(
        extraction.vocabulary.labels(),
        ["3 Day Select", "Next Day Air", "Ground"]
    );

    let drop_off = packages(tables, "Drop Off Packages");
    assert_eq!(drop_off.len(), 5);
    assert_eq!(
        drop_off[0],
        PackageRecord {
            time: "01/02/2024 10:15 AM".to_string(),
            pickup_date: "01/05/2024".to_string(),
            customer: "Acme Corp".to_string(),
            service: "Ground".to_string(),
            tracking: "1Z999AA10123456784".to_string(),
            weight: "2.5lb".to_string(),
        }
    );
    assert_eq!(drop_off[1].customer, "Jo Smith");
    assert_eq!(drop_off[1].weight, "1.0lb ManWt");
    assert_eq!(drop_off[2].service, "3 Day Select");
    assert_eq!(drop_off[2].weight, "N/A Com");
    assert_eq!(drop_off[3].customer, "Maria Lopez");
    assert_eq!(drop_off[4].pickup_date, "Jan 05, 2024");
    assert_eq!(drop_off[4].customer, "");
    assert_eq!(drop_off[4].service, "Next Day Air");

    let enhanced = packages(tables, "Enhanced Drop Off Packages");
    let tracking: Vec<&str> = enhanced.iter().map(|r| r.tracking.as_str()).collect();
    assert_eq!(tracking, ["HRAB1234-2024-17", "1Z999AA10123456789"]);

    let mobile = packages(tables, "Mobile Drop Off");
    assert_eq!(mobile.len(), 1);
    assert_eq!(mobile[0].customer, "Sam Park");

    match &tables.get("Summary").unwrap().rows {
        TableRows::Summary(rows) => {
            assert_eq!(rows.len(), 3);
            assert_eq!(rows[0].description, "Drop Off Packages");
            assert_eq!(rows[1].description, "Enhanced Drop Off Packages");
            assert_eq!(rows[1].weight, "9.0lb");
            assert_eq!(rows[2].total_packages, 1);
        }
        other => panic!("unexpected rows {other:?}"),
    }
    match &tables.get("Kiosk Summary").unwrap().rows {
        TableRows::Summary(rows) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].description, "Drop Off");
            assert_eq!(rows[0].ground, 5);
        }
        other => panic!("unexpected rows {other:?}"),
    }

    assert_eq!(tables.package_count(), 8);
    assert_eq!(extraction.stats.package_records, 8);
    assert_eq!(extraction.stats.summary_rows, 4);
    assert_eq!(extraction.stats.skipped_rows, 0);
    assert!(extraction.warnings.is_empty(), "{:?}", extraction.warnings);
}

#[test]
fn test_extraction_is_idempotent() {
    let pipeline = pipeline();
    let document = report(true);

    let first = pipeline.extract(&document);
    let second = pipeline.extract(&document);

    assert_eq!(first.tables, second.tables);
    assert_eq!(first.vocabulary, second.vocabulary);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn test_empty_section_does_not_block_others() {
    let extraction = pipeline().extract(&report(false));

    assert!(extraction.tables.get("Mobile Drop Off").unwrap().is_empty());
    assert_eq!(packages(&extraction.tables, "Drop Off Packages").len(), 5);
    assert_eq!(packages(&extraction.tables, "Enhanced Drop Off Packages").len(), 2);
    assert_eq!(extraction.tables.get("Summary").unwrap().len(), 3);
    assert_eq!(
        extraction.warnings,
        [ExtractionWarning::SectionEmpty {
            section: "Mobile Drop Off".to_string()
        }]
    );
}

/// Records what it was asked to write.
#[derive(Default)]
struct RecordingWriter {
    written: Mutex<Vec<(String, usize)>>,
}

impl TableWriter for RecordingWriter {
    fn extension(&self) -> &str {
        "json"
    }

    fn write(&self, tables: &TableSet, _report: &ReportInfo, path: &Path) -> shipx_core::Result<()> {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        self.written
            .lock()
            .unwrap()
            .push((name, tables.non_empty().count()));
        Ok(())
    }
}

#[test]
fn test_run_names_output_after_date_range() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ActiveReports Document.txt");
    let document = report(true);
    std::fs::write(&input, document.pages.join("\u{000C}")).unwrap();

    let writer = RecordingWriter::default();
    let stages = Mutex::new(Vec::new());
    let outcome = pipeline()
        .run(&input, &TextFileRenderer, &writer, &|stage: &Stage<'_>| {
            stages.lock().unwrap().push(stage.to_string());
        })
        .unwrap();

    assert_eq!(
        outcome.output_path,
        dir.path().join("ActiveReports Document 01-01-2024 to 05-01-2024.json")
    );
    assert_eq!(outcome.tables.package_count(), 8);
    assert_eq!(
        writer.written.into_inner().unwrap(),
        [(
            "ActiveReports Document 01-01-2024 to 05-01-2024.json".to_string(),
            5
        )]
    );

    let stages = stages.into_inner().unwrap();
    assert!(stages.first().unwrap().starts_with("Rendering "));
    assert!(stages.last().unwrap().starts_with("Writing "));
}

#[test]
fn test_run_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.txt");

    let err = pipeline()
        .run(&input, &TextFileRenderer, &RecordingWriter::default(), &shipx_core::NoProgress)
        .unwrap_err();

    assert!(matches!(err, shipx_core::ShipxError::InputUnavailable { .. }));
}
