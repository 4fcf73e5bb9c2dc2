//! Tests de carga del catálogo desde CSV (incluido y temporales).
mod common;

use gradpath::algorithm::eligibility::{eligible_courses, select_course, EligibilityPolicy, SlotSelector};
use gradpath::algorithm::prereq_graph::validate_catalog;
use gradpath::error::{CatalogError, Issue, SelectionError};
use gradpath::excel::{list_catalog_files, load_catalog, resolve_catalog_path};
use gradpath::models::{Credits, Department, Plan, Prerequisite, Repeatable};
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

const HEADER: &str = "Course Code,Course Name,Department,Grade Levels,Prerequisites,Credits,Tags,Notes,Repeatable\n";

fn write_csv(body: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().expect("tempfile");
    file.write_all(HEADER.as_bytes()).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_bundled_catalog_loads_clean() {
    let catalog = common::bundled_catalog();
    eprintln!("catálogo incluido: {} cursos", catalog.len());
    assert_eq!(catalog.len(), 65);
    assert!(catalog.issues().is_empty(), "{:?}", catalog.issues());
    assert!(validate_catalog(&catalog).is_empty());

    let english_ii = catalog.by_code("2501").unwrap();
    assert_eq!(english_ii.department, Department::English);
    assert_eq!(english_ii.prerequisite, Prerequisite::AnyOf(vec!["2401".into(), "2404".into()]));

    let chem = catalog.by_code("5401").unwrap();
    assert_eq!(
        chem.prerequisite,
        Prerequisite::AllOfGroups(vec![vec!["4301".into(), "4304".into()], vec!["5301".into(), "5304".into()]])
    );

    let choir = catalog.by_name("concert choir").unwrap();
    assert_eq!(choir.department, Department::FineArts);
    assert_eq!(choir.repeatable, Repeatable::MaxCount(4));
    assert_eq!(choir.grade_levels, (8..=12).collect::<std::collections::BTreeSet<u8>>());

    let study = catalog.by_code("0701").expect("los ceros a la izquierda se conservan");
    assert!(!study.counts_for_graduation());
}

#[test]
fn test_csv_row_problems_become_issues() {
    let file = write_csv(
        "2401,English I,Language Arts,[9],None,,core,,\n\
         2501,English II,Language Arts,[10],2401 &,1,,,\n\
         6501,Guitar,Vocal Music,9-12,None,one,,,\n\
         9999,Mystery,Unknown Dept,eleven,None,1,,,\n\
         2401,English I again,English,[9],None,1,,,\n",
    );
    let catalog = load_catalog(file.path()).unwrap();
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.by_code("2401").unwrap().name, "English I");
    assert_eq!(catalog.by_code("2401").unwrap().credits, Credits::Value(1.0));
    assert_eq!(catalog.by_code("6501").unwrap().department, Department::FineArts);
    assert_eq!(catalog.by_code("9999").unwrap().department, Department::Other("Unknown Dept".into()));
    assert!(catalog.by_code("9999").unwrap().grade_levels.is_empty());

    assert_eq!(
        catalog.issues().to_vec(),
        vec![
            Issue::PrerequisiteParse { code: "2501".into(), raw: "2401 &".into() },
            Issue::CreditParse { code: "6501".into(), raw: "one".into() },
            Issue::InvalidGradeLevels { code: "9999".into(), raw: "eleven".into() },
            Issue::DuplicateCourse { code: "2401".into() },
        ]
    );
}

#[test]
fn test_row_without_code_never_reaches_the_planner() {
    let file = write_csv(
        "2401,English I,Language Arts,[9],None,1,core,,\n\
         ,Orphan Course,English,[9],None,1,,,\n\
         2404,Honors English I,Language Arts,[9],None,1,honors,,\n\
         ,Honors English I,English,[9],None,1,,,\n",
    );
    let catalog = load_catalog(file.path()).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.issues().to_vec(),
        vec![
            Issue::MissingCode { name: "Orphan Course".into() },
            Issue::MissingCode { name: "Honors English I".into() },
        ]
    );

    let policy = EligibilityPolicy::default();
    let eligible = eligible_courses(&catalog, &SlotSelector::None, 9, 0, &Plan::new(), &policy);
    let codes: Vec<&str> = eligible.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["2401", "2404"]);

    assert_eq!(
        select_course(&catalog, &Plan::new(), 9, 0, "", &SlotSelector::None, &policy),
        Err(SelectionError::UnknownCourse(String::new()))
    );
}

#[test]
fn test_repeated_course_name_is_reported() {
    let file = write_csv(
        "2401,English I,Language Arts,[9],None,1,core,,\n\
         2409,English I,Language Arts,[9],None,1,core,,\n",
    );
    let catalog = load_catalog(file.path()).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.by_name("English I").unwrap().code, "2401");
    assert_eq!(
        catalog.issues().to_vec(),
        vec![Issue::DuplicateName { name: "English I".into(), code: "2409".into() }]
    );
}

#[test]
fn test_validation_reports_unknown_and_cycles() {
    let file = write_csv(
        "A101,Course A,Science,9-12,B101,1,,,\n\
         B101,Course B,Science,9-12,A101,1,,,\n\
         C101,Course C,Science,9-12,X999,1,,,\n",
    );
    let catalog = load_catalog(file.path()).unwrap();
    let issues = validate_catalog(&catalog);
    assert!(issues.contains(&Issue::UnknownPrerequisite { code: "C101".into(), missing: "X999".into() }));
    assert!(issues.contains(&Issue::PrerequisiteCycle { codes: vec!["A101".into(), "B101".into()] }));
}

#[test]
fn test_missing_column_and_bad_extension() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(b"Course Code,Course Name,Department\n2401,English I,English\n").unwrap();
    file.flush().unwrap();
    assert!(matches!(
        load_catalog(file.path()),
        Err(CatalogError::MissingColumn { column: "Grade Levels", .. })
    ));

    let txt = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    assert!(matches!(load_catalog(txt.path()), Err(CatalogError::UnsupportedFormat(_))));

    assert!(matches!(load_catalog("no/such/catalog.csv"), Err(CatalogError::Io { .. })));
}

#[test]
fn test_resolve_catalog_path_in_data_dir() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("2025_course_catalog.csv"), HEADER).unwrap();
    std::fs::write(dir.path().join("notes.md"), "x").unwrap();
    std::fs::write(dir.path().join(".~lock.csv"), "x").unwrap();

    let found = resolve_catalog_path(dir.path(), None).unwrap();
    assert_eq!(found, dir.path().join("2025_course_catalog.csv"));

    let named = resolve_catalog_path(dir.path(), Some("2025_course_catalog.csv")).unwrap();
    assert_eq!(named, found);
    assert!(resolve_catalog_path(dir.path(), Some("missing.csv")).is_err());

    assert_eq!(list_catalog_files(dir.path()).unwrap(), vec!["2025_course_catalog.csv".to_string()]);
}

#[test]
fn test_bundled_catalog_is_default() {
    let data_dir = common::bundled_catalog_path().parent().unwrap().to_path_buf();
    assert_eq!(resolve_catalog_path(&data_dir, None).unwrap(), common::bundled_catalog_path());
}
