//! End-to-end tests for whole pipelines (grid -> selections -> lookups -> tidy rows)

use pretty_assertions::assert_eq;
use tidy_sheets::prelude::*;
use tidy_sheets::{LookupEngine, BaseCell};

fn refs(selection: &Selectable) -> Vec<String> {
    selection.cells().iter().map(|c| c.excel_ref()).collect()
}

/// Quarterly figures with the year written once above each block of quarters
/// and a subtotal label to the left of each half-year band.
fn quarterly() -> Selectable {
    Selectable::new(
        Table::from_rows(
            "quarterly",
            vec![
                vec!["Quarterly sales", "", "", "", ""],
                vec!["", "2023", "", "2024", ""],
                vec!["", "Q1", "Q2", "Q1", "Q2"],
                vec!["North", "1", "2", "3", "4"],
                vec!["South", "5", "6", "7", "8"],
                vec!["", "", "", "", ""],
                vec!["Source: survey", "", "", "", ""],
            ],
        )
        .unwrap(),
    )
}

#[test]
fn test_spread_years_over_quarters() {
    let sheet = quarterly();
    let years = sheet
        .excel_ref("B2:E2")
        .unwrap()
        .spread(RIGHT)
        .unwrap()
        .label_as("Year");
    let quarters = sheet.row(3).unwrap().is_not_blank().label_as("Quarter");
    let regions = sheet
        .column("A")
        .unwrap()
        .excel_ref("A4:A5")
        .unwrap()
        .label_as("Region");
    let observations = sheet.excel_ref("B4:E5").unwrap().is_not_blank();

    let mut tidy = TidyData::new(
        &observations,
        vec![
            Column::new(years.attach_directly(DOWN).unwrap()),
            Column::new(quarters.attach_directly(DOWN).unwrap()),
            Column::new(regions.attach_directly(RIGHT).unwrap()),
            Column::constant("Unit", "GBP"),
        ],
    )
    .unwrap();

    assert_eq!(tidy.header(), vec!["Value", "Year", "Quarter", "Region", "Unit"]);
    assert_eq!(
        tidy.rows().unwrap().to_vec(),
        vec![
            vec!["1", "2023", "Q1", "North", "GBP"],
            vec!["2", "2023", "Q2", "North", "GBP"],
            vec!["3", "2024", "Q1", "North", "GBP"],
            vec!["4", "2024", "Q2", "North", "GBP"],
            vec!["5", "2023", "Q1", "South", "GBP"],
            vec!["6", "2023", "Q2", "South", "GBP"],
            vec!["7", "2024", "Q1", "South", "GBP"],
            vec!["8", "2024", "Q2", "South", "GBP"],
        ]
    );
}

#[test]
fn test_closest_years_without_spreading() {
    let sheet = quarterly();
    let years = sheet.excel_ref("B2:E2").unwrap().is_not_blank().label_as("Year");
    let observations = sheet.excel_ref("B4:E4").unwrap();

    // Years sit above and to the left of the quarters they head
    let mut tidy = TidyData::new(
        &observations,
        vec![Column::new(years.attach_closest(RIGHT).unwrap())],
    )
    .unwrap();

    let years: Vec<String> = tidy.rows().unwrap().iter().map(|r| r[1].clone()).collect();
    assert_eq!(years, vec!["2023", "2023", "2024", "2024"]);
}

#[test]
fn test_locating_blocks_by_string() {
    let sheet = quarterly();
    let title = sheet.cell_containing_string("Quarterly", false).unwrap();
    assert_eq!(title.lone_value().unwrap(), "Quarterly sales");

    let footer = sheet.cells_containing_string("Source", false);
    let table_area = (&(&sheet - &footer).unwrap() - &title).unwrap();
    assert!(!table_area.contains(BaseCell::new(0, 6)));
    assert!(table_area.contains(BaseCell::new(1, 3)));

    let header_row = sheet.row_containing_strings(&["Q1", "Q2"], true).unwrap();
    assert_eq!(refs(&header_row.is_not_blank()), vec!["B3", "C3", "D3", "E3"]);
}

#[test]
fn test_waffle_builds_observation_grid() {
    let sheet = quarterly();
    let quarters = sheet.excel_ref("B3:E3").unwrap();
    let regions = sheet.excel_ref("A4:A5").unwrap();

    // Quarters give the columns, regions (below) give the rows
    let grid = quarters.waffle(DOWN, &regions).unwrap();
    assert_eq!(
        refs(&grid),
        vec!["B4", "C4", "D4", "E4", "B5", "C5", "D5", "E5"]
    );

    let overlapping = sheet.excel_ref("A3:A5").unwrap();
    let err = quarters.waffle(DOWN, &overlapping).unwrap_err();
    assert_eq!(err.lookup_failure(), Some(LookupFailure::Ambiguous));
}

#[test]
fn test_waffle_right_is_full_cross_product() {
    let sheet = quarterly();
    let regions = sheet.excel_ref("A4:A5").unwrap();
    let quarters = sheet.excel_ref("C3:D3").unwrap();

    let grid = regions.waffle(RIGHT, &quarters).unwrap();
    assert_eq!(refs(&grid), vec!["C4", "D4", "C5", "D5"]);

    let overlapping = sheet.excel_ref("A2:B2").unwrap();
    assert!(regions.waffle(RIGHT, &overlapping).is_err());
}

#[test]
fn test_within_subtotal_bands() {
    let sheet = Selectable::new(
        Table::from_rows(
            "bands",
            vec![
                vec!["Band A", "", ""],
                vec!["", "x", "1"],
                vec!["", "y", "2"],
                vec!["Band B", "", ""],
                vec!["", "x", "3"],
            ],
        )
        .unwrap(),
    );
    let bands = sheet.column("A").unwrap().is_not_blank().label_as("Band");
    let observations = sheet.column("C").unwrap().is_not_blank();

    // A band label covers up to two rows below itself
    let mut tidy = TidyData::new(
        &observations,
        vec![Column::new(bands.attach_within(RIGHT, -2, 0).unwrap())],
    )
    .unwrap();
    let labels: Vec<String> = tidy.rows().unwrap().iter().map(|r| r[1].clone()).collect();
    assert_eq!(labels, vec!["Band A", "Band A", "Band B"]);
}

#[test]
fn test_within_symmetric_band_between_headers_is_ambiguous() {
    let sheet = Selectable::new(
        Table::from_rows(
            "between",
            vec![
                vec!["North", "", "South"],
                vec!["", "", ""],
                vec!["1", "2", "3"],
            ],
        )
        .unwrap(),
    );
    let headers = sheet.row(1).unwrap().is_not_blank().label_as("Region");
    let observations = sheet.row(3).unwrap();

    // B3 is as near to A1 as to C1 on both axes
    let mut tidy = TidyData::new(
        &observations,
        vec![Column::new(headers.attach_within(DOWN, -1, 1).unwrap())],
    )
    .unwrap();
    let err = tidy.rows().unwrap_err();
    assert_eq!(err.lookup_failure(), Some(LookupFailure::Ambiguous));
    assert!(err.to_string().contains("B3"));

    // A one-sided band settles it
    let mut tidy = TidyData::new(
        &observations,
        vec![Column::new(headers.attach_within(DOWN, 0, 1).unwrap())],
    )
    .unwrap();
    let regions: Vec<String> = tidy.rows().unwrap().iter().map(|r| r[1].clone()).collect();
    assert_eq!(regions, vec!["North", "South", "South"]);
}

#[test]
fn test_directly_fails_without_same_row_candidate() {
    let sheet = quarterly();
    let regions = sheet.excel_ref("A4").unwrap().label_as("Region");
    let observations = sheet.excel_ref("B4:B5").unwrap();

    let mut tidy = TidyData::new(
        &observations,
        vec![Column::new(regions.attach_directly(RIGHT).unwrap())],
    )
    .unwrap();
    let err = tidy.rows().unwrap_err();
    assert_eq!(err.lookup_failure(), Some(LookupFailure::Missing));
}

#[test]
fn test_unlabelled_dimension_is_rejected() {
    let sheet = quarterly();
    let err = sheet.excel_ref("B2:E2").unwrap().attach_closest(DOWN).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn test_selections_from_different_grids_do_not_mix() {
    let first = quarterly();
    let second = quarterly();
    let err = first.union(&second).unwrap_err();
    assert!(matches!(err, Error::StructuralMismatch { .. }));
}

#[test]
fn test_conditional_column_reads_positional_values() {
    let sheet = quarterly();
    let quarters = sheet.row(3).unwrap().is_not_blank().label_as("Quarter");
    let observations = sheet.excel_ref("B4:C4").unwrap();

    let mut tidy = TidyData::new(
        &observations,
        vec![
            Column::horizontal_condition(
                "Half",
                |row| {
                    Ok(match row.get("Quarter")? {
                        "Q1" | "Q2" => "H1".to_string(),
                        _ => "H2".to_string(),
                    })
                },
                0,
            ),
            Column::new(quarters.attach_directly(DOWN).unwrap())
                .with_validation(RegexValidator::new("Q[1-4]").unwrap()),
        ],
    )
    .unwrap();

    assert_eq!(
        tidy.rows().unwrap().to_vec(),
        vec![vec!["1", "H1", "Q1"], vec!["2", "H1", "Q2"]]
    );
    assert!(matches!(
        tidy.columns()[1].engine(),
        LookupEngine::Directly(_)
    ));
}
