use std::path::Path;

use loan_eda::DashboardError;
use loan_eda::charts::{CHART_SPECS, ChartData, ChartKind};
use loan_eda::dashboard::Dashboard;
use loan_eda::io::excel_read::{self, DESCRIPTION_SHEET, RECORDS_SHEET};
use loan_eda::model::Cell;
use loan_eda::render::PAGE_HEADING;
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

enum Value {
    Num(f64),
    Text(&'static str),
    Flag(bool),
    Blank,
}

use Value::{Blank, Flag, Num, Text};

const COLUMNS: [&str; 11] = [
    "Amount_issued",
    "Baking_Loan_delinquency",
    "Term",
    "AntiFraud_score",
    "Accounts",
    "Real_TipoEntidad_AFIS",
    "Baking_Loan_at_day",
    "Baking_Loan_Close",
    "TotalSaldoTotal_2",
    "ValorMora_2",
    "RangoEdad",
];

fn loan_rows() -> Vec<[Value; 11]> {
    vec![
        [
            Num(100000.0),
            Flag(false),
            Num(30.0),
            Num(0.12),
            Num(3.0),
            Num(1.0),
            Num(2.0),
            Num(10.0),
            Num(1500000.0),
            Num(0.0),
            Text("18-30"),
        ],
        [
            Text("220000"),
            Num(0.0),
            Num(20.0),
            Num(0.4),
            Num(5.0),
            Num(2.0),
            Num(0.0),
            Text("12"),
            Num(2500000.0),
            Text("N/A"),
            Text("31-35"),
        ],
        [
            Num(220000.0),
            Flag(true),
            Num(30.0),
            Num(0.9),
            Num(1.0),
            Num(0.0),
            Num(4.0),
            Num(48.0),
            Blank,
            Num(350000.0),
            Text("18-30"),
        ],
        [
            Text("N/A"),
            Num(0.0),
            Num(30.0),
            Blank,
            Num(2.0),
            Num(4.0),
            Num(1.0),
            Num(3.0),
            Num(900000.0),
            Num(120000.0),
            Blank,
        ],
        [
            Num(500000.0),
            Num(0.0),
            Num(10.0),
            Num(0.05),
            Num(7.0),
            Num(3.0),
            Num(3.0),
            Text("cerrado"),
            Num(38000000.0),
            Num(0.0),
            Text("31-35"),
        ],
    ]
}

fn write_workbook(path: &Path, rows: &[[Value; 11]], sheets: &[&str]) {
    let mut workbook = Workbook::new();

    if sheets.contains(&RECORDS_SHEET) {
        let data = workbook.add_worksheet();
        data.set_name(RECORDS_SHEET).expect("sheet named");
        for (col, header) in COLUMNS.iter().enumerate() {
            data.write_string(0, col as u16, *header)
                .expect("header written");
        }
        for (row_idx, row) in rows.iter().enumerate() {
            let row_num = (row_idx + 1) as u32;
            for (col, value) in row.iter().enumerate() {
                let col = col as u16;
                match value {
                    Num(number) => {
                        data.write_number(row_num, col, *number)
                            .expect("number written");
                    }
                    Text(text) => {
                        data.write_string(row_num, col, *text)
                            .expect("text written");
                    }
                    Flag(flag) => {
                        data.write_boolean(row_num, col, *flag)
                            .expect("flag written");
                    }
                    Blank => {}
                }
            }
        }
    }

    if sheets.contains(&DESCRIPTION_SHEET) {
        let description = workbook.add_worksheet();
        description
            .set_name(DESCRIPTION_SHEET)
            .expect("sheet named");
        description
            .write_string(0, 0, "Variable")
            .expect("header written");
        description
            .write_string(0, 1, "Descripción")
            .expect("header written");
        description
            .write_string(1, 0, "Amount_issued")
            .expect("row written");
        description
            .write_string(1, 1, "Monto desembolsado")
            .expect("row written");
    }

    workbook.save(path).expect("workbook saved");
}

const BOTH_SHEETS: [&str; 2] = [RECORDS_SHEET, DESCRIPTION_SHEET];

#[test]
fn loader_reads_both_sheets() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("DATA.xlsx");
    write_workbook(&path, &loan_rows(), &BOTH_SHEETS);

    let workbook = excel_read::load_workbook(&path).expect("workbook loaded");

    assert_eq!(workbook.records.columns, COLUMNS.to_vec());
    assert_eq!(workbook.records.len(), 5);
    assert_eq!(workbook.descriptions.len(), 1);
    assert_eq!(workbook.records.rows[0][0], Cell::Number(100000.0));
    assert_eq!(workbook.records.rows[1][0], Cell::Text("220000".into()));
    assert_eq!(workbook.records.rows[3][10], Cell::Missing);
}

#[test]
fn missing_description_sheet_is_fatal() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("DATA.xlsx");
    write_workbook(&path, &loan_rows(), &[RECORDS_SHEET]);

    let error = Dashboard::prepare(&path).unwrap_err();
    assert!(matches!(error, DashboardError::MissingSheet(ref name) if name == "Description"));
}

#[test]
fn missing_records_sheet_is_fatal() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("DATA.xlsx");
    write_workbook(&path, &loan_rows(), &[DESCRIPTION_SHEET]);

    let error = Dashboard::prepare(&path).unwrap_err();
    assert!(matches!(error, DashboardError::MissingSheet(ref name) if name == "DATA"));
}

#[test]
fn missing_file_is_fatal() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("absent.xlsx");
    let error = Dashboard::prepare(&path).unwrap_err();
    assert!(matches!(error, DashboardError::MissingInput(_)));
}

#[test]
fn dashboard_builds_every_chart_in_order() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("DATA.xlsx");
    write_workbook(&path, &loan_rows(), &BOTH_SHEETS);

    let dashboard = Dashboard::prepare(&path).expect("dashboard prepared");

    assert_eq!(dashboard.charts.len(), CHART_SPECS.len());
    for (chart, spec) in dashboard.charts.iter().zip(CHART_SPECS.iter()) {
        assert_eq!(chart.spec, spec);
    }

    let records = &dashboard.workbook.records;
    for chart in &dashboard.charts {
        let present = records
            .column(chart.spec.column)
            .expect("column present")
            .filter(|cell| !cell.is_missing())
            .count();
        assert_eq!(chart.total_count(), present, "{}", chart.spec.column);
    }

    let delinquency = &dashboard.charts[1];
    assert!(matches!(delinquency.spec.kind, ChartKind::Histogram { .. }));
    assert_eq!(delinquency.total_count(), 5);

    assert!(dashboard.page.contains(PAGE_HEADING));
    for spec in &CHART_SPECS {
        assert!(dashboard.page.contains(spec.id), "{} not on page", spec.id);
    }
}

#[test]
fn coerced_columns_drop_unparsable_values() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("DATA.xlsx");
    write_workbook(&path, &loan_rows(), &BOTH_SHEETS);

    let dashboard = Dashboard::prepare(&path).expect("dashboard prepared");
    let records = &dashboard.workbook.records;

    let amounts: Vec<&Cell> = records.column("Amount_issued").unwrap().collect();
    assert_eq!(
        amounts,
        vec![
            &Cell::Number(100000.0),
            &Cell::Number(220000.0),
            &Cell::Number(220000.0),
            &Cell::Missing,
            &Cell::Number(500000.0),
        ]
    );

    let amount_chart = &dashboard.charts[0];
    assert_eq!(amount_chart.total_count(), 4);
    match &amount_chart.data {
        ChartData::Histogram(bins) => {
            assert_eq!(bins.len(), 30);
            assert_eq!(bins[0].lower, 100000.0);
            assert_eq!(bins[29].upper, 500000.0);
        }
        other => panic!("unexpected chart data: {other:?}"),
    }

    assert_eq!(
        records.numeric_values("Baking_Loan_Close").unwrap(),
        vec![10.0, 12.0, 48.0, 3.0]
    );
}

#[test]
fn age_ranges_are_counted_and_sorted() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("DATA.xlsx");
    write_workbook(&path, &loan_rows(), &BOTH_SHEETS);

    let dashboard = Dashboard::prepare(&path).expect("dashboard prepared");
    let age_chart = dashboard.charts.last().expect("age chart");

    match &age_chart.data {
        ChartData::Categories(categories) => {
            let pairs: Vec<(&str, usize)> = categories
                .iter()
                .map(|category| (category.category.as_str(), category.count))
                .collect();
            assert_eq!(pairs, vec![("18-30", 2), ("31-35", 2)]);
        }
        other => panic!("unexpected chart data: {other:?}"),
    }
}

#[test]
fn drifted_column_names_are_fatal() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("DATA.xlsx");

    let mut workbook = Workbook::new();
    let data = workbook.add_worksheet();
    data.set_name(RECORDS_SHEET).expect("sheet named");
    data.write_string(0, 0, "Monto").expect("header written");
    data.write_number(1, 0, 1.0).expect("value written");
    workbook
        .add_worksheet()
        .set_name(DESCRIPTION_SHEET)
        .expect("sheet named");
    workbook.save(&path).expect("workbook saved");

    let error = Dashboard::prepare(&path).unwrap_err();
    assert!(matches!(
        error,
        DashboardError::MissingColumn { ref column, .. } if column == "Amount_issued"
    ));
}
