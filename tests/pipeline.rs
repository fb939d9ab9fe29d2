use std::fs;
use std::path::Path;

use covid_dashboard::charts::{dashboard_charts, ChartKind};
use covid_dashboard::config::{DashboardSettings, DataConfig};
use covid_dashboard::data::{build_dashboard_data, ErrorKind};
use covid_dashboard::report::ReportGenerator;
use covid_dashboard::stats::StatsCalculator;

const CASES_HEADER: &str =
    "Sno,Date,Time,State/UnionTerritory,ConfirmedIndianNational,ConfirmedForeignNational,Cured,Deaths,Confirmed";
const VACCINE_HEADER: &str = "Updated On,State,Total Doses Administered,Male(Individuals Vaccinated),Female(Individuals Vaccinated),Transgender(Individuals Vaccinated),Total Individuals Vaccinated";

fn write(dir: &Path, name: &str, lines: &[&str]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n")).expect("write fixture");
    path
}

fn config_for(dir: &Path, cases: &[&str], vaccines: &[&str]) -> DataConfig {
    DataConfig {
        cases_path: write(dir, "covid_19_india.csv", cases),
        vaccinations_path: write(dir, "covid_vaccine_statewise.csv", vaccines),
        ..DataConfig::default()
    }
}

fn default_vaccines() -> Vec<&'static str> {
    vec![
        VACCINE_HEADER,
        "16/01/2021,India,48276,23757,24517,2,48276",
        "16/01/2021,Kerala,8062,3000,5062,0,8062",
        "17/01/2021,Kerala,9000,3500,5500,0,9000",
        "16/01/2021,Delhi,4319,2000,2319,0,4319",
        "16/01/2021,Goa,,,,,",
    ]
}

#[test]
fn builds_dashboard_from_csv_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(
        dir.path(),
        &[
            CASES_HEADER,
            "1,2020-06-01,8:00 AM,A,-,-,80,5,100",
            "2,2020-06-01,8:00 AM,B,-,-,40,2,50",
            "3,2020-06-02,8:00 AM,B,-,-,41,,60",
        ],
        &default_vaccines(),
    );

    let data = build_dashboard_data(&config).unwrap();

    // Incomplete row for B on 06-02 is gone.
    assert_eq!(data.cases.len(), 2);
    let states: Vec<&str> = data.statewise.iter().map(|s| s.state.as_str()).collect();
    assert_eq!(states, vec!["A", "B"]);
    assert_eq!(data.statewise[1].confirmed, 50);
    let a = data.cases.iter().find(|c| c.state == "A").unwrap();
    assert_eq!(a.active, 15);

    // Nationwide row excluded; Goa kept with empty counts.
    assert_eq!(data.vaccinations.len(), 4);
    assert_eq!(data.male_vaccinated, 8500.0);
    assert_eq!(data.female_vaccinated, 12881.0);
    let most: Vec<&str> = data.most_vaccinated.iter().map(|v| v.state.as_str()).collect();
    assert_eq!(most, vec!["Kerala", "Delhi", "Goa"]);
    let least: Vec<&str> = data.least_vaccinated.iter().map(|v| v.state.as_str()).collect();
    assert_eq!(least, vec!["Goa", "Delhi", "Kerala"]);
}

#[test]
fn vaccination_rows_without_state_still_count_towards_totals() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(
        dir.path(),
        &[CASES_HEADER, "1,2020-06-01,8:00 AM,Kerala,-,-,10,1,20"],
        &[
            VACCINE_HEADER,
            "16/01/2021,India,200,100,100,0,200",
            "2021-01-16,Kerala,30,10,20,0,30",
            "16/01/2021,,11,5,6,0,11",
        ],
    );

    let data = build_dashboard_data(&config).unwrap();
    assert_eq!(data.vaccinations.len(), 2);
    assert_eq!(data.male_vaccinated, 15.0);
    assert_eq!(data.female_vaccinated, 26.0);
    let most: Vec<&str> = data.most_vaccinated.iter().map(|v| v.state.as_str()).collect();
    assert_eq!(most, vec!["Kerala"]);

    let stats = StatsCalculator::dashboard_stats(&data, &DashboardSettings::default());
    assert_eq!(stats.metrics.vaccinated, 41.0);
}

#[test]
fn same_files_give_identical_results() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(
        dir.path(),
        &[
            CASES_HEADER,
            "1,2020-06-01,8:00 AM,Kerala,-,-,10,1,20",
            "2,2020-06-02,8:00 AM,Kerala,-,-,15,1,30",
            "3,2020-06-01,8:00 AM,Delhi,-,-,10,1,30",
        ],
        &default_vaccines(),
    );

    let first = build_dashboard_data(&config).unwrap();
    let second = build_dashboard_data(&config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn trend_chart_follows_statewise_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut cases = vec![CASES_HEADER.to_string()];
    for (i, state) in ["S1", "S2", "S3", "S4", "S5", "S6", "S7"].iter().enumerate() {
        let confirmed = 1000 - i * 100;
        cases.push(format!("{i},2020-07-01,8:00 AM,{state},-,-,1,1,{confirmed}"));
    }
    let case_lines: Vec<&str> = cases.iter().map(String::as_str).collect();
    let config = config_for(dir.path(), &case_lines, &default_vaccines());

    let data = build_dashboard_data(&config).unwrap();
    let stats = StatsCalculator::dashboard_stats(&data, &DashboardSettings::default());
    let charts = dashboard_charts(&stats);

    let ChartKind::Line(series) = &charts[2].kind else {
        panic!("growth trend should be a line chart");
    };
    let trend: Vec<&str> = series.iter().map(|s| s.state.as_str()).collect();
    let head: Vec<&str> = data.statewise[..5].iter().map(|s| s.state.as_str()).collect();
    assert_eq!(trend, head);
    assert_eq!(trend, vec!["S1", "S2", "S3", "S4", "S5"]);

    let html = ReportGenerator::render_html(&stats).unwrap();
    assert!(html.contains("Growth Trend in Top 5 Affected States"));
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = DataConfig {
        cases_path: dir.path().join("absent.csv"),
        vaccinations_path: write(dir.path(), "v.csv", &default_vaccines()),
        ..DataConfig::default()
    };

    let err = build_dashboard_data(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Load);
}

#[test]
fn missing_column_is_a_schema_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(
        dir.path(),
        &[
            "Sno,Date,Time,State/UnionTerritory,ConfirmedIndianNational,ConfirmedForeignNational,Cured,Confirmed",
            "1,2020-06-01,8:00 AM,A,-,-,80,100",
        ],
        &default_vaccines(),
    );

    let err = build_dashboard_data(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
    assert!(err.to_string().contains("Deaths"));
}

#[test]
fn malformed_values_are_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(
        dir.path(),
        &[CASES_HEADER, "1,30/01/2020,6:00 PM,Kerala,1,0,0,0,1"],
        &default_vaccines(),
    );
    assert_eq!(build_dashboard_data(&config).unwrap_err().kind(), ErrorKind::Parse);

    let config = config_for(
        dir.path(),
        &[CASES_HEADER, "1,2020-01-30,6:00 PM,Kerala,1,0,0,0,1"],
        &[VACCINE_HEADER, "16/01/2021,Kerala,10,five,5,0,10"],
    );
    let err = build_dashboard_data(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().contains("Male(Individuals Vaccinated)"));
}
