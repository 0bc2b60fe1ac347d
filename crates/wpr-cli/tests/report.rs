use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use tempfile::tempdir;
use wpr_cli::config::Config;
use wpr_cli::demand::parse_demand_arg;
use wpr_cli::report::{ReportRequest, run_report};
use wpr_cli::summary::{chart_table, header_lines};
use wpr_core::{SessionDefaults, SessionEvent};
use wpr_ingest::{LoadOptions, SheetSelector, TableCache, TableSource};
use wpr_model::{DemandMode, PeriodMode};

const CSV: &str = "\
Data;Colaborador;Notas Atendidas;Tipo de Nota;Localidade;Demanda
01/09/2025;ana;3;corretiva;centro;Vistoria
02/09/2025;bia;2;preventiva;norte;
03/09/2025;ana;x;;;
31/13/2025;bia;2;;;
";

fn write_csv(dir: &Path) -> TableSource {
    let path = dir.join("notas.csv");
    fs::write(&path, CSV).unwrap();
    TableSource::from_arg(path.to_str().unwrap(), SheetSelector::First)
}

fn request(source: TableSource, events: Vec<SessionEvent>) -> ReportRequest {
    let config = Config::default();
    ReportRequest {
        source,
        strategy: config.columns.strategy().unwrap(),
        load: LoadOptions::default(),
        reference: None,
        defaults: SessionDefaults::default(),
        events,
    }
}

fn cache() -> TableCache {
    TableCache::new(Duration::from_secs(60))
}

#[test]
fn reference_defaults_to_latest_record() {
    let dir = tempdir().unwrap();
    let outcome = run_report(request(write_csv(dir.path()), Vec::new()), &cache()).unwrap();

    assert_eq!(
        outcome.session.reference,
        NaiveDate::from_ymd_opt(2025, 9, 3).unwrap()
    );
    insta::assert_debug_snapshot!(header_lines(&outcome.view), @r#"
    [
        "Periodo: 01/09/2025 a 05/09/2025",
        "Total do periodo: 5  |  Total do ano: 5",
        "Linhas: 4 lidas, 3 usadas, 1 com data invalida, 1 com quantidade zerada",
    ]
    "#);
    assert_eq!(outcome.view.chart.len(), 2);
    assert!(chart_table(&outcome.view).to_string().contains("ANA"));
}

#[test]
fn events_replay_in_order() {
    let dir = tempdir().unwrap();
    let events = vec![
        SessionEvent::SetTypes(vec!["corretiva".to_string()]),
        SessionEvent::SetDemandMode(DemandMode::Manual),
        parse_demand_arg("02/09/2025:Ana=Apoio").unwrap(),
        SessionEvent::SetMode(PeriodMode::Monthly),
    ];
    let outcome = run_report(request(write_csv(dir.path()), events), &cache()).unwrap();
    let view = &outcome.view;

    assert_eq!(view.period, "01/09/2025 a 30/09/2025");
    assert_eq!(view.result.period_total, 3);
    assert_eq!(outcome.session.demands.len(), 1);
    let ana = view
        .support_tables
        .iter()
        .find(|table| table.collaborator == "ANA")
        .unwrap();
    assert!(ana.rows.iter().any(|row| row.demand == "Apoio"));
}

#[test]
fn missing_file_reports_the_source() {
    let dir = tempdir().unwrap();
    let source = TableSource::from_arg(
        dir.path().join("absent.csv").to_str().unwrap(),
        SheetSelector::First,
    );
    let error = run_report(request(source, Vec::new()), &cache()).unwrap_err();
    assert!(format!("{error:#}").contains("absent.csv"));
}

#[test]
fn shared_cache_serves_later_runs() {
    let dir = tempdir().unwrap();
    let source = write_csv(dir.path());
    let cache = cache();

    run_report(request(source.clone(), Vec::new()), &cache).unwrap();
    fs::remove_file(dir.path().join("notas.csv")).unwrap();
    let outcome = run_report(request(source.clone(), Vec::new()), &cache).unwrap();
    assert_eq!(outcome.view.result.period_total, 5);

    cache.clear();
    assert!(run_report(request(source, Vec::new()), &cache).is_err());
}
