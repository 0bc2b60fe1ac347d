use anyhow::{Context, Result, bail};
use tracing::info;
use wpr_cli::config::Config;
use wpr_cli::demand::parse_demand_arg;
use wpr_cli::report::{ReportOutcome, ReportRequest, run_report};
use wpr_cli::summary::{columns_table, print_summary};
use wpr_core::{SessionDefaults, SessionEvent};
use wpr_ingest::{LoadOptions, SheetSelector, TableCache, TableSource, load_table};
use wpr_map::{MappingStrategy, MatchKind, RoleMatch, match_role};
use wpr_model::{FieldRole, YearScope};
use wpr_report::{write_pdf, write_xlsx};

use crate::cli::{ReportArgs, SourceArgs};

fn table_source(args: &SourceArgs, config: &Config) -> Result<TableSource> {
    let Some(location) = args.source.as_deref().or(config.source.location.as_deref()) else {
        bail!("no SOURCE given and no source.location in the config file");
    };
    let sheet = args
        .sheet
        .as_deref()
        .or(config.source.sheet.as_deref())
        .map_or(SheetSelector::First, SheetSelector::parse);
    Ok(TableSource::from_arg(location, sheet))
}

fn load_options(args: &SourceArgs, config: &Config) -> LoadOptions {
    LoadOptions {
        timeout: args
            .timeout
            .map_or_else(|| config.source.timeout(), std::time::Duration::from_secs),
        ..LoadOptions::default()
    }
}

fn session_events(args: &ReportArgs) -> Result<Vec<SessionEvent>> {
    let mut events = Vec::new();
    if let Some(mode) = args.mode {
        events.push(SessionEvent::SetMode(mode.into()));
    }
    if let Some(year) = args.year {
        events.push(SessionEvent::SetYear(YearScope::Year(year)));
    }
    if let (Some(start), Some(end)) = (args.from, args.to) {
        events.push(SessionEvent::SetRange { start, end });
    }
    if args.week.is_some() {
        events.push(SessionEvent::SetIsoWeek(args.week));
    }
    if !args.types.is_empty() {
        events.push(SessionEvent::SetTypes(args.types.clone()));
    }
    if !args.localities.is_empty() {
        events.push(SessionEvent::SetLocalities(args.localities.clone()));
    }
    if !args.collaborators.is_empty() {
        events.push(SessionEvent::SelectCollaborators(Some(args.collaborators.clone())));
    }
    for demand in &args.demands {
        events.push(parse_demand_arg(demand)?);
    }
    Ok(events)
}

pub fn run_report_command(args: &ReportArgs, config: &Config) -> Result<ReportOutcome> {
    let defaults = SessionDefaults {
        chart_top_n: args.top.unwrap_or(config.report.chart_top_n),
        support_top_n: args.support_top.unwrap_or(config.report.support_top_n),
        demand_mode: args
            .demand_mode
            .map_or(config.report.demand_mode, Into::into),
        ..SessionDefaults::default()
    };
    let request = ReportRequest {
        source: table_source(&args.source, config)?,
        strategy: config.columns.strategy()?,
        load: load_options(&args.source, config),
        reference: args.date,
        defaults,
        events: session_events(args)?,
    };
    let cache = TableCache::new(config.source.cache_ttl());
    let outcome = run_report(request, &cache)?;
    let view = &outcome.view;

    if args.json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print_summary(view);
    }

    if let Some(path) = &args.xlsx {
        let path = config.report.output_path(path);
        write_xlsx(&path, &view.result, &view.support_tables)
            .with_context(|| format!("write {}", path.display()))?;
        println!("XLSX: {}", path.display());
    }
    if let Some(path) = &args.pdf {
        let path = config.report.output_path(path);
        write_pdf(&path, &view.result, &view.support_tables)
            .with_context(|| format!("write {}", path.display()))?;
        println!("PDF: {}", path.display());
    }
    Ok(outcome)
}

pub fn run_columns_command(args: &SourceArgs, config: &Config) -> Result<()> {
    let source = table_source(args, config)?;
    let table = load_table(&source, &load_options(args, config))
        .with_context(|| format!("load {source}"))?;
    let headers = table.headers();
    info!(columns = headers.len(), "inspecting headers");

    let strategy = config.columns.strategy()?;
    let matches: Vec<_> = match &strategy {
        MappingStrategy::ByName(candidates) => FieldRole::ALL
            .into_iter()
            .map(|role| (role, match_role(&headers, candidates.for_role(role))))
            .collect(),
        MappingStrategy::Positional(_) => {
            let mapping = wpr_map::resolve(&headers, &strategy)?;
            FieldRole::ALL
                .into_iter()
                .map(|role| {
                    let found = mapping.get(role).map(|column| RoleMatch {
                        column: column.clone(),
                        kind: MatchKind::Exact,
                        candidate: "position".to_string(),
                    });
                    (role, found)
                })
                .collect()
        }
    };
    println!("Headers: {}", headers.join(" | "));
    println!("{}", columns_table(&matches));
    // Surfaces the missing-column error with its suggestion.
    wpr_map::resolve(&headers, &strategy)?;
    Ok(())
}
