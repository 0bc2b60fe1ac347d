//! Session events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wpr_aggregate::DemandKey;
use wpr_common::redact_value;
use wpr_model::{DemandMode, PeriodMode, YearScope};

use crate::session::Session;

/// Everything a user can do between two renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum SessionEvent {
    SetMode(PeriodMode),
    SetReference(NaiveDate),
    SetYear(YearScope),
    SetRange { start: NaiveDate, end: NaiveDate },
    ClearRange,
    SetIsoWeek(Option<u32>),
    SetTypes(Vec<String>),
    SetLocalities(Vec<String>),
    SelectCollaborators(Option<Vec<String>>),
    SetChartTopN(usize),
    SetSupportTopN(usize),
    SetDemandMode(DemandMode),
    /// Manual tag for one collaborator and day; a blank tag clears it.
    TagDemand {
        collaborator: String,
        date: NaiveDate,
        tag: String,
    },
    ClearDemand { collaborator: String, date: NaiveDate },
    ClearWeekDemands { week_start: NaiveDate },
    /// Back to the defaults, dropping every manual tag.
    Reset,
}

impl Session {
    /// Applies one event in place.
    pub fn apply(&mut self, event: SessionEvent) {
        debug!(event = event_name(&event), "session event");
        match event {
            SessionEvent::SetMode(mode) => self.mode = mode,
            SessionEvent::SetReference(date) => self.reference = date,
            SessionEvent::SetYear(year) => self.year = year,
            SessionEvent::SetRange { start, end } => self.range = Some((start, end)),
            SessionEvent::ClearRange => self.range = None,
            SessionEvent::SetIsoWeek(week) => self.iso_week = week,
            SessionEvent::SetTypes(types) => self.types = types,
            SessionEvent::SetLocalities(localities) => self.localities = localities,
            SessionEvent::SelectCollaborators(names) => self.collaborators = names,
            SessionEvent::SetChartTopN(n) => self.chart_top_n = n,
            SessionEvent::SetSupportTopN(n) => self.support_top_n = n,
            SessionEvent::SetDemandMode(mode) => self.demand_mode = mode,
            SessionEvent::TagDemand {
                collaborator,
                date,
                tag,
            } => {
                debug!(collaborator = redact_value(&collaborator), %date, "demand tagged");
                self.demands.set(DemandKey::new(&collaborator, date), &tag);
            }
            SessionEvent::ClearDemand { collaborator, date } => {
                self.demands.remove(&DemandKey::new(&collaborator, date));
            }
            SessionEvent::ClearWeekDemands { week_start } => {
                self.demands.clear_week(week_start);
            }
            SessionEvent::Reset => *self = Session::with_defaults(self.reference, self.defaults),
        }
    }
}

fn event_name(event: &SessionEvent) -> &'static str {
    match event {
        SessionEvent::SetMode(_) => "set_mode",
        SessionEvent::SetReference(_) => "set_reference",
        SessionEvent::SetYear(_) => "set_year",
        SessionEvent::SetRange { .. } => "set_range",
        SessionEvent::ClearRange => "clear_range",
        SessionEvent::SetIsoWeek(_) => "set_iso_week",
        SessionEvent::SetTypes(_) => "set_types",
        SessionEvent::SetLocalities(_) => "set_localities",
        SessionEvent::SelectCollaborators(_) => "select_collaborators",
        SessionEvent::SetChartTopN(_) => "set_chart_top_n",
        SessionEvent::SetSupportTopN(_) => "set_support_top_n",
        SessionEvent::SetDemandMode(_) => "set_demand_mode",
        SessionEvent::TagDemand { .. } => "tag_demand",
        SessionEvent::ClearDemand { .. } => "clear_demand",
        SessionEvent::ClearWeekDemands { .. } => "clear_week_demands",
        SessionEvent::Reset => "reset",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    #[test]
    fn reset_clears_selection_and_tags() {
        let mut session = Session::new(date(3));
        session.apply(SessionEvent::SetTypes(vec!["CORRETIVA".to_string()]));
        session.apply(SessionEvent::TagDemand {
            collaborator: "ana".to_string(),
            date: date(3),
            tag: "APOIO".to_string(),
        });
        assert_eq!(session.demands.len(), 1);

        session.apply(SessionEvent::Reset);
        assert_eq!(session, Session::new(date(3)));
    }

    #[test]
    fn selection_changes_keep_tags() {
        let mut session = Session::new(date(3));
        session.apply(SessionEvent::TagDemand {
            collaborator: "ANA".to_string(),
            date: date(3),
            tag: "APOIO".to_string(),
        });
        session.apply(SessionEvent::SetReference(date(10)));
        session.apply(SessionEvent::SetMode(PeriodMode::Monthly));
        assert_eq!(session.demands.len(), 1);

        session.apply(SessionEvent::ClearDemand {
            collaborator: "ana".to_string(),
            date: date(3),
        });
        assert!(session.demands.is_empty());
    }

    #[test]
    fn events_deserialize_from_json() {
        let json = r#"{"event":"set_range","value":{"start":"2025-09-01","end":"2025-09-12"}}"#;
        let event: SessionEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            SessionEvent::SetRange {
                start: date(1),
                end: date(12)
            }
        );
    }
}
