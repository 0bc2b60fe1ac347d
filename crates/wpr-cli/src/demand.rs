//! `--demand DATE:NAME=TAG` arguments.

use anyhow::{Context, Result, anyhow};
use wpr_common::parse_date_day_first;
use wpr_core::SessionEvent;

/// Parses one manual demand tag into a session event.
///
/// ```
/// use wpr_cli::demand::parse_demand_arg;
/// use wpr_core::SessionEvent;
///
/// let event = parse_demand_arg("03/09/2025:Ana=Apoio ao almoxarifado").unwrap();
/// assert!(matches!(event, SessionEvent::TagDemand { .. }));
/// assert!(parse_demand_arg("Ana=Apoio").is_err());
/// ```
pub fn parse_demand_arg(value: &str) -> Result<SessionEvent> {
    let (date, rest) = value
        .split_once(':')
        .ok_or_else(|| anyhow!("expected DATE:NAME=TAG, got {value:?}"))?;
    let (collaborator, tag) = rest
        .split_once('=')
        .ok_or_else(|| anyhow!("expected DATE:NAME=TAG, got {value:?}"))?;
    let date = parse_date_day_first(date).with_context(|| format!("invalid date {date:?}"))?;
    if collaborator.trim().is_empty() {
        return Err(anyhow!("missing collaborator in {value:?}"));
    }
    Ok(SessionEvent::TagDemand {
        collaborator: collaborator.trim().to_string(),
        date,
        tag: tag.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn iso_and_day_first_dates() {
        let expected = SessionEvent::TagDemand {
            collaborator: "ANA".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 3).unwrap(),
            tag: "APOIO".to_string(),
        };
        assert_eq!(parse_demand_arg("2025-09-03:ANA=APOIO").unwrap(), expected);
        assert_eq!(parse_demand_arg("03/09/2025: ANA = APOIO").unwrap(), expected);
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(parse_demand_arg("03/09/2025: =APOIO").is_err());
        assert!(parse_demand_arg("ontem:ANA=APOIO").is_err());
    }
}
