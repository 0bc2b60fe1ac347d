//! Period Aggregator.
//!
//! Turns normalized records plus a [`PeriodQuery`] into the zero-filled
//! weekday grid, daily detail and totals of an
//! [`AggregateResult`](wpr_model::AggregateResult). Nothing here fails: empty
//! input gives empty series and zero totals, and filter edge cases surface as
//! [`PeriodWarning`](wpr_model::PeriodWarning)s.

mod aggregate;
mod filter;
mod options;
mod query;
mod support;
mod top;
mod window;

pub use aggregate::aggregate;
pub use filter::{LabelFilter, is_unrestricted};
pub use options::{FilterOptions, filter_options};
pub use query::{DEFAULT_TOP_N, PeriodQuery};
pub use support::{DemandKey, DemandStore, auto_demand_label, build_support_tables};
pub use top::{known_collaborators, rank_totals, top_collaborators};
pub use window::resolve_window;
