//! Pipeline orchestration and session state.
//!
//! [`load_dataset`] runs ingestion, column resolution and normalization once
//! per source. A [`Session`] holds everything the user can change afterwards;
//! [`render`] and [`step`] are pure functions from session and dataset to a
//! [`ViewModel`] any front end can draw.

mod dataset;
mod error;
mod event;
mod session;
mod view;

pub use dataset::{Dataset, load_dataset};
pub use error::{CoreError, Result};
pub use event::SessionEvent;
pub use session::{Session, SessionDefaults};
pub use view::{ChartSeries, ViewModel, render, step};
