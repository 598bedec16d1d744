//! Pure view-model builders for the dashboard.
//!
//! Every function here reads `&Snapshot` / history slices and returns plain
//! serializable data.  Nothing performs I/O or mutates its inputs.

pub mod chart;
pub mod format;
pub mod kpi;
pub mod media;
pub mod status;
pub mod table;

pub use chart::Chart;
pub use kpi::Kpi;
pub use media::MediaPanel;
pub use status::{NavLink, StatusBlock};
pub use table::{Align, Column, Table};
