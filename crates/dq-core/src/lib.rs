//! Dashboard core: memoized boards over providers, validation and reports.
//!
//! A [`Board`] ties a [`dq_ingest::DatasetProvider`] and a
//! [`dq_model::RuleSpec`] together and caches every derived value in a
//! [`Memo`] keyed by a [`Fingerprint`] of its inputs. Changing a parameter
//! recomputes the dataset, the validation result and the views derived from
//! it on the next read; everything else is served from cache.
//!
//! ```
//! use dq_core::{Dashboard, DashboardConfig};
//!
//! let mut dashboard = Dashboard::with_samples(DashboardConfig::default());
//! let cars = dashboard.board_mut("cars").unwrap();
//! cars.select("drivetrain", "awd").unwrap();
//! let report = cars.aggregate_report().unwrap();
//! assert_eq!(report.steps.len(), 5);
//! ```

pub mod board;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fingerprint;
pub mod memo;
pub mod samples;

pub use board::{Board, BoardStats};
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::{BoardError, Result};
pub use fingerprint::Fingerprint;
pub use memo::{Memo, MemoStats};
