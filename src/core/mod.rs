//! Core module - persistence, validation and list synchronization

pub mod config;
pub mod controller;
pub mod dashboard;
pub mod repository;
pub mod snapshot;
pub mod store;
pub mod validation;
pub mod workspace;

pub use config::Config;
pub use controller::{ControllerError, EntityController, SaveOutcome};
pub use dashboard::{format_usd, DashboardMetrics, LowStockItem, LOW_STOCK_THRESHOLD};
pub use repository::{Record, Repository};
pub use snapshot::{Snapshot, SyncOutcome};
pub use store::{Store, StoreError};
pub use validation::{FormInput, NumberKind, ValidationError};
pub use workspace::{Workspace, WorkspaceError};
