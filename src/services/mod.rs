pub mod reconcile_service;
pub mod reconcile_service_impl;
pub mod scheduler;

pub use reconcile_service::{
    ReconcileError, ReconcileService, ReconcileSummary, ReportRow, VersionChange,
};
pub use reconcile_service_impl::SeaOrmReconcileService;
pub use scheduler::Scheduler;
