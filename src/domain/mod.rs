// Local calendar arithmetic
pub mod calendar;

// Domain-specific error types
pub mod errors;

// KPI derivation
pub mod kpi;

// Period selection and filtering
pub mod period;

// Charts and display helpers
pub mod reporting;

// Storage traits
pub mod repositories;

// Sale model and synthesis
pub mod sales;
