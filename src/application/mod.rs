// Day-keyed persistence of generated sales
pub mod daily_cache;

// Period queries for the presentation layer
pub mod dashboard;

// Rolling-window orchestration
pub mod master_list;

pub use daily_cache::DailyCache;
pub use dashboard::{DashboardService, DashboardView, RevenueTargets};
pub use master_list::{BuildStats, MasterListBuilder};
