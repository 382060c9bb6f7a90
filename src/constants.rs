use std::time::Duration;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const PROJECTS_PER_PAGE: i64 = 9;
pub const HOME_FEATURED_PROJECTS: i64 = 6;
pub const HOME_SKILLS: i64 = 12;
pub const RELATED_PROJECTS: i64 = 3;

/// Window over which `contact_rate_limit_per_hour` is counted.
pub const CONTACT_RATE_WINDOW: Duration = Duration::from_secs(60 * 60);
pub const LIMITER_EVICTION_INTERVAL: Duration = Duration::from_secs(5 * 60);
