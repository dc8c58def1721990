//! Business logic services
//!
//! Services validate input and coordinate between the auth primitives and
//! the repositories. Handlers stay thin.

pub mod account;
pub mod daily_log;
pub mod mood;

pub use account::AccountService;
pub use daily_log::DailyLogService;
pub use mood::MoodService;
