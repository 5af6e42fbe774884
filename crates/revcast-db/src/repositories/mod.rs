//! Repository implementations for PostgreSQL.

mod forecast;
mod user_info;

pub use forecast::PgForecastRepository;
pub use user_info::PgUserInfoRepository;
