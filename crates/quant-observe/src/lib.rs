//! Named logger registry for the prediction services.
//!
//! A [`LoggerRegistry`] hands out [`LoggerHandle`]s by name. Each name is
//! configured once, on first acquisition, from `LOG_LEVEL` and `LOG_FORMAT`;
//! invalid values fall back to `INFO` and `plain`.

mod logger;
pub use logger::*;
