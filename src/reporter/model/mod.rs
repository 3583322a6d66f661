pub mod failure;
pub mod report;
pub mod spec;
pub mod suite;

pub use self::failure::{Failure, FailureKind};
pub use self::report::Report;
pub use self::spec::Spec;
pub use self::suite::Suite;

#[inline]
pub(crate) fn to_seconds(millis: i64) -> f64 {
    millis as f64 / 1000.0
}
