use derive_more::Display;

#[cfg(test)]
pub mod fixture;
pub mod profile;
pub mod satellite;
pub mod status;

pub use profile::Profile;
pub use satellite::Observation;
pub use status::FixStatus;

/// Oldest client library API with a known field mapping
pub const MIN_API_MAJOR_VERSION: u32 = 3;

pub const STATUS_NO_FIX: i32 = 0;
pub const STATUS_FIX: i32 = 1 << 0;
pub const STATUS_DGPS_FIX: i32 = 1 << 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
pub enum Error {
    #[display(
        fmt = "gpsd API version {} not supported, at least {} required",
        _0,
        MIN_API_MAJOR_VERSION
    )]
    UnsupportedVersion(u32),
}
