pub mod gps_fix;
pub mod header;
pub mod nav_sat_fix;

pub use gps_fix::{GPSFix, GPSStatus};
pub use header::Header;
pub use nav_sat_fix::{CovarianceType, NavSatFix, NavSatStatus};
