pub mod client;
pub mod gps_fix;
pub mod nav_sat_fix;
