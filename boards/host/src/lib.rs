#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;
extern crate gpsd_client;

pub mod bus;
pub mod error;
pub mod rtc;
pub mod session;
