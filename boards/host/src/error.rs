use std::io;
use std::num::ParseIntError;
use std::str::ParseBoolError;

use derive_more::{Display, From};
use gpsd_client::protocol::gpsd;

#[derive(Debug, Display, From)]
pub enum Error {
    #[display(fmt = "I/O error: {}", _0)]
    Io(io::Error),
    #[display(fmt = "Malformed config: {}", _0)]
    Json(serde_json::Error),
    #[display(fmt = "{}", _0)]
    Gpsd(gpsd::Error),
    #[display(fmt = "Invalid number: {}", _0)]
    Int(ParseIntError),
    #[display(fmt = "Invalid boolean: {}", _0)]
    Bool(ParseBoolError),
    #[display(fmt = "Install signal handler failed: {}", _0)]
    Signal(ctrlc::Error),
}
