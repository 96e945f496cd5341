//! Layout of the data handed out by a gpsd client library.
//!
//! The library's `gps_data_t` moved fields around between API generations. Fields that
//! changed location live here side by side, a version profile decides which one is meaningful.

use alloc::vec::Vec;
use core::time::Duration;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timespec {
    pub tv_sec: i64,
    pub tv_nsec: i64,
}

impl Timespec {
    pub fn new(tv_sec: i64, tv_nsec: i64) -> Self {
        Self { tv_sec, tv_nsec }
    }
}

/// Seconds as float before API 9, seconds plus nanoseconds since.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Timestamp {
    Seconds(f64),
    Timespec(Timespec),
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::Timespec(Timespec::default())
    }
}

impl Timestamp {
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Seconds(seconds) => *seconds == 0.0,
            Self::Timespec(ts) => ts.tv_sec == 0 && ts.tv_nsec == 0,
        }
    }

    /// NaN seconds and zero timespec both mean "not reported".
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Seconds(seconds) => !seconds.is_nan() && *seconds != 0.0,
            Self::Timespec(_) => !self.is_zero(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Dop {
    pub pdop: f64,
    pub hdop: f64,
    pub vdop: f64,
    pub tdop: f64,
    pub gdop: f64,
}

impl Default for Dop {
    fn default() -> Self {
        Self { pdop: f64::NAN, hdop: f64::NAN, vdop: f64::NAN, tdop: f64::NAN, gdop: f64::NAN }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GpsFix {
    pub time: Timestamp,
    pub status: i32, // API >= 10
    pub mode: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub track: f64,
    pub speed: f64,
    pub climb: f64,
    pub epx: f64,
    pub epy: f64,
    pub epv: f64,
    pub epd: f64,
    pub eps: f64,
    pub epc: f64,
    pub ept: f64,
    pub eph: f64, // API >= 8
}

impl Default for GpsFix {
    fn default() -> Self {
        let nan = f64::NAN;
        Self {
            time: Timestamp::default(),
            status: 0,
            mode: 0,
            latitude: nan,
            longitude: nan,
            altitude: nan,
            track: nan,
            speed: nan,
            climb: nan,
            epx: nan,
            epy: nan,
            epv: nan,
            epd: nan,
            eps: nan,
            epc: nan,
            ept: nan,
            eph: nan,
        }
    }
}

/// Sky view entry, API > 5
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Satellite {
    pub prn: i16,
    pub elevation: f64,
    pub azimuth: f64,
    pub ss: f64,
    pub used: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GpsData {
    pub online: Timestamp,
    pub status: i32, // API < 10
    pub fix: GpsFix,
    pub epe: f64,       // API < 8
    pub dop: Dop,       // API >= 4
    pub legacy_dop: Dop, // API 3 keeps DOP flat on the data itself

    pub satellites_used: i32,
    pub satellites_visible: i32, // API >= 4
    pub satellites: i32,         // API 3

    // parallel sky arrays, API <= 5
    pub used: Vec<i32>, // PRNs used in solution
    pub prn: Vec<i32>,
    pub elevation: Vec<i32>,
    pub azimuth: Vec<i32>,
    pub ss: Vec<f64>,

    pub skyview: Vec<Satellite>, // API > 5
}

impl Default for GpsData {
    fn default() -> Self {
        Self {
            online: Timestamp::default(),
            status: 0,
            fix: GpsFix::default(),
            epe: f64::NAN,
            dop: Dop::default(),
            legacy_dop: Dop::default(),
            satellites_used: 0,
            satellites_visible: 0,
            satellites: 0,
            used: Vec::new(),
            prn: Vec::new(),
            elevation: Vec::new(),
            azimuth: Vec::new(),
            ss: Vec::new(),
            skyview: Vec::new(),
        }
    }
}

impl GpsData {
    pub fn is_online(&self) -> bool {
        !self.online.is_zero()
    }
}

/// Client side of a gpsd session
pub trait GPSD {
    /// Major API version of the client library, queried once at startup
    fn api_major_version(&self) -> u32;
    /// Block until data is available or timeout expires
    fn waiting(&mut self, timeout: Duration) -> bool;
    /// `None` means nothing arrived this cycle, not an error
    fn read(&mut self) -> Option<&GpsData>;
}
