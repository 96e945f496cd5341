//! gpsd JSON protocol client.
//!
//! Reports are accumulated the way libgps does it and laid out for the API generation the
//! session was opened with.

use std::io::{self, BufRead, BufReader, ErrorKind, Write};
use std::net::TcpStream;
use std::time::Duration;

use chrono::DateTime;
use gpsd_client::protocol::gpsd::{Profile, STATUS_DGPS_FIX, STATUS_FIX, STATUS_NO_FIX};
use hal::gpsd::{Dop, GpsData, Satellite, Timespec, GPSD};

use crate::error::Error;

/// API generation announced when none is requested
pub const DEFAULT_API_MAJOR_VERSION: u32 = 12;

const WATCH: &[u8] = b"?WATCH={\"enable\":true,\"json\":true}\n";

const MODE_NO_FIX: i32 = 1;
const MODE_2D: i32 = 2;
const TPV_STATUS_DGPS: i32 = 2;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Version {
    pub release: String,
    pub proto_major: u32,
    pub proto_minor: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TPV {
    pub time: Option<String>,
    pub mode: i32,
    pub status: Option<i32>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub alt: Option<f64>,
    #[serde(rename = "altHAE")]
    pub alt_hae: Option<f64>,
    pub track: Option<f64>,
    pub speed: Option<f64>,
    pub climb: Option<f64>,
    pub epx: Option<f64>,
    pub epy: Option<f64>,
    pub epv: Option<f64>,
    pub epd: Option<f64>,
    pub eps: Option<f64>,
    pub epc: Option<f64>,
    pub ept: Option<f64>,
    pub eph: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkySatellite {
    #[serde(rename = "PRN")]
    pub prn: i16,
    pub el: Option<f64>,
    pub az: Option<f64>,
    pub ss: Option<f64>,
    pub used: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Sky {
    pub hdop: Option<f64>,
    pub vdop: Option<f64>,
    pub pdop: Option<f64>,
    pub tdop: Option<f64>,
    pub gdop: Option<f64>,
    pub satellites: Vec<SkySatellite>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "class")]
pub enum Report {
    #[serde(rename = "VERSION")]
    Version(Version),
    #[serde(rename = "TPV")]
    TPV(TPV),
    #[serde(rename = "SKY")]
    Sky(Sky),
    #[serde(other)]
    Other,
}

fn nan(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}

fn parse_time(time: &str) -> Option<Timespec> {
    match DateTime::parse_from_rfc3339(time) {
        Ok(datetime) => {
            Some(Timespec::new(datetime.timestamp(), datetime.timestamp_subsec_nanos() as i64))
        }
        Err(e) => {
            warn!("Malformed report time {}: {}", time, e);
            None
        }
    }
}

/// Latest state reported by the daemon
#[derive(Clone, Debug, Default)]
pub struct Tracker {
    tpv: Option<TPV>,
    sky: Sky,
}

impl Tracker {
    /// Returns whether the report changed the fix snapshot
    pub fn apply(&mut self, report: Report) -> bool {
        match report {
            Report::Version(version) => {
                info!(
                    "gpsd release {} protocol {}.{}",
                    version.release, version.proto_major, version.proto_minor
                );
                false
            }
            Report::TPV(tpv) => {
                self.tpv = Some(tpv);
                true
            }
            Report::Sky(sky) => {
                self.sky = sky;
                true
            }
            Report::Other => false,
        }
    }

    pub fn status(&self) -> i32 {
        let tpv = match self.tpv.as_ref() {
            Some(tpv) if tpv.mode >= MODE_2D => tpv,
            _ => return STATUS_NO_FIX,
        };
        match tpv.status {
            Some(TPV_STATUS_DGPS) => STATUS_FIX | STATUS_DGPS_FIX,
            _ => STATUS_FIX,
        }
    }

    pub fn layout(&self, profile: Profile, now: Timespec) -> GpsData {
        let mut data = GpsData::default();
        let online = self.tpv.as_ref().filter(|tpv| tpv.mode >= MODE_NO_FIX).map(|_| now);
        profile.set_online(&mut data, online);
        profile.set_status(&mut data, self.status());

        let sky = &self.sky;
        let dop = Dop {
            pdop: nan(sky.pdop),
            hdop: nan(sky.hdop),
            vdop: nan(sky.vdop),
            tdop: nan(sky.tdop),
            gdop: nan(sky.gdop),
        };
        profile.set_dop(&mut data, dop);
        let satellites: Vec<Satellite> = sky
            .satellites
            .iter()
            .map(|s| Satellite {
                prn: s.prn,
                elevation: nan(s.el),
                azimuth: nan(s.az),
                ss: nan(s.ss),
                used: s.used,
            })
            .collect();
        profile.set_sky(&mut data, &satellites);

        let tpv = match self.tpv.as_ref() {
            Some(tpv) => tpv,
            None => {
                profile.set_fix_time(&mut data, None);
                return data;
            }
        };
        profile.set_fix_time(&mut data, tpv.time.as_deref().and_then(parse_time));
        profile.set_position_error(&mut data, nan(tpv.eph));
        data.fix.mode = tpv.mode;
        data.fix.latitude = nan(tpv.lat);
        data.fix.longitude = nan(tpv.lon);
        data.fix.altitude = nan(tpv.alt_hae.or(tpv.alt));
        data.fix.track = nan(tpv.track);
        data.fix.speed = nan(tpv.speed);
        data.fix.climb = nan(tpv.climb);
        data.fix.epx = nan(tpv.epx);
        data.fix.epy = nan(tpv.epy);
        data.fix.epv = nan(tpv.epv);
        data.fix.epd = nan(tpv.epd);
        data.fix.eps = nan(tpv.eps);
        data.fix.epc = nan(tpv.epc);
        data.fix.ept = nan(tpv.ept);
        data.fix.eph = nan(tpv.eph);
        data
    }
}

pub struct Session {
    reader: BufReader<TcpStream>,
    api_major_version: u32,
    profile: Profile,
    tracker: Tracker,
    data: GpsData,
    /// Bytes of the report being received, kept across read timeouts
    line: Vec<u8>,
    closed: bool,
}

impl Session {
    pub fn connect(host: &str, port: u16, api_major_version: u32) -> Result<Self, Error> {
        let profile = Profile::select(api_major_version)?;
        let mut stream = TcpStream::connect((host, port))?;
        stream.write_all(WATCH)?;
        debug!("Watching gpsd at {}:{}", host, port);
        Ok(Self {
            reader: BufReader::new(stream),
            api_major_version,
            profile,
            tracker: Tracker::default(),
            data: GpsData::default(),
            line: Vec::new(),
            closed: false,
        })
    }

    fn next_line(&mut self) -> io::Result<Option<Report>> {
        if self.reader.read_until(b'\n', &mut self.line)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "gpsd closed connection"));
        }
        if !self.line.ends_with(b"\n") {
            return Ok(None);
        }
        let result = serde_json::from_slice(&self.line);
        self.line.clear();
        match result {
            Ok(report) => Ok(Some(report)),
            Err(e) => {
                warn!("Malformed gpsd report: {}", e);
                Ok(None)
            }
        }
    }
}

fn wall_clock() -> Timespec {
    let now = chrono::Utc::now();
    Timespec::new(now.timestamp(), now.timestamp_subsec_nanos() as i64)
}

impl GPSD for Session {
    fn api_major_version(&self) -> u32 {
        self.api_major_version
    }

    fn waiting(&mut self, timeout: Duration) -> bool {
        if !self.reader.buffer().is_empty() {
            return true;
        }
        if let Err(e) = self.reader.get_ref().set_read_timeout(Some(timeout)) {
            error!("Set read timeout failed: {}", e);
            return false;
        }
        match self.reader.fill_buf() {
            Ok(buffer) if !buffer.is_empty() => true,
            Ok(_) => {
                if !self.closed {
                    error!("gpsd closed connection");
                    self.closed = true;
                }
                std::thread::sleep(timeout);
                false
            }
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => false,
            Err(e) => {
                error!("Waiting for gpsd failed: {}", e);
                false
            }
        }
    }

    fn read(&mut self) -> Option<&GpsData> {
        let report = match self.next_line() {
            Ok(report) => report?,
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                trace!("Partial gpsd report, {} bytes pending", self.line.len());
                return None;
            }
            Err(e) => {
                error!("Read from gpsd failed: {}", e);
                return None;
            }
        };
        if !self.tracker.apply(report) {
            return None;
        }
        self.data = self.tracker.layout(self.profile, wall_clock());
        Some(&self.data)
    }
}
