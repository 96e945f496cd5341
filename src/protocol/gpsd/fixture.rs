use alloc::vec::Vec;

use hal::gpsd::{Dop, GpsData, Satellite, Timespec};

use super::{Profile, STATUS_FIX};

/// One logical fix, laid out per generation on demand
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub online: bool,
    pub status: i32,
    pub time: Option<Timespec>,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub track: f64,
    pub speed: f64,
    pub climb: f64,
    pub dop: Dop,
    pub error: f64,
    pub epx: f64,
    pub epy: f64,
    pub epv: f64,
    pub epd: f64,
    pub eps: f64,
    pub epc: f64,
    pub ept: f64,
    pub sky: Vec<Satellite>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            online: true,
            status: STATUS_FIX,
            time: Some(Timespec::new(1_600_000_000, 250_000_000)),
            latitude: 37.4,
            longitude: -122.1,
            altitude: 10.0,
            track: 92.5,
            speed: 1.5,
            climb: 0.25,
            dop: Dop { pdop: 1.75, hdop: 1.0, vdop: 1.5, tdop: 0.875, gdop: 2.125 },
            error: 3.0,
            epx: 2.5,
            epy: 2.5,
            epv: 4.0,
            epd: 5.0,
            eps: 0.5,
            epc: 0.75,
            ept: 0.005,
            sky: vec![
                Satellite { prn: 2, elevation: 55.0, azimuth: 41.0, ss: 42.0, used: true },
                Satellite { prn: 17, elevation: 12.0, azimuth: 300.0, ss: 18.0, used: false },
                Satellite { prn: 24, elevation: 71.0, azimuth: 133.0, ss: 47.0, used: true },
            ],
        }
    }
}

impl Snapshot {
    pub fn layout(&self, profile: Profile) -> GpsData {
        let mut data = GpsData::default();
        let online = if self.online { Some(Timespec::new(1_600_000_001, 0)) } else { None };
        profile.set_online(&mut data, online);
        profile.set_status(&mut data, self.status);
        profile.set_fix_time(&mut data, self.time);
        profile.set_dop(&mut data, self.dop);
        profile.set_position_error(&mut data, self.error);
        profile.set_sky(&mut data, &self.sky);
        data.fix.mode = 3;
        data.fix.latitude = self.latitude;
        data.fix.longitude = self.longitude;
        data.fix.altitude = self.altitude;
        data.fix.track = self.track;
        data.fix.speed = self.speed;
        data.fix.climb = self.climb;
        data.fix.epx = self.epx;
        data.fix.epy = self.epy;
        data.fix.epv = self.epv;
        data.fix.epd = self.epd;
        data.fix.eps = self.eps;
        data.fix.epc = self.epc;
        data.fix.ept = self.ept;
        data
    }
}
