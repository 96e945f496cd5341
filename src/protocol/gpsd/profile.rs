//! Field mapping of the gpsd client library, one variant per incompatible API generation.
//!
//! Readers are used by the normalizer and classifier, writers by daemon clients and fixtures
//! that need to lay a snapshot out the way a given generation does.

use hal::gpsd::{Dop, GpsData, Satellite, Timespec, Timestamp};

use super::{Error, MIN_API_MAJOR_VERSION};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Profile {
    V3,
    V4,
    V5,
    V6,
    V7,
    V8,
    V9,
    /// API 10 and later
    V10,
}

impl Profile {
    pub const ALL: [Profile; 8] = [
        Self::V3,
        Self::V4,
        Self::V5,
        Self::V6,
        Self::V7,
        Self::V8,
        Self::V9,
        Self::V10,
    ];

    pub fn select(api_major_version: u32) -> Result<Self, Error> {
        Ok(match api_major_version {
            v if v < MIN_API_MAJOR_VERSION => return Err(Error::UnsupportedVersion(v)),
            3 => Self::V3,
            4 => Self::V4,
            5 => Self::V5,
            6 => Self::V6,
            7 => Self::V7,
            8 => Self::V8,
            9 => Self::V9,
            _ => Self::V10,
        })
    }

    pub fn api_major_version(self) -> u32 {
        match self {
            Self::V3 => 3,
            Self::V4 => 4,
            Self::V5 => 5,
            Self::V6 => 6,
            Self::V7 => 7,
            Self::V8 => 8,
            Self::V9 => 9,
            Self::V10 => 10,
        }
    }

    /// `STATUS_DGPS_FIX` was removed in API 6 and restored afterwards
    pub fn has_differential(self) -> bool {
        self != Self::V6
    }

    /// Online and fix time are `timespec` instead of float seconds
    pub fn uses_timespec(self) -> bool {
        self >= Self::V9
    }

    /// Status word moved from `gps_data_t` into `gps_fix_t`
    fn status_in_fix(self) -> bool {
        self >= Self::V10
    }

    fn nested_dop(self) -> bool {
        self >= Self::V4
    }

    /// Per satellite records instead of parallel arrays
    pub fn has_skyview(self) -> bool {
        self > Self::V5
    }

    /// `epe` gave way to `fix.eph`
    fn has_eph(self) -> bool {
        self >= Self::V8
    }

    pub fn status(self, data: &GpsData) -> i32 {
        match self.status_in_fix() {
            true => data.fix.status,
            false => data.status,
        }
    }

    pub fn dop(self, data: &GpsData) -> &Dop {
        match self.nested_dop() {
            true => &data.dop,
            false => &data.legacy_dop,
        }
    }

    /// Position error estimate reported as `err` on the extended fix
    pub fn position_error(self, data: &GpsData) -> f64 {
        match self.has_eph() {
            true => data.fix.eph,
            false => data.epe,
        }
    }

    pub fn satellites_visible(self, data: &GpsData) -> i32 {
        match self {
            Self::V3 => data.satellites,
            _ => data.satellites_visible,
        }
    }

    pub fn timestamp(self, time: Option<Timespec>) -> Timestamp {
        match (self.uses_timespec(), time) {
            (true, time) => Timestamp::Timespec(time.unwrap_or_default()),
            (false, Some(ts)) => Timestamp::Seconds(ts.tv_sec as f64 + ts.tv_nsec as f64 / 1e9),
            (false, None) => Timestamp::Seconds(f64::NAN),
        }
    }

    pub fn set_online(self, data: &mut GpsData, since: Option<Timespec>) {
        data.online = match (self.uses_timespec(), since) {
            (false, None) => Timestamp::Seconds(0.0),
            (_, since) => self.timestamp(since),
        };
    }

    pub fn set_fix_time(self, data: &mut GpsData, time: Option<Timespec>) {
        data.fix.time = self.timestamp(time);
    }

    pub fn set_status(self, data: &mut GpsData, status: i32) {
        match self.status_in_fix() {
            true => data.fix.status = status,
            false => data.status = status,
        }
    }

    pub fn set_dop(self, data: &mut GpsData, dop: Dop) {
        match self.nested_dop() {
            true => data.dop = dop,
            false => data.legacy_dop = dop,
        }
    }

    pub fn set_position_error(self, data: &mut GpsData, error: f64) {
        match self.has_eph() {
            true => data.fix.eph = error,
            false => data.epe = error,
        }
    }

    pub fn set_sky(self, data: &mut GpsData, satellites: &[Satellite]) {
        let used = satellites.iter().filter(|s| s.used).count();
        data.satellites_used = used as i32;
        match self {
            Self::V3 => data.satellites = satellites.len() as i32,
            _ => data.satellites_visible = satellites.len() as i32,
        }

        if self.has_skyview() {
            data.skyview = satellites.to_vec();
            return;
        }
        data.prn = satellites.iter().map(|s| s.prn as i32).collect();
        data.elevation = satellites.iter().map(|s| s.elevation as i32).collect();
        data.azimuth = satellites.iter().map(|s| s.azimuth as i32).collect();
        data.ss = satellites.iter().map(|s| s.ss).collect();
        data.used = satellites.iter().filter(|s| s.used).map(|s| s.prn as i32).collect();
    }
}

mod test {
    #[test]
    fn test_select() {
        use super::Profile;
        use crate::protocol::gpsd::Error;

        assert_eq!(Profile::select(2), Err(Error::UnsupportedVersion(2)));
        assert_eq!(Profile::select(0), Err(Error::UnsupportedVersion(0)));
        for profile in Profile::ALL.iter() {
            assert_eq!(Profile::select(profile.api_major_version()), Ok(*profile));
        }
        assert_eq!(Profile::select(11), Ok(Profile::V10));
        assert_eq!(Profile::select(14), Ok(Profile::V10));
    }

    #[test]
    fn test_differential_only_absent_on_v6() {
        use alloc::vec::Vec;

        use super::Profile;

        let without: Vec<Profile> =
            Profile::ALL.iter().cloned().filter(|p| !p.has_differential()).collect();
        assert_eq!(without, vec![Profile::V6]);
    }

    #[test]
    fn test_status_location() {
        use hal::gpsd::GpsData;

        use super::Profile;
        use crate::protocol::gpsd::STATUS_FIX;

        let mut data = GpsData::default();
        Profile::V9.set_status(&mut data, STATUS_FIX);
        assert_eq!(data.status, STATUS_FIX);
        assert_eq!(data.fix.status, 0);
        assert_eq!(Profile::V10.status(&data), 0);

        let mut data = GpsData::default();
        Profile::V10.set_status(&mut data, STATUS_FIX);
        assert_eq!(data.fix.status, STATUS_FIX);
        assert_eq!(data.status, 0);
        assert_eq!(Profile::V9.status(&data), 0);
    }

    #[test]
    fn test_dop_location() {
        use hal::gpsd::{Dop, GpsData};

        use super::Profile;

        let dop = Dop { pdop: 1.0, hdop: 2.0, vdop: 3.0, tdop: 4.0, gdop: 5.0 };
        let mut data = GpsData::default();
        Profile::V3.set_dop(&mut data, dop);
        assert_eq!(data.legacy_dop, dop);
        assert!(data.dop.pdop.is_nan());
        assert_eq!(*Profile::V3.dop(&data), dop);

        let mut data = GpsData::default();
        Profile::V4.set_dop(&mut data, dop);
        assert_eq!(data.dop, dop);
        assert!(data.legacy_dop.hdop.is_nan());
    }

    #[test]
    fn test_position_error_source() {
        use hal::gpsd::GpsData;

        use super::Profile;

        let mut data = GpsData::default();
        Profile::V7.set_position_error(&mut data, 3.5);
        assert_eq!(data.epe, 3.5);
        assert!(data.fix.eph.is_nan());

        let mut data = GpsData::default();
        Profile::V8.set_position_error(&mut data, 3.5);
        assert_eq!(data.fix.eph, 3.5);
        assert!(data.epe.is_nan());
        assert_eq!(Profile::V8.position_error(&data), 3.5);
    }

    #[test]
    fn test_timestamp_representation() {
        use hal::gpsd::{GpsData, Timespec, Timestamp};

        use super::Profile;

        let ts = Timespec::new(100, 500_000_000);
        assert_eq!(Profile::V8.timestamp(Some(ts)), Timestamp::Seconds(100.5));
        assert_eq!(Profile::V9.timestamp(Some(ts)), Timestamp::Timespec(ts));
        assert!(!Profile::V8.timestamp(None).is_valid());
        assert!(!Profile::V9.timestamp(None).is_valid());

        let mut data = GpsData::default();
        Profile::V5.set_online(&mut data, None);
        assert!(!data.is_online());
        Profile::V5.set_online(&mut data, Some(ts));
        assert!(data.is_online());
        Profile::V10.set_online(&mut data, None);
        assert!(!data.is_online());
    }

    #[test]
    fn test_sky_layout() {
        use hal::gpsd::{GpsData, Satellite};

        use super::Profile;

        let satellites = [
            Satellite { prn: 3, elevation: 40.0, azimuth: 90.0, ss: 35.0, used: true },
            Satellite { prn: 9, elevation: 5.0, azimuth: 270.0, ss: 12.0, used: false },
        ];

        let mut data = GpsData::default();
        Profile::V3.set_sky(&mut data, &satellites);
        assert_eq!(data.satellites, 2);
        assert_eq!(data.satellites_visible, 0);
        assert_eq!(data.satellites_used, 1);
        assert_eq!(data.prn, vec![3, 9]);
        assert_eq!(data.used, vec![3]);
        assert!(data.skyview.is_empty());

        let mut data = GpsData::default();
        Profile::V6.set_sky(&mut data, &satellites);
        assert_eq!(data.satellites_visible, 2);
        assert_eq!(data.skyview, satellites.to_vec());
        assert!(data.prn.is_empty());
    }
}
