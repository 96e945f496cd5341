use chrono::naive::NaiveDateTime;
use hal::gpsd::{GpsData, Timestamp};
use nalgebra::{Matrix3, Vector3};

use crate::{
    config::Config,
    protocol::gpsd::FixStatus,
    sys::time::{Throttle, Time},
    types::{CovarianceType, Header, NavSatFix, NavSatStatus},
};

fn fix_stamp(time: Timestamp) -> Time {
    match time {
        Timestamp::Seconds(seconds) => Time::from(seconds),
        Timestamp::Timespec(ts) => Time::from(ts),
    }
}

/// Geodetic fix record, see `build`
pub struct NavSatFixBuilder {
    throttle: Throttle,
}

impl Default for NavSatFixBuilder {
    fn default() -> Self {
        Self { throttle: Throttle::new(chrono::Duration::seconds(1)) }
    }
}

impl NavSatFixBuilder {
    /// Returns `None` when publication is suppressed: gpsd reports a fix as long as there has
    /// been one, such stale fixes carry NaN variance.
    pub fn build(
        &mut self,
        data: &GpsData,
        status: FixStatus,
        now: NaiveDateTime,
        config: &Config,
    ) -> Option<NavSatFix> {
        let epx = data.fix.epx;
        if epx.is_nan() && config.check_fix_by_variance {
            if self.throttle.ready(now) {
                debug!("GPS status was reported as OK, but variance was invalid");
            }
            return None;
        }

        let stamp = match config.use_gps_time && data.is_online() && data.fix.time.is_valid() {
            true => fix_stamp(data.fix.time),
            false => Time::from(now),
        };
        let covariance_type = match epx.is_nan() {
            true => CovarianceType::Unknown,
            false => CovarianceType::DiagonalKnown,
        };
        let diagonal = Vector3::new(epx, data.fix.epy, data.fix.epv);
        Some(NavSatFix {
            header: Header::new(stamp, &config.frame_id),
            status: NavSatStatus::from(status),
            latitude: data.fix.latitude,
            longitude: data.fix.longitude,
            altitude: data.fix.altitude,
            position_covariance: Matrix3::from_diagonal(&diagonal),
            position_covariance_type: covariance_type,
        })
    }
}

#[cfg(test)]
mod test {
    use chrono::naive::{NaiveDate, NaiveDateTime};
    use nalgebra::{Matrix3, Vector3};
    use pretty_assertions::assert_eq;

    use super::NavSatFixBuilder;
    use crate::{
        config::Config,
        protocol::gpsd::{fixture::Snapshot, status::classify, Profile},
        sys::time::Time,
        types::{CovarianceType, NavSatFix, NavSatStatus},
    };

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd(2023, 11, 14).and_hms(22, 13, 20)
    }

    fn build_from(snapshot: &Snapshot, profile: Profile, config: &Config) -> Option<NavSatFix> {
        let data = snapshot.layout(profile);
        let status = classify(&data, profile, config.check_fix_by_variance);
        NavSatFixBuilder::default().build(&data, status, now(), config)
    }

    #[test]
    fn test_round_trip() {
        let config = Config::default();
        let snapshot = Snapshot::default();
        for &profile in Profile::ALL.iter() {
            let fix = build_from(&snapshot, profile, &config).unwrap();
            assert_eq!(fix.status.status, NavSatStatus::STATUS_FIX);
            assert_eq!(fix.status.service, NavSatStatus::SERVICE_GPS);
            assert_eq!((fix.latitude, fix.longitude, fix.altitude), (37.4, -122.1, 10.0));
            let covariance = Matrix3::from_diagonal(&Vector3::new(2.5, 2.5, 4.0));
            assert_eq!(fix.position_covariance, covariance);
            assert_eq!(fix.position_covariance_type, CovarianceType::DiagonalKnown);
            assert_eq!(fix.header.frame_id, "gps");
        }
    }

    #[test]
    fn test_unknown_variance_suppressed() {
        let config = Config::default();
        let snapshot = Snapshot { epx: f64::NAN, ..Default::default() };
        for &profile in Profile::ALL.iter() {
            assert!(build_from(&snapshot, profile, &config).is_none(), "{:?}", profile);
        }
    }

    #[test]
    fn test_unknown_variance_published_without_check() {
        let config = Config { check_fix_by_variance: false, ..Default::default() };
        let snapshot = Snapshot { epx: f64::NAN, ..Default::default() };
        let fix = build_from(&snapshot, Profile::V10, &config).unwrap();
        assert_eq!(fix.status.status, NavSatStatus::STATUS_FIX);
        assert_eq!(fix.position_covariance_type, CovarianceType::Unknown);
        assert!(fix.position_covariance[(0, 0)].is_nan());
        assert_eq!(fix.position_covariance[(1, 1)], 2.5);
        assert_eq!(fix.position_covariance[(2, 2)], 4.0);
        assert_eq!(fix.position_covariance[(0, 1)], 0.0);
    }

    #[test]
    fn test_status_mapping() {
        use crate::protocol::gpsd::{STATUS_DGPS_FIX, STATUS_FIX, STATUS_NO_FIX};

        let config = Config::default();
        for &profile in Profile::ALL.iter() {
            let snapshot = Snapshot { status: STATUS_NO_FIX, ..Default::default() };
            let fix = build_from(&snapshot, profile, &config).unwrap();
            assert_eq!(fix.status.status, NavSatStatus::STATUS_NO_FIX);
            assert_eq!(fix.latitude, 37.4);

            let snapshot = Snapshot { status: STATUS_FIX | STATUS_DGPS_FIX, ..Default::default() };
            let fix = build_from(&snapshot, profile, &config).unwrap();
            let expected = match profile {
                Profile::V6 => NavSatStatus::STATUS_FIX,
                _ => NavSatStatus::STATUS_GBAS_FIX,
            };
            assert_eq!(fix.status.status, expected, "{:?}", profile);
        }
    }

    #[test]
    fn test_stamp_from_gps_time() {
        let config = Config::default();
        let snapshot = Snapshot::default();
        for &profile in Profile::ALL.iter() {
            let fix = build_from(&snapshot, profile, &config).unwrap();
            let expected = Time { secs: 1_600_000_000, nsecs: 250_000_000 };
            assert_eq!(fix.header.stamp, expected, "{:?}", profile);
        }
    }

    #[test]
    fn test_stamp_from_wall_clock() {
        let wall_clock = Time::from(now());

        let config = Config { use_gps_time: false, ..Default::default() };
        let fix = build_from(&Snapshot::default(), Profile::V10, &config).unwrap();
        assert_eq!(fix.header.stamp, wall_clock);

        let config = Config::default();
        let snapshot = Snapshot { time: None, ..Default::default() };
        for &profile in Profile::ALL.iter() {
            let fix = build_from(&snapshot, profile, &config).unwrap();
            assert_eq!(fix.header.stamp, wall_clock, "{:?}", profile);
        }

        let snapshot = Snapshot { online: false, ..Default::default() };
        let fix = build_from(&snapshot, Profile::V5, &config).unwrap();
        assert_eq!(fix.header.stamp, wall_clock);
    }

    #[test]
    fn test_frame_id() {
        let config = Config { frame_id: "antenna".into(), ..Default::default() };
        let fix = build_from(&Snapshot::default(), Profile::V7, &config).unwrap();
        assert_eq!(fix.header.frame_id, "antenna");
    }
}
