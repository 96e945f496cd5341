use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;

use hal::gpsd::GPSD;
use hal::publisher::Publisher;
use hal::rtc::RTCReader;

use super::gps_fix;
use super::nav_sat_fix::NavSatFixBuilder;
use crate::config::Config;
use crate::protocol::gpsd::{satellite, status, Error, Profile};
use crate::types::{GPSFix, NavSatFix};

const WAIT_TIMEOUT: Duration = Duration::from_secs(1);

pub struct GPSDClient<G, R, E, N> {
    gpsd: G,
    rtc: R,
    extended_fix: E,
    fix: N,
    config: Config,
    profile: Profile,
    nav_sat_fix: NavSatFixBuilder,
}

impl<G, R, E, N> GPSDClient<G, R, E, N>
where
    G: GPSD,
    R: RTCReader,
    E: Publisher<GPSFix>,
    N: Publisher<NavSatFix>,
{
    pub fn start(
        gpsd: G,
        rtc: R,
        extended_fix: E,
        fix: N,
        config: Config,
    ) -> Result<Self, Error> {
        let version = gpsd.api_major_version();
        let profile = Profile::select(version)?;
        info!("GPSd opened, API version {} using {:?} layout", version, profile);
        let nav_sat_fix = NavSatFixBuilder::default();
        Ok(Self { gpsd, rtc, extended_fix, fix, config, profile, nav_sat_fix })
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// One poll cycle, returns whether a snapshot was published
    pub fn step(&mut self) -> bool {
        if !self.gpsd.waiting(WAIT_TIMEOUT) {
            return false;
        }
        let data = match self.gpsd.read() {
            Some(data) => data,
            None => return false,
        };
        if !data.is_online() {
            trace!("Receiver offline");
            return false;
        }

        let profile = self.profile;
        let status = status::classify(data, profile, self.config.check_fix_by_variance);
        let satellites = satellite::normalize(data, profile);
        let now = self.rtc.now();

        let frame_id = &self.config.frame_id;
        let extended = gps_fix::build(data, profile, status, &satellites, now.into(), frame_id);
        self.extended_fix.publish(&extended);
        if let Some(fix) = self.nav_sat_fix.build(data, status, now, &self.config) {
            self.fix.publish(&fix);
        }
        true
    }

    pub fn spin(&mut self, shutdown: &AtomicBool) {
        while !shutdown.load(Ordering::Relaxed) {
            self.step();
        }
    }

    pub fn stop(self) {
        info!("Stopping GPSd client");
        drop(self.gpsd)
    }
}

#[cfg(test)]
mod test {
    use alloc::collections::VecDeque;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use core::sync::atomic::AtomicBool;
    use core::time::Duration;

    use chrono::naive::{NaiveDate, NaiveDateTime};
    use hal::gpsd::{GpsData, GPSD};
    use hal::publisher::Publisher;
    use hal::rtc::RTCReader;
    use pretty_assertions::assert_eq;

    use super::GPSDClient;
    use crate::config::Config;
    use crate::protocol::gpsd::{fixture::Snapshot, Error, Profile};
    use crate::types::{GPSFix, GPSStatus, NavSatFix, NavSatStatus};

    struct Replay {
        version: u32,
        pending: VecDeque<Option<GpsData>>,
        current: Option<GpsData>,
        shutdown: Option<Rc<AtomicBool>>,
    }

    impl Replay {
        fn new(version: u32, pending: Vec<Option<GpsData>>) -> Self {
            Self { version, pending: pending.into(), current: None, shutdown: None }
        }
    }

    impl GPSD for Replay {
        fn api_major_version(&self) -> u32 {
            self.version
        }

        fn waiting(&mut self, _: Duration) -> bool {
            if self.pending.is_empty() {
                if let Some(shutdown) = self.shutdown.as_ref() {
                    shutdown.store(true, core::sync::atomic::Ordering::Relaxed);
                }
            }
            !self.pending.is_empty()
        }

        fn read(&mut self) -> Option<&GpsData> {
            self.current = self.pending.pop_front().flatten();
            self.current.as_ref()
        }
    }

    struct Clock;

    impl RTCReader for Clock {
        fn now(&self) -> NaiveDateTime {
            NaiveDate::from_ymd(2023, 11, 14).and_hms(22, 13, 20)
        }
    }

    #[derive(Clone)]
    struct Recorder<T>(Rc<RefCell<Vec<T>>>);

    impl<T> Default for Recorder<T> {
        fn default() -> Self {
            Self(Rc::new(RefCell::new(Vec::new())))
        }
    }

    impl<T: Clone> Publisher<T> for Recorder<T> {
        fn publish(&mut self, message: &T) {
            self.0.borrow_mut().push(message.clone())
        }
    }

    type Client = GPSDClient<Replay, Clock, Recorder<GPSFix>, Recorder<NavSatFix>>;

    fn start(gpsd: Replay) -> (Client, Recorder<GPSFix>, Recorder<NavSatFix>) {
        let (extended, fix) = (Recorder::default(), Recorder::default());
        let config = Config::default();
        let client = GPSDClient::start(gpsd, Clock, extended.clone(), fix.clone(), config);
        (client.unwrap(), extended, fix)
    }

    #[test]
    fn test_start() {
        let (client, _, _) = start(Replay::new(12, vec![]));
        assert_eq!(client.profile(), Profile::V10);
        let (client, _, _) = start(Replay::new(5, vec![]));
        assert_eq!(client.profile(), Profile::V5);

        let result = GPSDClient::start(
            Replay::new(2, vec![]),
            Clock,
            Recorder::<GPSFix>::default(),
            Recorder::<NavSatFix>::default(),
            Config::default(),
        );
        assert_eq!(result.err(), Some(Error::UnsupportedVersion(2)));
    }

    #[test]
    fn test_step_publishes_both() {
        let data = Snapshot::default().layout(Profile::V10);
        let (mut client, extended, fix) = start(Replay::new(10, vec![Some(data)]));
        assert!(client.step());
        assert_eq!(extended.0.borrow().len(), 1);
        assert_eq!(fix.0.borrow().len(), 1);
        assert_eq!(extended.0.borrow()[0].status.status, GPSStatus::STATUS_FIX);
        assert_eq!(fix.0.borrow()[0].status.status, NavSatStatus::STATUS_FIX);
        assert_eq!(fix.0.borrow()[0].latitude, 37.4);
    }

    #[test]
    fn test_step_skips() {
        let offline = Snapshot { online: false, ..Default::default() }.layout(Profile::V9);
        let (mut client, extended, fix) = start(Replay::new(9, vec![None, Some(offline)]));
        assert!(!client.step());
        assert!(!client.step());
        // timeout
        assert!(!client.step());
        assert!(extended.0.borrow().is_empty());
        assert!(fix.0.borrow().is_empty());
    }

    #[test]
    fn test_unknown_variance_only_extended() {
        let data = Snapshot { epx: f64::NAN, ..Default::default() }.layout(Profile::V7);
        let (mut client, extended, fix) = start(Replay::new(7, vec![Some(data)]));
        assert!(client.step());
        assert_eq!(extended.0.borrow().len(), 1);
        assert_eq!(extended.0.borrow()[0].status.status, GPSStatus::STATUS_NO_FIX);
        assert_eq!(extended.0.borrow()[0].status.satellites_visible, 3);
        assert!(fix.0.borrow().is_empty());
    }

    #[test]
    fn test_spin_until_shutdown() {
        let snapshots = (0..3).map(|_| Some(Snapshot::default().layout(Profile::V8))).collect();
        let shutdown = Rc::new(AtomicBool::new(false));
        let mut gpsd = Replay::new(8, snapshots);
        gpsd.shutdown = Some(shutdown.clone());
        let (mut client, extended, fix) = start(gpsd);
        client.spin(&shutdown);
        assert_eq!(extended.0.borrow().len(), 3);
        assert_eq!(fix.0.borrow().len(), 3);
        client.stop();
    }
}
