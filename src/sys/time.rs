use chrono::naive::NaiveDateTime;
use hal::gpsd::Timespec;

/// Bus timestamp, seconds and nanoseconds since unix epoch
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Time {
    pub secs: u32,
    pub nsecs: u32,
}

const NANOS_PER_SECOND: u32 = 1_000_000_000;

impl Time {
    pub fn new(secs: u32, nsecs: u32) -> Self {
        let secs = secs + nsecs / NANOS_PER_SECOND;
        Self { secs, nsecs: nsecs % NANOS_PER_SECOND }
    }
}

impl From<f64> for Time {
    fn from(seconds: f64) -> Self {
        if seconds.is_nan() || seconds <= 0.0 {
            return Self::default();
        }
        let secs = libm::floor(seconds);
        let nsecs = libm::round((seconds - secs) * NANOS_PER_SECOND as f64) as u32;
        Self::new(secs as u32, nsecs)
    }
}

impl From<Timespec> for Time {
    fn from(ts: Timespec) -> Self {
        if ts.tv_sec < 0 || ts.tv_nsec < 0 {
            return Self::default();
        }
        Self::new(ts.tv_sec as u32, ts.tv_nsec as u32)
    }
}

impl From<NaiveDateTime> for Time {
    fn from(datetime: NaiveDateTime) -> Self {
        let secs = datetime.timestamp();
        if secs < 0 {
            return Self::default();
        }
        Self::new(secs as u32, datetime.timestamp_subsec_nanos())
    }
}

/// Lets an event through at most once per interval
pub struct Throttle {
    interval: chrono::Duration,
    last: Option<NaiveDateTime>,
}

impl Throttle {
    pub fn new(interval: chrono::Duration) -> Self {
        Self { interval, last: None }
    }

    pub fn ready(&mut self, now: NaiveDateTime) -> bool {
        if let Some(last) = self.last {
            if now - last < self.interval && now >= last {
                return false;
            }
        }
        self.last = Some(now);
        true
    }
}

mod test {
    #[test]
    fn test_time_from_seconds() {
        use super::Time;

        assert_eq!(Time::from(1.5), Time { secs: 1, nsecs: 500_000_000 });
        assert_eq!(Time::from(1_600_000_000.25), Time { secs: 1_600_000_000, nsecs: 250_000_000 });
        assert_eq!(Time::from(f64::NAN), Time::default());
        assert_eq!(Time::from(-3.0), Time::default());
    }

    #[test]
    fn test_time_from_timespec() {
        use hal::gpsd::Timespec;

        use super::Time;

        let time = Time::from(Timespec::new(1_600_000_000, 123_456_789));
        assert_eq!(time, Time { secs: 1_600_000_000, nsecs: 123_456_789 });
        assert_eq!(Time::new(1, 1_500_000_000), Time { secs: 2, nsecs: 500_000_000 });
    }

    #[test]
    fn test_time_from_datetime() {
        use chrono::naive::NaiveDate;

        use super::Time;

        let datetime = NaiveDate::from_ymd(2020, 9, 13).and_hms_milli(12, 26, 40, 250);
        assert_eq!(Time::from(datetime), Time { secs: 1_600_000_000, nsecs: 250_000_000 });
    }

    #[test]
    fn test_throttle() {
        use chrono::naive::NaiveDate;
        use chrono::Duration;

        use super::Throttle;

        let start = NaiveDate::from_ymd(2020, 1, 1).and_hms(0, 0, 0);
        let mut throttle = Throttle::new(Duration::seconds(1));
        assert!(throttle.ready(start));
        assert!(!throttle.ready(start + Duration::milliseconds(500)));
        assert!(throttle.ready(start + Duration::milliseconds(1000)));
        assert!(!throttle.ready(start + Duration::milliseconds(1999)));
        assert!(throttle.ready(start + Duration::seconds(5)));
    }
}
