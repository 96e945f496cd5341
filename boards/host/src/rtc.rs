use chrono::naive::NaiveDateTime;
use hal::rtc::RTCReader;

#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl RTCReader for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Utc::now().naive_utc()
    }
}

#[cfg(test)]
mod test {
    use std::thread;

    use hal::rtc::RTCReader;

    use super::SystemClock;

    #[test]
    fn test_clock_shared_across_threads() {
        let clock: Box<dyn RTCReader> = Box::new(SystemClock);
        let before = SystemClock.now();
        let now = thread::spawn(move || clock.now()).join().unwrap();
        assert!(now >= before);
    }
}
