use chrono::naive::NaiveDateTime;

/// Wall clock, always UTC.
pub trait RTCReader: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}
