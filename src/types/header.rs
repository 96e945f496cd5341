use alloc::string::String;

use crate::sys::time::Time;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Header {
    pub stamp: Time,
    pub frame_id: String,
}

impl Header {
    pub fn new(stamp: Time, frame_id: &str) -> Self {
        Self { stamp, frame_id: frame_id.into() }
    }
}
