#![no_std]

extern crate alloc;

pub mod gpsd;
pub mod publisher;
pub mod rtc;
