#![no_std]

#[macro_use]
extern crate alloc;
extern crate chrono;
extern crate derive_more;
extern crate hal;
extern crate libm;
#[macro_use]
extern crate log;
extern crate nalgebra;
#[macro_use]
extern crate serde;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod components;
pub mod config;
pub mod protocol;
pub mod sys;
pub mod types;
