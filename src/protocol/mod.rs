pub mod gpsd;
