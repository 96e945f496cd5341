use alloc::vec::Vec;

use super::header::Header;
use crate::protocol::gpsd::status::FixStatus;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GPSStatus {
    pub header: Header,
    pub satellites_used: u16,
    pub satellite_used_prn: Vec<i32>,
    pub satellites_visible: u16,
    pub satellite_visible_prn: Vec<i32>,
    pub satellite_visible_z: Vec<i32>,
    pub satellite_visible_azimuth: Vec<i32>,
    pub satellite_visible_snr: Vec<i32>,
    pub status: i16,
    pub motion_source: u16,
    pub orientation_source: u16,
    pub position_source: u16,
}

impl GPSStatus {
    pub const STATUS_NO_FIX: i16 = -1;
    pub const STATUS_FIX: i16 = 0;
    pub const STATUS_SBAS_FIX: i16 = 1;
    pub const STATUS_GBAS_FIX: i16 = 2;
    pub const STATUS_DGPS_FIX: i16 = 18;
    pub const STATUS_WAAS_FIX: i16 = 33;

    pub const SOURCE_NONE: u16 = 0;
}

impl From<FixStatus> for i16 {
    fn from(status: FixStatus) -> i16 {
        match status {
            FixStatus::NoFix => GPSStatus::STATUS_NO_FIX,
            FixStatus::Fix => GPSStatus::STATUS_FIX,
            FixStatus::DifferentialFix => GPSStatus::STATUS_FIX | GPSStatus::STATUS_DGPS_FIX,
        }
    }
}

/// Extended fix, published on `extended_fix`.
///
/// Everything below `status` stays zero unless the fix is valid.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GPSFix {
    pub header: Header,
    pub status: GPSStatus,

    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub track: f64,
    pub speed: f64,
    pub climb: f64,
    pub pitch: f64,
    pub roll: f64,
    pub dip: f64,
    pub time: f64,

    pub gdop: f64,
    pub pdop: f64,
    pub hdop: f64,
    pub vdop: f64,
    pub tdop: f64,

    pub err: f64,
    pub err_horz: f64,
    pub err_vert: f64,
    pub err_track: f64,
    pub err_speed: f64,
    pub err_climb: f64,
    pub err_time: f64,
    pub err_pitch: f64,
    pub err_roll: f64,
    pub err_dip: f64,

    pub position_covariance: [f64; 9],
    pub position_covariance_type: u8,
}

mod test {
    #[test]
    fn test_status_code() {
        use super::GPSStatus;
        use crate::protocol::gpsd::status::FixStatus;

        assert_eq!(i16::from(FixStatus::NoFix), GPSStatus::STATUS_NO_FIX);
        assert_eq!(i16::from(FixStatus::Fix), GPSStatus::STATUS_FIX);
        assert_eq!(i16::from(FixStatus::DifferentialFix), GPSStatus::STATUS_DGPS_FIX);
    }

    #[test]
    fn test_serialize_gps_status() {
        use serde_json::json;

        use super::GPSStatus;
        use crate::{sys::time::Time, types::Header};

        let status = GPSStatus {
            header: Header::new(Time::new(10, 5), "gps"),
            satellites_used: 1,
            satellite_used_prn: vec![7],
            satellites_visible: 2,
            satellite_visible_prn: vec![7, 12],
            satellite_visible_z: vec![45, 10],
            satellite_visible_azimuth: vec![120, 300],
            satellite_visible_snr: vec![38, 20],
            status: GPSStatus::STATUS_FIX,
            ..Default::default()
        };
        let expected = json!({
            "header": {"stamp": {"secs": 10, "nsecs": 5}, "frame_id": "gps"},
            "satellites_used": 1,
            "satellite_used_prn": [7],
            "satellites_visible": 2,
            "satellite_visible_prn": [7, 12],
            "satellite_visible_z": [45, 10],
            "satellite_visible_azimuth": [120, 300],
            "satellite_visible_snr": [38, 20],
            "status": 0,
            "motion_source": 0,
            "orientation_source": 0,
            "position_source": 0,
        });
        assert_eq!(expected, serde_json::to_value(&status).unwrap());
    }
}
