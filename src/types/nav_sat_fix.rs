use nalgebra::Matrix3;
use serde::ser::SerializeStruct;

use super::header::Header;
use crate::protocol::gpsd::status::FixStatus;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct NavSatStatus {
    pub status: i8,
    pub service: u16,
}

impl NavSatStatus {
    pub const STATUS_NO_FIX: i8 = -1;
    pub const STATUS_FIX: i8 = 0;
    pub const STATUS_SBAS_FIX: i8 = 1;
    pub const STATUS_GBAS_FIX: i8 = 2;

    pub const SERVICE_GPS: u16 = 1;
    pub const SERVICE_GLONASS: u16 = 2;
    pub const SERVICE_COMPASS: u16 = 4;
    pub const SERVICE_GALILEO: u16 = 8;
}

impl Default for NavSatStatus {
    fn default() -> Self {
        Self { status: Self::STATUS_NO_FIX, service: Self::SERVICE_GPS }
    }
}

impl From<FixStatus> for NavSatStatus {
    fn from(status: FixStatus) -> Self {
        let status = match status {
            FixStatus::NoFix => Self::STATUS_NO_FIX,
            FixStatus::Fix => Self::STATUS_FIX,
            FixStatus::DifferentialFix => Self::STATUS_GBAS_FIX,
        };
        Self { status, service: Self::SERVICE_GPS }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum CovarianceType {
    Unknown = 0,
    Approximated = 1,
    DiagonalKnown = 2,
    Known = 3,
}

impl Default for CovarianceType {
    fn default() -> Self {
        Self::Unknown
    }
}

impl serde::Serialize for CovarianceType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Geodetic fix, published on `fix`
#[derive(Clone, Debug, PartialEq)]
pub struct NavSatFix {
    pub header: Header,
    pub status: NavSatStatus,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub position_covariance: Matrix3<f64>,
    pub position_covariance_type: CovarianceType,
}

impl Default for NavSatFix {
    fn default() -> Self {
        Self {
            header: Header::default(),
            status: NavSatStatus::default(),
            latitude: 0.0,
            longitude: 0.0,
            altitude: 0.0,
            position_covariance: Matrix3::zeros(),
            position_covariance_type: CovarianceType::default(),
        }
    }
}

impl serde::Serialize for NavSatFix {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut covariance = [0.0; 9];
        for (i, row) in self.position_covariance.row_iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                covariance[i * 3 + j] = *value;
            }
        }
        let mut struct_ = serializer.serialize_struct("NavSatFix", 7)?;
        struct_.serialize_field("header", &self.header)?;
        struct_.serialize_field("status", &self.status)?;
        struct_.serialize_field("latitude", &self.latitude)?;
        struct_.serialize_field("longitude", &self.longitude)?;
        struct_.serialize_field("altitude", &self.altitude)?;
        struct_.serialize_field("position_covariance", &covariance)?;
        struct_.serialize_field("position_covariance_type", &self.position_covariance_type)?;
        struct_.end()
    }
}

mod test {
    #[test]
    fn test_nav_sat_status() {
        use super::NavSatStatus;
        use crate::protocol::gpsd::status::FixStatus;

        assert_eq!(NavSatStatus::from(FixStatus::NoFix).status, NavSatStatus::STATUS_NO_FIX);
        assert_eq!(NavSatStatus::from(FixStatus::Fix).status, NavSatStatus::STATUS_FIX);
        let status = NavSatStatus::from(FixStatus::DifferentialFix);
        assert_eq!(status.status, NavSatStatus::STATUS_GBAS_FIX);
        assert_eq!(status.service, NavSatStatus::SERVICE_GPS);
    }

    #[test]
    fn test_serialize_nav_sat_fix() {
        use nalgebra::{Matrix3, Vector3};
        use serde_json::json;

        use super::{CovarianceType, NavSatFix, NavSatStatus};
        use crate::{sys::time::Time, types::Header};

        let fix = NavSatFix {
            header: Header::new(Time::new(1, 0), "gps"),
            status: NavSatStatus { status: NavSatStatus::STATUS_FIX, service: 1 },
            latitude: 37.4,
            longitude: -122.1,
            altitude: 10.0,
            position_covariance: Matrix3::from_diagonal(&Vector3::new(2.5, 2.5, 4.0)),
            position_covariance_type: CovarianceType::DiagonalKnown,
        };
        let expected = json!({
            "header": {"stamp": {"secs": 1, "nsecs": 0}, "frame_id": "gps"},
            "status": {"status": 0, "service": 1},
            "latitude": 37.4,
            "longitude": -122.1,
            "altitude": 10.0,
            "position_covariance": [2.5, 0.0, 0.0, 0.0, 2.5, 0.0, 0.0, 0.0, 4.0],
            "position_covariance_type": 2,
        });
        assert_eq!(expected, serde_json::to_value(&fix).unwrap());
    }

    #[test]
    fn test_covariance_row_major() {
        use nalgebra::Matrix3;

        use super::NavSatFix;

        let fix = NavSatFix {
            position_covariance: Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0),
            ..Default::default()
        };
        let value = serde_json::to_value(&fix).unwrap();
        let expected = serde_json::json!([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(value["position_covariance"], expected);
    }
}
