use hal::gpsd::GpsData;

use super::{Profile, STATUS_DGPS_FIX, STATUS_FIX};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FixStatus {
    NoFix,
    Fix,
    DifferentialFix,
}

impl Default for FixStatus {
    fn default() -> Self {
        Self::NoFix
    }
}

impl FixStatus {
    pub fn is_fixed(self) -> bool {
        self != Self::NoFix
    }
}

/// Single source of fix status for both output records.
///
/// gpsd keeps reporting a fix long after losing it, while `epx` correctly turns NaN.
/// With `check_fix_by_variance` such a fix is discarded whatever the status word says.
pub fn classify(data: &GpsData, profile: Profile, check_fix_by_variance: bool) -> FixStatus {
    if check_fix_by_variance && data.fix.epx.is_nan() {
        return FixStatus::NoFix;
    }
    let status = profile.status(data);
    if status & STATUS_FIX == 0 {
        return FixStatus::NoFix;
    }
    if profile.has_differential() && status & STATUS_DGPS_FIX != 0 {
        return FixStatus::DifferentialFix;
    }
    FixStatus::Fix
}

mod test {
    #[cfg(test)]
    fn snapshot(profile: super::Profile, status: i32, epx: f64) -> hal::gpsd::GpsData {
        let mut data = hal::gpsd::GpsData::default();
        profile.set_status(&mut data, status);
        data.fix.epx = epx;
        data
    }

    #[test]
    fn test_base_bit() {
        use super::{classify, FixStatus};
        use crate::protocol::gpsd::{Profile, STATUS_FIX, STATUS_NO_FIX};

        for &profile in Profile::ALL.iter() {
            let data = snapshot(profile, STATUS_NO_FIX, 1.0);
            assert_eq!(classify(&data, profile, true), FixStatus::NoFix);
            let data = snapshot(profile, STATUS_FIX, 1.0);
            assert_eq!(classify(&data, profile, true), FixStatus::Fix);
        }
    }

    #[test]
    fn test_differential_bit() {
        use super::{classify, FixStatus};
        use crate::protocol::gpsd::{Profile, STATUS_DGPS_FIX, STATUS_FIX};

        for &profile in Profile::ALL.iter() {
            let data = snapshot(profile, STATUS_FIX | STATUS_DGPS_FIX, 1.0);
            let expected = match profile {
                Profile::V6 => FixStatus::Fix,
                _ => FixStatus::DifferentialFix,
            };
            assert_eq!(classify(&data, profile, true), expected, "{:?}", profile);

            // differential bit alone is not a fix
            let data = snapshot(profile, STATUS_DGPS_FIX, 1.0);
            assert_eq!(classify(&data, profile, true), FixStatus::NoFix, "{:?}", profile);
        }
    }

    #[test]
    fn test_variance_override() {
        use super::{classify, FixStatus};
        use crate::protocol::gpsd::{Profile, STATUS_DGPS_FIX, STATUS_FIX};

        for &profile in Profile::ALL.iter() {
            let data = snapshot(profile, STATUS_FIX | STATUS_DGPS_FIX, f64::NAN);
            assert_eq!(classify(&data, profile, true), FixStatus::NoFix);
            let status = classify(&data, profile, false);
            assert!(status.is_fixed(), "{:?}", profile);
        }
    }

    #[test]
    fn test_status_read_from_profile_location() {
        use super::{classify, FixStatus};
        use crate::protocol::gpsd::{Profile, STATUS_FIX};

        // a V9 layout seen through V10 eyes has no status in gps_fix_t
        let data = snapshot(Profile::V9, STATUS_FIX, 1.0);
        assert_eq!(classify(&data, Profile::V10, true), FixStatus::NoFix);
    }
}
