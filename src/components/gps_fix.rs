use hal::gpsd::{GpsData, Timestamp};

use crate::{
    protocol::gpsd::{FixStatus, Observation, Profile},
    sys::time::Time,
    types::{GPSFix, GPSStatus, Header},
};

/// Fix time as float seconds, `None` when the receiver did not report one
fn fix_time(time: Timestamp) -> Option<f64> {
    if !time.is_valid() {
        return None;
    }
    match time {
        Timestamp::Seconds(seconds) => Some(seconds),
        // nanoseconds contribute on a millisecond scale, existing consumers rely on it
        Timestamp::Timespec(ts) => Some(ts.tv_sec as f64 + ts.tv_nsec as f64 / 1e6),
    }
}

fn gps_status(
    data: &GpsData,
    profile: Profile,
    status: FixStatus,
    satellites: &[Observation],
    header: Header,
) -> GPSStatus {
    GPSStatus {
        header,
        satellites_used: data.satellites_used.max(0) as u16,
        satellite_used_prn: satellites.iter().filter(|s| s.used).map(|s| s.prn).collect(),
        satellites_visible: profile.satellites_visible(data).max(0) as u16,
        satellite_visible_prn: satellites.iter().map(|s| s.prn).collect(),
        satellite_visible_z: satellites.iter().map(|s| s.elevation as i32).collect(),
        satellite_visible_azimuth: satellites.iter().map(|s| s.azimuth as i32).collect(),
        satellite_visible_snr: satellites.iter().map(|s| s.snr as i32).collect(),
        status: status.into(),
        motion_source: GPSStatus::SOURCE_NONE,
        orientation_source: GPSStatus::SOURCE_NONE,
        position_source: GPSStatus::SOURCE_NONE,
    }
}

/// Extended fix record.
///
/// Header is stamped with wall clock `now`. Satellite table and status are always filled,
/// position, velocity, DOP and error estimates only for a valid fix.
pub fn build(
    data: &GpsData,
    profile: Profile,
    status: FixStatus,
    satellites: &[Observation],
    now: Time,
    frame_id: &str,
) -> GPSFix {
    let header = Header::new(now, frame_id);
    let gps_status = gps_status(data, profile, status, satellites, header.clone());
    let mut fix = GPSFix { header, status: gps_status, ..Default::default() };
    if !status.is_fixed() {
        return fix;
    }

    if let Some(time) = fix_time(data.fix.time) {
        fix.time = time;
    }
    fix.latitude = data.fix.latitude;
    fix.longitude = data.fix.longitude;
    fix.altitude = data.fix.altitude;
    fix.track = data.fix.track;
    fix.speed = data.fix.speed;
    fix.climb = data.fix.climb;

    let dop = profile.dop(data);
    fix.pdop = dop.pdop;
    fix.hdop = dop.hdop;
    fix.vdop = dop.vdop;
    fix.tdop = dop.tdop;
    fix.gdop = dop.gdop;

    fix.err = profile.position_error(data);
    fix.err_vert = data.fix.epv;
    fix.err_track = data.fix.epd;
    fix.err_speed = data.fix.eps;
    fix.err_climb = data.fix.epc;
    fix.err_time = data.fix.ept;
    fix
}
