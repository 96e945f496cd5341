use alloc::vec::Vec;

use hal::gpsd::GpsData;

use super::Profile;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Observation {
    pub prn: i32,
    pub used: bool,
    pub elevation: f64,
    pub azimuth: f64,
    pub snr: f64,
}

fn clamp(count: i32, table: usize) -> usize {
    debug_assert!(count >= 0, "negative satellite count {}", count);
    debug_assert!(count as usize <= table, "satellite count {} exceeds table {}", count, table);
    core::cmp::min(count.max(0) as usize, table)
}

fn from_skyview(data: &GpsData, visible: i32) -> Vec<Observation> {
    let skyview = &data.skyview[..clamp(visible, data.skyview.len())];
    skyview
        .iter()
        .map(|s| Observation {
            prn: s.prn as i32,
            used: s.used,
            elevation: s.elevation,
            azimuth: s.azimuth,
            snr: s.ss,
        })
        .collect()
}

fn from_parallel_arrays(data: &GpsData, visible: i32) -> Vec<Observation> {
    let lengths = [data.prn.len(), data.elevation.len(), data.azimuth.len(), data.ss.len()];
    let visible = clamp(visible, lengths.iter().cloned().min().unwrap_or(0));
    let used = &data.used[..clamp(data.satellites_used, data.used.len())];
    (0..visible)
        .map(|i| Observation {
            prn: data.prn[i],
            used: used.contains(&data.prn[i]),
            elevation: data.elevation[i] as f64,
            azimuth: data.azimuth[i] as f64,
            snr: data.ss[i],
        })
        .collect()
}

/// Satellite table in visibility order, as reported.
pub fn normalize(data: &GpsData, profile: Profile) -> Vec<Observation> {
    let visible = profile.satellites_visible(data);
    match profile.has_skyview() {
        true => from_skyview(data, visible),
        false => from_parallel_arrays(data, visible),
    }
}
