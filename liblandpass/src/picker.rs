//! Picks coordinates from clicks on the map
use crate::{
    map::{LatLng, MapSurface, MarkerId},
    page::{Field, Page},
};
use tracing::trace;

/// Number of decimal places shown in the coordinate fields
pub const COORDINATE_PRECISION: usize = 6;

/// Fractional digits needed to write any finite `f64` exactly
const EXACT_DIGITS: usize = 1074;

/// Format a coordinate with [COORDINATE_PRECISION] decimals.
///
/// Rounding works on the exact binary value and sends ties away from zero, the way browsers
/// format numbers for display. Negative zero is written without a sign.
pub fn format_coordinate(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let exact = format!("{:.prec$}", value.abs(), prec = EXACT_DIGITS);
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let mut digits: Vec<u8> = whole
        .bytes()
        .chain(fraction.bytes().chain(std::iter::repeat(b'0')).take(COORDINATE_PRECISION))
        .collect();
    if fraction
        .as_bytes()
        .get(COORDINATE_PRECISION)
        .is_some_and(|d| *d >= b'5')
    {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }
    let (whole, fraction) = digits.split_at(digits.len() - COORDINATE_PRECISION);
    format!(
        "{}{}.{}",
        if value < 0.0 { "-" } else { "" },
        String::from_utf8_lossy(whole),
        String::from_utf8_lossy(fraction)
    )
}

/// Keeps the coordinate fields and the map marker in sync with the most recent click.
///
/// At most one marker is on the map at any time.
#[derive(Debug, Default)]
pub struct CoordinatePicker {
    marker: Option<MarkerId>,
}

impl CoordinatePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker(&self) -> Option<MarkerId> {
        self.marker
    }

    pub fn pick<M: MapSurface, P: Page>(&mut self, at: LatLng, map: &mut M, page: &mut P) {
        page.set_value(Field::Latitude, format_coordinate(at.lat));
        page.set_value(Field::Longitude, format_coordinate(at.lng));
        if let Some(previous) = self.marker.take() {
            map.remove_marker(previous);
        }
        let marker = map.add_marker(at);
        trace!(?at, ?marker, "placed marker");
        self.marker = Some(marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessMap, HeadlessPage};

    #[test]
    fn test_format_coordinate() {
        assert_eq!(format_coordinate(12.3456789), "12.345679");
        assert_eq!(format_coordinate(-98.7654321), "-98.765432");
        assert_eq!(format_coordinate(0.0), "0.000000");
        assert_eq!(format_coordinate(45.0), "45.000000");
    }

    #[test]
    fn test_format_coordinate_rounding() {
        // exact binary ties round away from zero
        assert_eq!(format_coordinate(0.0078125), "0.007813");
        assert_eq!(format_coordinate(-0.0078125), "-0.007813");
        assert_eq!(format_coordinate(-0.0), "0.000000");
        assert_eq!(format_coordinate(-0.0000001), "-0.000000");
        assert_eq!(format_coordinate(179.9999996), "180.000000");
        assert_eq!(format_coordinate(9.9999999), "10.000000");
        assert_eq!(format_coordinate(1.0000004), "1.000000");
    }

    #[test]
    fn test_single_marker() {
        let mut map = HeadlessMap::new();
        let mut page = HeadlessPage::new();
        let mut picker = CoordinatePicker::new();
        assert!(picker.marker().is_none());

        let clicks = [
            LatLng::new(10.0, 20.0),
            LatLng::new(-33.8688197, 151.2092955),
            LatLng::new(64.1466, -21.9426),
        ];
        for at in clicks {
            picker.pick(at, &mut map, &mut page);
            assert_eq!(map.markers().len(), 1);
            assert_eq!(map.markers().get(&picker.marker().unwrap()), Some(&at));
        }
        assert_eq!(page.value(Field::Latitude), "64.146600");
        assert_eq!(page.value(Field::Longitude), "-21.942600");
    }
}
