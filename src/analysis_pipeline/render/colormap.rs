//! Two-band attention colormap.
//!
//! Values above 0.6 run red to yellow; values at or below run blue through
//! cyan to green. Alpha grows linearly with the value up to `peak_alpha`.

const BAND_SPLIT: f64 = 0.6;

pub fn heat_color(value: f32, peak_alpha: u8) -> [u8; 4] {
    let value = value.clamp(0.0, 1.0);
    let v = value as f64;
    let alpha = (peak_alpha as f64 * v).floor() as u8;

    // Band test on the stored precision so 0.6 itself stays in the cool band.
    if value > BAND_SPLIT as f32 {
        let g = (((v - BAND_SPLIT) * 255.0) / (1.0 - BAND_SPLIT)).floor();
        [255, g as u8, 0, alpha]
    } else {
        let g = ((v * 255.0) / BAND_SPLIT).floor();
        let b = (((BAND_SPLIT - v) * 255.0) / BAND_SPLIT).floor();
        [0, g as u8, b as u8, alpha]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_endpoints() {
        assert_eq!(heat_color(0.0, 128), [0, 0, 255, 0]);
        assert_eq!(heat_color(1.0, 128), [255, 255, 0, 128]);
        assert_eq!(heat_color(1.0, 180), [255, 255, 0, 180]);
    }

    #[test]
    fn test_split_value_stays_in_cool_band() {
        let [r, g, b, _] = heat_color(0.6, 128);
        assert_eq!(r, 0);
        assert!(g >= 254);
        assert_eq!(b, 0);
    }

    #[test]
    fn test_warm_band_midpoint() {
        assert_eq!(heat_color(0.8, 100), [255, 127, 0, 80]);
    }

    #[test]
    fn test_cool_band_midpoint() {
        assert_eq!(heat_color(0.3, 180), [0, 127, 127, 54]);
    }
}
