//! Resistance to temperature conversion independent of the board firmware.
//!
//! The board reports its own temperature for every channel. This 5th order
//! fit of the PT100 curve works from the raw resistance instead, which makes
//! it handy to cross-check the on-board value.

/// Coefficients `c5..c0` of the fit, highest order first.
pub const POLY5_COEFFICIENTS: [f64; 6] = [
    -2.10678e-11,
    2.27311e-08,
    -8.20888e-06,
    2.38589e-03,
    2.24745,
    -242.522,
];

/// Converts a PT100 resistance in Ohm to a temperature in °C.
///
/// Evaluated with Horner's method:
/// `((((r*c5 + c4)*r + c3)*r + c2)*r + c1)*r + c0`.
pub fn resistance_to_temperature(resistance: f32) -> f32 {
    let r = resistance as f64;
    POLY5_COEFFICIENTS
        .iter()
        .skip(1)
        .fold(POLY5_COEFFICIENTS[0], |acc, c| acc * r + c) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_expanded_polynomial() {
        let r = 110.0f64;
        let [c5, c4, c3, c2, c1, c0] = POLY5_COEFFICIENTS;
        let expanded =
            c5 * r.powi(5) + c4 * r.powi(4) + c3 * r.powi(3) + c2 * r.powi(2) + c1 * r + c0;
        let t = resistance_to_temperature(110.0);
        assert!((t as f64 - expanded).abs() < 1e-3, "{t} != {expanded}");
    }

    #[test]
    fn is_deterministic() {
        let first = resistance_to_temperature(110.0);
        for _ in 0..10 {
            assert_eq!(resistance_to_temperature(110.0).to_bits(), first.to_bits());
        }
    }

    #[test]
    fn pt100_reference_points() {
        // 100 Ohm is 0 °C and 138.5 Ohm is 100 °C for a standard PT100.
        assert!(resistance_to_temperature(100.0).abs() < 0.1);
        assert!((resistance_to_temperature(138.5) - 100.0).abs() < 0.1);
        assert!((resistance_to_temperature(110.0) - 25.63).abs() < 0.01);
    }
}
