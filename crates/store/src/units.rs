//! Mass unit conversion.
//!
//! Emissions are stored in kgCO2e everywhere; tonne values exist only at
//! presentation time. Non-finite input propagates as NaN/Infinity — this is
//! demo-grade code and deliberately does not guard against it.

pub const KG_PER_TONNE: f64 = 1000.0;

/// Convert a stored mass (kgCO2e) to its display unit (tCO2e).
#[must_use]
pub fn kg_to_tonnes(kg: f64) -> f64 {
    kg / KG_PER_TONNE
}

/// Exact inverse of [`kg_to_tonnes`].
#[must_use]
pub fn tonnes_to_kg(tonnes: f64) -> f64 {
    tonnes * KG_PER_TONNE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_within_epsilon() {
        for kg in [0.0, 1.0, 607.0, 58_936.4, 182_500.0, 1e12, 1e-9] {
            let back = tonnes_to_kg(kg_to_tonnes(kg));
            assert!((back - kg).abs() <= f64::EPSILON * kg.abs().max(1.0), "kg={kg}");
        }
    }

    #[test]
    fn converts_known_values() {
        assert!((kg_to_tonnes(58_936.4) - 58.9364).abs() < 1e-9);
        assert!((tonnes_to_kg(58.9364) - 58_936.4).abs() < 1e-6);
    }

    #[test]
    fn non_finite_input_propagates() {
        assert!(kg_to_tonnes(f64::NAN).is_nan());
        assert!(tonnes_to_kg(f64::INFINITY).is_infinite());
    }
}
