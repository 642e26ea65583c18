//! Impact radius derivation
//!
//! Converts a predicted delay and two raw categorical attributes into a
//! bounded distance: linear delay-to-distance scaling with multiplicative
//! adjustments for lane-blocking and collision-class incidents (type codes
//! 3, 4, 5), capped at 10 miles.

const BASE_RADIUS_MILES: f64 = 1.0;
const MAX_RADIUS_MILES: f64 = 10.0;
const BLOCKING_MULTIPLIER: f64 = 1.5;
const COLLISION_MULTIPLIER: f64 = 1.3;

/// Estimate the affected distance in miles
///
/// Inputs are the raw numeric parameter values; they are compared exactly,
/// so an out-of-range category code falls through to the neutral 1.0
/// multiplier rather than failing. There are no error conditions.
pub fn estimate_impact_radius(delay_minutes: f64, blocking: f64, incident_type: f64) -> f64 {
    let delay_contribution = (delay_minutes / 10.0) * 0.5;
    let blocking_multiplier = if blocking == 1.0 {
        BLOCKING_MULTIPLIER
    } else {
        1.0
    };
    let incident_multiplier =
        if incident_type == 3.0 || incident_type == 4.0 || incident_type == 5.0 {
            COLLISION_MULTIPLIER
        } else {
            1.0
        };

    let radius =
        (BASE_RADIUS_MILES + delay_contribution) * blocking_multiplier * incident_multiplier;
    radius.min(MAX_RADIUS_MILES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_delay_no_multipliers_is_base_radius() {
        assert_eq!(estimate_impact_radius(0.0, 0.0, 0.0), 1.0);
    }

    #[test]
    fn test_blocking_collision_scenario() {
        // delay_contribution = (20 / 10) * 0.5 = 1.0
        // (1.0 + 1.0) * 1.5 * 1.3 = 3.9
        assert_eq!(estimate_impact_radius(20.0, 1.0, 4.0), 3.9);
    }

    #[test]
    fn test_radius_caps_at_ten_miles() {
        assert_eq!(estimate_impact_radius(1000.0, 1.0, 5.0), 10.0);
    }

    #[test]
    fn test_radius_bounded_for_all_inputs() {
        for delay in [0.0, 5.0, 30.0, 120.0, 10_000.0] {
            for blocking in [0.0, 1.0] {
                for incident_type in 0..8 {
                    let radius = estimate_impact_radius(delay, blocking, incident_type as f64);
                    assert!(radius > 0.0);
                    assert!(radius <= 10.0);
                }
            }
        }
    }

    #[test]
    fn test_radius_monotonic_in_delay() {
        let mut last = 0.0;
        for delay in (0..500).map(|d| d as f64) {
            let radius = estimate_impact_radius(delay, 1.0, 3.0);
            assert!(radius >= last, "radius decreased at delay {}", delay);
            last = radius;
        }
    }

    #[test]
    fn test_collision_codes_get_multiplier() {
        let base = estimate_impact_radius(10.0, 0.0, 0.0);
        for code in [3.0, 4.0, 5.0] {
            assert_eq!(estimate_impact_radius(10.0, 0.0, code), base * 1.3);
        }
        for code in [1.0, 2.0, 6.0, 7.0] {
            assert_eq!(estimate_impact_radius(10.0, 0.0, code), base);
        }
    }

    #[test]
    fn test_only_exact_blocking_flag_multiplies() {
        let unblocked = estimate_impact_radius(10.0, 0.0, 0.0);
        assert_eq!(estimate_impact_radius(10.0, 0.9, 0.0), unblocked);
        assert_eq!(estimate_impact_radius(10.0, 1.0, 0.0), unblocked * 1.5);
    }

    #[test]
    fn test_out_of_range_type_code_is_neutral() {
        // 3.5 is not a category code; it must not pick up the collision
        // multiplier.
        assert_eq!(
            estimate_impact_radius(10.0, 0.0, 3.5),
            estimate_impact_radius(10.0, 0.0, 0.0)
        );
    }
}
