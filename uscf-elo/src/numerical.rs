/// Width of the linear ramp of the provisional winning expectancy, on either side of the foe.
pub const PROVISIONAL_HALF_WIDTH: f64 = 400.;

/// Logistic winning expectancy used by the standard formula.
pub fn standard_winning_expectancy(rating: f64, foe_rating: f64) -> f64 {
    (1. + 10f64.powf(-(rating - foe_rating) / 400.)).recip()
}

/// Clamped linear winning expectancy used by the special formula.
/// Continuous and nondecreasing in `rating`, with kinks at `foe_rating +- 400`.
pub fn provisional_winning_expectancy(rating: f64, foe_rating: f64) -> f64 {
    if rating <= foe_rating - PROVISIONAL_HALF_WIDTH {
        0.
    } else if rating >= foe_rating + PROVISIONAL_HALF_WIDTH {
        1.
    } else {
        0.5 + (rating - foe_rating) / (2. * PROVISIONAL_HALF_WIDTH)
    }
}

/// Zero of the line through (x0, f0) and (x1, f1). Exact when f is linear on [x0, x1].
pub fn secant_root((x0, f0): (f64, f64), (x1, f1): (f64, f64)) -> f64 {
    x0 - f0 * (x1 - x0) / (f1 - f0)
}
