/// Weeks used to annualize a weekly return.
pub const WEEKS_PER_YEAR: u32 = 52;

/// Annualizes a weekly percentage return.
///
/// Gains compound: `((1 + w/100)^weeks - 1) * 100`.
/// Losses are extrapolated linearly (`w * weeks`) so a losing position
/// reads as the loss it accrues instead of compounding towards -100%.
pub fn annualize_weekly_percent(weekly_percent: f64, weeks: u32) -> f64 {
    if weekly_percent < 0.0 {
        return weekly_percent * f64::from(weeks);
    }
    let growth = 1.0 + weekly_percent / 100.0;
    (growth.powf(f64::from(weeks)) - 1.0) * 100.0
}

/// Percentage of `principal` that `earned` represents.
pub fn return_percent(earned: f64, principal: f64) -> f64 {
    if principal == 0.0 {
        return 0.0;
    }
    earned / principal * 100.0
}
