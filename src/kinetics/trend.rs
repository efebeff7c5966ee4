use crate::models::Trend;

const SIGNIFICANT_CHANGE_PCT: f64 = 25.0;
const MODERATE_CHANGE_PCT: f64 = 10.0;

/// Percent change from `previous` to `current`. `None` without a usable
/// (finite, positive) baseline.
pub fn percent_change(current: f64, previous: Option<f64>) -> Option<f64> {
    let previous = previous?;
    if previous <= 0.0 || !previous.is_finite() {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

/// Bucket the latest-vs-previous change. First matching bucket wins.
pub fn classify_trend(current: f64, previous: Option<f64>) -> Trend {
    let Some(change) = percent_change(current, previous) else {
        return Trend::Stable;
    };

    if change > SIGNIFICANT_CHANGE_PCT {
        Trend::RisingSignificant
    } else if change > MODERATE_CHANGE_PCT {
        Trend::RisingModerate
    } else if change < -SIGNIFICANT_CHANGE_PCT {
        Trend::DecliningSignificant
    } else if change < -MODERATE_CHANGE_PCT {
        Trend::DecliningModerate
    } else {
        Trend::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_previous_is_stable() {
        assert_eq!(classify_trend(7.0, None), Trend::Stable);
        assert_eq!(percent_change(7.0, None), None);
    }

    #[test]
    fn buckets() {
        assert_eq!(classify_trend(1.30, Some(1.0)), Trend::RisingSignificant);
        assert_eq!(classify_trend(1.20, Some(1.0)), Trend::RisingModerate);
        assert_eq!(classify_trend(1.05, Some(1.0)), Trend::Stable);
        assert_eq!(classify_trend(0.85, Some(1.0)), Trend::DecliningModerate);
        assert_eq!(classify_trend(0.50, Some(1.0)), Trend::DecliningSignificant);
    }

    #[test]
    fn thresholds_are_strict() {
        // exactly +25% is not "significant", exactly -25% is only moderate
        assert_eq!(classify_trend(5.0, Some(4.0)), Trend::RisingModerate);
        assert_eq!(classify_trend(9.5, Some(10.0)), Trend::Stable);
        assert_eq!(classify_trend(7.5, Some(10.0)), Trend::DecliningModerate);
    }

    #[test]
    fn zero_baseline_is_stable() {
        assert_eq!(classify_trend(3.0, Some(0.0)), Trend::Stable);
    }

    #[test]
    fn negative_baseline_is_stable() {
        assert_eq!(percent_change(3.0, Some(-1.0)), None);
        assert_eq!(classify_trend(3.0, Some(-1.0)), Trend::Stable);
    }

    #[test]
    fn drop_to_zero_is_significant_decline() {
        assert_eq!(percent_change(0.0, Some(15.0)), Some(-100.0));
        assert_eq!(classify_trend(0.0, Some(15.0)), Trend::DecliningSignificant);
    }
}
