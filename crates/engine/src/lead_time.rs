//! Lead-time scoring.

/// Score a lead time on a 0-100 scale, higher is better.
///
/// A step function of days: anything within a week scores 100, anything
/// beyond a quarter scores 10.
pub fn score_lead_time(lead_time_days: Option<u32>) -> Option<u8> {
    let days = lead_time_days?;
    let score = match days {
        0..=7 => 100,
        8..=14 => 85,
        15..=30 => 70,
        31..=60 => 50,
        61..=90 => 30,
        _ => 10,
    };
    Some(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_boundaries() {
        assert_eq!(score_lead_time(Some(7)), Some(100));
        assert_eq!(score_lead_time(Some(8)), Some(85));
        assert_eq!(score_lead_time(Some(14)), Some(85));
        assert_eq!(score_lead_time(Some(30)), Some(70));
        assert_eq!(score_lead_time(Some(31)), Some(50));
        assert_eq!(score_lead_time(Some(60)), Some(50));
        assert_eq!(score_lead_time(Some(90)), Some(30));
        assert_eq!(score_lead_time(Some(91)), Some(10));
    }

    #[test]
    fn test_missing_lead_time() {
        assert_eq!(score_lead_time(None), None);
    }

    #[test]
    fn test_monotonically_decreasing() {
        let mut last = 100;
        for days in 0..200 {
            let score = score_lead_time(Some(days)).unwrap();
            assert!(score <= last);
            last = score;
        }
    }
}
