//! Summary statistics over a derived signal sequence
//!
//! Two independent read-only queries, both O(n) and total: when did the regime
//! last change, and how long has the current regime held. Both assume the
//! ascending ordering the signal engine produces.

use crate::{RegimeState, SignalAction, SignalPoint};

/// Date of the most recent ENTER or EXIT, scanning from the newest point
/// backward. `None` when the sequence contains no switch at all.
pub fn last_switch_date(points: &[SignalPoint]) -> Option<&str> {
    points
        .iter()
        .rev()
        .find(|p| matches!(p.action, SignalAction::Enter | SignalAction::Exit))
        .map(|p| p.date.as_str())
}

/// Consecutive trailing days in the same regime as the newest point,
/// inclusive of the newest point itself. Zero for an empty sequence or when
/// the newest state is Unknown.
pub fn count_holding_days(points: &[SignalPoint]) -> usize {
    let Some(latest) = points.last() else {
        return 0;
    };
    if latest.state == RegimeState::Unknown {
        return 0;
    }

    points
        .iter()
        .rev()
        .take_while(|p| p.state == latest.state)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, state: RegimeState, action: SignalAction) -> SignalPoint {
        SignalPoint {
            date: date.to_string(),
            close: 100.0,
            sma200: Some(100.0),
            state,
            action,
        }
    }

    #[test]
    fn test_last_switch_none_without_transitions() {
        assert_eq!(last_switch_date(&[]), None);

        let points = vec![
            point("2023-01-01", RegimeState::RiskOn, SignalAction::None),
            point("2023-01-02", RegimeState::RiskOn, SignalAction::Hold),
        ];
        assert_eq!(last_switch_date(&points), None);
    }

    #[test]
    fn test_last_switch_most_recent_wins() {
        let points = vec![
            point("2023-01-01", RegimeState::RiskOff, SignalAction::None),
            point("2023-01-02", RegimeState::RiskOn, SignalAction::Enter),
            point("2023-01-03", RegimeState::RiskOff, SignalAction::Exit),
            point("2023-01-04", RegimeState::RiskOff, SignalAction::Hold),
        ];
        assert_eq!(last_switch_date(&points), Some("2023-01-03"));
    }

    #[test]
    fn test_holding_days_empty_or_unknown() {
        assert_eq!(count_holding_days(&[]), 0);

        let points = vec![
            point("2023-01-01", RegimeState::RiskOn, SignalAction::None),
            point("2023-01-02", RegimeState::Unknown, SignalAction::Hold),
        ];
        assert_eq!(count_holding_days(&points), 0);
    }

    #[test]
    fn test_holding_days_counts_trailing_streak() {
        let points = vec![
            point("2023-01-01", RegimeState::RiskOn, SignalAction::None),
            point("2023-01-02", RegimeState::RiskOff, SignalAction::Exit),
            point("2023-01-03", RegimeState::RiskOff, SignalAction::Hold),
        ];
        assert_eq!(count_holding_days(&points), 2);
    }

    #[test]
    fn test_holding_days_whole_sequence_one_regime() {
        let points = vec![
            point("2023-01-01", RegimeState::RiskOn, SignalAction::None),
            point("2023-01-02", RegimeState::RiskOn, SignalAction::Hold),
            point("2023-01-03", RegimeState::RiskOn, SignalAction::Hold),
        ];
        assert_eq!(count_holding_days(&points), 3);
    }
}
