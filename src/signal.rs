//! Signal derivation
//!
//! Single left-to-right pass over an ascending bar sequence. Each bar is
//! classified against its SMA200 and annotated with the transition relative to
//! the previous day's derived state. No lookahead, no re-sorting, no mutation
//! of the input.

use crate::{Bar, RegimeState, SignalAction, SignalPoint};

/// Classify one bar. Equality of close and SMA200 is RiskOff by design.
pub fn classify_state(bar: &Bar) -> RegimeState {
    match bar.sma200 {
        None => RegimeState::Unknown,
        Some(sma200) if bar.close > sma200 => RegimeState::RiskOn,
        Some(_) => RegimeState::RiskOff,
    }
}

/// Transition action as a pure function of (previous, current) state
fn determine_action(previous: Option<RegimeState>, current: RegimeState) -> SignalAction {
    let Some(previous) = previous else {
        return SignalAction::None;
    };

    // No ENTER/EXIT may straddle an Unknown boundary in either direction.
    if previous == RegimeState::Unknown || current == RegimeState::Unknown {
        return SignalAction::Hold;
    }

    match (previous, current) {
        (RegimeState::RiskOff, RegimeState::RiskOn) => SignalAction::Enter,
        (RegimeState::RiskOn, RegimeState::RiskOff) => SignalAction::Exit,
        _ => SignalAction::Hold,
    }
}

/// Derive one signal point per bar. The caller supplies bars in ascending
/// order; empty input yields empty output.
pub fn compute_signals(bars: &[Bar]) -> Vec<SignalPoint> {
    let mut points = Vec::with_capacity(bars.len());
    let mut previous: Option<RegimeState> = None;

    for bar in bars {
        let state = classify_state(bar);
        let action = determine_action(previous, state);

        points.push(SignalPoint {
            date: bar.date.clone(),
            close: bar.close,
            sma200: bar.sma200,
            state,
            action,
        });
        previous = Some(state);
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(date: &str, close: f64, sma200: Option<f64>) -> Bar {
        Bar {
            date: date.to_string(),
            close,
            sma200,
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(compute_signals(&[]).is_empty());
    }

    #[test]
    fn test_enter_sequence() {
        let bars = vec![
            bar("2023-01-01", 95.0, Some(100.0)),
            bar("2023-01-02", 101.0, Some(100.0)),
            bar("2023-01-03", 102.0, Some(100.0)),
        ];

        let points = compute_signals(&bars);

        let states: Vec<RegimeState> = points.iter().map(|p| p.state).collect();
        let actions: Vec<SignalAction> = points.iter().map(|p| p.action).collect();
        assert_eq!(
            states,
            [RegimeState::RiskOff, RegimeState::RiskOn, RegimeState::RiskOn]
        );
        assert_eq!(
            actions,
            [SignalAction::None, SignalAction::Enter, SignalAction::Hold]
        );
    }

    #[test]
    fn test_equality_is_risk_off_exit() {
        let bars = vec![
            bar("2023-01-01", 105.0, Some(100.0)),
            bar("2023-01-02", 100.0, Some(100.0)),
        ];

        let points = compute_signals(&bars);

        assert_eq!(points[1].state, RegimeState::RiskOff);
        assert_eq!(points[1].action, SignalAction::Exit);
    }

    #[test]
    fn test_unknown_never_enters_or_exits() {
        let bars = vec![
            bar("2023-01-01", 95.0, Some(100.0)),
            bar("2023-01-02", 101.0, None),
            bar("2023-01-03", 102.0, Some(100.0)),
            bar("2023-01-04", 95.0, None),
        ];

        let points = compute_signals(&bars);

        assert_eq!(points[1].state, RegimeState::Unknown);
        assert_eq!(points[1].action, SignalAction::Hold);
        assert_eq!(points[2].state, RegimeState::RiskOn);
        assert_eq!(points[2].action, SignalAction::Hold, "Unknown -> RiskOn is not an entry");
        assert_eq!(points[3].action, SignalAction::Hold, "RiskOn -> Unknown is not an exit");
    }

    #[test]
    fn test_first_bar_always_none() {
        let points = compute_signals(&[bar("2023-01-01", 101.0, Some(100.0))]);
        assert_eq!(points[0].state, RegimeState::RiskOn);
        assert_eq!(points[0].action, SignalAction::None);
    }

    #[test]
    fn test_input_not_mutated_and_deterministic() {
        let bars = vec![
            bar("2023-01-01", 95.0, Some(100.0)),
            bar("2023-01-02", 101.0, Some(100.0)),
        ];
        let snapshot = bars.clone();

        let first = compute_signals(&bars);
        let second = compute_signals(&bars);

        assert_eq!(bars, snapshot);
        assert_eq!(first, second);
    }
}
