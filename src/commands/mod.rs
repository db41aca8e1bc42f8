//! CLI command implementations

pub mod report;
pub mod track;

use sma200_tracker::{RegimeState, SignalAction};

/// Human-readable regime label
pub fn state_label(state: RegimeState) -> &'static str {
    match state {
        RegimeState::RiskOn => "Risk On",
        RegimeState::RiskOff => "Risk Off",
        RegimeState::Unknown => "Unknown",
    }
}

/// Human-readable action label
pub fn action_label(action: SignalAction) -> &'static str {
    match action {
        SignalAction::None => "-",
        SignalAction::Enter => "ENTER",
        SignalAction::Exit => "EXIT",
        SignalAction::Hold => "HOLD",
    }
}
