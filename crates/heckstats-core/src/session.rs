use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Game mode a session is started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Survival,
    Versus,
}

impl std::fmt::Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Survival => write!(f, "Survival"),
            Self::Versus => write!(f, "Versus"),
        }
    }
}

/// Lifecycle phase. At most one non-inactive session exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Inactive,
    Survival,
    Versus,
}

impl SessionPhase {
    pub fn mode(self) -> Option<SessionMode> {
        match self {
            Self::Inactive => None,
            Self::Survival => Some(SessionMode::Survival),
            Self::Versus => Some(SessionMode::Versus),
        }
    }

    pub fn is_active(self) -> bool {
        self != Self::Inactive
    }
}

impl From<SessionMode> for SessionPhase {
    fn from(mode: SessionMode) -> Self {
        match mode {
            SessionMode::Survival => Self::Survival,
            SessionMode::Versus => Self::Versus,
        }
    }
}

/// Observable session state, copied into every snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub paused: bool,
    pub started_at: Option<Duration>,
    pub last_duration: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_from_mode() {
        assert_eq!(SessionPhase::from(SessionMode::Versus), SessionPhase::Versus);
        assert_eq!(SessionPhase::Survival.mode(), Some(SessionMode::Survival));
        assert_eq!(SessionPhase::Inactive.mode(), None);
    }

    #[test]
    fn default_state_is_inactive() {
        let state = SessionState::default();
        assert!(!state.phase.is_active());
        assert!(!state.paused);
        assert!(state.started_at.is_none());
    }

    #[test]
    fn mode_json_values() {
        assert_eq!(
            serde_json::to_string(&SessionMode::Survival).unwrap(),
            "\"survival\""
        );
        let back: SessionMode = serde_json::from_str("\"versus\"").unwrap();
        assert_eq!(back, SessionMode::Versus);
    }
}
