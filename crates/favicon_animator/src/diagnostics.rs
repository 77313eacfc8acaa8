//! Serializable snapshot of the animator for debugging from the console.

use serde::Serialize;

use crate::config::AnimatorConfig;
use crate::outline::Stage;

/// Lifecycle of an animator instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// `initialize` has not succeeded yet.
    Uninitialized,
    /// Listener attached, waiting for a hover.
    Ready,
    Running,
    /// Last run drew its final frame; a hover starts another.
    Finished,
    /// `initialize` failed; the favicon will never animate.
    Failed,
}

impl Phase {
    /// True once the trigger listener is attached.
    pub fn is_armed(self) -> bool {
        matches!(self, Phase::Ready | Phase::Running | Phase::Finished)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnimatorDiagnostics {
    pub phase: Phase,
    pub progress: u32,
    pub stage: Stage,
    pub running: bool,
    pub frames_published: u64,
    pub last_error: Option<String>,
    pub config: AnimatorConfig,
}

impl AnimatorDiagnostics {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            "{\"phase\":\"error\",\"detail\":\"diagnostics serialization failed\"}".to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let diagnostics = AnimatorDiagnostics {
            phase: Phase::Running,
            progress: 37,
            stage: Stage::Right,
            running: true,
            frames_published: 37,
            last_error: None,
            config: AnimatorConfig::default(),
        };
        let value: serde_json::Value = serde_json::from_str(&diagnostics.to_json()).unwrap();
        assert_eq!(value["phase"], "running");
        assert_eq!(value["stage"], "right");
        assert_eq!(value["progress"], 37);
        assert_eq!(value["config"]["size"], 32);
        assert!(value["last_error"].is_null());
    }

    #[test]
    fn test_armed_phases() {
        assert!(!Phase::Uninitialized.is_armed());
        assert!(!Phase::Failed.is_armed());
        assert!(Phase::Ready.is_armed());
        assert!(Phase::Finished.is_armed());
    }
}
