use crate::global_constants::ONE_SHOT_FLAG;

/// How the process was invoked, read once at startup and threaded down to
/// the overlay teardown step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// `--screenshot`: perform exactly one capture and exit after the
    /// overlay's terminal action.
    OneShot,
    /// Stay resident awaiting tray triggers; the overlay only closes itself.
    TrayResident,
}

impl SessionMode {
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        if args.into_iter().any(|arg| arg == ONE_SHOT_FLAG) {
            SessionMode::OneShot
        } else {
            SessionMode::TrayResident
        }
    }

    pub fn exits_after_action(&self) -> bool {
        matches!(self, SessionMode::OneShot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screenshot_flag_selects_one_shot() {
        let args = vec!["quicksnip".to_string(), "--screenshot".to_string()];

        assert_eq!(SessionMode::from_args(args), SessionMode::OneShot);
    }

    #[test]
    fn test_no_flag_selects_tray_resident() {
        let args = vec!["quicksnip".to_string()];

        assert_eq!(SessionMode::from_args(args), SessionMode::TrayResident);
    }

    #[test]
    fn test_only_one_shot_exits_after_action() {
        assert!(SessionMode::OneShot.exits_after_action());
        assert!(!SessionMode::TrayResident.exits_after_action());
    }
}
