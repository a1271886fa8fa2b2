//! Pure transition planning.
//!
//! `plan` maps (desired state, probe result, run mode) to exactly one
//! action without touching the filesystem or the network. Dry-run
//! semantics live entirely here: an inspection-only run can never reach
//! a mutating component because the planner short-circuits first.

use crate::types::{DesiredState, HostProbe, Plan};

/// Decide the action for one reconciliation run.
#[must_use]
pub fn plan(state: DesiredState, probe: HostProbe, apply_changes: bool) -> Plan {
    match state {
        DesiredState::Present => {
            if probe.tool_present {
                Plan::NoOp {
                    message: "aws cli already installed".to_string(),
                }
            } else if apply_changes {
                Plan::Install
            } else {
                Plan::WouldChange
            }
        }
        DesiredState::Absent => {
            if !probe.tool_present {
                Plan::NoOp {
                    message: "aws cli not installed".to_string(),
                }
            } else if apply_changes {
                Plan::Uninstall
            } else {
                Plan::WouldChange
            }
        }
        // Reserved state: updating in place is not implemented yet, and
        // the contract is unchanged success rather than an error.
        DesiredState::Update => Plan::NoOp {
            message: "update is not implemented; no changes made".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESENT: HostProbe = HostProbe { tool_present: true };
    const ABSENT: HostProbe = HostProbe {
        tool_present: false,
    };

    #[test]
    fn test_present_on_present_host_is_noop() {
        for apply in [true, false] {
            let plan = plan(DesiredState::Present, PRESENT, apply);
            assert!(matches!(plan, Plan::NoOp { ref message } if message.contains("already")));
        }
    }

    #[test]
    fn test_present_on_absent_host_installs() {
        assert_eq!(plan(DesiredState::Present, ABSENT, true), Plan::Install);
    }

    #[test]
    fn test_present_on_absent_host_check_mode() {
        assert_eq!(plan(DesiredState::Present, ABSENT, false), Plan::WouldChange);
    }

    #[test]
    fn test_absent_on_absent_host_is_noop() {
        for apply in [true, false] {
            let plan = plan(DesiredState::Absent, ABSENT, apply);
            assert!(matches!(plan, Plan::NoOp { ref message } if message.contains("not installed")));
        }
    }

    #[test]
    fn test_absent_on_present_host_uninstalls() {
        assert_eq!(plan(DesiredState::Absent, PRESENT, true), Plan::Uninstall);
    }

    #[test]
    fn test_absent_on_present_host_check_mode() {
        assert_eq!(plan(DesiredState::Absent, PRESENT, false), Plan::WouldChange);
    }

    #[test]
    fn test_update_is_always_a_noop() {
        for probe in [PRESENT, ABSENT] {
            for apply in [true, false] {
                let plan = plan(DesiredState::Update, probe, apply);
                assert!(matches!(plan, Plan::NoOp { .. }));
            }
        }
    }
}
