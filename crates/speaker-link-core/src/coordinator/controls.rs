//! Busy state of the controls that trigger optimistic commands.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

/// A control that is disabled while its command is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    CreateGroup,
    Ungroup,
}

impl Control {
    pub fn idle_label(&self) -> &'static str {
        match self {
            Control::CreateGroup => "Create Group",
            Control::Ungroup => "Ungroup",
        }
    }

    pub fn busy_label(&self) -> &'static str {
        match self {
            Control::CreateGroup => "Creating...",
            Control::Ungroup => "Ungrouping...",
        }
    }
}

/// What a renderer should show for a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub enabled: bool,
    pub label: &'static str,
}

#[derive(Debug, Default)]
pub(crate) struct ControlPanel {
    create_group: AtomicBool,
    ungroup: AtomicBool,
}

impl ControlPanel {
    fn flag(&self, control: Control) -> &AtomicBool {
        match control {
            Control::CreateGroup => &self.create_group,
            Control::Ungroup => &self.ungroup,
        }
    }

    /// Mark `control` busy, or `None` if it already is.
    pub(crate) fn try_acquire(&self, control: Control) -> Option<BusyGuard<'_>> {
        self.flag(control)
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard {
                flag: self.flag(control),
            })
    }

    pub(crate) fn state(&self, control: Control) -> ControlState {
        if self.flag(control).load(Ordering::Acquire) {
            ControlState {
                enabled: false,
                label: control.busy_label(),
            }
        } else {
            ControlState {
                enabled: true,
                label: control.idle_label(),
            }
        }
    }
}

/// Re-enables its control when dropped, on every exit path.
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_restores_control() {
        let panel = ControlPanel::default();
        assert!(panel.state(Control::CreateGroup).enabled);

        {
            let _guard = panel.try_acquire(Control::CreateGroup).unwrap();
            let state = panel.state(Control::CreateGroup);
            assert!(!state.enabled);
            assert_eq!(state.label, "Creating...");
            assert!(panel.try_acquire(Control::CreateGroup).is_none());
            // Independent controls do not block each other.
            assert!(panel.try_acquire(Control::Ungroup).is_some());
        }

        assert_eq!(
            panel.state(Control::CreateGroup),
            ControlState {
                enabled: true,
                label: "Create Group"
            }
        );
    }
}
