//! States of the startup gate.

use strum::{Display, IntoStaticStr};

/// Where the startup sequence currently stands.
///
/// Transitions only move forward: `AwaitingLogin → AwaitingRotation → Ready`,
/// with `Terminated` reachable from both awaiting states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum GateState {
    AwaitingLogin,
    AwaitingRotation,
    Ready,
    Terminated,
}

impl GateState {
    /// True once nothing can change the state anymore.
    pub fn is_final(self) -> bool {
        matches!(self, Self::Ready | Self::Terminated)
    }
}
