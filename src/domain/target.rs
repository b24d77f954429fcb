// ============================================================
// Layer 3 — Regression Targets
// ============================================================
// Four independent scalar quantities get regressed per subject:
// the X and Y gaze coordinate of each eye. Each target owns a
// fixed checkpoint slot name that is reused (overwritten) for
// every subject.
//
// Having the target be a value lets the trainer and evaluator be
// written once and invoked four times, instead of the four
// copy-pasted loops of the reference pipeline.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    LeftEyeY,
    LeftEyeX,
    RightEyeY,
    RightEyeX,
}

impl Target {
    /// All targets in training order.
    pub const ALL: [Target; 4] = [
        Target::LeftEyeY,
        Target::LeftEyeX,
        Target::RightEyeY,
        Target::RightEyeX,
    ];

    /// Fixed checkpoint slot name, shared across subjects.
    pub fn slot(self) -> &'static str {
        match self {
            Target::LeftEyeY => "leftEyeY",
            Target::LeftEyeX => "leftEyeX",
            Target::RightEyeY => "rightEyeY",
            Target::RightEyeX => "rightEyeX",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Target::LeftEyeY => "left eye Y",
            Target::LeftEyeX => "left eye X",
            Target::RightEyeY => "right eye Y",
            Target::RightEyeX => "right eye X",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_are_distinct() {
        let slots: Vec<&str> = Target::ALL.iter().map(|t| t.slot()).collect();
        for (i, a) in slots.iter().enumerate() {
            for b in &slots[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
