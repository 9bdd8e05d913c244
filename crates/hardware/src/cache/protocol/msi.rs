//! Modified/Shared/Invalid protocol.
//!
//! | Current  | Load       | Store                | ExternalLoadMiss     | ExternalStoreMiss    |
//! |----------|------------|----------------------|----------------------|----------------------|
//! | Invalid  | → Shared   | → Modified           | no effect            | no effect            |
//! | Shared   | Shared     | → Modified (upgrade) | Shared               | → Invalid            |
//! | Modified | Modified   | Modified             | → Shared (writeback) | → Invalid (writeback)|
//!
//! The dirty bit tracks `Modified` exactly.

use super::{CoherenceProtocol, HitEffect};
use crate::cache::line::CacheLine;
use crate::cache::line::CoherenceState::{self, Invalid, Modified, Shared};
use crate::common::AccessKind;
use crate::config::Protocol;

/// MSI protocol table.
#[derive(Clone, Copy, Debug, Default)]
pub struct MsiProtocol;

impl CoherenceProtocol for MsiProtocol {
    fn kind(&self) -> Protocol {
        Protocol::Msi
    }

    fn on_hit(&self, line: &CacheLine, kind: AccessKind) -> HitEffect {
        let modified = line.state == Modified;
        match kind {
            AccessKind::Load => HitEffect::unchanged(line),
            AccessKind::Store if modified => HitEffect::unchanged(line),
            AccessKind::Store => HitEffect {
                next: Modified,
                dirty: true,
                writeback: false,
                upgrade_miss: true,
            },
            AccessKind::ExternalLoadMiss if modified => HitEffect::flush_to(line, Shared),
            AccessKind::ExternalLoadMiss => HitEffect::unchanged(line),
            AccessKind::ExternalStoreMiss => HitEffect {
                next: Invalid,
                dirty: false,
                writeback: modified,
                upgrade_miss: false,
            },
        }
    }

    fn on_miss(&self, kind: AccessKind) -> Option<CoherenceState> {
        match kind {
            AccessKind::Load => Some(Shared),
            AccessKind::Store => Some(Modified),
            AccessKind::ExternalLoadMiss | AccessKind::ExternalStoreMiss => None,
        }
    }
}
