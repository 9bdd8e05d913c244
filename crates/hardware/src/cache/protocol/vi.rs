//! Valid/Invalid protocol.
//!
//! Same as Plain for local accesses. With no Shared state to fall back to,
//! any snooped miss that hits here invalidates the line, flushing it first
//! if dirty.

use super::{install_valid, local_valid_hit, CoherenceProtocol, HitEffect};
use crate::cache::line::{CacheLine, CoherenceState};
use crate::common::AccessKind;
use crate::config::Protocol;

/// VI protocol table.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViProtocol;

impl CoherenceProtocol for ViProtocol {
    fn kind(&self) -> Protocol {
        Protocol::Vi
    }

    fn on_hit(&self, line: &CacheLine, kind: AccessKind) -> HitEffect {
        if kind.is_local() {
            local_valid_hit(line, kind)
        } else {
            HitEffect::flush_to(line, CoherenceState::Invalid)
        }
    }

    fn on_miss(&self, kind: AccessKind) -> Option<CoherenceState> {
        install_valid(kind)
    }
}
