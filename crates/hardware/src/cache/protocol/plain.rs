//! Plain (no coherence) protocol.
//!
//! Lines are Valid or Invalid. A snooped miss that hits here is reported as
//! a hit and flushes dirty data; whether it also evicts the line is
//! configurable, so that a single-cache run can still reflect external
//! interference.

use super::{install_valid, local_valid_hit, CoherenceProtocol, HitEffect};
use crate::cache::line::{CacheLine, CoherenceState};
use crate::common::AccessKind;
use crate::config::Protocol;

/// Plain protocol table.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainProtocol {
    lru_on_invalidate: bool,
}

impl PlainProtocol {
    /// Creates the table; `lru_on_invalidate` makes snoop hits invalidate.
    pub const fn new(lru_on_invalidate: bool) -> Self {
        Self { lru_on_invalidate }
    }
}

impl CoherenceProtocol for PlainProtocol {
    fn kind(&self) -> Protocol {
        Protocol::Plain
    }

    fn on_hit(&self, line: &CacheLine, kind: AccessKind) -> HitEffect {
        match kind {
            AccessKind::Load | AccessKind::Store => local_valid_hit(line, kind),
            AccessKind::ExternalLoadMiss | AccessKind::ExternalStoreMiss => {
                if self.lru_on_invalidate {
                    HitEffect::flush_to(line, CoherenceState::Invalid)
                } else {
                    HitEffect::flush_to(line, line.state)
                }
            }
        }
    }

    fn on_miss(&self, kind: AccessKind) -> Option<CoherenceState> {
        install_valid(kind)
    }

    fn repositions_on_invalidate(&self) -> bool {
        self.lru_on_invalidate
    }
}
