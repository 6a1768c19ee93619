//! The host-side [`boreal_core::collab::IntentSource`]. Real deployments
//! plug an inference pipeline in here; until one exists, this emits a
//! fixed intent on every tick — the slot where model output would land.

use boreal_core::collab::IntentSource;

pub struct FixedIntentSource {
    intent_id: u16,
    conf_q15: u16,
    aux: Vec<i16>,
}

impl FixedIntentSource {
    pub fn new(intent_id: u16, conf_q15: u16, aux: Vec<i16>) -> Self {
        Self {
            intent_id,
            conf_q15,
            aux,
        }
    }
}

impl IntentSource for FixedIntentSource {
    fn next(&mut self) -> Option<(u16, u16, Vec<i16>)> {
        Some((self.intent_id, self.conf_q15, self.aux.clone()))
    }
}
