//! Per-agent legal action sets.
//!
//! `sync` is the only way to install a legal set. It always clears every
//! agent before installing the new one, so at most one agent ever has a
//! non-empty set.

use std::collections::BTreeSet;

use crate::core::{ActionId, AgentId, AgentMap, MoveSignature, Result};

use super::codec::ActionCodec;

/// Legal action ids per agent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegalActionIndex {
    sets: AgentMap<BTreeSet<ActionId>>,
}

impl LegalActionIndex {
    /// Create an index with every set empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `legal` through the codec and install the ids as the only
    /// non-empty set, keyed by `active`.
    ///
    /// On codec failure the index is left as it was.
    pub fn sync(
        &mut self,
        codec: &mut ActionCodec,
        active: AgentId,
        legal: &[MoveSignature],
    ) -> Result<()> {
        let ids = codec.register_many(legal)?;
        self.clear();
        self.sets[active].extend(ids);
        Ok(())
    }

    /// Empty every agent's set.
    pub fn clear(&mut self) {
        for (_, set) in self.sets.iter_mut() {
            set.clear();
        }
    }

    /// The legal ids for `agent`; empty unless `agent` is active.
    #[must_use]
    pub fn legal_for(&self, agent: AgentId) -> &BTreeSet<ActionId> {
        &self.sets[agent]
    }

    #[must_use]
    pub fn contains(&self, agent: AgentId, action: ActionId) -> bool {
        self.sets[agent].contains(&action)
    }

    /// The agent holding a non-empty set, if any.
    #[must_use]
    pub fn holder(&self) -> Option<AgentId> {
        self.sets
            .iter()
            .find(|(_, set)| !set.is_empty())
            .map(|(agent, _)| agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EnvError;

    fn moves(pairs: &[(u8, u8)]) -> Vec<MoveSignature> {
        pairs.iter().map(|&(f, t)| MoveSignature::quiet(f, t)).collect()
    }

    #[test]
    fn test_empty_before_first_sync() {
        let index = LegalActionIndex::new();
        for agent in AgentId::ALL {
            assert!(index.legal_for(agent).is_empty());
        }
        assert_eq!(index.holder(), None);
    }

    #[test]
    fn test_sync_installs_single_holder() {
        let mut codec = ActionCodec::new(64);
        let mut index = LegalActionIndex::new();

        index
            .sync(&mut codec, AgentId::PLAYER_0, &moves(&[(8, 0), (9, 1)]))
            .unwrap();
        assert_eq!(index.holder(), Some(AgentId::PLAYER_0));
        assert_eq!(index.legal_for(AgentId::PLAYER_0).len(), 2);
        assert!(index.legal_for(AgentId::PLAYER_1).is_empty());

        index
            .sync(&mut codec, AgentId::PLAYER_1, &moves(&[(0, 8)]))
            .unwrap();
        assert_eq!(index.holder(), Some(AgentId::PLAYER_1));
        assert!(index.legal_for(AgentId::PLAYER_0).is_empty());
        assert!(index.contains(AgentId::PLAYER_1, ActionId(2)));
    }

    #[test]
    fn test_duplicate_moves_collapse() {
        let mut codec = ActionCodec::new(64);
        let mut index = LegalActionIndex::new();

        index
            .sync(&mut codec, AgentId::PLAYER_0, &moves(&[(1, 2), (1, 2)]))
            .unwrap();
        assert_eq!(index.legal_for(AgentId::PLAYER_0).len(), 1);
    }

    #[test]
    fn test_failed_sync_keeps_previous_sets() {
        let mut codec = ActionCodec::new(1);
        let mut index = LegalActionIndex::new();

        index
            .sync(&mut codec, AgentId::PLAYER_0, &moves(&[(1, 2)]))
            .unwrap();
        let err = index
            .sync(&mut codec, AgentId::PLAYER_1, &moves(&[(3, 4)]))
            .unwrap_err();

        assert!(matches!(err, EnvError::CapacityExhausted { .. }));
        assert_eq!(index.holder(), Some(AgentId::PLAYER_0));
    }

    #[test]
    fn test_clear() {
        let mut codec = ActionCodec::new(8);
        let mut index = LegalActionIndex::new();
        index
            .sync(&mut codec, AgentId::PLAYER_0, &moves(&[(1, 2)]))
            .unwrap();

        index.clear();
        assert_eq!(index.holder(), None);
    }
}
