//! Bounded, append-only bimap between move signatures and action ids.
//!
//! The move vocabulary is discovered lazily as the engine enumerates legal
//! moves, but agents need a fixed-size discrete action space. The codec
//! bridges the two: every new signature gets the next unused id, in the
//! order it is first observed, until `capacity` distinct signatures have
//! been seen. After that, registering a new signature fails and the codec
//! is left untouched. There is no eviction.
//!
//! ```
//! use power_chess_env::core::MoveSignature;
//! use power_chess_env::env::ActionCodec;
//!
//! let mut codec = ActionCodec::new(4096);
//! let id = codec.register(MoveSignature::quiet(0, 1)).unwrap();
//! assert_eq!(codec.register(MoveSignature::quiet(0, 1)).unwrap(), id);
//! assert_eq!(codec.size(), 1);
//! assert_eq!(codec.decode(id).unwrap(), MoveSignature::quiet(0, 1));
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ActionId, EnvError, MoveSignature, Result, MAX_ACTION_SPACE};

/// Ids produced by one `register_many` call, in input order.
pub type ActionBatch = SmallVec<[ActionId; 32]>;

/// Fixed-capacity signature <-> id mapping.
#[derive(Clone, Debug)]
pub struct ActionCodec {
    capacity: usize,
    ids: FxHashMap<MoveSignature, ActionId>,
    /// Signature for each id; `signatures[id]` is the id's signature.
    signatures: Vec<MoveSignature>,
}

impl ActionCodec {
    /// Create an empty codec that can hold `capacity` distinct signatures.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Codec capacity must be positive");
        assert!(
            capacity <= MAX_ACTION_SPACE,
            "Codec capacity must fit in an action id"
        );
        Self {
            capacity,
            ids: FxHashMap::default(),
            signatures: Vec::new(),
        }
    }

    /// Get the id for `signature`, assigning the next one if it is new.
    pub fn register(&mut self, signature: MoveSignature) -> Result<ActionId> {
        if let Some(&id) = self.ids.get(&signature) {
            return Ok(id);
        }

        if self.is_full() {
            tracing::error!(
                capacity = self.capacity,
                %signature,
                "action codec exhausted its capacity"
            );
            return Err(EnvError::CapacityExhausted {
                capacity: self.capacity,
            });
        }

        let id = ActionId::new(self.signatures.len() as u32);
        self.ids.insert(signature, id);
        self.signatures.push(signature);
        Ok(id)
    }

    /// Register every signature in order, returning ids in the same order.
    ///
    /// Stops at the first failure. Signatures registered before the failing
    /// one keep their ids.
    pub fn register_many(&mut self, signatures: &[MoveSignature]) -> Result<ActionBatch> {
        signatures.iter().map(|&sig| self.register(sig)).collect()
    }

    /// Get the signature an id was assigned to.
    pub fn decode(&self, id: ActionId) -> Result<MoveSignature> {
        self.signatures
            .get(id.index())
            .copied()
            .ok_or(EnvError::UnknownActionId(id))
    }

    /// Get the id of a known signature without registering it.
    #[must_use]
    pub fn lookup(&self, signature: &MoveSignature) -> Option<ActionId> {
        self.ids.get(signature).copied()
    }

    /// Number of distinct signatures registered so far.
    #[must_use]
    pub fn size(&self) -> usize {
        self.signatures.len()
    }

    /// Maximum number of distinct signatures.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.signatures.len() >= self.capacity
    }

    /// Iterate over (id, signature) pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ActionId, &MoveSignature)> {
        self.signatures
            .iter()
            .enumerate()
            .map(|(i, sig)| (ActionId::new(i as u32), sig))
    }

    /// Forget every mapping. Capacity is kept.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.signatures.clear();
    }

    // === Snapshots ===

    /// Capture the mapping so it can be restored elsewhere.
    #[must_use]
    pub fn snapshot(&self) -> CodecSnapshot {
        CodecSnapshot {
            capacity: self.capacity,
            signatures: self.signatures.clone(),
        }
    }

    /// Rebuild a codec from a snapshot, checking its invariants.
    pub fn from_snapshot(snapshot: CodecSnapshot) -> Result<Self> {
        if snapshot.capacity == 0 || snapshot.capacity > MAX_ACTION_SPACE {
            return Err(EnvError::CorruptSnapshot(format!(
                "invalid capacity {}",
                snapshot.capacity
            )));
        }
        if snapshot.signatures.len() > snapshot.capacity {
            return Err(EnvError::CorruptSnapshot(format!(
                "{} signatures exceed capacity {}",
                snapshot.signatures.len(),
                snapshot.capacity
            )));
        }

        let mut codec = Self::new(snapshot.capacity);
        for signature in snapshot.signatures {
            if codec.lookup(&signature).is_some() {
                return Err(EnvError::CorruptSnapshot(format!(
                    "duplicate signature {signature}"
                )));
            }
            codec.register(signature)?;
        }
        Ok(codec)
    }

    /// Encode the mapping with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&self.snapshot())?)
    }

    /// Decode a mapping produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: CodecSnapshot = bincode::deserialize(bytes)?;
        Self::from_snapshot(snapshot)
    }
}

/// Serializable codec contents: signatures listed in id order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecSnapshot {
    pub capacity: usize,
    pub signatures: Vec<MoveSignature>,
}
