//! Builds the insert, read, and delete phases of a workload.

use rand::seq::SliceRandom;
use rand::Rng;
use trace::{Key, Operation};

use crate::config::Mode;
use crate::domain::KeyDomain;

/// The unordered phases of a workload, before interleaving.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationMix {
    pub inserts: Vec<Operation>,
    pub reads: Vec<Operation>,
    pub deletes: Vec<Operation>,
}

impl OperationMix {
    /// Total number of operations across all phases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inserts.len() + self.reads.len() + self.deletes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds the three phases for `mode` over `domain`.
///
/// Both modes insert and read every key exactly once. They differ in insert
/// order and delete targets:
///
/// - [`Mode::Interleaved`]: inserts in generation order, one delete per key.
/// - [`Mode::Sequential`]: inserts over a random permutation of the keys, with
///   values still assigned by generation index, and `N` deletes drawn
///   uniformly with replacement.
pub fn build_mix<R: Rng + ?Sized>(domain: &KeyDomain, mode: Mode, rng: &mut R) -> OperationMix {
    let (inserts, deletes) = match mode {
        Mode::Interleaved => (inserts_in_order(domain), deletes_each_key(domain)),
        Mode::Sequential => {
            let inserts = inserts_permuted(domain, rng);
            (inserts, deletes_uniform(domain, rng))
        }
    };
    let mix = OperationMix {
        inserts,
        reads: reads_ascending(domain),
        deletes,
    };
    tracing::debug!(
        inserts = mix.inserts.len(),
        reads = mix.reads.len(),
        deletes = mix.deletes.len(),
        %mode,
        "built operation mix"
    );
    mix
}

fn inserts_in_order(domain: &KeyDomain) -> Vec<Operation> {
    domain
        .keys()
        .map(|key| Operation::Insert {
            key,
            value: domain.synthesize_value(key),
        })
        .collect()
}

fn inserts_permuted<R: Rng + ?Sized>(domain: &KeyDomain, rng: &mut R) -> Vec<Operation> {
    let mut keys: Vec<Key> = domain.keys().collect();
    keys.shuffle(rng);
    keys.into_iter()
        .zip(domain.keys())
        .map(|(key, index)| Operation::Insert {
            key,
            value: domain.synthesize_value(index),
        })
        .collect()
}

fn reads_ascending(domain: &KeyDomain) -> Vec<Operation> {
    domain.keys().map(|key| Operation::Read { key }).collect()
}

fn deletes_each_key(domain: &KeyDomain) -> Vec<Operation> {
    domain.keys().map(|key| Operation::Delete { key }).collect()
}

fn deletes_uniform<R: Rng + ?Sized>(domain: &KeyDomain, rng: &mut R) -> Vec<Operation> {
    let records = domain.len();
    domain
        .keys()
        .map(|_| Operation::Delete {
            key: rng.random_range(0..records),
        })
        .collect()
}
