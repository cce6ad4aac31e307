//! Orders an operation mix into a final trace.

use rand::seq::SliceRandom;
use rand::Rng;
use trace::{Operation, RangeQuery, Trace, TraceResult};

use crate::config::Mode;
use crate::domain::KeyDomain;
use crate::mix::OperationMix;

/// Orders `mix` according to `mode` and closes it with a full-range scan.
///
/// [`Mode::Interleaved`] shuffles all `3N` operations together with a uniform
/// Fisher-Yates permutation. [`Mode::Sequential`] keeps the phases in order:
/// inserts, reads, deletes. Either way the trailing `RANGE 0 N N` comes last.
pub fn interleave<R: Rng + ?Sized>(
    domain: &KeyDomain,
    mix: OperationMix,
    mode: Mode,
    rng: &mut R,
) -> TraceResult<Trace> {
    let body = match mode {
        Mode::Interleaved => full_shuffle(mix, rng),
        Mode::Sequential => phase_sequential(mix),
    };
    Trace::new(body, RangeQuery::full_scan(domain.len()))
}

fn concat_phases(mix: OperationMix) -> Vec<Operation> {
    let mut body = Vec::with_capacity(mix.len());
    body.extend(mix.inserts);
    body.extend(mix.reads);
    body.extend(mix.deletes);
    body
}

fn full_shuffle<R: Rng + ?Sized>(mix: OperationMix, rng: &mut R) -> Vec<Operation> {
    let mut body = concat_phases(mix);
    body.shuffle(rng);
    body
}

fn phase_sequential(mix: OperationMix) -> Vec<Operation> {
    concat_phases(mix)
}
