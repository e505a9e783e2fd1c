//! Combinatorial data augmentation: synthesizes higher-order mutants by
//! randomly pairing existing variants and uniting their mutation sets.
//!
//! A candidate pairing two variants that both mutate the same position is
//! structurally invalid for a single variant; such candidates are quietly
//! discarded (and counted), never raised, so augmentation always makes
//! forward progress.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::variant::token_position;

/// Synthetic samples produced by [`augment`]: three parallel sequences
/// plus the number of discarded (position-colliding) candidates.
#[derive(Debug, Clone, Default)]
pub struct Augmented {
    pub data: Vec<String>,
    pub labels: Vec<f32>,
    pub mutation_counts: Vec<u32>,
    pub discarded: usize,
}

/// Caller-level policy for repeated augmentation rounds, mirroring how a
/// training run typically applies the engine: several rounds with decaying
/// labels and a hard cap on the total training-set size.
#[derive(Debug, Clone)]
pub struct AugmentPolicy {
    pub rounds: usize,
    pub runs_per_round: usize,
    pub label_decay: f32,
    pub cap: usize,
    pub dedupe: bool,
}

impl Default for AugmentPolicy {
    fn default() -> Self {
        Self {
            rounds: 3,
            runs_per_round: 4,
            label_decay: 0.2,
            cap: 20_000,
            dedupe: false,
        }
    }
}

/// Creates pseudo data by pairing each variant with a randomly drawn
/// partner and uniting their mutation sets.
///
/// # Arguments
/// * `data` - variant strings like `["S1A", "D35T,V20R"]`
/// * `labels` - corresponding scores; candidate label = sum of the pair
/// * `mutation_counts` - mutations per variant; candidate count = sum
/// * `runs` - how many shuffled pairings to perform
/// * `dedupe` - drop repeated synthetic variant strings, keeping the
///   first occurrence
///
/// A candidate is discarded when its united tokens cover fewer distinct
/// positions than the summed mutation count, i.e. the two sources mutated
/// an overlapping position.
pub fn augment<R: Rng>(
    data: &[String],
    labels: &[f32],
    mutation_counts: &[u32],
    runs: usize,
    dedupe: bool,
    rng: &mut R,
) -> anyhow::Result<Augmented> {
    if data.len() != labels.len() || data.len() != mutation_counts.len() {
        anyhow::bail!(
            "data ({}), labels ({}) and mutation_counts ({}) must be parallel",
            data.len(),
            labels.len(),
            mutation_counts.len()
        );
    }

    let mut out = Augmented::default();
    let mut partner: Vec<usize> = (0..data.len()).collect();

    for _ in 0..runs {
        partner.shuffle(rng);
        for (i, &p) in partner.iter().enumerate() {
            let count = mutation_counts[i] + mutation_counts[p];
            // wild-type entries (empty strings) yield an unparsable token
            // and fall into the discard path below
            let mut tokens: Vec<&str> = data[i]
                .split(',')
                .chain(data[p].split(','))
                .map(str::trim)
                .collect();
            tokens.sort_unstable();

            if distinct_positions(&tokens) != Some(count as usize) {
                out.discarded += 1;
                continue;
            }

            out.data.push(tokens.join(","));
            out.labels.push(labels[i] + labels[p]);
            out.mutation_counts.push(count);
        }
    }

    if dedupe {
        deduplicate(&mut out);
    }

    log::debug!(
        "augmentation produced {} samples over {} runs ({} discarded)",
        out.data.len(),
        runs,
        out.discarded
    );

    Ok(out)
}

/// Applies [`augment`] over several compounding rounds with label decay,
/// then caps the synthetic volume.
///
/// Each round re-augments the accumulated set (originals plus the
/// synthetics of earlier rounds), so round 2 can pair two 2-mutants into a
/// 3rd- or 4th-order variant; this compounding is what enlarges sparse
/// high-order data. Round `i` contributes its synthetic labels scaled by
/// `1 - i * label_decay`, and the decayed labels feed the next round. If
/// originals plus synthetics exceed `cap`, only the first
/// `cap - originals` synthetic samples are kept; the original data is
/// always kept in full.
pub fn augment_rounds<R: Rng>(
    data: &[String],
    labels: &[f32],
    mutation_counts: &[u32],
    policy: &AugmentPolicy,
    rng: &mut R,
) -> anyhow::Result<(Vec<String>, Vec<f32>, Vec<u32>)> {
    let mut out_data = data.to_vec();
    let mut out_labels = labels.to_vec();
    let mut out_counts = mutation_counts.to_vec();
    let mut discarded = 0;

    for round in 0..policy.rounds {
        let scale = 1.0 - round as f32 * policy.label_decay;
        let produced = augment(
            &out_data,
            &out_labels,
            &out_counts,
            policy.runs_per_round,
            policy.dedupe,
            rng,
        )?;
        out_data.extend(produced.data);
        out_labels.extend(produced.labels.iter().map(|l| l * scale));
        out_counts.extend(produced.mutation_counts);
        discarded += produced.discarded;
    }

    let synthetic = out_data.len() - data.len();
    let keep = synthetic.min(policy.cap.saturating_sub(data.len()));
    log::debug!(
        "using {} of {} synthetic samples alongside {} originals ({} discarded)",
        keep,
        synthetic,
        data.len(),
        discarded
    );

    out_data.truncate(data.len() + keep);
    out_labels.truncate(data.len() + keep);
    out_counts.truncate(data.len() + keep);

    Ok((out_data, out_labels, out_counts))
}

/// Restricts a dataset to variants with at most `max_mutations` mutations.
/// Partitioning policy for the orchestrating layer, kept off the batch
/// generator on purpose.
pub fn filter_by_mutation_count(
    data: &[String],
    labels: &[f32],
    mutation_counts: &[u32],
    max_mutations: u32,
) -> (Vec<String>, Vec<f32>, Vec<u32>) {
    let mut out = (Vec::new(), Vec::new(), Vec::new());
    for i in 0..data.len() {
        if mutation_counts[i] <= max_mutations {
            out.0.push(data[i].clone());
            out.1.push(labels[i]);
            out.2.push(mutation_counts[i]);
        }
    }
    out
}

/// Distinct mutated positions across sorted tokens, or `None` when a token
/// is malformed (malformed candidates are discarded like collisions).
fn distinct_positions(tokens: &[&str]) -> Option<usize> {
    let mut positions = Vec::with_capacity(tokens.len());
    for token in tokens {
        positions.push(token_position(token)?);
    }
    positions.sort_unstable();
    positions.dedup();
    Some(positions.len())
}

fn deduplicate(out: &mut Augmented) {
    let mut seen = HashSet::new();
    let mut keep = Vec::with_capacity(out.data.len());
    for (i, variant) in out.data.iter().enumerate() {
        if seen.insert(variant.clone()) {
            keep.push(i);
        }
    }
    out.data = keep.iter().map(|&i| out.data[i].clone()).collect();
    out.labels = keep.iter().map(|&i| out.labels[i]).collect();
    out.mutation_counts = keep.iter().map(|&i| out.mutation_counts[i]).collect();
}
