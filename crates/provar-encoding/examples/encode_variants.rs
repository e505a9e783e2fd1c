//! Minimal walkthrough: build the contexts for a toy wild type, augment a
//! tiny variant table and stream one epoch of encoded batches.
//!
//! Run with `RUST_LOG=debug cargo run --example encode_variants`.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use provar_encoding::augment::{augment_rounds, AugmentPolicy};
use provar_encoding::generator::{BatchConfig, BatchGenerator};
use provar_encoding::structure::StructuralContext;
use provar_encoding::wildtype::WildTypeContext;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let wt_seq = "SAVDLTKWER";
    let n = wt_seq.len();

    // stand-in for the structure parser: everything off-diagonal interacts
    let structure = StructuralContext::new(
        Array2::from_elem((n, n), 7.5),
        Array2::from_elem((n, n), 0.6),
        Array2::from_shape_fn((n, n), |(i, j)| i != j),
        20.0,
    )?;
    let wild_type = WildTypeContext::new(wt_seq, None)?;
    structure.check_sequence_len(wild_type.len())?;

    let data = vec![
        "S1A".to_string(),
        "D4T".to_string(),
        "L5R".to_string(),
        "K7E,W8F".to_string(),
    ];
    let labels = vec![0.31, -1.2, 0.8, -0.05];
    let counts = vec![1u32, 1, 1, 2];

    let mut rng = StdRng::seed_from_u64(42);
    let policy = AugmentPolicy {
        cap: 64,
        ..AugmentPolicy::default()
    };
    let (train_data, train_labels, _) = augment_rounds(&data, &labels, &counts, &policy, &mut rng)?;
    println!("training set after augmentation: {} variants", train_data.len());

    let config = BatchConfig {
        batch_size: 8,
        first_ind: 1,
        shuffle: true,
    };
    let generator = BatchGenerator::new(train_data, Some(train_labels), config, &wild_type, &structure)?;

    let order = generator.epoch_order(&mut rng);
    for idx in 0..generator.num_batches() {
        let batch = generator.batch(&order, idx)?;
        println!(
            "batch {}: features {:?}, labels {}",
            idx,
            batch.features.dim(),
            batch.labels.as_ref().map_or(0, |l| l.len())
        );
    }

    Ok(())
}
