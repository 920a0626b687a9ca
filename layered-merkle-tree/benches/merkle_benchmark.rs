#[macro_use]
extern crate criterion;

use criterion::{BenchmarkId, Criterion};
use layered_merkle_tree::{MerkleTree, OddLayerPolicy, Sha256, TreeOptions};
use rand::{Rng, seq::SliceRandom, thread_rng};

fn make_data(count: u32) -> Vec<[u8; 4]> {
    (0..count).map(u32::to_le_bytes).collect()
}

fn bench(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("tree build");
        let inputs = [1_000, 10_001, 100_000];
        for input in inputs.iter() {
            let data = make_data(*input);
            for policy in [OddLayerPolicy::DuplicateLast, OddLayerPolicy::PromoteLone] {
                group.bench_with_input(
                    BenchmarkId::new(format!("{:?}", policy), input),
                    &data,
                    |b, data| {
                        b.iter(|| {
                            MerkleTree::<Sha256>::from_data_with_options(
                                data,
                                TreeOptions::with_policy(policy),
                            )
                            .expect("build")
                        });
                    },
                );
            }
        }
    }

    c.bench_function("proof", |b| {
        let data = make_data(100_000);
        let tree = MerkleTree::<Sha256>::from_data(&data).expect("build");
        let indices: Vec<usize> = (0..data.len()).collect();
        let mut rng = thread_rng();
        b.iter(|| {
            tree.proof(*indices.choose(&mut rng).expect("non-empty"))
                .expect("proof")
        });
    });

    c.bench_function("verify", |b| {
        let data = make_data(100_000);
        let tree = MerkleTree::<Sha256>::from_data(&data).expect("build");
        let root = tree.root();
        let mut rng = thread_rng();
        let proofs: Vec<_> = (0..10_000)
            .map(|_| {
                let index = rng.gen_range(0..data.len());
                (index, tree.proof(index).expect("proof"))
            })
            .collect();
        let mut cycle = proofs.iter().cycle();
        b.iter(|| {
            let (index, proof) = cycle.next().expect("cycle is infinite");
            assert!(proof.verify::<Sha256>(&data[*index], &root).expect("verify"));
        });
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
