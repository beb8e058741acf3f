use ark_bn254::Fr;
use ark_ff::UniformRand;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystem};
use ark_std::rand::{rngs::StdRng, SeedableRng};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use zkquery::constants::TOTAL_ITEMS;
use zkquery::program::{HandlerSpec, OpSpec, Program};
use zkquery::witness::{build_assignment, Matrix};
use zkquery::{evaluator, poseidon2};

fn bench_hasher(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);
    let pair: [Fr; 2] = core::array::from_fn(|_| Fr::rand(&mut rng));
    let chunk: [Fr; 16] = core::array::from_fn(|_| Fr::rand(&mut rng));
    let leaves: Vec<Fr> = (0..TOTAL_ITEMS).map(|_| Fr::rand(&mut rng)).collect();

    let mut group = c.benchmark_group("poseidon2");
    group.bench_function("permutation", |bench| {
        bench.iter(|| {
            let mut state = black_box(pair);
            poseidon2::permute(&mut state);
            black_box(state)
        })
    });
    group.bench_function("hash_two", |bench| {
        bench.iter(|| poseidon2::hash_two(black_box(pair[0]), black_box(pair[1])))
    });
    group.bench_function("hash16", |bench| {
        bench.iter(|| poseidon2::hash16(black_box(&chunk)))
    });
    group.bench_function("merkle16_root_4096", |bench| {
        bench.iter(|| evaluator::merkle16_root(black_box(&leaves)))
    });
    group.finish();
}

fn bench_synthesis(c: &mut Criterion) {
    let mut matrix = Matrix::new();
    for row in 0..64 {
        matrix.set(1, row, Fr::from((row % 10) as u64 + 1));
        matrix.set(2, row, Fr::from((row % 5) as u64 + 1));
    }
    let program = Program::new(vec![HandlerSpec::new(0, 4)
        .with_op(OpSpec::count())
        .with_op(OpSpec::sum_col_by(1, 2))]);
    let assignment = build_assignment(&matrix, 64, &program).unwrap();

    let mut group = c.benchmark_group("synthesis");
    group.sample_size(10);
    group.bench_function("query_circuit", |bench| {
        bench.iter(|| {
            let cs = ConstraintSystem::<Fr>::new_ref();
            assignment
                .circuit
                .clone()
                .generate_constraints(cs.clone())
                .unwrap();
            black_box(cs.num_constraints())
        })
    });
    group.finish();
}

criterion_group!(benches, bench_hasher, bench_synthesis);
criterion_main!(benches);
