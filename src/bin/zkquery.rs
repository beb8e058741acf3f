use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use ark_bn254::{Bn254, Fr};
use ark_groth16::Groth16;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystem, OptimizationGoal};
use ark_serialize::{CanonicalSerialize, Compress};
use ark_snark::SNARK;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use zkquery::constants::{MAX_COLS, MAX_GROUPS, MAX_HANDLERS, MAX_OPS, MAX_ROWS};
use zkquery::program::{HandlerSpec, OpSpec, Program};
use zkquery::witness::{build_assignment, Assignment, Matrix};

#[derive(Parser, Debug)]
#[command(name = "zkquery", about = "Prove analytical queries over a private table")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Synthesize the constraint system and report its size.
    Compile,
    /// Full pipeline on the demo dataset: compile, witness, Groth16
    /// setup/prove/verify, and a markdown report.
    Benchmark(BenchmarkArgs),
}

#[derive(Args, Debug)]
struct BenchmarkArgs {
    /// Directory the report is written to.
    #[clap(long, default_value = "benchmark-runs")]
    out_dir: String,

    /// RNG seed for the Groth16 setup and prover.
    #[clap(long, default_value = "0")]
    seed: u64,
}

/// Active rows in the demo dataset.
const DEMO_NR: usize = 64;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Compile => compile(),
        Commands::Benchmark(args) => benchmark(args),
    }
}

fn compile() -> Result<()> {
    tracing::info!("compiling query circuit");
    let start = Instant::now();

    let assignment = demo_assignment()?;
    let cs = ConstraintSystem::<Fr>::new_ref();
    cs.set_optimization_goal(OptimizationGoal::Constraints);
    assignment
        .circuit
        .generate_constraints(cs.clone())
        .context("constraint synthesis failed")?;

    tracing::info!(
        constraints = cs.num_constraints(),
        instance = cs.num_instance_variables(),
        witness = cs.num_witness_variables(),
        elapsed = ?start.elapsed(),
        "circuit compiled"
    );
    Ok(())
}

fn benchmark(args: BenchmarkArgs) -> Result<()> {
    tracing::info!(
        max_handlers = MAX_HANDLERS,
        max_ops = MAX_OPS,
        max_rows = MAX_ROWS,
        max_cols = MAX_COLS,
        nr = DEMO_NR,
        "running benchmark"
    );

    let start_witness = Instant::now();
    let assignment = demo_assignment()?;
    let witness_time = start_witness.elapsed();
    for digest in &assignment.group_digests {
        tracing::info!(
            handler = digest.handler,
            op = digest.op,
            root = %digest.root,
            "grouped-result publication digest"
        );
    }

    let start_compile = Instant::now();
    let cs = ConstraintSystem::<Fr>::new_ref();
    cs.set_optimization_goal(OptimizationGoal::Constraints);
    assignment
        .circuit
        .clone()
        .generate_constraints(cs.clone())
        .context("constraint synthesis failed")?;
    let compile_time = start_compile.elapsed();
    let num_constraints = cs.num_constraints();
    tracing::info!(constraints = num_constraints, elapsed = ?compile_time, "compiled");

    let mut rng = StdRng::seed_from_u64(args.seed);

    let start_setup = Instant::now();
    let (pk, vk) = Groth16::<Bn254>::circuit_specific_setup(assignment.circuit.clone(), &mut rng)
        .context("Groth16 setup failed")?;
    let setup_time = start_setup.elapsed();
    tracing::info!(elapsed = ?setup_time, "setup complete");

    let start_prove = Instant::now();
    let proof = Groth16::<Bn254>::prove(&pk, assignment.circuit.clone(), &mut rng)
        .context("Groth16 proving failed")?;
    let prove_time = start_prove.elapsed();
    let proof_size = proof.serialized_size(Compress::Yes);
    tracing::info!(elapsed = ?prove_time, bytes = proof_size, "proof generated");

    let start_verify = Instant::now();
    let public_inputs = assignment.circuit.public_inputs();
    let valid = Groth16::<Bn254>::verify(&vk, &public_inputs, &proof)
        .context("Groth16 verification errored")?;
    anyhow::ensure!(valid, "proof did not verify");
    let verify_time = start_verify.elapsed();
    tracing::info!(elapsed = ?verify_time, "proof verified");

    let report = format!(
        "# zkquery benchmark\n\n\
         > Generated: {}\n\n\
         ## Configuration\n\n\
         | Parameter | Value |\n|:---|:---|\n\
         | MAX_HANDLERS | {MAX_HANDLERS} |\n\
         | MAX_OPS | {MAX_OPS} |\n\
         | MAX_ROWS | {MAX_ROWS} |\n\
         | MAX_COLS | {MAX_COLS} |\n\
         | MAX_GROUPS | {MAX_GROUPS} |\n\
         | NR | {DEMO_NR} |\n\n\
         ## Results\n\n\
         | Metric | Value |\n|:---|:---|\n\
         | Constraints | {num_constraints} |\n\
         | Proof size | {proof_size} bytes |\n\
         | Witness | {witness_time:?} |\n\
         | Compile | {compile_time:?} |\n\
         | Setup | {setup_time:?} |\n\
         | Prove | {prove_time:?} |\n\
         | Verify | {verify_time:?} |\n",
        Local::now().format("%Y-%m-%d %H:%M"),
    );

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir))?;
    let path = format!("{}/REPORT.md", args.out_dir);
    fs::write(&path, report).with_context(|| format!("writing {path}"))?;
    tracing::info!(path = %path, "report saved");

    Ok(())
}

/// The original demo workload: handler 0 commits and counts a 4-column
/// window; handler 1 sums column 1 and groups it by column 2.
fn demo_assignment() -> Result<Assignment> {
    let mut matrix = Matrix::new();
    for row in 0..DEMO_NR {
        matrix.set(0, row, Fr::from(row as u64 + 1));
        matrix.set(1, row, Fr::from((row % 10) as u64 + 1));
        matrix.set(2, row, Fr::from((row % 5) as u64 + 1));
        matrix.set(3, row, Fr::from(row as u64 * 2));
    }

    let program = Program::new(vec![
        HandlerSpec::new(0, 4)
            .with_op(OpSpec::merkle16())
            .with_op(OpSpec::count()),
        HandlerSpec::new(0, 8)
            .with_op(OpSpec::sum_col(1))
            .with_op(OpSpec::sum_col_by(1, 2)),
    ]);

    build_assignment(&matrix, DEMO_NR, &program).context("building demo assignment")
}
