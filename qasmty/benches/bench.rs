use criterion::{Criterion, black_box, criterion_group, criterion_main};

use qasmty::{
    BinaryOpNode, CastExpressionNode, ConversionContext, Evaluator, ExprType, ExpressionNode,
    ImplicitConversionNode, OpType, Operand, RankTable, UnaryOpNode, classify,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use strum::IntoEnumIterator;

fn random_operand(rng: &mut impl Rng, types: &[ExprType]) -> Operand {
    let ty = types[rng.random_range(0..types.len())];
    Operand::sized(ty, rng.random_range(0..=64))
}

/// Mixed batch of nodes, seeded for determinism.
fn build_nodes(count: usize) -> Vec<ExpressionNode> {
    let mut rng = ChaCha20Rng::seed_from_u64(0x42);
    let types: Vec<ExprType> = ExprType::iter().collect();
    let ops: Vec<OpType> = OpType::iter().collect();

    (0..count)
        .map(|_| {
            let op = ops[rng.random_range(0..ops.len())];
            let lhs = random_operand(&mut rng, &types);
            let rhs = random_operand(&mut rng, &types);
            match rng.random_range(0..=3) {
                0 => BinaryOpNode::new(op, lhs, rhs).into(),
                1 => UnaryOpNode::new(op, lhs).into(),
                2 => CastExpressionNode::new(lhs, rhs).into(),
                _ => ImplicitConversionNode::new(lhs, rhs).into(),
            }
        })
        .collect()
}

fn bench_evaluate(c: &mut Criterion) {
    let evaluator = Evaluator::global();
    let simple = BinaryOpNode::new(OpType::Add, ExprType::Int, ExprType::Long);

    c.bench_function("evaluate_binary_simple", |b| {
        b.iter(|| black_box(evaluator.evaluates_to(black_box(&simple))));
    });

    let nodes = build_nodes(4096);
    c.bench_function("evaluate_mixed_batch", |b| {
        b.iter(|| {
            for node in &nodes {
                black_box(evaluator.evaluates_to(node)).ok();
            }
        });
    });

    c.bench_function("collect_errors_mixed_batch", |b| {
        b.iter(|| black_box(evaluator.collect_errors(&nodes).len()));
    });
}

fn bench_classify(c: &mut Criterion) {
    let evaluator = Evaluator::global();
    let pairs: Vec<_> = ExprType::iter()
        .flat_map(|from| ExprType::iter().map(move |to| (from, to)))
        .filter_map(|(from, to)| {
            let from = evaluator.resolve(from.into()).ok()?;
            let to = evaluator.resolve(to.into()).ok()?;
            Some((from, to))
        })
        .collect();

    c.bench_function("classify_all_pairs", |b| {
        b.iter(|| {
            for (from, to) in &pairs {
                black_box(classify(*from, *to, ConversionContext::Implicit));
            }
        });
    });
}

fn bench_rank_table(c: &mut Criterion) {
    c.bench_function("rank_table_build", |b| {
        b.iter(|| black_box(RankTable::new()));
    });
}

criterion_group!(benches, bench_evaluate, bench_classify, bench_rank_table);
criterion_main!(benches);
