use qasmty::{BinaryOpNode, Evaluator, ExprType, OpType, RankTable, SizedType};
use strum::IntoEnumIterator;

/// Every (lhs, rhs) result of `op` over the full type space, in a fixed order.
fn table_of(evaluator: Evaluator<'_>, op: OpType) -> Vec<ExprType> {
    ExprType::iter()
        .flat_map(|lhs| ExprType::iter().map(move |rhs| (lhs, rhs)))
        .map(|(lhs, rhs)| evaluator.result_tag(&BinaryOpNode::new(op, lhs, rhs)))
        .collect()
}

#[test]
fn global_table_initializes_once_across_threads() {
    let tables: Vec<usize> = crossbeam::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|_| RankTable::global() as *const RankTable as usize))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread panicked"))
            .collect()
    })
    .expect("scope panicked");

    assert!(tables.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn shared_evaluator_gives_the_same_answers_on_every_thread() {
    let table = RankTable::new();
    let evaluator = Evaluator::new(&table);
    let ops = [OpType::Add, OpType::Mul, OpType::BitOr, OpType::Lt, OpType::Assign];
    let expected: Vec<Vec<ExprType>> = ops.iter().map(|op| table_of(evaluator, *op)).collect();

    crossbeam::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|_| {
                for (op, expected) in ops.iter().zip(&expected) {
                    assert_eq!(&table_of(evaluator, *op), expected, "{op:?}");
                }
                let mixed = BinaryOpNode::new(OpType::Add, ExprType::Int, ExprType::UInt);
                assert_eq!(
                    evaluator.evaluates_to(&mixed),
                    Ok(SizedType::new(ExprType::UInt))
                );
            });
        }
    })
    .expect("worker panicked");
}
