use qasmty::{
    BinaryOpNode, CastExpressionNode, ConversionContext, ConversionMethod, EvalError, Evaluator,
    ExprType, ImplicitConversionNode, OpType, Operand, SizedType, UnaryOpNode,
};

#[test]
fn int32_plus_int64_widens_to_int64() {
    let evaluator = Evaluator::global();
    let node = BinaryOpNode::new(OpType::Add, ExprType::Int, ExprType::Long);

    assert_eq!(evaluator.evaluates_to(&node), Ok(SizedType::new(ExprType::Long)));
}

#[test]
fn int32_plus_uint32_resolves_to_uint32() {
    let evaluator = Evaluator::global();
    let node = BinaryOpNode::new(OpType::Add, ExprType::Int, ExprType::UInt);

    assert_eq!(evaluator.evaluates_to(&node), Ok(SizedType::new(ExprType::UInt)));
}

#[test]
fn float_and_bool_is_bool() {
    let evaluator = Evaluator::global();
    let node = BinaryOpNode::new(OpType::LogicalAnd, ExprType::Float, ExprType::Bool);

    assert_eq!(evaluator.evaluates_to(&node), Ok(SizedType::BOOL));
}

#[test]
fn uint16_cast_to_bit4_is_a_bad_cast() {
    let evaluator = Evaluator::global();
    let target = Operand::sized(ExprType::Bitset, 4);
    let node = CastExpressionNode::new(target, ExprType::UnsignedShort);

    let err = evaluator
        .evaluates_to(&node)
        .expect_err("uint16 -> bit[4] must not type-check");
    assert!(err.is_bad_cast());
    assert_eq!(err.tag(), ExprType::BadCast);
    assert_eq!(err.to_string(), "Invalid cast from `uint16` to `bit[4]`.");
}

#[test]
fn double_into_float_slot_is_a_bad_implicit_conversion() {
    let evaluator = Evaluator::global();
    let node = ImplicitConversionNode::new(ExprType::Float, ExprType::Double);

    assert_eq!(
        evaluator.evaluates_to(&node),
        Err(EvalError::BadImplicitConversion {
            from: SizedType::new(ExprType::Double),
            to: SizedType::new(ExprType::Float),
        })
    );
    assert_eq!(evaluator.result_tag(&node), ExprType::BadImplicitConversion);
}

#[test]
fn popcount_of_a_bit_register_is_independent_of_its_width() {
    let evaluator = Evaluator::global();

    let results: Vec<_> = [1, 3, 8, 17, 512]
        .into_iter()
        .map(|width| {
            evaluator.evaluates_to(&UnaryOpNode::new(
                OpType::Popcount,
                Operand::sized(ExprType::Bitset, width),
            ))
        })
        .collect();

    for result in results {
        let ty = result.expect("popcount of a bit register is well-typed");
        assert!(ty.ty.is_integral());
        assert_eq!(ty, SizedType::new(ExprType::UInt));
    }
}

#[test]
fn int64_to_int32_is_explicit_only() {
    let evaluator = Evaluator::global();

    let cast = CastExpressionNode::new(ExprType::Int, ExprType::Long);
    let implicit = ImplicitConversionNode::new(ExprType::Int, ExprType::Long);

    assert_eq!(evaluator.evaluates_to(&cast), Ok(SizedType::new(ExprType::Int)));
    assert_eq!(evaluator.result_tag(&implicit), ExprType::BadImplicitConversion);
    assert_eq!(
        evaluator.conversion_method(ExprType::Long, ExprType::Int, ConversionContext::Explicit),
        ConversionMethod::Truncation
    );
}

#[test]
fn qubit_plus_float_is_rejected() {
    let evaluator = Evaluator::global();
    let node = BinaryOpNode::new(OpType::Add, ExprType::Qubit, ExprType::Double);

    let err = evaluator.evaluates_to(&node).unwrap_err();
    assert_eq!(err.tag(), ExprType::BadImplicitConversion);
    assert_eq!(
        err.to_string(),
        "Operator `+` cannot be applied to operands of type `qubit` and `float64`."
    );
}
