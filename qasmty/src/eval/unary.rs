use crate::{
    eval::{EvalResult, Evaluable, Evaluator, UnaryOpNode},
    ops::{OpClass, OpType},
    types::{ExprType, SizedType, TypeCategory},
    utils::EvalError,
};

impl Evaluable for UnaryOpNode {
    fn evaluate(&self, evaluator: &Evaluator<'_>) -> EvalResult {
        let operand = evaluator.resolve(self.operand)?;
        evaluator.unary(self.op, operand)
    }
}

impl Evaluator<'_> {
    /// Types `op operand` once the operand is resolved.
    ///
    /// Builtin functions force their result type: trigonometric and
    /// transcendental functions never return an integer, `popcount` always
    /// returns one.
    pub(crate) fn unary(&self, op: OpType, operand: SizedType) -> EvalResult {
        if !op.arity().is_unary() {
            return Err(EvalError::UnsupportedOperator { op, shape: "unary" });
        }
        if !op.operand_categories().admits(operand.category()) {
            return Err(EvalError::IncompatibleOperand { op, operand });
        }

        let double = SizedType::new(ExprType::Double);
        match op.class() {
            OpClass::LogicalNot => Ok(SizedType::BOOL),
            OpClass::BitNot | OpClass::Step | OpClass::Sign => Ok(operand),
            OpClass::Trigonometric => match operand.category() {
                TypeCategory::Integer | TypeCategory::Angle => Ok(double),
                _ => Ok(operand),
            },
            OpClass::InverseTrigonometric | OpClass::Transcendental => match operand.category() {
                TypeCategory::Integer => Ok(double),
                _ => Ok(operand),
            },
            OpClass::Popcount => Ok(SizedType::new(ExprType::UInt)),
            _ => Err(EvalError::UnsupportedOperator { op, shape: "unary" }),
        }
    }
}
