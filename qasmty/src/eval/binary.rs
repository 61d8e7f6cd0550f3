use crate::{
    conversion::{ConversionContext, classify},
    eval::{BinaryOpNode, EvalResult, Evaluable, Evaluator},
    ops::{OpClass, OpType},
    types::{ExprType, Signedness, SizedType, TypeCategory},
    utils::EvalError,
};

impl Evaluable for BinaryOpNode {
    fn evaluate(&self, evaluator: &Evaluator<'_>) -> EvalResult {
        let (lhs, rhs) = evaluator.resolve_pair(self.lhs, self.rhs)?;
        evaluator.binary(self.op, lhs, rhs)
    }
}

impl Evaluator<'_> {
    /// Types `lhs op rhs` once both operands are resolved.
    pub(crate) fn binary(&self, op: OpType, lhs: SizedType, rhs: SizedType) -> EvalResult {
        if !op.arity().is_binary() {
            return Err(EvalError::UnsupportedOperator { op, shape: "binary" });
        }

        let accepted = op.operand_categories();
        if !accepted.admits(lhs.category()) || !accepted.admits(rhs.category()) {
            return Err(EvalError::IncompatibleOperands { op, lhs, rhs });
        }

        match op.class() {
            OpClass::Comparison | OpClass::Logical => {
                self.common_type(op, lhs, rhs)?;
                Ok(SizedType::BOOL)
            }
            OpClass::Arithmetic | OpClass::Bitwise | OpClass::Shift => {
                match Self::scaled(op, lhs, rhs) {
                    Some(ty) => Ok(ty),
                    None => self.common_type(op, lhs, rhs),
                }
            }
            OpClass::Assignment => Self::assigned(lhs, rhs),
            OpClass::CompoundAssignment => {
                let Some(inner) = op.underlying() else {
                    return Err(EvalError::UnsupportedOperator { op, shape: "binary" });
                };
                let value = self.binary(inner, lhs, rhs)?;
                Self::assigned(lhs, value)
            }
            _ => Err(EvalError::UnsupportedOperator { op, shape: "binary" }),
        }
    }

    /// Type both operands are brought to before the operation.
    ///
    /// Same tag: that tag at the wider width. Integers of equal width and
    /// different signedness: the unsigned one. Otherwise the operand of higher
    /// rank, provided the other converts to it implicitly; failing that the
    /// lower one, if the conversion works the other way round.
    fn common_type(&self, op: OpType, lhs: SizedType, rhs: SizedType) -> EvalResult {
        if lhs.ty == rhs.ty {
            return Ok(SizedType {
                ty: lhs.ty,
                bits: lhs.bits.max(rhs.bits),
            });
        }

        if lhs.ty.is_integral()
            && rhs.ty.is_integral()
            && lhs.bits == rhs.bits
            && lhs.signedness() != rhs.signedness()
        {
            return Ok(if lhs.signedness() == Some(Signedness::Unsigned) {
                lhs
            } else {
                rhs
            });
        }

        let (low, high) = if self.ranks.rank_of_expr(lhs.ty) < self.ranks.rank_of_expr(rhs.ty) {
            (lhs, rhs)
        } else {
            (rhs, lhs)
        };

        if classify(low, high, ConversionContext::Implicit).is_legal() {
            Ok(high)
        } else if classify(high, low, ConversionContext::Implicit).is_legal() {
            Ok(low)
        } else {
            Err(EvalError::IncompatibleOperands { op, lhs, rhs })
        }
    }

    /// Scaling of durations and angles by plain numbers, which does not go
    /// through a common type.
    fn scaled(op: OpType, lhs: SizedType, rhs: SizedType) -> Option<SizedType> {
        use TypeCategory::*;

        let number = |ty: SizedType| matches!(ty.category(), Integer | Floating);
        let unsigned =
            |ty: SizedType| ty.ty.is_integral() && ty.signedness() == Some(Signedness::Unsigned);

        match (op, lhs.category(), rhs.category()) {
            (OpType::Mul | OpType::Div, Timing, _) if number(rhs) => Some(lhs),
            (OpType::Mul, _, Timing) if number(lhs) => Some(rhs),
            (OpType::Div, Timing, Timing) => Some(SizedType::new(ExprType::Double)),

            (OpType::Mul | OpType::Div, Angle, _) if unsigned(rhs) => Some(lhs),
            (OpType::Mul, _, Angle) if unsigned(lhs) => Some(rhs),
            (OpType::Div, Angle, Angle) => Some(SizedType::with_bits(
                ExprType::MPUInteger,
                lhs.bits.max(rhs.bits),
            )),
            _ => None,
        }
    }

    /// Stores `value` into a slot of type `slot`.
    fn assigned(slot: SizedType, value: SizedType) -> EvalResult {
        if classify(value, slot, ConversionContext::Implicit).is_legal() {
            Ok(slot)
        } else {
            Err(EvalError::BadImplicitConversion {
                from: value,
                to: slot,
            })
        }
    }
}
