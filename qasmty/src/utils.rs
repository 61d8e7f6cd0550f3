use strum::EnumIs;
use thiserror::Error;

use crate::{
    ops::OpType,
    types::{ExprType, SizedType, syntax::AstType},
};

/// Reasons an expression is ill-typed.
///
/// These are values, not faults: the evaluator returns them so the caller can
/// attach [`EvalError::tag`] to the node and keep analysing sibling
/// expressions. Rendering them with source locations is left to the
/// diagnostic layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, Error)]
pub enum EvalError {
    /// An operand carries a syntax kind that is not an expression type, e.g. a
    /// statement that leaked into expression position.
    #[error("`{kind}` is not a valid expression type and cannot be used as an operand.")]
    UnrankedOperand { kind: AstType },

    /// An operand was already ill-typed. Its error tag is carried over unchanged.
    #[error("An operand is ill-typed (`{tag}`); the enclosing expression inherits the error.")]
    Poisoned { tag: ExprType },

    /// Explicit cast with no legal conversion method.
    #[error("Invalid cast from `{from}` to `{to}`.")]
    BadCast { from: SizedType, to: SizedType },

    /// Implicit conversion that would lose precision or sign, or that crosses
    /// incompatible categories.
    #[error("Cannot implicitly convert `{from}` to `{to}`.")]
    BadImplicitConversion { from: SizedType, to: SizedType },

    /// The operands of a binary operator cannot be brought to a common type.
    #[error("Operator `{op}` cannot be applied to operands of type `{lhs}` and `{rhs}`.")]
    IncompatibleOperands {
        op: OpType,
        lhs: SizedType,
        rhs: SizedType,
    },

    /// An operand's category is not accepted by the operator.
    #[error("Operator `{op}` cannot be applied to an operand of type `{operand}`.")]
    IncompatibleOperand { op: OpType, operand: SizedType },

    /// The operator has no typing rule for this node shape (wrong arity,
    /// structural operator, fold).
    #[error("Operator `{op}` ({op:?}) cannot be typed as a {shape} operation.")]
    UnsupportedOperator { op: OpType, shape: &'static str },
}

impl EvalError {
    /// Error tag to attach to the ill-typed node.
    pub fn tag(&self) -> ExprType {
        match self {
            EvalError::UnrankedOperand { .. } | EvalError::UnsupportedOperator { .. } => {
                ExprType::ExpressionError
            }
            EvalError::Poisoned { tag } => *tag,
            EvalError::BadCast { .. } => ExprType::BadCast,
            EvalError::BadImplicitConversion { .. }
            | EvalError::IncompatibleOperands { .. }
            | EvalError::IncompatibleOperand { .. } => ExprType::BadImplicitConversion,
        }
    }
}

/// A custom rank order is not a bijection over [`ExprType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, Error)]
pub enum RankTableError {
    #[error("Type `{ty:?}` appears twice in the rank order, at positions {first} and {second}.")]
    DuplicateType { ty: ExprType, first: u32, second: u32 },

    #[error("Type `{ty:?}` is missing from the rank order; every expression type must be ranked.")]
    MissingType { ty: ExprType },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_tags_are_distinct_per_failure_kind() {
        let int = SizedType::new(ExprType::Int);
        let bits = SizedType::with_bits(ExprType::Bitset, 4);

        assert_eq!(
            EvalError::BadCast { from: int, to: bits }.tag(),
            ExprType::BadCast
        );
        assert_eq!(
            EvalError::BadImplicitConversion { from: int, to: bits }.tag(),
            ExprType::BadImplicitConversion
        );
        assert_eq!(
            EvalError::UnrankedOperand {
                kind: AstType::ForStatement
            }
            .tag(),
            ExprType::ExpressionError
        );
        assert_eq!(
            EvalError::Poisoned {
                tag: ExprType::BadCast
            }
            .tag(),
            ExprType::BadCast
        );
    }

    #[test]
    fn messages_name_operator_and_operands() {
        let err = EvalError::IncompatibleOperands {
            op: OpType::Add,
            lhs: SizedType::new(ExprType::Qubit),
            rhs: SizedType::new(ExprType::Double),
        };
        assert_eq!(
            err.to_string(),
            "Operator `+` cannot be applied to operands of type `qubit` and `float64`."
        );

        let err = EvalError::BadCast {
            from: SizedType::new(ExprType::UnsignedShort),
            to: SizedType::with_bits(ExprType::Bitset, 4),
        };
        assert_eq!(err.to_string(), "Invalid cast from `uint16` to `bit[4]`.");
    }
}
