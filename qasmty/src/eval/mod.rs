//! Expression evaluator
//!
//! Computes the type an operation node evaluates to, one operator level at a
//! time. Operand subtrees are expected to carry their resolved syntax kind
//! already; the evaluator reads them and never mutates anything.
//!
//! Every entry point returns an [`EvalResult`]. Ill-typed nodes are reported
//! as [`EvalError`] values and [`EvalError::tag`] gives the error tag to attach
//! to the node, so analysis of sibling expressions can carry on.
use std::num::NonZeroU32;

use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumIs, EnumTryAs};

use crate::{
    conversion::{ConversionContext, ConversionMethod, classify},
    ops::OpType,
    rank::RankTable,
    types::{ExprType, SizedType, syntax::AstType},
    utils::EvalError,
};

mod binary;
mod cast;
mod unary;

/// Outcome of evaluating one node.
pub type EvalResult = Result<SizedType, EvalError>;

/// Resolved type of an operand subtree, as attached by the front end.
///
/// `kind` is the syntax kind of the subtree's type. It is normally one of the
/// kinds mirrored by [`ExprType`], but anything can leak in from a broken
/// front end and is rejected as an unranked operand. `bits` is the declared
/// width, if the declaration had one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Operand {
    pub kind: AstType,
    pub bits: Option<NonZeroU32>,
}

impl Operand {
    /// Operand of the given kind, without a declared width.
    #[inline]
    pub const fn new(kind: AstType) -> Self {
        Self { kind, bits: None }
    }

    /// Operand of a parameterised type declared with `bits` bits, e.g. `bit[4]`.
    ///
    /// A width of zero is treated as undeclared.
    #[inline]
    pub fn sized(ty: ExprType, bits: u32) -> Self {
        Self {
            kind: ty.into(),
            bits: NonZeroU32::new(bits),
        }
    }
}

impl From<AstType> for Operand {
    fn from(value: AstType) -> Self {
        Operand::new(value)
    }
}

impl From<ExprType> for Operand {
    fn from(value: ExprType) -> Self {
        Operand::new(value.into())
    }
}

impl From<SizedType> for Operand {
    fn from(value: SizedType) -> Self {
        Operand::sized(value.ty, value.bits)
    }
}

/// Binary operation `lhs op rhs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinaryOpNode {
    pub op: OpType,
    pub lhs: Operand,
    pub rhs: Operand,
}

impl BinaryOpNode {
    pub fn new(op: OpType, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
        Self {
            op,
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }
}

/// Unary operation or builtin function applied to one operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryOpNode {
    pub op: OpType,
    pub operand: Operand,
}

impl UnaryOpNode {
    pub fn new(op: OpType, operand: impl Into<Operand>) -> Self {
        Self {
            op,
            operand: operand.into(),
        }
    }
}

/// Explicit cast `target(source)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastExpressionNode {
    pub target: Operand,
    pub source: Operand,
}

impl CastExpressionNode {
    pub fn new(target: impl Into<Operand>, source: impl Into<Operand>) -> Self {
        Self {
            target: target.into(),
            source: source.into(),
        }
    }
}

/// Conversion inserted by the front end, e.g. when a value is stored into a
/// slot of a different type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImplicitConversionNode {
    pub target: Operand,
    pub source: Operand,
}

impl ImplicitConversionNode {
    pub fn new(target: impl Into<Operand>, source: impl Into<Operand>) -> Self {
        Self {
            target: target.into(),
            source: source.into(),
        }
    }
}

/// A node the evaluator knows how to type.
pub trait Evaluable {
    /// Computes the type of this node. Prefer [`Evaluator::evaluates_to`],
    /// which also logs the outcome.
    fn evaluate(&self, evaluator: &Evaluator<'_>) -> EvalResult;
}

/// Any expression node shape the evaluator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs, EnumTryAs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExpressionNode {
    Binary(BinaryOpNode),
    Unary(UnaryOpNode),
    Cast(CastExpressionNode),
    ImplicitConversion(ImplicitConversionNode),
}

impl Evaluable for ExpressionNode {
    fn evaluate(&self, evaluator: &Evaluator<'_>) -> EvalResult {
        match self {
            ExpressionNode::Binary(node) => node.evaluate(evaluator),
            ExpressionNode::Unary(node) => node.evaluate(evaluator),
            ExpressionNode::Cast(node) => node.evaluate(evaluator),
            ExpressionNode::ImplicitConversion(node) => node.evaluate(evaluator),
        }
    }
}

macro_rules! define_expression_from {
    ($typ:ty, $variant:ident) => {
        impl From<$typ> for ExpressionNode {
            fn from(node: $typ) -> Self {
                ExpressionNode::$variant(node)
            }
        }
    };
}

define_expression_from!(BinaryOpNode, Binary);
define_expression_from!(UnaryOpNode, Unary);
define_expression_from!(CastExpressionNode, Cast);
define_expression_from!(ImplicitConversionNode, ImplicitConversion);

/// Stateless evaluator over a [`RankTable`].
///
/// Cheap to copy and safe to share between threads: it only holds a shared
/// reference to an immutable table.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'t> {
    ranks: &'t RankTable,
}

impl Evaluator<'static> {
    /// Evaluator over the process-wide standard rank table.
    pub fn global() -> Self {
        Self::new(RankTable::global())
    }
}

impl Default for Evaluator<'static> {
    fn default() -> Self {
        Self::global()
    }
}

impl<'t> Evaluator<'t> {
    pub const fn new(ranks: &'t RankTable) -> Self {
        Self { ranks }
    }

    /// Rank table this evaluator orders operands with.
    #[inline]
    pub fn ranks(&self) -> &'t RankTable {
        self.ranks
    }

    /// Computes the type `node` evaluates to.
    pub fn evaluates_to<N: Evaluable + ?Sized>(&self, node: &N) -> EvalResult {
        let result = node.evaluate(self);
        match &result {
            Ok(ty) => trace!("Expression evaluates to `{ty}`."),
            Err(err) => debug!("Ill-typed expression ({}): {err}", err.tag()),
        }
        result
    }

    /// Tag to attach to `node`: its type, or the error tag when it is ill-typed.
    pub fn result_tag<N: Evaluable + ?Sized>(&self, node: &N) -> ExprType {
        match self.evaluates_to(node) {
            Ok(ty) => ty.ty,
            Err(err) => err.tag(),
        }
    }

    /// Method used to convert `source` into `target`, for lowering.
    ///
    /// Operands that are ill-typed or not expression types yield
    /// [`ConversionMethod::Unknown`].
    pub fn conversion_method(
        &self,
        source: impl Into<Operand>,
        target: impl Into<Operand>,
        context: ConversionContext,
    ) -> ConversionMethod {
        match self.resolve_pair(source.into(), target.into()) {
            Ok((source, target)) => classify(source, target, context),
            Err(_) => ConversionMethod::Unknown,
        }
    }

    /// Evaluates every node and returns the failures with the index of the
    /// offending node.
    ///
    /// Failures inherited from an ill-typed operand are skipped: they were
    /// reported where the error originated.
    pub fn collect_errors<'n, N, I>(&self, nodes: I) -> Vec<(usize, EvalError)>
    where
        N: Evaluable + 'n,
        I: IntoIterator<Item = &'n N>,
    {
        nodes
            .into_iter()
            .enumerate()
            .filter_map(|(index, node)| match self.evaluates_to(node) {
                Err(err) if !err.is_poisoned() => Some((index, err)),
                _ => None,
            })
            .collect()
    }

    /// Resolves one operand against the rank table.
    ///
    /// Error tags take precedence over everything else and are propagated as
    /// [`EvalError::Poisoned`]. Kinds without a rank are
    /// [`EvalError::UnrankedOperand`].
    pub fn resolve(&self, operand: Operand) -> EvalResult {
        let rank = self.ranks.rank_of(operand.kind);
        let Some(ty) = self.ranks.expr_of(rank) else {
            return Err(EvalError::UnrankedOperand { kind: operand.kind });
        };
        if ty.is_error() {
            return Err(EvalError::Poisoned { tag: ty });
        }

        Ok(SizedType {
            ty,
            bits: ty.bits(operand.bits),
        })
    }

    /// Resolves two operands. An error tag on either side wins over an
    /// unranked operand on the other; of two error tags the higher-ranked one
    /// is kept, whatever the operand order.
    fn resolve_pair(
        &self,
        first: Operand,
        second: Operand,
    ) -> Result<(SizedType, SizedType), EvalError> {
        match (self.resolve(first), self.resolve(second)) {
            (Ok(first), Ok(second)) => Ok((first, second)),
            (Err(EvalError::Poisoned { tag: a }), Err(EvalError::Poisoned { tag: b })) => {
                Err(EvalError::Poisoned {
                    tag: self.ranks.wider(a, b),
                })
            }
            (Err(err @ EvalError::Poisoned { .. }), _)
            | (_, Err(err @ EvalError::Poisoned { .. })) => Err(err),
            (Err(err), _) | (_, Err(err)) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operands_resolve_to_their_declared_width() {
        let evaluator = Evaluator::global();
        assert_eq!(
            evaluator.resolve(Operand::sized(ExprType::Bitset, 4)),
            Ok(SizedType::with_bits(ExprType::Bitset, 4))
        );
        assert_eq!(
            evaluator.resolve(Operand::sized(ExprType::Int, 8)),
            Ok(SizedType::new(ExprType::Int))
        );
        assert_eq!(
            evaluator.resolve(Operand::new(AstType::Angle)),
            Ok(SizedType::with_bits(ExprType::Angle, 64))
        );
    }

    #[test]
    fn error_tags_win_over_unranked_kinds() {
        let evaluator = Evaluator::global();
        let node = BinaryOpNode::new(
            OpType::Add,
            AstType::IfStatement,
            ExprType::BadImplicitConversion,
        );
        assert_eq!(
            evaluator.evaluates_to(&node),
            Err(EvalError::Poisoned {
                tag: ExprType::BadImplicitConversion
            })
        );

        let node = BinaryOpNode::new(OpType::Add, AstType::IfStatement, ExprType::Int);
        assert_eq!(
            evaluator.evaluates_to(&node),
            Err(EvalError::UnrankedOperand {
                kind: AstType::IfStatement
            })
        );
        assert_eq!(evaluator.result_tag(&node), ExprType::ExpressionError);
    }

    #[test]
    fn expression_node_dispatches_to_each_shape() {
        let evaluator = Evaluator::global();
        let nodes: [ExpressionNode; 4] = [
            BinaryOpNode::new(OpType::Add, ExprType::Int, ExprType::Long).into(),
            UnaryOpNode::new(OpType::LogicalNot, ExprType::Double).into(),
            CastExpressionNode::new(ExprType::Int, ExprType::Double).into(),
            ImplicitConversionNode::new(ExprType::Double, ExprType::Int).into(),
        ];
        let tags: Vec<ExprType> = nodes.iter().map(|n| evaluator.result_tag(n)).collect();
        assert_eq!(
            tags,
            [ExprType::Long, ExprType::Bool, ExprType::Int, ExprType::Double]
        );
        assert!(nodes[0].is_binary());
        assert!(nodes[3].try_as_implicit_conversion_ref().is_some());
    }

    #[test]
    fn conversion_method_is_unknown_for_bad_operands() {
        let evaluator = Evaluator::global();
        assert_eq!(
            evaluator.conversion_method(
                Operand::sized(ExprType::Bitset, 16),
                ExprType::UnsignedShort,
                ConversionContext::Implicit
            ),
            ConversionMethod::Bitcast
        );
        assert_eq!(
            evaluator.conversion_method(
                AstType::GateDeclaration,
                ExprType::Int,
                ConversionContext::Explicit
            ),
            ConversionMethod::Unknown
        );
        assert_eq!(
            evaluator.conversion_method(
                ExprType::BadCast,
                ExprType::Int,
                ConversionContext::Explicit
            ),
            ConversionMethod::Unknown
        );
    }

    #[test]
    fn collected_errors_skip_inherited_failures() {
        let evaluator = Evaluator::global();
        let nodes = [
            ExpressionNode::from(BinaryOpNode::new(OpType::Add, ExprType::Int, ExprType::Long)),
            CastExpressionNode::new(Operand::sized(ExprType::Bitset, 4), ExprType::UnsignedShort)
                .into(),
            BinaryOpNode::new(OpType::Add, ExprType::BadCast, ExprType::Int).into(),
            ImplicitConversionNode::new(ExprType::Float, ExprType::Double).into(),
        ];

        let errors = evaluator.collect_errors(&nodes);
        let indices: Vec<usize> = errors.iter().map(|(index, _)| *index).collect();
        assert_eq!(indices, [1, 3]);
        assert!(errors[0].1.is_bad_cast());
        assert!(errors[1].1.is_bad_implicit_conversion());
    }
}
