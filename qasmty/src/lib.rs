//! Expression type evaluator for an OpenQASM-style front end.
//!
//! Given an operation node whose operands already carry resolved types, the
//! [`Evaluator`] determines the single type the node evaluates to, or reports
//! why it is ill-typed. Promotion decisions follow a [`RankTable`] (a total
//! order over [`ExprType`]) and conversions are classified by an explicit rule
//! table in [`conversion`].
//!
//! ```
//! use qasmty::{BinaryOpNode, Evaluator, ExprType, OpType, SizedType};
//!
//! let evaluator = Evaluator::global();
//! let node = BinaryOpNode::new(OpType::Add, ExprType::Int, ExprType::Long);
//! assert_eq!(evaluator.evaluates_to(&node), Ok(SizedType::new(ExprType::Long)));
//! ```

pub mod conversion;
pub mod eval;
pub mod ops;
pub mod rank;
pub mod types;
pub mod utils;

pub use conversion::{ConversionContext, ConversionMethod, classify};
pub use eval::{
    BinaryOpNode, CastExpressionNode, EvalResult, Evaluable, Evaluator, ExpressionNode,
    ImplicitConversionNode, Operand, UnaryOpNode,
};
pub use ops::{Categories, OpClass, OpType};
pub use rank::{Rank, RankTable};
pub use types::{ExprType, Signedness, SizedType, TypeCategory, syntax::AstType};
pub use utils::{EvalError, RankTableError};
