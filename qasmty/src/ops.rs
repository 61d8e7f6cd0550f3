//! Operator kinds
//!
//! Every operator the front end can attach to a binary or unary operation node,
//! together with the classification the evaluator dispatches on and the set of
//! operand categories each operator accepts.
use bitflags::bitflags;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIs, EnumIter};

use crate::types::TypeCategory;

bitflags! {
    /// Set of [`TypeCategory`] values, used to describe which operands an
    /// operator accepts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Categories: u16 {
        const BOOLEAN = 1 << 0;
        const BITS = 1 << 1;
        const INTEGER = 1 << 2;
        const FLOATING = 1 << 3;
        const ANGLE = 1 << 4;
        const COMPLEX = 1 << 5;
        const TIMING = 1 << 6;
        const ARRAY = 1 << 7;
        const QUANTUM = 1 << 8;
        const ERROR = 1 << 9;

        /// Types on which the usual arithmetic is defined.
        const NUMERIC = Self::BOOLEAN.bits()
            | Self::INTEGER.bits()
            | Self::FLOATING.bits()
            | Self::ANGLE.bits()
            | Self::COMPLEX.bits();

        /// Integral storage: booleans, bit registers and integers.
        const INTEGRAL = Self::BOOLEAN.bits() | Self::BITS.bits() | Self::INTEGER.bits();

        /// Every classical scalar.
        ///
        /// Quantum containers never take part in classical expressions.
        const CLASSICAL_SCALAR = Self::NUMERIC.bits() | Self::BITS.bits() | Self::TIMING.bits();
    }
}

impl From<TypeCategory> for Categories {
    fn from(value: TypeCategory) -> Self {
        match value {
            TypeCategory::Boolean => Categories::BOOLEAN,
            TypeCategory::Bits => Categories::BITS,
            TypeCategory::Integer => Categories::INTEGER,
            TypeCategory::Floating => Categories::FLOATING,
            TypeCategory::Angle => Categories::ANGLE,
            TypeCategory::Complex => Categories::COMPLEX,
            TypeCategory::Timing => Categories::TIMING,
            TypeCategory::Array => Categories::ARRAY,
            TypeCategory::Quantum => Categories::QUANTUM,
            TypeCategory::Error => Categories::ERROR,
        }
    }
}

impl Categories {
    /// Returns `true` if `category` is part of this set.
    #[inline]
    pub fn admits(self, category: TypeCategory) -> bool {
        self.contains(category.into())
    }
}

/// Number of operands an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs)]
pub enum Arity {
    Unary,
    Binary,
    /// Structural operators (subscripts, folds, casts, ...) that are not typed
    /// through the unary/binary entry points.
    Other,
}

/// Typing class of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs)]
pub enum OpClass {
    /// `+ - * / % **`
    Arithmetic,
    /// `& | ^`
    Bitwise,
    /// `<< >> rotl rotr`
    Shift,
    /// `== != < > <= >=`
    Comparison,
    /// `&& ||`
    Logical,
    /// `=`
    Assignment,
    /// `+= -= ... >>=`
    CompoundAssignment,
    /// unary `+` and `-`
    Sign,
    /// `!`
    LogicalNot,
    /// `~`
    BitNot,
    /// `++ --`
    Step,
    /// `sin cos tan`
    Trigonometric,
    /// `arcsin arccos arctan`
    InverseTrigonometric,
    /// `exp ln sqrt`
    Transcendental,
    /// `popcount`
    Popcount,
    Structural,
}

/// Operator attached to an operation node.
///
/// `Display` prints the operator as it is spelled in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount, EnumIs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OpType {
    #[strum(to_string = "+")]
    Add,
    #[strum(to_string = "+=")]
    AddAssign,
    #[strum(to_string = "[]")]
    ArraySubscript,
    #[strum(to_string = "@")]
    Associate,
    #[strum(to_string = "-")]
    Sub,
    #[strum(to_string = "-=")]
    SubAssign,
    #[strum(to_string = "*")]
    Mul,
    #[strum(to_string = "*=")]
    MulAssign,
    #[strum(to_string = "/")]
    Div,
    #[strum(to_string = "/=")]
    DivAssign,
    #[strum(to_string = "%")]
    Mod,
    #[strum(to_string = "%=")]
    ModAssign,
    #[strum(to_string = "&&")]
    LogicalAnd,
    #[strum(to_string = "||")]
    LogicalOr,
    #[strum(to_string = "&")]
    BitAnd,
    #[strum(to_string = "&=")]
    BitAndAssign,
    #[strum(to_string = "|")]
    BitOr,
    #[strum(to_string = "|=")]
    BitOrAssign,
    #[strum(to_string = "cast")]
    Cast,
    #[strum(to_string = "implicit conversion")]
    ImplicitConversion,
    #[strum(to_string = "^")]
    Xor,
    #[strum(to_string = "^=")]
    XorAssign,
    #[strum(to_string = "=")]
    Assign,
    #[strum(to_string = "==")]
    Eq,
    #[strum(to_string = "!=")]
    Neq,
    #[strum(to_string = "<")]
    Lt,
    #[strum(to_string = ">")]
    Gt,
    #[strum(to_string = "<=")]
    Le,
    #[strum(to_string = ">=")]
    Ge,
    #[strum(to_string = "-")]
    Negate,
    #[strum(to_string = "+")]
    Positive,
    #[strum(to_string = "-")]
    Negative,
    #[strum(to_string = "!")]
    LogicalNot,
    #[strum(to_string = "~")]
    BitNot,
    #[strum(to_string = "++")]
    PreInc,
    #[strum(to_string = "--")]
    PreDec,
    #[strum(to_string = "++")]
    PostInc,
    #[strum(to_string = "--")]
    PostDec,
    #[strum(to_string = "**")]
    Pow,
    #[strum(to_string = "<<")]
    LeftShift,
    #[strum(to_string = "<<=")]
    LeftShiftAssign,
    #[strum(to_string = ">>")]
    RightShift,
    #[strum(to_string = ">>=")]
    RightShiftAssign,
    #[strum(to_string = "sin")]
    Sin,
    #[strum(to_string = "cos")]
    Cos,
    #[strum(to_string = "tan")]
    Tan,
    #[strum(to_string = "arcsin")]
    ArcSin,
    #[strum(to_string = "arccos")]
    ArcCos,
    #[strum(to_string = "arctan")]
    ArcTan,
    #[strum(to_string = "exp")]
    Exp,
    #[strum(to_string = "ln")]
    Ln,
    #[strum(to_string = "sqrt")]
    Sqrt,
    #[strum(to_string = "rotate")]
    Rotation,
    #[strum(to_string = "rotl")]
    Rotl,
    #[strum(to_string = "rotr")]
    Rotr,
    #[strum(to_string = "popcount")]
    Popcount,
    #[strum(to_string = "binary left fold")]
    BinaryLeftFold,
    #[strum(to_string = "binary right fold")]
    BinaryRightFold,
    #[strum(to_string = "unary left fold")]
    UnaryLeftFold,
    #[strum(to_string = "unary right fold")]
    UnaryRightFold,
}

impl OpType {
    /// Typing class of this operator.
    pub const fn class(self) -> OpClass {
        use OpType::*;

        match self {
            Add | Sub | Mul | Div | Mod | Pow => OpClass::Arithmetic,
            BitAnd | BitOr | Xor => OpClass::Bitwise,
            LeftShift | RightShift | Rotl | Rotr => OpClass::Shift,
            Eq | Neq | Lt | Gt | Le | Ge => OpClass::Comparison,
            LogicalAnd | LogicalOr => OpClass::Logical,
            Assign => OpClass::Assignment,
            AddAssign | SubAssign | MulAssign | DivAssign | ModAssign | BitAndAssign
            | BitOrAssign | XorAssign | LeftShiftAssign | RightShiftAssign => {
                OpClass::CompoundAssignment
            }
            Negate | Positive | Negative => OpClass::Sign,
            LogicalNot => OpClass::LogicalNot,
            BitNot => OpClass::BitNot,
            PreInc | PreDec | PostInc | PostDec => OpClass::Step,
            Sin | Cos | Tan => OpClass::Trigonometric,
            ArcSin | ArcCos | ArcTan => OpClass::InverseTrigonometric,
            Exp | Ln | Sqrt => OpClass::Transcendental,
            Popcount => OpClass::Popcount,
            ArraySubscript | Associate | Cast | ImplicitConversion | Rotation | BinaryLeftFold
            | BinaryRightFold | UnaryLeftFold | UnaryRightFold => OpClass::Structural,
        }
    }

    /// Number of operands this operator is typed with.
    pub const fn arity(self) -> Arity {
        match self.class() {
            OpClass::Arithmetic
            | OpClass::Bitwise
            | OpClass::Shift
            | OpClass::Comparison
            | OpClass::Logical
            | OpClass::Assignment
            | OpClass::CompoundAssignment => Arity::Binary,
            OpClass::Sign
            | OpClass::LogicalNot
            | OpClass::BitNot
            | OpClass::Step
            | OpClass::Trigonometric
            | OpClass::InverseTrigonometric
            | OpClass::Transcendental
            | OpClass::Popcount => Arity::Unary,
            OpClass::Structural => Arity::Other,
        }
    }

    /// Operator a compound assignment applies before storing, e.g. `+` for `+=`.
    pub const fn underlying(self) -> Option<OpType> {
        use OpType::*;

        match self {
            AddAssign => Some(Add),
            SubAssign => Some(Sub),
            MulAssign => Some(Mul),
            DivAssign => Some(Div),
            ModAssign => Some(Mod),
            BitAndAssign => Some(BitAnd),
            BitOrAssign => Some(BitOr),
            XorAssign => Some(Xor),
            LeftShiftAssign => Some(LeftShift),
            RightShiftAssign => Some(RightShift),
            _ => None,
        }
    }

    /// Operand categories this operator accepts.
    ///
    /// Compound assignments accept what their underlying operator accepts.
    pub fn operand_categories(self) -> Categories {
        use OpType::*;

        match self {
            Add | Sub | Mul | Div => Categories::NUMERIC | Categories::TIMING,
            Mod => Categories::BOOLEAN | Categories::INTEGER | Categories::FLOATING,
            Pow => Categories::BOOLEAN
                | Categories::INTEGER
                | Categories::FLOATING
                | Categories::COMPLEX,
            BitAnd | BitOr | Xor => Categories::INTEGRAL,
            LeftShift | RightShift | Rotl | Rotr => Categories::BITS | Categories::INTEGER,
            Eq | Neq => Categories::CLASSICAL_SCALAR,
            Lt | Gt | Le | Ge => Categories::CLASSICAL_SCALAR - Categories::COMPLEX,
            LogicalAnd | LogicalOr | LogicalNot => Categories::CLASSICAL_SCALAR | Categories::ARRAY,
            Assign => Categories::CLASSICAL_SCALAR | Categories::ARRAY,
            Negate | Positive | Negative => {
                Categories::INTEGER
                    | Categories::FLOATING
                    | Categories::ANGLE
                    | Categories::COMPLEX
                    | Categories::TIMING
            }
            BitNot => Categories::BITS | Categories::INTEGER,
            PreInc | PreDec | PostInc | PostDec => {
                Categories::BITS
                    | Categories::INTEGER
                    | Categories::FLOATING
                    | Categories::ANGLE
                    | Categories::TIMING
            }
            Sin | Cos | Tan => {
                Categories::INTEGER | Categories::FLOATING | Categories::ANGLE | Categories::COMPLEX
            }
            ArcSin | ArcCos | ArcTan => Categories::INTEGER | Categories::FLOATING,
            Exp | Ln | Sqrt => Categories::INTEGER | Categories::FLOATING | Categories::COMPLEX,
            Popcount => Categories::INTEGRAL,
            AddAssign | SubAssign | MulAssign | DivAssign | ModAssign | BitAndAssign
            | BitOrAssign | XorAssign | LeftShiftAssign | RightShiftAssign => self
                .underlying()
                .map(OpType::operand_categories)
                .unwrap_or(Categories::empty()),
            ArraySubscript | Associate | Cast | ImplicitConversion | Rotation | BinaryLeftFold
            | BinaryRightFold | UnaryLeftFold | UnaryRightFold => Categories::empty(),
        }
    }
}
