//! Syntax kinds
//!
//! The front end tags every AST node with an [`AstType`]. Most of those kinds
//! only describe syntax (statements, declarations, gate and calibration
//! constructs, pragmas, qualifiers) and never denote the type an expression
//! evaluates to. The narrow [`ExprType`] space is the subset that does; the
//! conversions at the bottom of this file are the only bridge between the two.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, FromRepr, IntoStaticStr};

use crate::types::ExprType;

/// Kind of an AST node as produced by the parser and semantic builder.
///
/// The discriminant is stable (`#[repr(u16)]`) so kinds handed over by an
/// external front end as raw integers can be lifted with [`AstType::from_repr`].
/// [`AstType::Undefined`] is the "no type" sentinel.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    IntoStaticStr,
    EnumIter,
    EnumCount,
    FromRepr,
)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u16)]
pub enum AstType {
    #[default]
    Undefined = 0,
    AddAssign,
    Alignas,
    Alignof,
    AndAssign,
    AndOp,
    Angle,
    AngleArray,
    AngleList,
    AngleMap,
    Annotation,
    AnnotationStmt,
    ArcCos,
    ArcSin,
    ArcTan,
    Argument,
    Array,
    ArraySubscript,
    ArraySubscriptList,
    Assignment,
    Atomic,
    Auto,
    Barrier,
    BinaryOp,
    BinaryOpStatement,
    Bitset,
    Block,
    Bool,
    BoolArray,
    BoundQubit,
    BoundQubitList,
    Box,
    BoxAs,
    BoxTo,
    BoxStatement,
    BracedInitializerList,
    Break,
    Cal,
    CaseStatement,
    Cast,
    BadCast,
    CBitArray,
    CBitNArray,
    CBitNodeMap,
    Cos,
    Char,
    CNotGate,
    CNotGateOpNode,
    Comparison,
    CommonDeclarator,
    ComplexExpression,
    Const,
    ControlExpression,
    Continue,
    CReg,
    CXGate,
    CXGateOpNode,
    CCXGate,
    CCXGateOpNode,
    ComplexList,
    CVRQualifier,
    Declaration,
    DeclarationError,
    DeclarationContext,
    DeclarationList,
    DecOp,
    DefaultStatement,
    Defcal,
    DefcalArg,
    DefcalCall,
    DefcalCallExpression,
    DefcalCallStatement,
    DefcalDeclaration,
    DefcalDelay,
    DefcalDelayCall,
    DefcalGrammar,
    DefcalGroup,
    DefcalGroupOpNode,
    DefcalMeasure,
    DefcalMeasureCall,
    DefcalParam,
    DefcalReset,
    DefcalResetCall,
    Delay,
    DelayStatement,
    DirectiveStatement,
    Dirty,
    DivAssign,
    DoWhileStatement,
    Double,
    DoWhileLoop,
    Duration,
    DurationArray,
    DurationOf,
    Ellipsis,
    Else,
    End,
    Enum,
    EnumConstant,
    EqOp,
    EulerAngle,
    Exp,
    Expression,
    ExpressionError,
    ExpressionList,
    ExpressionNodeList,
    Extern,
    Float,
    FloatArray,
    ForLoop,
    ForLoopRange,
    ForStatement,
    FpConstant,
    FuncArg,
    FuncParam,
    Function,
    FunctionCall,
    FunctionCallArgument,
    FunctionCallArgumentList,
    FunctionCallExpression,
    FunctionDeclaration,
    FunctionCallStatement,
    FunctionGroup,
    Gate,
    GateAngleParam,
    GateArg,
    GateCall,
    GateControl,
    GateControlStatement,
    GateDeclaration,
    GateGPhaseExpression,
    GateGPhaseStatement,
    GateInverse,
    GateInverseStatement,
    GateNegControl,
    GateNegControlStatement,
    GateParam,
    GatePower,
    GatePowerStatement,
    GateQubitParam,
    GateQualifier,
    GateOpNode,
    GateOpList,
    GateGenericOpNode,
    GateHOpNode,
    GateHOpList,
    GateQOpList,
    GateQOpNode,
    GateUOpNode,
    GateUOpList,
    Generic,
    GeOp,
    Global,
    GoTo,
    GPhaseExpression,
    GPhaseStatement,
    HadamardGate,
    Identifier,
    IdentifierList,
    IdentifierRef,
    IdentifierRefList,
    IfElse,
    IfStatement,
    IfStatementList,
    IfStatementTracker,
    InvalidArray,
    ElseIfStatement,
    ElseStatement,
    ImplicitConversion,
    BadImplicitConversion,
    Hash,
    Imaginary,
    IncOp,
    InitListElement,
    InitializerList,
    InitializerNodeList,
    Inline,
    InputModifier,
    Int,
    IntArray,
    UIntArray,
    IntegerConstant,
    IntegerSequence,
    InvalidCast,
    InverseExpression,
    Kernel,
    KernelArg,
    KernelCall,
    KernelDeclaration,
    KernelCallExpression,
    KernelCallStatement,
    KernelGroup,
    KernelParam,
    LambdaAngle,
    LeftAssign,
    LeftOp,
    Length,
    LengthArray,
    LengthOf,
    LeOp,
    Ln,
    Long,
    LongDouble,
    Let,
    LValueReference,
    Measure,
    ModAssign,
    MPComplex,
    MPComplexArray,
    MPComplexRep,
    MPCReal,
    MPCImag,
    MPDecimal,
    MPDecimalArray,
    MPInteger,
    MPUInteger,
    MPIntegerArray,
    MPUIntegerArray,
    MulAssign,
    NegOp,
    NeqOp,
    NoReturn,
    Opaque,
    OpaqueDeclaration,
    OpenQasmExpression,
    OpenQasmDecl,
    OpenQasmStatement,
    OpenPulseCalibration,
    OpenPulseCalibrationStmt,
    OpenPulseFrame,
    OpenPulseFrameArray,
    OpenPulsePlay,
    OpenPulsePlayStatement,
    OpenPulsePort,
    OpenPulsePortArray,
    OpenPulseWaveform,
    OpenPulseWaveformArray,
    OpTy,
    OpndTy,
    OrAssign,
    OrOp,
    OutputModifier,
    Parameter,
    ParameterList,
    PhiAngle,
    Pi,
    PiAngle,
    Pointer,
    Popcount,
    PopcountExpr,
    PopcountStmt,
    Pow,
    Pragma,
    PragmaStmt,
    PtrOp,
    QReg,
    Qubit,
    QubitArray,
    QubitNArray,
    QubitContainer,
    QubitContainerAlias,
    QubitMap,
    Qubits,
    Register,
    Reset,
    Restrict,
    Result,
    Return,
    RightAssign,
    RightOp,
    Rotl,
    Rotr,
    RotateExpr,
    RotateStatement,
    RValueReference,
    Short,
    Signed,
    SignedChar,
    SignedShort,
    SignedInt,
    SignedLong,
    Sin,
    Sizeof,
    Sqrt,
    Static,
    StaticAssert,
    Statement,
    StatementError,
    StatementList,
    StorageQualifier,
    Stretch,
    StretchStatement,
    StringLiteral,
    StringList,
    Struct,
    SubAssign,
    SwitchStatement,
    SyntaxError,
    Tan,
    TauAngle,
    ThetaAngle,
    ThreadLocal,
    TimeUnit,
    TranslationUnit,
    Typedef,
    TypedefName,
    TypeExpression,
    TypeQualifier,
    UGate,
    UInt,
    ULong,
    UnaryOp,
    UnaryOpStatement,
    UnboundQubit,
    UnboundQubitList,
    Union,
    Unsigned,
    UnsignedChar,
    UnsignedShort,
    UnsignedInt,
    UnsignedLong,
    Utf8,
    Value,
    VarDecl,
    Variable,
    Void,
    Volatile,
    WhileLoop,
    WhileStatement,
    XorAssign,
}

impl AstType {
    /// Returns the expression type this kind denotes, if any.
    #[inline]
    pub fn as_expr_type(self) -> Option<ExprType> {
        ExprType::try_from(self).ok()
    }

    /// Returns `true` if this kind denotes the type of an evaluated expression.
    #[inline]
    pub fn is_expr_type(self) -> bool {
        self.as_expr_type().is_some()
    }
}

macro_rules! shared_kinds {
    ($($kind:ident),* $(,)?) => {
        impl From<ExprType> for AstType {
            fn from(value: ExprType) -> Self {
                match value {
                    $(ExprType::$kind => AstType::$kind,)*
                }
            }
        }

        impl TryFrom<AstType> for ExprType {
            type Error = AstType;

            fn try_from(value: AstType) -> Result<Self, Self::Error> {
                match value {
                    $(AstType::$kind => Ok(ExprType::$kind),)*
                    other => Err(other),
                }
            }
        }
    };
}

shared_kinds! {
    Angle, AngleArray, BadCast, BadImplicitConversion, Bitset, Bool, BoolArray, CBitArray,
    Char, Double, Duration, DurationArray, ExpressionError, Float, FloatArray, Int,
    IntArray, Length, LengthArray, Long, LongDouble, MPComplex, MPComplexArray, MPDecimal,
    MPDecimalArray, MPInteger, MPIntegerArray, MPUInteger, MPUIntegerArray, Qubit,
    QubitArray, Short, UInt, UIntArray, ULong, UnsignedChar, UnsignedShort,
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn undefined_is_discriminant_zero() {
        assert_eq!(AstType::from_repr(0), Some(AstType::Undefined));
        assert_eq!(AstType::default(), AstType::Undefined);
        assert_eq!(AstType::from_repr(AstType::COUNT as u16), None);
    }

    #[test]
    fn every_expr_type_round_trips_through_its_syntax_kind() {
        for ty in ExprType::iter() {
            let kind = AstType::from(ty);
            assert_eq!(ExprType::try_from(kind), Ok(ty), "{kind} should narrow back to {ty:?}");
            assert_eq!(<&'static str>::from(kind), <&'static str>::from(ty));
        }
    }

    #[test]
    fn statements_and_qualifiers_are_not_expression_types() {
        for kind in [
            AstType::Undefined,
            AstType::IfStatement,
            AstType::GateDeclaration,
            AstType::Defcal,
            AstType::Pragma,
            AstType::SignedInt,
            AstType::UnsignedLong,
            AstType::BinaryOp,
        ] {
            assert!(!kind.is_expr_type(), "{kind} leaked into the expression space");
        }
    }

    #[test]
    fn narrow_space_is_a_strict_subset() {
        let narrowed = AstType::iter().filter(|kind| kind.is_expr_type()).count();
        assert_eq!(narrowed, ExprType::COUNT);
        assert!(narrowed < AstType::COUNT);
    }
}
