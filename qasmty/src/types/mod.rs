//! Types module
//!
//! Canonical representation of the types an expression can evaluate to. The
//! module is split in two layers:
//!
//! - [`ExprType`]: the closed set of expression types the evaluator reasons
//!   about (numeric scalars, bit and qubit containers, angles, complex numbers,
//!   durations, classical arrays, and the error tags).
//! - [`syntax::AstType`]: the much larger set of syntax kinds of the front end.
//!   Only the kinds mirrored by [`ExprType`] can be narrowed into it.
//!
//! [`SizedType`] pairs a tag with the width the node was declared with. Widths
//! matter for bit reinterpretation (`bit[16]` ↔ `uint[16]`) and for
//! promotion/truncation between parameterised types (`int[8]` → `int[32]`).
use std::num::NonZeroU32;

use enum_map::Enum;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIs, EnumIter, IntoStaticStr};

pub mod syntax;

/// Type an expression evaluates to.
///
/// Declaration order is alphabetical and carries no meaning. Promotion order
/// lives in [`crate::rank::RankTable`], which is why this enum does not
/// implement `Ord`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, EnumIter, EnumCount, EnumIs, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExprType {
    /// Fixed-point angle, `angle[n]`.
    Angle,
    AngleArray,
    /// Error tag: explicit cast with no legal conversion.
    BadCast,
    /// Error tag: implicit conversion (or operand combination) that is not allowed.
    BadImplicitConversion,
    /// Classical bit register, `bit[n]`.
    Bitset,
    Bool,
    BoolArray,
    CBitArray,
    /// 8-bit signed integer.
    Char,
    /// IEEE-754 binary64.
    Double,
    Duration,
    DurationArray,
    /// Generic error tag, used when an operand is not a valid expression type.
    ExpressionError,
    /// IEEE-754 binary32.
    Float,
    FloatArray,
    /// 32-bit signed integer.
    Int,
    IntArray,
    Length,
    LengthArray,
    /// 64-bit signed integer.
    Long,
    /// IEEE-754 binary128.
    LongDouble,
    /// Complex number with `float[n]` components, `complex[float[n]]`.
    MPComplex,
    MPComplexArray,
    /// Multi-precision floating point, `float[n]`.
    MPDecimal,
    MPDecimalArray,
    /// Multi-precision signed integer, `int[n]`.
    MPInteger,
    MPIntegerArray,
    /// Multi-precision unsigned integer, `uint[n]`.
    MPUInteger,
    MPUIntegerArray,
    Qubit,
    /// Qubit register, `qubit[n]`.
    QubitArray,
    /// 16-bit signed integer.
    Short,
    /// 32-bit unsigned integer.
    UInt,
    UIntArray,
    /// 64-bit unsigned integer.
    ULong,
    /// 8-bit unsigned integer.
    UnsignedChar,
    /// 16-bit unsigned integer.
    UnsignedShort,
}

/// Coarse category of an [`ExprType`], used by the conversion rules and by the
/// operand checks of each operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumIs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeCategory {
    Boolean,
    Bits,
    Integer,
    Floating,
    Angle,
    Complex,
    Timing,
    Array,
    Quantum,
    Error,
}

/// Signedness of an integral type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Signedness {
    Signed,
    Unsigned,
}

impl ExprType {
    /// Returns the category this type belongs to.
    pub const fn category(self) -> TypeCategory {
        use ExprType::*;

        match self {
            Bool => TypeCategory::Boolean,
            Bitset => TypeCategory::Bits,
            Char | UnsignedChar | Short | UnsignedShort | Int | UInt | Long | ULong | MPInteger
            | MPUInteger => TypeCategory::Integer,
            Float | Double | LongDouble | MPDecimal => TypeCategory::Floating,
            Angle => TypeCategory::Angle,
            MPComplex => TypeCategory::Complex,
            Length | Duration => TypeCategory::Timing,
            BoolArray | CBitArray | IntArray | UIntArray | MPIntegerArray | MPUIntegerArray
            | FloatArray | MPDecimalArray | AngleArray | MPComplexArray | LengthArray
            | DurationArray => TypeCategory::Array,
            Qubit | QubitArray => TypeCategory::Quantum,
            ExpressionError | BadCast | BadImplicitConversion => TypeCategory::Error,
        }
    }

    /// Signedness of integral and bit types, `None` for everything else.
    ///
    /// Bits and booleans are plain unsigned storage.
    pub const fn signedness(self) -> Option<Signedness> {
        use ExprType::*;

        match self {
            Char | Short | Int | Long | MPInteger => Some(Signedness::Signed),
            UnsignedChar | UnsignedShort | UInt | ULong | MPUInteger | Bitset | Bool => {
                Some(Signedness::Unsigned)
            }
            _ => None,
        }
    }

    /// Element type of a classical array, `None` for scalars and qubit registers.
    pub const fn element(self) -> Option<ExprType> {
        use ExprType::*;

        match self {
            BoolArray => Some(Bool),
            CBitArray => Some(Bitset),
            IntArray => Some(Int),
            UIntArray => Some(UInt),
            MPIntegerArray => Some(MPInteger),
            MPUIntegerArray => Some(MPUInteger),
            FloatArray => Some(Float),
            MPDecimalArray => Some(MPDecimal),
            AngleArray => Some(Angle),
            MPComplexArray => Some(MPComplex),
            LengthArray => Some(Length),
            DurationArray => Some(Duration),
            _ => None,
        }
    }

    /// Intrinsic width in bits of fixed-width types.
    ///
    /// Parameterised types (`bit[n]`, `int[n]`, `angle[n]`, ...) return `None`;
    /// arrays report the width of their element.
    pub const fn fixed_bits(self) -> Option<u32> {
        use ExprType::*;

        match self {
            Bool | Qubit => Some(1),
            Char | UnsignedChar => Some(8),
            Short | UnsignedShort => Some(16),
            Int | UInt | Float => Some(32),
            Long | ULong | Double | Length | Duration => Some(64),
            LongDouble => Some(128),
            ExpressionError | BadCast | BadImplicitConversion => Some(0),
            _ => match self.element() {
                Some(element) => element.fixed_bits(),
                None => None,
            },
        }
    }

    /// Width assumed for a parameterised type whose declaration omits it.
    pub const fn default_bits(self) -> u32 {
        use ExprType::*;

        match self.fixed_bits() {
            Some(bits) => bits,
            None => match self {
                MPInteger | MPUInteger | MPIntegerArray | MPUIntegerArray => 32,
                MPDecimal | MPDecimalArray | Angle | AngleArray | MPComplex | MPComplexArray => 64,
                _ => 1,
            },
        }
    }

    /// Resolves the effective width of a value of this type declared with `declared` bits.
    ///
    /// Fixed-width types ignore the declaration.
    #[inline]
    pub fn bits(self, declared: Option<NonZeroU32>) -> u32 {
        self.fixed_bits()
            .or(declared.map(NonZeroU32::get))
            .unwrap_or_else(|| self.default_bits())
    }

    /// Returns `true` for the three error tags.
    #[inline]
    pub const fn is_error(self) -> bool {
        matches!(self.category(), TypeCategory::Error)
    }

    /// Returns `true` for integer types (not bits, not booleans).
    #[inline]
    pub const fn is_integral(self) -> bool {
        matches!(self.category(), TypeCategory::Integer)
    }

    /// Returns `true` for classical arrays.
    #[inline]
    pub const fn is_array(self) -> bool {
        matches!(self.category(), TypeCategory::Array)
    }

    /// Returns `true` for qubits and qubit registers.
    #[inline]
    pub const fn is_quantum(self) -> bool {
        matches!(self.category(), TypeCategory::Quantum)
    }

    /// Returns `true` if the width of this type is part of its declaration.
    #[inline]
    pub const fn is_parameterised(self) -> bool {
        self.fixed_bits().is_none()
    }

    /// Source-level spelling of the type, without its width.
    pub const fn keyword(self) -> &'static str {
        use ExprType::*;

        match self {
            Angle => "angle",
            Bitset => "bit",
            Bool => "bool",
            Char => "int8",
            UnsignedChar => "uint8",
            Short => "int16",
            UnsignedShort => "uint16",
            Int => "int",
            UInt => "uint",
            Long => "int64",
            ULong => "uint64",
            MPInteger => "int",
            MPUInteger => "uint",
            Float => "float32",
            Double => "float64",
            LongDouble => "float128",
            MPDecimal => "float",
            MPComplex => "complex",
            Length => "length",
            Duration => "duration",
            Qubit => "qubit",
            QubitArray => "qubit",
            ExpressionError => "<error>",
            BadCast => "<bad cast>",
            BadImplicitConversion => "<bad implicit conversion>",
            BoolArray | CBitArray | IntArray | UIntArray | MPIntegerArray | MPUIntegerArray
            | FloatArray | MPDecimalArray | AngleArray | MPComplexArray | LengthArray
            | DurationArray => "array",
        }
    }
}

impl std::fmt::Display for ExprType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.element() {
            Some(element) => write!(f, "array[{}]", element.keyword()),
            None => f.write_str(self.keyword()),
        }
    }
}

/// An [`ExprType`] together with its resolved width in bits.
///
/// This is what the evaluator hands back to its caller. For arrays, `bits`
/// is the width of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SizedType {
    pub ty: ExprType,
    pub bits: u32,
}

impl SizedType {
    /// The boolean result of comparisons and logical operators.
    pub const BOOL: Self = Self {
        ty: ExprType::Bool,
        bits: 1,
    };

    /// Creates a sized type using the intrinsic or default width of `ty`.
    #[inline]
    pub const fn new(ty: ExprType) -> Self {
        Self {
            ty,
            bits: ty.default_bits(),
        }
    }

    /// Creates a sized type declared with `bits` bits.
    ///
    /// The width is ignored for fixed-width types, and a width of zero is
    /// treated as undeclared.
    #[inline]
    pub fn with_bits(ty: ExprType, bits: u32) -> Self {
        Self {
            ty,
            bits: ty.bits(NonZeroU32::new(bits)),
        }
    }

    #[inline]
    pub const fn category(&self) -> TypeCategory {
        self.ty.category()
    }

    #[inline]
    pub const fn signedness(&self) -> Option<Signedness> {
        self.ty.signedness()
    }

    /// Element of an array type, keeping the element width.
    #[inline]
    pub fn element(&self) -> Option<SizedType> {
        self.ty.element().map(|ty| SizedType { ty, bits: self.bits })
    }
}

impl From<ExprType> for SizedType {
    fn from(value: ExprType) -> Self {
        SizedType::new(value)
    }
}

impl std::fmt::Display for SizedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ExprType::*;

        let sized = |f: &mut std::fmt::Formatter<'_>, ty: ExprType| match ty {
            MPComplex => write!(f, "complex[float[{}]]", self.bits),
            _ if ty.is_parameterised() => write!(f, "{}[{}]", ty.keyword(), self.bits),
            _ => f.write_str(ty.keyword()),
        };

        match self.ty {
            QubitArray => write!(f, "qubit[{}]", self.bits),
            ty => match ty.element() {
                Some(element) => {
                    f.write_str("array[")?;
                    sized(f, element)?;
                    f.write_str("]")
                }
                None => sized(f, ty),
            },
        }
    }
}
