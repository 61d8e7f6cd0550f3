//! Conversion method classifier
//!
//! Decides how a value of one [`SizedType`] becomes a value of another, and
//! whether that is allowed without an explicit cast. The decision is an
//! explicit rule table over type categories and widths: rank order plays no
//! part here, since several legal conversions (bit registers to integers of the
//! same width, for instance) are unrelated to rank.
//!
//! The same pair can be legal as an explicit cast and illegal as an implicit
//! conversion. Implicit conversions never lose precision or sign information.
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIs, EnumIter};

use crate::types::{Signedness, SizedType, TypeCategory};

/// How a conversion is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIs, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConversionMethod {
    /// One side is an error tag; nothing can be said.
    #[strum(to_string = "unknown")]
    Unknown,
    /// Source and target are the same type.
    #[strum(to_string = "identity")]
    Identity,
    /// Same storage width, reinterpreted.
    #[strum(to_string = "bitcast")]
    Bitcast,
    /// Value conversion between representations (float to angle, int to bool, ...).
    #[strum(to_string = "conversion")]
    Conversion,
    /// Value-preserving widening.
    #[strum(to_string = "promotion")]
    Promotion,
    /// Narrowing, possibly lossy.
    #[strum(to_string = "truncation")]
    Truncation,
    /// No legal explicit cast.
    #[strum(to_string = "bad cast")]
    BadCast,
    /// No legal implicit conversion.
    #[strum(to_string = "bad implicit conversion")]
    BadImplicitConversion,
}

impl ConversionMethod {
    /// Returns `true` if the conversion can be carried out.
    #[inline]
    pub fn is_legal(self) -> bool {
        !matches!(
            self,
            ConversionMethod::Unknown
                | ConversionMethod::BadCast
                | ConversionMethod::BadImplicitConversion
        )
    }
}

/// Whether the conversion was requested by the program or inserted by the
/// front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConversionContext {
    Explicit,
    Implicit,
}

/// Outcome of the rule table for one (source, target) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    /// Legal as an explicit cast; legal implicitly only if `implicit` is set.
    Legal {
        method: ConversionMethod,
        implicit: bool,
    },
    Illegal,
}

impl Rule {
    const fn implicit(method: ConversionMethod) -> Self {
        Rule::Legal {
            method,
            implicit: true,
        }
    }

    const fn explicit(method: ConversionMethod) -> Self {
        Rule::Legal {
            method,
            implicit: false,
        }
    }

    /// Promotion when widening, truncation when narrowing; only widening is implicit.
    const fn by_width(from: u32, to: u32) -> Self {
        if to >= from {
            Rule::implicit(ConversionMethod::Promotion)
        } else {
            Rule::explicit(ConversionMethod::Truncation)
        }
    }
}

/// Classifies the conversion of `from` into `to` in the given context.
pub fn classify(from: SizedType, to: SizedType, context: ConversionContext) -> ConversionMethod {
    if from.ty.is_error() || to.ty.is_error() {
        return ConversionMethod::Unknown;
    }
    if from == to {
        return ConversionMethod::Identity;
    }

    let method = match (rule(from, to), context) {
        (Rule::Legal { method, .. }, ConversionContext::Explicit) => method,
        (
            Rule::Legal {
                method,
                implicit: true,
            },
            ConversionContext::Implicit,
        ) => method,
        (_, ConversionContext::Explicit) => ConversionMethod::BadCast,
        (_, ConversionContext::Implicit) => ConversionMethod::BadImplicitConversion,
    };

    if !method.is_legal() {
        debug!("Rejected {context:?} conversion from `{from}` to `{to}` ({method}).");
    }
    method
}

fn rule(from: SizedType, to: SizedType) -> Rule {
    use ConversionMethod::*;
    use TypeCategory::*;

    match (from.category(), to.category()) {
        (Array, Array) => match (from.element(), to.element()) {
            (Some(from), Some(to)) => rule(from, to),
            _ => Rule::Illegal,
        },

        (Boolean, Bits) if to.bits == 1 => Rule::implicit(Bitcast),
        (Boolean, Bits | Integer | Floating | Complex) => Rule::implicit(Promotion),
        (Bits, Boolean) if from.bits == 1 => Rule::implicit(Bitcast),
        (Bits | Integer | Floating | Angle, Boolean) => Rule::explicit(Conversion),

        (Bits, Bits) => Rule::by_width(from.bits, to.bits),
        (Bits, Integer) | (Integer, Bits) if from.bits == to.bits => {
            let integer = if from.category() == Integer { from } else { to };
            if integer.signedness() == Some(Signedness::Unsigned) {
                Rule::implicit(Bitcast)
            } else {
                Rule::explicit(Bitcast)
            }
        }
        (Bits, Angle) | (Angle, Bits) if from.bits == to.bits => Rule::explicit(Bitcast),

        (Integer, Integer) => integer_rule(from, to),
        (Integer, Floating | Complex) if to.bits > from.bits => Rule::implicit(Promotion),
        (Integer, Floating | Complex) => Rule::explicit(Conversion),
        (Floating, Integer) => Rule::explicit(Conversion),

        (Floating, Floating) if from.bits == to.bits => Rule::implicit(Conversion),
        (Floating, Floating) | (Angle, Angle) | (Complex, Complex) => {
            Rule::by_width(from.bits, to.bits)
        }
        (Floating, Angle) => Rule::implicit(Conversion),
        (Angle, Floating) => Rule::explicit(Conversion),
        (Floating, Complex) => Rule::implicit(Promotion),

        (Timing, Timing) => Rule::implicit(Conversion),

        _ => Rule::Illegal,
    }
}

fn integer_rule(from: SizedType, to: SizedType) -> Rule {
    use ConversionMethod::*;

    let same_sign = from.signedness() == to.signedness();
    if to.bits > from.bits {
        match (from.signedness(), to.signedness()) {
            (Some(Signedness::Signed), Some(Signedness::Unsigned)) => Rule::explicit(Conversion),
            _ => Rule::implicit(Promotion),
        }
    } else if to.bits == from.bits {
        if same_sign {
            Rule::implicit(Conversion)
        } else {
            Rule::explicit(Bitcast)
        }
    } else {
        Rule::explicit(Truncation)
    }
}
