//! Rank table
//!
//! Total order over [`ExprType`] used to pick the "wider" operand of a binary
//! operation. The order is a value rather than an inherent property of the
//! enum so a front end can re-rank types without renumbering the tag space.
//!
//! A [`RankTable`] is immutable once built. [`RankTable::global`] hands out a
//! process-wide instance built on first use; [`RankTable::from_order`] builds
//! a custom one.
use enum_map::EnumMap;
use log::info;
use once_cell::sync::OnceCell;
use strum::{EnumCount, IntoEnumIterator};

use crate::{
    types::{ExprType, syntax::AstType},
    utils::RankTableError,
};

/// Position of a type in a [`RankTable`].
///
/// [`Rank::NONE`] is returned for kinds that are not ranked, so that callers
/// can tell "ranked zero" from "not ranked".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Rank(u32);

impl Rank {
    /// Sentinel for kinds outside the table.
    pub const NONE: Rank = Rank(u32::MAX);

    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Returns the raw rank, `None` for [`Rank::NONE`].
    #[inline]
    pub const fn get(self) -> Option<u32> {
        if self.is_none() { None } else { Some(self.0) }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.get() {
            Some(rank) => write!(f, "{rank}"),
            None => f.write_str("<no rank>"),
        }
    }
}

/// Position of `ty` in the standard numeric tower.
///
/// Integers by width (signed below unsigned at equal width), then floating
/// types, angles and complex numbers at the top of the numeric tower, followed
/// by timing types, classical arrays, quantum containers and the error tags.
const fn standard_rank(ty: ExprType) -> u32 {
    use ExprType::*;

    match ty {
        Bool => 0,
        Bitset => 1,
        Char => 2,
        UnsignedChar => 3,
        Short => 4,
        UnsignedShort => 5,
        Int => 6,
        UInt => 7,
        Long => 8,
        ULong => 9,
        MPInteger => 10,
        MPUInteger => 11,
        Float => 12,
        Double => 13,
        LongDouble => 14,
        MPDecimal => 15,
        Angle => 16,
        MPComplex => 17,
        Length => 18,
        Duration => 19,
        BoolArray => 20,
        CBitArray => 21,
        IntArray => 22,
        UIntArray => 23,
        MPIntegerArray => 24,
        MPUIntegerArray => 25,
        FloatArray => 26,
        MPDecimalArray => 27,
        AngleArray => 28,
        MPComplexArray => 29,
        LengthArray => 30,
        DurationArray => 31,
        Qubit => 32,
        QubitArray => 33,
        ExpressionError => 34,
        BadImplicitConversion => 35,
        BadCast => 36,
    }
}

/// Bijection between [`ExprType`] and [`Rank`].
///
/// Both directions are stored: a dense `EnumMap` from type to rank and the
/// rank-ordered list of types. They are built from the same order and checked
/// against each other on construction.
#[derive(Debug, Clone)]
pub struct RankTable {
    ranks: EnumMap<ExprType, Rank>,
    types: Box<[ExprType]>,
}

static GLOBAL: OnceCell<RankTable> = OnceCell::new();

impl RankTable {
    /// Builds the standard tower.
    pub fn new() -> Self {
        let mut order: Vec<ExprType> = ExprType::iter().collect();
        order.sort_by_key(|ty| standard_rank(*ty));

        let ranks = EnumMap::from_fn(|ty| Rank(standard_rank(ty)));
        let table = Self {
            ranks,
            types: order.into_boxed_slice(),
        };
        debug_assert!(table.is_bijective(), "standard rank order is not dense");
        table
    }

    /// Builds a table ranking the types in the order given, lowest first.
    ///
    /// Every [`ExprType`] must appear exactly once.
    pub fn from_order(order: &[ExprType]) -> Result<Self, RankTableError> {
        let mut seen: EnumMap<ExprType, Option<u32>> = EnumMap::default();

        for (position, &ty) in order.iter().enumerate() {
            let position = position as u32;
            if let Some(first) = seen[ty] {
                return Err(RankTableError::DuplicateType {
                    ty,
                    first,
                    second: position,
                });
            }
            seen[ty] = Some(position);
        }

        let mut ranks = EnumMap::from_fn(|_| Rank::NONE);
        for (ty, position) in seen {
            match position {
                Some(position) => ranks[ty] = Rank(position),
                None => return Err(RankTableError::MissingType { ty }),
            }
        }

        Ok(Self {
            ranks,
            types: order.into(),
        })
    }

    /// Process-wide table holding the standard tower.
    ///
    /// Built on first call; later calls return the same instance.
    pub fn global() -> &'static RankTable {
        GLOBAL.get_or_init(|| {
            let table = RankTable::new();
            info!(
                "Expression rank table initialized with {} ranked types.",
                table.len()
            );
            table
        })
    }

    /// Rank of a syntax kind, [`Rank::NONE`] when the kind is not an expression type.
    #[inline]
    pub fn rank_of(&self, kind: AstType) -> Rank {
        match ExprType::try_from(kind) {
            Ok(ty) => self.ranks[ty],
            Err(_) => Rank::NONE,
        }
    }

    /// Rank of an expression type.
    #[inline]
    pub fn rank_of_expr(&self, ty: ExprType) -> Rank {
        self.ranks[ty]
    }

    /// Syntax kind holding `rank`, [`AstType::Undefined`] when no type has it.
    #[inline]
    pub fn tag_of(&self, rank: Rank) -> AstType {
        self.expr_of(rank).map_or(AstType::Undefined, AstType::from)
    }

    /// Expression type holding `rank`.
    #[inline]
    pub fn expr_of(&self, rank: Rank) -> Option<ExprType> {
        rank.get()
            .and_then(|rank| self.types.get(rank as usize))
            .copied()
    }

    /// Types in ascending rank order.
    pub fn iter(&self) -> impl Iterator<Item = ExprType> + '_ {
        self.types.iter().copied()
    }

    /// Number of ranked types.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns whichever of `a` and `b` ranks higher, `a` on ties.
    #[inline]
    pub fn wider(&self, a: ExprType, b: ExprType) -> ExprType {
        if self.rank_of_expr(b) > self.rank_of_expr(a) {
            b
        } else {
            a
        }
    }

    fn is_bijective(&self) -> bool {
        self.types.len() == ExprType::COUNT
            && self
                .types
                .iter()
                .enumerate()
                .all(|(position, ty)| self.ranks[*ty] == Rank(position as u32))
    }
}

impl Default for RankTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_is_a_bijection() {
        let table = RankTable::new();
        assert!(table.is_bijective());
        assert_eq!(table.len(), ExprType::COUNT);

        for ty in ExprType::iter() {
            let rank = table.rank_of_expr(ty);
            assert!(!rank.is_none());
            assert_eq!(table.expr_of(rank), Some(ty));
            assert_eq!(table.tag_of(rank), AstType::from(ty));
        }
    }

    #[test]
    fn unranked_lookups_return_sentinels() {
        let table = RankTable::new();
        assert_eq!(table.rank_of(AstType::WhileStatement), Rank::NONE);
        assert_eq!(table.rank_of(AstType::Undefined), Rank::NONE);
        assert_eq!(table.tag_of(Rank::new(ExprType::COUNT as u32)), AstType::Undefined);
        assert_eq!(table.tag_of(Rank::NONE), AstType::Undefined);
        assert_eq!(table.expr_of(Rank::NONE), None);
    }

    #[test]
    fn bool_is_ranked_zero_not_unranked() {
        let table = RankTable::new();
        let rank = table.rank_of(AstType::Bool);
        assert_eq!(rank.get(), Some(0));
        assert!(!rank.is_none());
    }

    #[test]
    fn numeric_tower_is_ordered() {
        use ExprType::*;

        let table = RankTable::new();
        let tower = [
            Bool, Bitset, Char, Short, Int, Long, MPInteger, Float, Double, LongDouble, MPDecimal,
            Angle, MPComplex,
        ];
        for pair in tower.windows(2) {
            assert!(
                table.rank_of_expr(pair[0]) < table.rank_of_expr(pair[1]),
                "{:?} should rank below {:?}",
                pair[0],
                pair[1]
            );
        }
        assert_eq!(table.wider(Int, Double), Double);
        assert_eq!(table.wider(Angle, Float), Angle);
    }

    #[test]
    fn custom_order_is_validated() {
        let mut order: Vec<ExprType> = RankTable::new().iter().collect();
        order.swap(0, 1);
        let table = RankTable::from_order(&order).unwrap();
        assert_eq!(table.rank_of_expr(ExprType::Bitset), Rank::new(0));
        assert_eq!(table.expr_of(Rank::new(1)), Some(ExprType::Bool));
        assert!(table.is_bijective());

        let missing = &order[1..];
        assert_eq!(
            RankTable::from_order(missing).unwrap_err(),
            RankTableError::MissingType {
                ty: ExprType::Bitset
            }
        );

        let mut duplicated = order.clone();
        duplicated.push(ExprType::Int);
        assert!(matches!(
            RankTable::from_order(&duplicated),
            Err(RankTableError::DuplicateType {
                ty: ExprType::Int,
                ..
            })
        ));
    }

    #[test]
    fn global_table_is_shared() {
        let a = RankTable::global();
        let b = RankTable::global();
        assert!(std::ptr::eq(a, b));
        assert!(a.is_bijective());
    }
}
