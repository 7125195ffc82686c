//! Selection of one representation among a field's alternatives.

use gqlsmith_schema::{FieldAlternative, TypeCategory};
use std::cmp::Ordering;

/// The winning alternative of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Winning alternative, with list-ness reconciled across same-named variants.
    pub alternative: FieldAlternative,
    /// Whether any alternative accepts null.
    pub nullable: bool,
}

/// Picks exactly one alternative per field.
///
/// Rules, in order:
/// 1. The null marker is dropped while another alternative remains.
/// 2. Same-named alternatives collapse into one, which is a list if any of
///    them is.
/// 3. The highest ranked category wins (see [`TypeResolver::compare`]).
/// 4. Ties go to the first listed alternative.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeResolver;

impl TypeResolver {
    /// Returns the rank of a category; higher wins.
    #[must_use]
    pub const fn rank(category: TypeCategory) -> u8 {
        match category {
            TypeCategory::WholeEntityFilterObject => 4,
            TypeCategory::RelationFilterObject => 3,
            TypeCategory::PlainObject => 2,
            TypeCategory::Enum => 1,
            TypeCategory::Scalar => 0,
        }
    }

    /// Total order over categories.
    ///
    /// `WholeEntityFilterObject > RelationFilterObject > PlainObject > Enum > Scalar`
    #[must_use]
    pub fn compare(a: TypeCategory, b: TypeCategory) -> Ordering {
        Self::rank(a).cmp(&Self::rank(b))
    }

    /// Resolves a field's alternatives.
    ///
    /// # Returns
    /// The winning alternative, or `None` when `alternatives` is empty.
    #[must_use]
    pub fn resolve(alternatives: &[FieldAlternative]) -> Option<Resolution> {
        let nullable = alternatives
            .iter()
            .any(|alt| alt.is_null || alt.is_null_marker());

        let mut candidates: Vec<&FieldAlternative> = alternatives
            .iter()
            .filter(|alt| !alt.is_null_marker())
            .collect();
        if candidates.is_empty() {
            candidates = alternatives.iter().collect();
        }

        let mut merged: Vec<FieldAlternative> = Vec::with_capacity(candidates.len());
        for alt in candidates {
            match merged.iter_mut().find(|m| m.name == alt.name) {
                Some(existing) => existing.is_list |= alt.is_list,
                None => merged.push(alt.clone()),
            }
        }

        let mut winner: Option<FieldAlternative> = None;
        for alt in merged {
            let better = winner
                .as_ref()
                .is_none_or(|w| Self::compare(alt.category, w.category) == Ordering::Greater);
            if better {
                winner = Some(alt);
            }
        }

        winner.map(|alternative| Resolution {
            alternative,
            nullable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(name: &str, category: TypeCategory) -> FieldAlternative {
        FieldAlternative::new(name, category)
    }

    #[test]
    fn test_single_scalar() {
        let resolution = TypeResolver::resolve(&[FieldAlternative::scalar("String")]).unwrap();
        assert_eq!(resolution.alternative.name, "String");
        assert!(!resolution.nullable);
    }

    #[test]
    fn test_list_variant_wins_regardless_of_order() {
        let single = object("X", TypeCategory::PlainObject);
        let list = object("X", TypeCategory::PlainObject).list();

        let first = TypeResolver::resolve(&[single.clone(), list.clone()]).unwrap();
        let second = TypeResolver::resolve(&[list, single]).unwrap();
        assert!(first.alternative.is_list);
        assert!(second.alternative.is_list);
        assert_eq!(first.alternative.name, "X");
    }

    #[test]
    fn test_whole_entity_filter_outranks_relation_filter() {
        let relation = object("UserRelationFilter", TypeCategory::RelationFilterObject);
        let whole = object("UserWhereInput", TypeCategory::WholeEntityFilterObject);

        let a = TypeResolver::resolve(&[relation.clone(), whole.clone()]).unwrap();
        let b = TypeResolver::resolve(&[whole, relation]).unwrap();
        assert_eq!(a.alternative.name, "UserWhereInput");
        assert_eq!(b.alternative.name, "UserWhereInput");
    }

    #[test]
    fn test_object_outranks_scalar_and_null_marker() {
        let resolution = TypeResolver::resolve(&[
            object("IntFilter", TypeCategory::PlainObject),
            FieldAlternative::scalar("Int"),
            FieldAlternative::scalar("Null"),
        ])
        .unwrap();
        assert_eq!(resolution.alternative.name, "IntFilter");
        assert!(resolution.nullable);
    }

    #[test]
    fn test_null_marker_alone_is_kept() {
        let resolution = TypeResolver::resolve(&[FieldAlternative::scalar("Null")]).unwrap();
        assert_eq!(resolution.alternative.name, "Null");
        assert!(resolution.nullable);
    }

    #[test]
    fn test_enum_outranks_scalar() {
        let resolution = TypeResolver::resolve(&[
            FieldAlternative::scalar("String"),
            object("Role", TypeCategory::Enum),
        ])
        .unwrap();
        assert_eq!(resolution.alternative.name, "Role");
    }

    #[test]
    fn test_tie_goes_to_first_listed() {
        let resolution = TypeResolver::resolve(&[
            object("ACreateInput", TypeCategory::PlainObject),
            object("BCreateInput", TypeCategory::PlainObject),
        ])
        .unwrap();
        assert_eq!(resolution.alternative.name, "ACreateInput");
    }

    #[test]
    fn test_empty_alternatives() {
        assert!(TypeResolver::resolve(&[]).is_none());
    }

    #[test]
    fn test_compare_is_total() {
        let categories = [
            TypeCategory::Scalar,
            TypeCategory::Enum,
            TypeCategory::PlainObject,
            TypeCategory::RelationFilterObject,
            TypeCategory::WholeEntityFilterObject,
        ];
        for window in categories.windows(2) {
            assert_eq!(TypeResolver::compare(window[0], window[1]), Ordering::Less);
            assert_eq!(TypeResolver::compare(window[1], window[0]), Ordering::Greater);
        }
        for category in categories {
            assert_eq!(TypeResolver::compare(category, category), Ordering::Equal);
        }
    }
}
