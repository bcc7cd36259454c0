//! The type-equivalence checker.
//!
//! [`equivalent`] decides whether descriptor `b` is an acceptable
//! substitute where descriptor `a` is expected. The rule is deliberately
//! asymmetric: `b` may declare fields `a` never mentions, but every field
//! `a` declares must exist in `b` with a recursively equivalent descriptor.
//!
//! The checker never fails. Descriptors it cannot make sense of - no
//! readable kind tag, or one side object-like and the other not - compare
//! as incompatible, with a `tracing` record for the curious.

use meander_core::Introspect;
use std::collections::HashSet;

/// Address pair used to detect revisited descriptor pairs.
type VisitKey = (*const (), *const ());

/// Compares two optional descriptors for compatibility.
///
/// Policy:
///
/// - both absent → compatible; exactly one absent → incompatible
/// - both object-like → every field of `a` must exist in `b` and recurse
///   as equivalent; extra fields in `b` are ignored
/// - neither object-like → same kind tag required
/// - anything else (mixed shapes, unreadable kind tags) → incompatible
///
/// Cyclic descriptor graphs - possible for [`Introspect`] implementations
/// built on shared ownership - terminate via a visited set keyed on
/// descriptor identity; a revisited pair is taken as compatible.
///
/// # Example
///
/// ```
/// use meander_compat::equivalent;
/// use meander_core::Schema;
///
/// let expected = Schema::object([("x", Schema::number())]);
/// let offered = Schema::object([("x", Schema::number()), ("y", Schema::number())]);
///
/// // `offered` is a superset of `expected`...
/// assert!(equivalent(Some(&expected), Some(&offered)));
/// // ...but not the other way around.
/// assert!(!equivalent(Some(&offered), Some(&expected)));
/// ```
#[must_use]
pub fn equivalent<S: Introspect>(a: Option<&S>, b: Option<&S>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            let mut seen = HashSet::new();
            descriptors_equivalent(a, b, &mut seen)
        }
        _ => false,
    }
}

fn descriptors_equivalent<S: Introspect>(a: &S, b: &S, seen: &mut HashSet<VisitKey>) -> bool {
    let key = (
        std::ptr::from_ref(a).cast::<()>(),
        std::ptr::from_ref(b).cast::<()>(),
    );
    if !seen.insert(key) {
        // Already comparing this pair further up the walk.
        return true;
    }

    match (a.fields(), b.fields()) {
        (Some(a_fields), Some(b_fields)) => a_fields.iter().all(|(name, a_sub)| {
            b_fields
                .get(name)
                .is_some_and(|b_sub| descriptors_equivalent(a_sub, b_sub, seen))
        }),
        (None, None) => match (a.kind_tag(), b.kind_tag()) {
            (Some(a_kind), Some(b_kind)) => a_kind == b_kind,
            _ => {
                tracing::debug!("descriptor exposes no readable kind tag; treating as incompatible");
                false
            }
        },
        _ => {
            tracing::debug!("descriptors disagree on shape; treating as incompatible");
            false
        }
    }
}
