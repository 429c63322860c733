//! The rule that turns two records into an affinity edge.

use crate::types::Record;

/// Weight of the edge between `a` and `b`, or `None` if they are unrelated.
///
/// Records by the same (non-empty) creator are linked with
/// `same_creator_weight`, whatever their tags. Otherwise shared tags give
/// `shared / (|tags_a| + |tags_b|)`.
pub fn affinity_weight(a: &Record, b: &Record, same_creator_weight: f32) -> Option<f32> {
    if a.id == b.id {
        return None;
    }
    if a.same_creator(b) {
        return Some(same_creator_weight);
    }

    let shared = a.shared_tag_count(b);
    (shared > 0).then(|| shared as f32 / (a.tags.len() + b.tags.len()) as f32)
}
