//! Refresh novelty detection.

use std::collections::HashSet;

use medley_core::model::MediaItem;

/// Whether `new` contains items absent from `old`.
///
/// Any length change (shrinkage included) counts as different and merits a
/// display push. Otherwise true iff some id in `new` is missing from `old`'s
/// id set. Same-id field edits are not detected; the source-of-truth fields
/// are immutable post-creation, so existence is what drives refreshes.
pub fn has_new_items(old: &[MediaItem], new: &[MediaItem]) -> bool {
    if new.len() != old.len() {
        return true;
    }

    let old_ids: HashSet<&str> = old.iter().map(|i| i.id.as_str()).collect();
    new.iter().any(|i| !old_ids.contains(i.id.as_str()))
}
