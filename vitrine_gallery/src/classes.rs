// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class name composition for cards.

/// Join the present, non-empty fragments with single spaces.
///
/// Fragments may themselves hold several space-separated classes; a class that
/// appears more than once is kept at its last position.
///
/// ```rust
/// use vitrine_gallery::merge_classes;
///
/// let hovered = false;
/// let class = merge_classes([Some("card  frame"), hovered.then_some("raised"), Some("frame")]);
/// assert_eq!(class, "card frame");
/// ```
pub fn merge_classes<'a>(fragments: impl IntoIterator<Item = Option<&'a str>>) -> String {
    let classes: Vec<&str> = fragments
        .into_iter()
        .flatten()
        .flat_map(str::split_whitespace)
        .collect();
    let mut kept: Vec<&str> = Vec::with_capacity(classes.len());
    for (index, class) in classes.iter().enumerate() {
        if !classes[index + 1..].contains(class) {
            kept.push(*class);
        }
    }
    kept.join(" ")
}

/// Tilt applied to the card at `index`, cycling like a hand-hung wall.
pub(crate) fn card_tilt(index: usize) -> &'static str {
    const TILTS: [&str; 6] = [
        "tilt-left-1",
        "tilt-right-1",
        "tilt-left-2",
        "tilt-right-2",
        "tilt-none",
        "tilt-left-1",
    ];
    TILTS[index % TILTS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_absent_and_empty_fragments() {
        assert_eq!(merge_classes([None, Some(""), Some("a"), Some("  b ")]), "a b");
        assert_eq!(merge_classes(std::iter::empty()), "");
    }

    #[test]
    fn later_duplicates_win() {
        assert_eq!(merge_classes([Some("a b"), Some("c a")]), "b c a");
    }

    #[test]
    fn tilt_cycles() {
        assert_eq!(card_tilt(0), card_tilt(6));
        assert_eq!(card_tilt(4), "tilt-none");
    }
}
