//! Translation between Rust-side snake_case field names and the camelCase keys
//! used on the wire.

/// Translate a snake_case field name into its camelCase wire key.
///
/// The first segment is lowercased, every following segment is title-cased
/// and the segments are joined without a separator. Names without an
/// underscore pass through (lowercased). Empty segments produced by leading,
/// trailing or doubled underscores are dropped after the first.
///
/// ```
/// use shelf_core::to_wire_name;
///
/// assert_eq!(to_wire_name("library_id"), "libraryId");
/// assert_eq!(to_wire_name("id"), "id");
/// ```
pub fn to_wire_name(snake: &str) -> String {
    let mut segments = snake.split('_');
    let mut wire = segments
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default();

    for segment in segments {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            wire.extend(first.to_uppercase());
            wire.push_str(&chars.as_str().to_lowercase());
        }
    }

    wire
}

/// Translate a camelCase wire key back into a snake_case field name.
///
/// Used for diagnostics on rejected keys; runs of capitals are treated as a
/// single word (`numISBN` → `num_isbn`).
pub fn to_field_name(camel: &str) -> String {
    let mut snake = String::with_capacity(camel.len() + 4);
    let mut previous_upper = true;

    for ch in camel.chars() {
        if ch.is_uppercase() {
            if !previous_upper {
                snake.push('_');
            }
            snake.extend(ch.to_lowercase());
            previous_upper = true;
        } else {
            snake.push(ch);
            previous_upper = false;
        }
    }

    snake
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_multi_segment_names() {
        assert_eq!(to_wire_name("library_id"), "libraryId");
        assert_eq!(
            to_wire_name("skip_matching_media_with_asin"),
            "skipMatchingMediaWithAsin"
        );
        assert_eq!(
            to_wire_name("hide_from_continue_listening"),
            "hideFromContinueListening"
        );
    }

    #[test]
    fn single_segment_passes_through() {
        assert_eq!(to_wire_name("id"), "id");
        assert_eq!(to_wire_name("permissions"), "permissions");
    }

    #[test]
    fn title_cases_each_segment() {
        assert_eq!(to_wire_name("cover_ASPECT_ratio"), "coverAspectRatio");
        assert_eq!(to_wire_name("Display_order"), "displayOrder");
    }

    #[test]
    fn malformed_identifiers_do_not_panic() {
        assert_eq!(to_wire_name(""), "");
        assert_eq!(to_wire_name("_private"), "Private");
        assert_eq!(to_wire_name("trailing_"), "trailing");
        assert_eq!(to_wire_name("double__under"), "doubleUnder");
    }

    #[test]
    fn reverses_wire_names() {
        assert_eq!(to_field_name("libraryId"), "library_id");
        assert_eq!(to_field_name("id"), "id");
        assert_eq!(to_field_name("numISBN"), "num_isbn");
    }
}
