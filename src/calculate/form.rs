use crate::models::{FormData, Match, PlayerResult};

use super::{most_recent_first, view_for};

/// Number of matches that make up a player's form.
pub const FORM_WINDOW: usize = 5;

/// Points toward form for one result.
pub fn form_points(result: PlayerResult) -> u32 {
    match result {
        PlayerResult::Win => 20,
        PlayerResult::Draw => 10,
        PlayerResult::Loss => 0,
    }
}

/// Form over `handle`'s five most recent matches.
///
/// Returns `None` when fewer than five resolvable matches exist; such
/// players are excluded rather than padded.
pub fn calculate_form(handle: &str, matches: &[Match]) -> Option<FormData> {
    let last5_matches: Vec<PlayerResult> = most_recent_first(matches)
        .into_iter()
        .filter_map(|m| view_for(m, handle))
        .map(|view| view.result())
        .take(FORM_WINDOW)
        .collect();

    if last5_matches.len() < FORM_WINDOW {
        return None;
    }

    let form = last5_matches.iter().copied().map(form_points).sum();

    Some(FormData {
        player: handle.to_string(),
        last5_matches,
        form,
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::series;
    use super::*;

    #[test]
    fn test_form_alternating() {
        // W, W, L, W, W oldest to newest
        let matches = series(&[
            ("X", "o", 2, 0),
            ("X", "o", 2, 0),
            ("X", "o", 0, 2),
            ("X", "o", 2, 0),
            ("X", "o", 2, 0),
        ]);

        let form = calculate_form("X", &matches).unwrap();
        assert_eq!(form.form, 80);
        assert_eq!(
            form.last5_matches,
            vec![
                PlayerResult::Win,
                PlayerResult::Win,
                PlayerResult::Loss,
                PlayerResult::Win,
                PlayerResult::Win,
            ]
        );
    }

    #[test]
    fn test_form_uses_most_recent_five() {
        let matches = series(&[
            ("X", "o", 0, 3),
            ("X", "o", 1, 1),
            ("X", "o", 3, 0),
            ("X", "o", 3, 0),
            ("X", "o", 3, 0),
            ("X", "o", 3, 0),
        ]);

        let form = calculate_form("X", &matches).unwrap();
        // Oldest loss drops out
        assert_eq!(form.form, 90);
        assert_eq!(form.last5_matches[4], PlayerResult::Draw);
    }

    #[test]
    fn test_form_excludes_short_history() {
        let matches = series(&[
            ("X", "o", 1, 0),
            ("X", "o", 1, 0),
            ("X", "o", 1, 0),
            ("X", "o", 1, 0),
        ]);
        assert!(calculate_form("X", &matches).is_none());
    }

    #[test]
    fn test_form_bounded_multiple_of_ten() {
        let scores = [(0, 0), (1, 0), (0, 1), (2, 2), (3, 1), (1, 4), (0, 0)];
        let rows: Vec<(&str, &str, u32, u32)> =
            scores.iter().map(|(a, b)| ("X", "o", *a, *b)).collect();
        let matches = series(&rows);

        for handle in ["X", "o"] {
            let form = calculate_form(handle, &matches).unwrap();
            assert!(form.form <= 100);
            assert_eq!(form.form % 10, 0);
        }
    }
}
