use crate::core::state::AppState;
use crate::models::university::University;

/// Universities matching `slug` (zero or one), or the whole catalog when no
/// slug is given
pub fn read(state: &AppState, slug: Option<&str>) -> Vec<University> {
    match slug.map(str::trim) {
        Some(slug) if !slug.is_empty() => state
            .universities
            .get_by_slug(slug)
            .map(|u| vec![(*u).clone()])
            .unwrap_or_default(),
        _ => state
            .universities
            .list()
            .into_iter()
            .map(|u| (*u).clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::test_support::create_test_state;

    fn university(id: &str, slug: &str, title: &str) -> University {
        University {
            id: id.to_string(),
            slug: slug.to_string(),
            title: title.to_string(),
            location: "Davao".to_string(),
            description: "A university".to_string(),
            logo: String::new(),
            overall_rating: 0.0,
            education_rating: 0.0,
            facility_rating: 0.0,
            social_rating: 0.0,
            admin_rating: 0.0,
            total_ratings: 0,
        }
    }

    #[test]
    fn test_read_by_slug() {
        let (state, _dir) = create_test_state();
        state.universities.upsert(university("1", "addu", "Ateneo de Davao"));

        let found = read(&state, Some("addu"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Ateneo de Davao");

        assert!(read(&state, Some("missing")).is_empty());
    }

    #[test]
    fn test_read_without_slug_lists_all() {
        let (state, _dir) = create_test_state();
        state.universities.upsert(university("1", "b", "Beta"));
        state.universities.upsert(university("2", "a", "Alpha"));

        let all = read(&state, None);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "Alpha");

        assert_eq!(read(&state, Some("  ")).len(), 2);
    }
}
