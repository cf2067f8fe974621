use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

use crate::core::state::AppState;
use crate::models::university::{University, UniversitySeed};
use crate::utils::id::{is_valid_id, new_id};
use crate::wal::wal::WalOperation;

// this runs at boot time
pub fn apply_wal_operations(state: &AppState, operations: &[WalOperation]) -> Result<()> {
    for op in operations {
        match op {
            WalOperation::InsertUser(user) => {
                if let Err(e) = state.users.insert(user.clone()) {
                    warn!(user_id = %user.id, error = %e, "Skipping conflicting user in WAL");
                }
            }
            WalOperation::InsertReview(review) => {
                if let Err(e) = state.reviews.insert(review.clone()) {
                    warn!(review_id = %review.id, error = %e, "Skipping conflicting review in WAL");
                }
            }
            WalOperation::UpsertUniversity(university) => {
                state.universities.upsert(university.clone());
            }
        }
    }
    Ok(())
}

/// Load universities from a JSON seed file
///
/// Slugs already in the catalog are left untouched, so replayed rating
/// aggregates survive a restart. Returns the number of universities added.
pub fn seed_universities(state: &AppState, path: &Path) -> Result<usize> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read seed file: {}", path.display()))?;

    let seeds: Vec<UniversitySeed> = serde_json::from_str(&content)
        .context("Failed to parse seed file")?;

    let mut added = 0;
    for seed in seeds {
        if seed.slug.trim().is_empty() {
            warn!(title = %seed.title, "Seed entry without slug, skipping");
            continue;
        }

        if state.universities.get_by_slug(&seed.slug).is_some() {
            continue;
        }

        let id = seed.id.filter(|id| is_valid_id(id)).unwrap_or_else(new_id);
        if let Some(existing) = state.universities.get(&id) {
            warn!(
                id = %id,
                seed_slug = %seed.slug,
                existing_slug = %existing.slug,
                "Seed entry reuses the id of a catalog university, skipping"
            );
            continue;
        }

        let university = University {
            id,
            slug: seed.slug,
            title: seed.title,
            location: seed.location,
            description: seed.description,
            logo: seed.logo,
            overall_rating: 0.0,
            education_rating: 0.0,
            facility_rating: 0.0,
            social_rating: 0.0,
            admin_rating: 0.0,
            total_ratings: 0,
        };

        state
            .wal
            .log_operation(&WalOperation::UpsertUniversity(university.clone()))
            .context("Failed to log seeded university to WAL")?;
        state.universities.upsert(university);
        added += 1;
    }

    info!(
        added,
        universities = state.universities.len(),
        "Catalog seeded"
    );

    Ok(added)
}
