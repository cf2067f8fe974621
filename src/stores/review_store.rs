use crate::core::error::StoreError;
use crate::models::review::Review;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory review store, indexed by university
///
/// A user holds at most one review per university.
pub struct ReviewStore {
    reviews: DashMap<String, Arc<Review>>,
    by_university: DashMap<String, Vec<String>>,
    by_author: DashMap<(String, String), String>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self {
            reviews: DashMap::new(),
            by_university: DashMap::new(),
            by_author: DashMap::new(),
        }
    }

    pub fn insert(&self, review: Review) -> Result<Arc<Review>, StoreError> {
        let author_key = (review.user_id.clone(), review.university_id.clone());
        match self.by_author.entry(author_key) {
            Entry::Occupied(_) => return Err(StoreError::DuplicateReview),
            Entry::Vacant(slot) => {
                slot.insert(review.id.clone());
            }
        }

        self.by_university
            .entry(review.university_id.clone())
            .or_default()
            .push(review.id.clone());

        let review = Arc::new(review);
        self.reviews.insert(review.id.clone(), Arc::clone(&review));
        Ok(review)
    }

    pub fn remove(&self, id: &str) -> Option<Arc<Review>> {
        let (_, review) = self.reviews.remove(id)?;
        self.by_author
            .remove(&(review.user_id.clone(), review.university_id.clone()));
        if let Some(mut ids) = self.by_university.get_mut(&review.university_id) {
            ids.retain(|existing| existing != id);
        }
        Some(review)
    }

    pub fn get(&self, id: &str) -> Option<Arc<Review>> {
        self.reviews.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Reviews for a university, newest first
    pub fn list_by_university(&self, university_id: &str) -> Vec<Arc<Review>> {
        let ids = match self.by_university.get(university_id) {
            Some(ids) => ids.value().clone(),
            None => return Vec::new(),
        };

        let mut reviews: Vec<Arc<Review>> = ids.iter().filter_map(|id| self.get(id)).collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}

impl Default for ReviewStore {
    fn default() -> Self {
        Self::new()
    }
}
