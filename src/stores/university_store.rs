use crate::models::university::University;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory university catalog, keyed by id with a slug index
pub struct UniversityStore {
    universities: DashMap<String, Arc<University>>,
    by_slug: DashMap<String, String>,
}

impl UniversityStore {
    pub fn new() -> Self {
        Self {
            universities: DashMap::new(),
            by_slug: DashMap::new(),
        }
    }

    /// Insert or replace a university by id
    /// If the slug changed, the old slug is released
    pub fn upsert(&self, university: University) -> Arc<University> {
        let university = Arc::new(university);
        if let Some(previous) = self
            .universities
            .insert(university.id.clone(), Arc::clone(&university))
        {
            if previous.slug != university.slug {
                self.by_slug.remove(&previous.slug);
            }
        }
        self.by_slug
            .insert(university.slug.clone(), university.id.clone());
        university
    }

    pub fn get(&self, id: &str) -> Option<Arc<University>> {
        self.universities.get(id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn get_by_slug(&self, slug: &str) -> Option<Arc<University>> {
        let id = self.by_slug.get(slug)?.value().clone();
        self.get(&id)
    }

    /// All universities ordered by title
    pub fn list(&self) -> Vec<Arc<University>> {
        let mut universities: Vec<Arc<University>> = self
            .universities
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        universities.sort_by(|a, b| a.title.cmp(&b.title));
        universities
    }

    pub fn len(&self) -> usize {
        self.universities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universities.is_empty()
    }
}

impl Default for UniversityStore {
    fn default() -> Self {
        Self::new()
    }
}
