use std::collections::hash_map::{Entry, HashMap, Values};

use crate::reporter::event::Merge;

/// A record accumulated out of one or more engine payloads sharing an id.
pub trait Entity {
    type Raw: Merge;

    const KIND: &'static str;

    fn id(raw: &Self::Raw) -> &str;

    fn create(raw: &Self::Raw) -> Self;

    fn raw_mut(&mut self) -> &mut Self::Raw;
}

/// Records by id. Later payloads for a known id are merged into the existing record.
#[derive(Debug)]
pub struct EntityCache<T> {
    entries: HashMap<String, T>,
}

impl<T> Default for EntityCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T: Entity> EntityCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn has(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get_or_create(&mut self, raw: &T::Raw) -> &mut T {
        match self.entries.entry(T::id(raw).to_owned()) {
            Entry::Occupied(entry) => {
                trace!("Merging {} '{}' into cached record", T::KIND, entry.key());
                let record = entry.into_mut();
                record.raw_mut().merge(raw);
                record
            }
            Entry::Vacant(entry) => {
                trace!("Caching new {} '{}'", T::KIND, entry.key());
                entry.insert(T::create(raw))
            }
        }
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.entries.get_mut(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> Values<'_, String, T> {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::event::RawSuite;
    use crate::reporter::record::SuiteRecord;

    fn raw(id: &str, description: Option<&str>, status: Option<&str>) -> RawSuite {
        RawSuite {
            id: id.to_owned(),
            description: description.map(str::to_owned),
            full_name: None,
            status: status.map(str::to_owned),
        }
    }

    #[test]
    fn test_creates_record_once_per_id() {
        let mut cache = EntityCache::<SuiteRecord>::new();
        assert!(cache.is_empty());
        assert!(!cache.has("suite1"));

        cache.get_or_create(&raw("suite1", Some("A"), None));
        cache.get_or_create(&raw("suite1", None, Some("finished")));
        cache.get_or_create(&raw("suite2", Some("B"), None));

        assert_eq!(cache.len(), 2);
        assert!(cache.has("suite1"));
        assert!(cache.has("suite2"));
    }

    #[test]
    fn test_later_payload_merges_into_existing_record() {
        let mut cache = EntityCache::<SuiteRecord>::new();
        cache.get_or_create(&raw("suite1", Some("A"), None)).passed = false;

        let record = cache.get_or_create(&raw("suite1", None, Some("finished")));

        assert_eq!(record.raw.description.as_deref(), Some("A"));
        assert_eq!(record.raw.status.as_deref(), Some("finished"));
        assert!(!record.passed);
    }
}
