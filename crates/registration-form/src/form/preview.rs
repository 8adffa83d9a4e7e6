use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::domain::ResumeFile;

const PREVIEW_SCHEME: &str = "blob:registration-form";

/// Revocable handle the host can render an uploaded resume from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreviewRef(String);

impl PreviewRef {
    pub fn generate() -> Self {
        Self(format!("{PREVIEW_SCHEME}/{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreviewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of preview handles, so the controller can be exercised without a real host.
pub trait PreviewStore: Send + Sync {
    fn create(&self, file: &ResumeFile) -> PreviewRef;
    fn release(&self, preview: &PreviewRef);
}

/// Keeps live handles in memory and forgets them on release.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPreviewStore {
    live: Arc<Mutex<BTreeMap<PreviewRef, String>>>,
}

impl InMemoryPreviewStore {
    /// Number of handles created and not yet released.
    pub fn live_count(&self) -> usize {
        self.live.lock().expect("preview mutex poisoned").len()
    }

    pub fn is_live(&self, preview: &PreviewRef) -> bool {
        self.live
            .lock()
            .expect("preview mutex poisoned")
            .contains_key(preview)
    }

    pub fn file_name(&self, preview: &PreviewRef) -> Option<String> {
        self.live
            .lock()
            .expect("preview mutex poisoned")
            .get(preview)
            .cloned()
    }
}

impl PreviewStore for InMemoryPreviewStore {
    fn create(&self, file: &ResumeFile) -> PreviewRef {
        let preview = PreviewRef::generate();
        self.live
            .lock()
            .expect("preview mutex poisoned")
            .insert(preview.clone(), file.file_name.clone());
        debug!(%preview, file = %file.file_name, "resume preview created");
        preview
    }

    fn release(&self, preview: &PreviewRef) {
        let removed = self
            .live
            .lock()
            .expect("preview mutex poisoned")
            .remove(preview);
        if removed.is_some() {
            debug!(%preview, "resume preview released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf() -> ResumeFile {
        ResumeFile::new("jane-doe.pdf", "application/pdf", 48_213)
    }

    #[test]
    fn generated_references_are_unique_blob_urls() {
        let first = PreviewRef::generate();
        let second = PreviewRef::generate();
        assert_ne!(first, second);
        assert!(first.as_str().starts_with("blob:registration-form/"));
    }

    #[test]
    fn release_forgets_handles_and_tolerates_repeats() {
        let store = InMemoryPreviewStore::default();
        let preview = store.create(&pdf());
        assert!(store.is_live(&preview));
        assert_eq!(store.file_name(&preview).as_deref(), Some("jane-doe.pdf"));

        store.release(&preview);
        store.release(&preview);
        assert!(!store.is_live(&preview));
        assert_eq!(store.live_count(), 0);
    }
}
