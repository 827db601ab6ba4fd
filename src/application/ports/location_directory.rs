use crate::domain::AccessibilityRecord;

pub trait LocationDirectory: Send + Sync {
    /// Case-insensitive lookup. Absent or unknown names yield
    /// [`AccessibilityRecord::unknown`].
    fn resolve(&self, location: Option<&str>) -> AccessibilityRecord;
}
