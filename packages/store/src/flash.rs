//! One-shot messages carried across a navigation (e.g. "registration succeeded"
//! shown on the login page after the register page redirects there).

use crate::surface::KeyValueStore;

pub const REGISTRATION_FLASH_KEY: &str = "registrationSuccess";

pub fn set_flash(storage: &dyn KeyValueStore, key: &str, message: &str) {
    if let Err(e) = storage.set(key, message) {
        tracing::warn!(error = %e, key, "could not store flash message");
    }
}

/// Read and remove a flash message so a reload does not show it again.
pub fn take_flash(storage: &dyn KeyValueStore, key: &str) -> Option<String> {
    let message = storage.get(key).ok().flatten()?;
    if let Err(e) = storage.remove(key) {
        tracing::warn!(error = %e, key, "could not clear flash message");
    }
    Some(message).filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;

    #[test]
    fn test_flash_is_read_once() {
        let storage = MemoryStorage::new();
        set_flash(&storage, REGISTRATION_FLASH_KEY, "Registration successful!");

        assert_eq!(
            take_flash(&storage, REGISTRATION_FLASH_KEY),
            Some("Registration successful!".to_string())
        );
        assert!(take_flash(&storage, REGISTRATION_FLASH_KEY).is_none());
    }
}
