//! Two-state lifecycle for components that need an initialization step

use crate::domain::DomainError;

/// Lifecycle of a component that becomes usable after `initialize()`
#[derive(Debug, Clone, Default)]
pub enum Lifecycle<T> {
    #[default]
    Uninitialized,
    Ready(T),
}

impl<T> Lifecycle<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Borrow the ready value or fail with a precondition error naming `component`
    pub fn ready(&self, component: &str) -> Result<&T, DomainError> {
        match self {
            Self::Ready(value) => Ok(value),
            Self::Uninitialized => Err(DomainError::not_initialized(component)),
        }
    }

    /// Move back to `Uninitialized`, returning the previous ready value
    pub fn reset(&mut self) -> Option<T> {
        match std::mem::take(self) {
            Self::Ready(value) => Some(value),
            Self::Uninitialized => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uninitialized_fails() {
        let state: Lifecycle<u8> = Lifecycle::default();

        assert!(!state.is_ready());
        assert_eq!(
            state.ready("Widget"),
            Err(DomainError::not_initialized("Widget"))
        );
    }

    #[test]
    fn test_ready_and_reset() {
        let mut state = Lifecycle::Ready(7u8);

        assert_eq!(state.ready("Widget"), Ok(&7));
        assert_eq!(state.reset(), Some(7));
        assert!(!state.is_ready());
        assert_eq!(state.reset(), None);
    }
}
