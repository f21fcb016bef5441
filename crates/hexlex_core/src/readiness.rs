//! Poll-style availability of values that may still be loading or computing.

/// Either a value that is available now, or a marker that it is not yet.
///
/// Returned instead of blocking: callers retry on a later tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Readiness<T> {
    /// The value is available.
    Ready(T),
    /// The value is being loaded or computed; retry later.
    Pending,
}

impl<T> Readiness<T> {
    /// Returns true if the value is available.
    #[inline]
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Converts into an `Option`, discarding the pending marker.
    #[inline]
    #[must_use]
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending => None,
        }
    }

    /// Maps the ready value.
    #[inline]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Readiness<U> {
        match self {
            Self::Ready(value) => Readiness::Ready(f(value)),
            Self::Pending => Readiness::Pending,
        }
    }
}

impl<T> From<Option<T>> for Readiness<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Pending, Self::Ready)
    }
}
