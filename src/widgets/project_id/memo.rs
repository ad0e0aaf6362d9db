/// Prior-value memo for change detection across updates.
///
/// Two states: nothing seen yet, or holding the last observed value.
/// The first observation only records; later ones report a change when
/// the value differs from the stored one.
#[derive(Debug, Clone, Default)]
pub enum PropMemo<T> {
    #[default]
    Uninitialized,
    HasValue(T),
}

impl<T: PartialEq + Clone> PropMemo<T> {
    pub fn new() -> Self {
        PropMemo::Uninitialized
    }

    /// Record `current`. Returns the previous value if it differs.
    pub fn observe(&mut self, current: &T) -> Option<T> {
        match self {
            PropMemo::Uninitialized => {
                *self = PropMemo::HasValue(current.clone());
                None
            }
            PropMemo::HasValue(prev) if *prev == *current => None,
            PropMemo::HasValue(prev) => Some(std::mem::replace(prev, current.clone())),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            PropMemo::Uninitialized => None,
            PropMemo::HasValue(v) => Some(v),
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self, PropMemo::HasValue(_))
    }
}
