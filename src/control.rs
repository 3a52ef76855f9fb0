/// Who decides a piece of calendar state.
///
/// An `External` value is owned by the host: the calendar reports what the
/// user did but only the host may replace the value.  An `Internal` value is
/// tracked by the calendar itself and updated in response to user input.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Controlled<T> {
    External(T),
    Internal(T),
}

impl<T> Controlled<T> {
    pub fn get(&self) -> &T {
        match self {
            Controlled::External(v) | Controlled::Internal(v) => v,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Controlled::External(_))
    }

    /// Replace the value if the calendar owns it.  Returns whether the
    /// replacement happened.
    pub fn follow(&mut self, value: T) -> bool {
        match self {
            Controlled::Internal(v) => {
                *v = value;
                true
            }
            Controlled::External(_) => false,
        }
    }

    /// Hand ownership of the value to the calendar, keeping its current
    /// content
    pub fn release(self) -> Controlled<T> {
        match self {
            Controlled::External(v) | Controlled::Internal(v) => Controlled::Internal(v),
        }
    }
}

impl<T: Copy> Controlled<T> {
    pub fn value(&self) -> T {
        *self.get()
    }
}
