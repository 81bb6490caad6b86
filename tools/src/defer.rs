use std::mem::ManuallyDrop;

/// Run a statement when the enclosing scope exits, including by unwinding.
#[macro_export]
macro_rules! defer {
    ($f:stmt ;) => {
        let _guard = $crate::defer::Defer::new(
            #[allow(redundant_semicolons)]
            || {
                $f;
            },
        );
    };
}

pub struct Defer<F: FnOnce()>(ManuallyDrop<F>);

impl<F: FnOnce()> Defer<F> {
    pub fn new(f: F) -> Self {
        Self(ManuallyDrop::new(f))
    }
}

impl<F: FnOnce()> Drop for Defer<F> {
    fn drop(&mut self) {
        // SAFETY: taken exactly once, and never touched again
        let f = unsafe { ManuallyDrop::take(&mut self.0) };
        f();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    #[test]
    fn runs_in_reverse_order_at_scope_exit() {
        let log = Cell::new(0);
        {
            defer! { log.set(log.get() * 10 + 1); }
            defer! { log.set(log.get() * 10 + 2); }
            assert_eq!(log.get(), 0);
        }
        assert_eq!(log.get(), 21);
    }
}
