use std::fmt;
use std::rc::Rc;

/// Callback passed down to child components.
///
/// Clones share identity. Two handles built by separate calls to
/// [`Handle::new`] are never [`Handle::same`], even when the closures are
/// textually identical.
pub struct Handle<A> {
    callback: Rc<dyn Fn(A)>,
}

impl<A> Handle<A> {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(A) + 'static,
    {
        Self {
            callback: Rc::new(callback),
        }
    }

    pub fn call(&self, arg: A) {
        (self.callback)(arg)
    }

    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<A> Clone for Handle<A> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<A> fmt::Debug for Handle<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:p})", Rc::as_ptr(&self.callback) as *const ())
    }
}
