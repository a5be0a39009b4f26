//! Component trait and type recovery for stored components

use std::any::Any;
use std::fmt;

/// Access to a component as `Any`, implemented for every `'static` type.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Trait for components.
///
/// The registry only ever looks at [`Component::component_name`]; the name is
/// the class tag rows are filed under, so it must be the same for every value
/// of a given type.
pub trait Component: Any + AsAny + fmt::Debug {
    fn component_name(&self) -> &str;
}

/// Components whose class name is known without an instance.
pub trait ComponentClass: Component + Sized {
    const CLASS_NAME: &'static str;
}

impl dyn Component {
    pub fn is<T: Component>(&self) -> bool {
        AsAny::as_any(self).is::<T>()
    }

    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        AsAny::as_any(self).downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        AsAny::as_any_mut(self).downcast_mut::<T>()
    }
}
