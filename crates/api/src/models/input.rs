use super::script::ScriptModel;
use std::any::Any;
use std::fmt::Display;

/// Anything a host may hand to the outline as its input element.
///
/// Hosts pass arbitrary objects; only a [`ScriptModel`] is a supported input. The `Display`
/// rendering is what the outline shows when an input is rejected.
pub trait OutlineInput: Display {
    /// Cast to Any for downcasting to concrete types.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + Display> OutlineInput for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn OutlineInput + '_ {
    pub fn as_script_model(&self) -> Option<&ScriptModel> {
        self.as_any().downcast_ref::<ScriptModel>()
    }
}
