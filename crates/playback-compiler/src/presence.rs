//! Tool presence oracle.

/// Answers whether an executable can be found on the search path.
pub trait ToolPresence {
    fn is_present(&self, tool: &str) -> bool;
}

impl<F> ToolPresence for F
where
    F: Fn(&str) -> bool,
{
    fn is_present(&self, tool: &str) -> bool {
        self(tool)
    }
}
