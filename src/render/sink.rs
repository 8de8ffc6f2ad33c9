//! Fragments and the sink that receives them.

/// A rendered piece of output handed to the host framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Executable `<script>` markup, meant to be embedded as an HTML component
    /// that runs against the rendered page.
    Script(String),
    /// Raw markup (for example a `<style>` block) to be rendered with HTML
    /// allowed.
    Markup(String),
}

impl Fragment {
    /// Returns the fragment text regardless of its kind.
    pub fn as_str(&self) -> &str {
        match self {
            Fragment::Script(text) | Fragment::Markup(text) => text,
        }
    }

    /// Returns `true` for [`Fragment::Script`].
    pub fn is_script(&self) -> bool {
        matches!(self, Fragment::Script(_))
    }
}

impl std::fmt::Display for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination for generated fragments.
///
/// Implement this for the host's injection mechanism. Emission has no return
/// value: failures inside the host are invisible to this crate.
pub trait RenderSink {
    /// Hands one fragment to the host.
    fn emit(&mut self, fragment: Fragment);
}

/// Collects fragments in emission order. Handy for tests and for hosts that
/// flush output in batches.
impl RenderSink for Vec<Fragment> {
    fn emit(&mut self, fragment: Fragment) {
        self.push(fragment);
    }
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn emit(&mut self, fragment: Fragment) {
        (**self).emit(fragment);
    }
}
