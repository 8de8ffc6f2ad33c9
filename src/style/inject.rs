//! Button style injection.

use tracing::debug;

use super::error::StyleError;
use super::rules::ButtonStyle;
use super::script::{
    global_stylesheet, index_script, label_script, mutation_block, INDEX_ELEMENT, LABEL_ELEMENT,
};
use super::target::Target;
use crate::render::{Fragment, RenderSink};

/// Styles the given buttons by emitting inline scripts to `sink`.
///
/// Call this after the buttons have been rendered. The first target decides
/// the lookup mode (see [`Target`]):
///
/// - labels: one script per label, each styling the first button whose
///   visible text equals the label;
/// - indices: a single script styling the buttons at the listed positions.
///
/// Every script sets the base style, restores it when the pointer leaves the
/// button, and installs hover and click handlers when those rule sets are
/// present.
///
/// # Errors
///
/// Returns [`StyleError::EmptyTargets`] if `targets` is empty; nothing is
/// emitted in that case. Use [`global_button_style`] to style every button.
///
/// # Example
///
/// ```rust
/// use panelkit::{apply_button_style, ButtonStyle, Fragment, Target};
///
/// let style = ButtonStyle::new().style("color", "red");
/// let mut out: Vec<Fragment> = Vec::new();
///
/// apply_button_style(&mut out, &[Target::Index(0), Target::Index(2)], &style).unwrap();
/// assert_eq!(out.len(), 1);
/// assert!(out[0].as_str().contains("[0,2]"));
/// ```
pub fn apply_button_style<S>(
    sink: &mut S,
    targets: &[Target],
    style: &ButtonStyle,
) -> Result<(), StyleError>
where
    S: RenderSink + ?Sized,
{
    let first = targets.first().ok_or(StyleError::EmptyTargets)?;

    if first.is_label() {
        let mutation = mutation_block(style, LABEL_ELEMENT)?;
        let scripts = targets
            .iter()
            .map(|target| label_script(&target.to_string(), &mutation))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(mode = "label", count = scripts.len(), "emitting button style scripts");
        for script in scripts {
            sink.emit(Fragment::Script(script));
        }
    } else {
        let mutation = mutation_block(style, INDEX_ELEMENT)?;
        let script = index_script(targets, &mutation)?;

        debug!(mode = "index", targets = targets.len(), "emitting button style script");
        sink.emit(Fragment::Script(script));
    }

    Ok(())
}

/// Styles every primary button on the page with a `<style>` block.
///
/// Unlike [`apply_button_style`], rule names here are CSS properties
/// (`background-color`, not `backgroundColor`). Hover rules become a
/// `:hover` block and click rules an `:active` block, so the click style
/// only lasts while the button is pressed.
pub fn global_button_style<S>(sink: &mut S, style: &ButtonStyle) -> Result<(), StyleError>
where
    S: RenderSink + ?Sized,
{
    let css = global_stylesheet(style)?;
    debug!("emitting global button stylesheet");
    sink.emit(Fragment::Markup(css));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> ButtonStyle {
        ButtonStyle::new().style("color", "red")
    }

    #[test]
    fn test_empty_targets_emit_nothing() {
        let mut out: Vec<Fragment> = Vec::new();
        let err = apply_button_style(&mut out, &[], &red()).unwrap_err();

        assert!(matches!(err, StyleError::EmptyTargets));
        assert!(out.is_empty());
    }

    #[test]
    fn test_label_mode_one_script_per_label() {
        let mut out: Vec<Fragment> = Vec::new();
        let targets = [Target::from("Save"), Target::from("Cancel")];
        apply_button_style(&mut out, &targets, &red()).unwrap();

        assert_eq!(out.len(), 2);
        assert!(out.iter().all(Fragment::is_script));
        assert!(out[0].as_str().contains("innerText == \"Save\""));
        assert!(out[1].as_str().contains("innerText == \"Cancel\""));
    }

    #[test]
    fn test_label_mode_compares_stray_index_as_text() {
        let mut out: Vec<Fragment> = Vec::new();
        let targets = [Target::from("Save"), Target::from(3usize)];
        apply_button_style(&mut out, &targets, &red()).unwrap();

        assert_eq!(out.len(), 2);
        assert!(out[1].as_str().contains("innerText == \"3\""));
    }

    #[test]
    fn test_index_mode_single_script() {
        let mut out: Vec<Fragment> = Vec::new();
        let targets = [Target::from(1usize), Target::from(4usize)];
        apply_button_style(&mut out, &targets, &red()).unwrap();

        assert_eq!(out.len(), 1);
        let script = out[0].as_str();
        assert!(script.contains("const buttons = [1,4];"));
        assert!(script.contains("elements[buttons[i]].style.color = \"red\";"));
        assert!(!script.contains("innerText"));
    }

    #[test]
    fn test_global_style_emits_markup() {
        let mut out: Vec<Fragment> = Vec::new();
        global_button_style(&mut out, &ButtonStyle::new().style("color", "white")).unwrap();

        assert_eq!(out.len(), 1);
        assert!(!out[0].is_script());
        assert!(out[0].as_str().contains("color: white;"));
    }
}
