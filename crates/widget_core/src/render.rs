//! Re-render gate

use crate::{ControlState, WidgetProps};

/// What the host last rendered
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    props: WidgetProps,
    state: ControlState,
}

impl RenderSnapshot {
    pub fn new(props: WidgetProps, state: ControlState) -> Self {
        Self { props, state }
    }

    pub fn props(&self) -> &WidgetProps {
        &self.props
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }
}

/// Should the host re-run the render path?
///
/// Props are compared by value (all scalars). State is compared shallowly,
/// so a render never walks the encoded blobs.
pub fn should_render(prev: &RenderSnapshot, next_props: &WidgetProps, next_state: &ControlState) -> bool {
    prev.props != *next_props || !prev.state.shallow_eq(next_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_skips_render() {
        let props = WidgetProps::default();
        let state = ControlState::default();
        let snapshot = RenderSnapshot::new(props.clone(), state.clone());
        assert!(!should_render(&snapshot, &props, &state));
    }

    #[test]
    fn test_prop_change_renders() {
        let props = WidgetProps::default();
        let state = ControlState::default();
        let snapshot = RenderSnapshot::new(props.clone(), state.clone());

        let next = WidgetProps {
            disabled: true,
            ..props
        };
        assert!(should_render(&snapshot, &next, &state));
    }

    #[test]
    fn test_state_change_renders() {
        let props = WidgetProps::default();
        let state = ControlState::default();
        let snapshot = RenderSnapshot::new(props.clone(), state.clone());

        let mut next = state.clone();
        next.current_page = 2;
        assert!(should_render(&snapshot, &props, &next));
    }
}
