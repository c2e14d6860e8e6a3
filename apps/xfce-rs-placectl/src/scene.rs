use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::debug;

use xfce_rs_placement::{
    Action, Axes, Edges, Event, Modifiers, OutputId, PlacementState, Presenter, OverlayTimer, Rect, View, ViewFlags,
    ViewId, WindowManager,
};

/// A recorded desktop: outputs, views and the input to replay against them.
#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub outputs: Vec<SceneOutput>,
    #[serde(default)]
    pub views: Vec<SceneView>,
    /// View holding keyboard focus when the replay starts.
    pub focus: Option<String>,
    #[serde(default)]
    pub events: Vec<SceneEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneOutput {
    pub name: String,
    pub geometry: Rect,
    pub usable_area: Option<Rect>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenePlacement {
    #[default]
    Floating,
    Tiled,
    Maximized,
    Fullscreen,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneView {
    pub name: String,
    pub geometry: Rect,
    /// Floating geometry for views that start tiled or maximized.
    pub natural: Option<Rect>,
    #[serde(default)]
    pub placement: ScenePlacement,
    /// Edges for `placement = "tiled"`.
    pub edges: Option<Edges>,
    pub parent: Option<String>,
    #[serde(default = "default_true")]
    pub focusable: bool,
    #[serde(default)]
    pub fixed_position: bool,
    #[serde(default)]
    pub reserves_strut: bool,
    #[serde(default)]
    pub modal: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneEvent {
    Motion { x: i32, y: i32 },
    Press { x: i32, y: i32 },
    Release,
    Modifiers { modifiers: Modifiers },
    Move { view: String },
    Resize { view: String, edges: Option<Edges> },
    Next,
    Previous,
    Confirm,
    Cancel,
    MenuOpen,
    MenuClose,
    /// Let time pass so a pending overlay timer can fire.
    Wait { ms: u64 },
    Destroy { view: String },
    UsableArea { output: String, area: Rect },
    EnableOutput { output: String, enabled: bool },
    RemoveOutput { output: String },
}

/// One replay step after names were resolved.
#[derive(Debug, Clone)]
pub enum Step {
    Event(Event),
    Wait(Duration),
}

fn default_true() -> bool {
    true
}

/// Handles for the named objects of a scene.
#[derive(Debug, Default)]
pub struct Names {
    pub views: HashMap<String, ViewId>,
    pub outputs: HashMap<String, OutputId>,
}

impl Names {
    fn view(&self, name: &str) -> Result<ViewId> {
        self.views.get(name).copied().ok_or_else(|| anyhow!("Unknown view '{}'", name))
    }

    fn output(&self, name: &str) -> Result<OutputId> {
        self.outputs.get(name).copied().ok_or_else(|| anyhow!("Unknown output '{}'", name))
    }

    pub fn view_name(&self, id: ViewId) -> Option<&str> {
        self.views.iter().find(|(_, v)| **v == id).map(|(name, _)| name.as_str())
    }
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read scene {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse scene {}", path.display()))
    }

    /// Add the scene's outputs and views to `wm` and resolve the event list.
    pub fn populate<P: Presenter, T: OverlayTimer>(&self, wm: &mut WindowManager<P, T>) -> Result<(Names, Vec<Step>)> {
        let mut names = Names::default();

        for output in &self.outputs {
            let mut o = xfce_rs_placement::Output::new(output.name.clone(), output.geometry);
            if let Some(area) = output.usable_area {
                o = o.with_usable_area(area);
            }
            o.enabled = output.enabled;
            let id = wm.add_output(o);
            names.outputs.insert(output.name.clone(), id);
        }

        for view in &self.views {
            let id = wm.add_view(self.build_view(view, &names)?);
            if names.views.insert(view.name.clone(), id).is_some() {
                return Err(anyhow!("View '{}' declared twice", view.name));
            }
        }

        if let Some(focus) = &self.focus {
            wm.seat.keyboard_focus = Some(names.view(focus)?);
        }

        let steps = self
            .events
            .iter()
            .map(|event| resolve(event, &names))
            .collect::<Result<Vec<_>>>()?;
        debug!("Scene resolved: {} outputs, {} views, {} steps", names.outputs.len(), names.views.len(), steps.len());
        Ok((names, steps))
    }

    fn build_view(&self, view: &SceneView, names: &Names) -> Result<View> {
        let placement = match view.placement {
            ScenePlacement::Floating => PlacementState::Floating,
            ScenePlacement::Tiled => PlacementState::Tiled {
                edges: view.edges.ok_or_else(|| anyhow!("Tiled view '{}' needs edges", view.name))?,
            },
            ScenePlacement::Maximized => PlacementState::Maximized { axes: Axes::all() },
            ScenePlacement::Fullscreen => PlacementState::Fullscreen,
        };

        let mut flags = ViewFlags::empty();
        flags.set(ViewFlags::FIXED_POSITION, view.fixed_position);
        flags.set(ViewFlags::RESERVES_STRUT, view.reserves_strut);
        flags.set(ViewFlags::MODAL, view.modal);

        let mut built = View::new(view.name.clone(), view.geometry).with_flags(flags).with_placement(placement);
        built.focusable = view.focusable;
        if let Some(natural) = view.natural {
            built.natural = natural;
        }
        if let Some(parent) = &view.parent {
            built = built.with_parent(names.view(parent)?);
        }
        Ok(built)
    }
}

fn resolve(event: &SceneEvent, names: &Names) -> Result<Step> {
    let event = match event {
        SceneEvent::Motion { x, y } => Event::PointerMotion { x: *x, y: *y },
        SceneEvent::Press { x, y } => Event::ButtonPress { x: *x, y: *y },
        SceneEvent::Release => Event::ButtonRelease,
        SceneEvent::Modifiers { modifiers } => Event::ModifiersChanged(*modifiers),
        SceneEvent::Move { view } => Event::Action(Action::Move(names.view(view)?)),
        SceneEvent::Resize { view, edges } => Event::Action(Action::Resize(names.view(view)?, *edges)),
        SceneEvent::Next => Event::Action(Action::NextWindow),
        SceneEvent::Previous => Event::Action(Action::PreviousWindow),
        SceneEvent::Confirm => Event::Action(Action::CycleConfirm),
        SceneEvent::Cancel => Event::Action(Action::Cancel),
        SceneEvent::MenuOpen => Event::Action(Action::MenuOpen),
        SceneEvent::MenuClose => Event::Action(Action::MenuClose),
        SceneEvent::Wait { ms } => return Ok(Step::Wait(Duration::from_millis(*ms))),
        SceneEvent::Destroy { view } => Event::ViewDestroyed(names.view(view)?),
        SceneEvent::UsableArea { output, area } => Event::OutputUsableAreaChanged {
            output: names.output(output)?,
            usable_area: *area,
        },
        SceneEvent::EnableOutput { output, enabled } => Event::OutputEnabled {
            output: names.output(output)?,
            enabled: *enabled,
        },
        SceneEvent::RemoveOutput { output } => Event::OutputRemoved(names.output(output)?),
    };
    Ok(Step::Event(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use xfce_rs_placement::{Desktop, ManualTimer, NullPresenter, PlacementConfig};

    const SCENE: &str = r#"
focus = "term"

[[outputs]]
name = "DP-1"
geometry = { x = 0, y = 0, width = 1920, height = 1080 }

[[views]]
name = "term"
geometry = { x = 600, y = 300, width = 400, height = 300 }

[[views]]
name = "editor"
geometry = { x = 0, y = 0, width = 960, height = 1080 }
placement = "tiled"
edges = "LEFT"

[[events]]
type = "move"
view = "term"

[[events]]
type = "motion"
x = 5
y = 500

[[events]]
type = "wait"
ms = 600

[[events]]
type = "release"
"#;

    #[test]
    fn test_scene_parses_and_resolves() {
        let scene: Scene = toml::from_str(SCENE).unwrap();
        let mut wm = WindowManager::new(PlacementConfig::default(), Desktop::new(), NullPresenter, ManualTimer::new());
        let (names, steps) = scene.populate(&mut wm).unwrap();

        let term = names.views["term"];
        let editor = names.views["editor"];
        assert_eq!(wm.seat.keyboard_focus, Some(term));
        assert_eq!(
            wm.desktop.view(editor).unwrap().placement,
            PlacementState::Tiled { edges: Edges::LEFT }
        );
        assert_eq!(steps.len(), 4);
        assert!(matches!(steps[0], Step::Event(Event::Action(Action::Move(v))) if v == term));
        assert!(matches!(steps[2], Step::Wait(d) if d == Duration::from_millis(600)));
        assert_eq!(names.view_name(editor), Some("editor"));
    }

    #[test]
    fn test_unknown_view_is_an_error() {
        let scene: Scene = toml::from_str("[[events]]\ntype = \"destroy\"\nview = \"ghost\"\n").unwrap();
        let mut wm = WindowManager::new(PlacementConfig::default(), Desktop::new(), NullPresenter, ManualTimer::new());
        assert!(scene.populate(&mut wm).is_err());
    }
}
