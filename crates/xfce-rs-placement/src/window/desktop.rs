use slotmap::SlotMap;
use tracing::debug;

use crate::core::{Direction, Point, Rect};
use crate::window::output::{Output, OutputId};
use crate::window::view::{View, ViewId};

/// Views, outputs and the stacking order: the data the placement engine reads
/// and writes through its narrow view/output API.
#[derive(Debug, Default)]
pub struct Desktop {
    views: SlotMap<ViewId, View>,
    outputs: SlotMap<OutputId, Output>,
    /// Bottom to top.
    stacking: Vec<ViewId>,
}

impl Desktop {
    pub fn new() -> Self {
        Self::default()
    }

    // Outputs

    pub fn add_output(&mut self, output: Output) -> OutputId {
        debug!("Adding output {} at {:?}", output.name, output.geometry);
        self.outputs.insert(output)
    }

    pub fn remove_output(&mut self, id: OutputId) -> Option<Output> {
        let output = self.outputs.remove(id)?;
        for (_, view) in self.views.iter_mut() {
            if view.output == Some(id) {
                view.output = None;
            }
        }
        Some(output)
    }

    pub fn output(&self, id: OutputId) -> Option<&Output> {
        self.outputs.get(id)
    }

    pub fn output_mut(&mut self, id: OutputId) -> Option<&mut Output> {
        self.outputs.get_mut(id)
    }

    pub fn outputs(&self) -> impl Iterator<Item = (OutputId, &Output)> {
        self.outputs.iter()
    }

    pub fn usable_outputs(&self) -> impl Iterator<Item = (OutputId, &Output)> {
        self.outputs.iter().filter(|(_, o)| o.is_usable())
    }

    pub fn output_by_name(&self, name: &str) -> Option<OutputId> {
        self.outputs.iter().find(|(_, o)| o.name == name).map(|(id, _)| id)
    }

    /// Output containing `p`, or the one closest to it. Usability is not considered.
    pub fn nearest_output(&self, p: Point) -> Option<OutputId> {
        let mut best: Option<(OutputId, i64)> = None;
        for (id, output) in self.outputs.iter() {
            let dist = output.geometry.distance_sq(p);
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((id, dist));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Whether another usable output lies beyond `id` in `direction`,
    /// sharing at least one pixel row/column with it.
    pub fn has_neighbor(&self, id: OutputId, direction: Direction) -> bool {
        let Some(output) = self.outputs.get(id) else {
            return false;
        };
        let g = output.geometry;
        self.usable_outputs().filter(|(other, _)| *other != id).any(|(_, o)| {
            let og = o.geometry;
            match direction {
                Direction::Left => og.right() <= g.x && Rect::spans_overlap(g.y, g.bottom(), og.y, og.bottom()),
                Direction::Right => og.x >= g.right() && Rect::spans_overlap(g.y, g.bottom(), og.y, og.bottom()),
                Direction::Up => og.bottom() <= g.y && Rect::spans_overlap(g.x, g.right(), og.x, og.right()),
                Direction::Down => og.y >= g.bottom() && Rect::spans_overlap(g.x, g.right(), og.x, og.right()),
            }
        })
    }

    // Views

    /// Add a view on top of the stack and assign it to the output under its centre.
    pub fn add_view(&mut self, mut view: View) -> ViewId {
        if view.output.is_none() {
            view.output = self.nearest_output(view.current.center());
        }
        let id = self.views.insert(view);
        self.stacking.push(id);
        id
    }

    pub fn remove_view(&mut self, id: ViewId) -> Option<View> {
        let view = self.views.remove(id)?;
        self.stacking.retain(|v| *v != id);
        for (_, other) in self.views.iter_mut() {
            if other.parent == Some(id) {
                other.parent = None;
            }
        }
        Some(view)
    }

    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.views.get(id)
    }

    pub fn view_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.get_mut(id)
    }

    pub fn contains_view(&self, id: ViewId) -> bool {
        self.views.contains_key(id)
    }

    pub fn views(&self) -> impl Iterator<Item = (ViewId, &View)> {
        self.views.iter()
    }

    pub fn views_mut(&mut self) -> impl Iterator<Item = (ViewId, &mut View)> {
        self.views.iter_mut()
    }

    /// Topmost first.
    pub fn stacking_top_down(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.stacking.iter().rev().copied()
    }

    pub fn raise(&mut self, id: ViewId) {
        if let Some(pos) = self.stacking.iter().position(|v| *v == id) {
            let id = self.stacking.remove(pos);
            self.stacking.push(id);
        }
    }

    /// Apply a new geometry. Bookkeeping is synchronous even though the client
    /// may commit the matching buffer later.
    pub fn set_geometry(&mut self, id: ViewId, geometry: Rect) -> bool {
        match self.views.get_mut(id) {
            Some(view) => {
                view.pending = geometry;
                view.current = geometry;
                true
            }
            None => false,
        }
    }

    /// Reassign the view to the output under the centre of its geometry.
    pub fn discover_output(&mut self, id: ViewId) -> Option<OutputId> {
        let center = self.views.get(id)?.current.center();
        let output = self.nearest_output(center);
        if let Some(view) = self.views.get_mut(id) {
            view.output = output;
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dual_head() -> (Desktop, OutputId, OutputId) {
        let mut desktop = Desktop::new();
        let left = desktop.add_output(Output::new("DP-1", Rect::new(0, 0, 1920, 1080)));
        let right = desktop.add_output(Output::new("DP-2", Rect::new(1920, 0, 1920, 1080)));
        (desktop, left, right)
    }

    #[test]
    fn test_nearest_output() {
        let (desktop, left, right) = dual_head();
        assert_eq!(desktop.nearest_output(Point::new(100, 100)), Some(left));
        assert_eq!(desktop.nearest_output(Point::new(2000, 100)), Some(right));
        // Outside the layout: closest by distance.
        assert_eq!(desktop.nearest_output(Point::new(5000, 2000)), Some(right));
        assert_eq!(desktop.nearest_output(Point::new(-50, 500)), Some(left));
    }

    #[test]
    fn test_neighbors() {
        let (mut desktop, left, right) = dual_head();
        assert!(desktop.has_neighbor(left, Direction::Right));
        assert!(!desktop.has_neighbor(left, Direction::Left));
        assert!(desktop.has_neighbor(right, Direction::Left));
        assert!(!desktop.has_neighbor(right, Direction::Up));

        // Disabled outputs do not count as neighbors.
        desktop.output_mut(right).unwrap().enabled = false;
        assert!(!desktop.has_neighbor(left, Direction::Right));
    }

    #[test]
    fn test_stacking_and_removal() {
        let (mut desktop, left, _) = dual_head();
        let a = desktop.add_view(View::new("a", Rect::new(10, 10, 100, 100)));
        let b = desktop.add_view(View::new("b", Rect::new(2000, 10, 100, 100)));
        assert_eq!(desktop.view(a).unwrap().output, Some(left));
        assert_eq!(desktop.stacking_top_down().collect::<Vec<_>>(), vec![b, a]);

        desktop.raise(a);
        assert_eq!(desktop.stacking_top_down().collect::<Vec<_>>(), vec![a, b]);

        desktop.remove_view(a);
        assert!(desktop.view(a).is_none());
        assert_eq!(desktop.stacking_top_down().collect::<Vec<_>>(), vec![b]);
    }
}
