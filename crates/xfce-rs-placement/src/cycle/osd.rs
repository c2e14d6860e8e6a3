use crate::config::CycleConfig;
use crate::core::{Point, Rect};
use crate::present::OsdItem;
use crate::window::output::OutputId;
use crate::window::placement::center_in;
use crate::window::view::ViewId;

/// Switcher panel laid out on one output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOsd {
    pub output: OutputId,
    pub panel: Rect,
    pub items: Vec<OsdItem>,
}

impl CycleOsd {
    /// Centre a panel on `area` with one row per entry.
    pub fn layout(output: OutputId, area: Rect, entries: &[(ViewId, String)], config: &CycleConfig) -> Self {
        let padding = config.osd_padding;
        let width = config.osd_width.min(area.width);
        let height = 2 * padding + config.osd_item_height * entries.len() as i32;
        let panel = center_in(area, width, height);

        let items = entries
            .iter()
            .enumerate()
            .map(|(i, (view, title))| OsdItem {
                view: *view,
                title: title.clone(),
                geometry: Rect::new(
                    panel.x + padding,
                    panel.y + padding + config.osd_item_height * i as i32,
                    (width - 2 * padding).max(0),
                    config.osd_item_height,
                ),
            })
            .collect();

        Self { output, panel, items }
    }

    /// Index of the entry under `p`.
    pub fn item_at(&self, p: Point) -> Option<usize> {
        self.items.iter().position(|item| item.geometry.contains(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;
    use crate::window::output::Output;
    use crate::window::view::View;

    #[test]
    fn test_layout_and_hit_test() {
        let mut outputs: SlotMap<OutputId, Output> = SlotMap::with_key();
        let output = outputs.insert(Output::new("DP-1", Rect::new(0, 0, 1920, 1080)));
        let mut views: SlotMap<ViewId, View> = SlotMap::with_key();
        let a = views.insert(View::new("a", Rect::new(0, 0, 10, 10)));
        let b = views.insert(View::new("b", Rect::new(0, 0, 10, 10)));
        let config = CycleConfig::default();

        let osd = CycleOsd::layout(output, Rect::new(0, 0, 1920, 1080), &[(a, "a".into()), (b, "b".into())], &config);
        assert_eq!(osd.panel, Rect::new(660, 490, 600, 100));
        assert_eq!(osd.items[1].geometry, Rect::new(670, 540, 580, 40));
        assert_eq!(osd.item_at(Point::new(700, 545)), Some(1));
        assert_eq!(osd.item_at(Point::new(700, 505)), Some(0));
        assert_eq!(osd.item_at(Point::new(100, 100)), None);
    }

    #[test]
    fn test_narrow_output_clamps_width() {
        let mut outputs: SlotMap<OutputId, Output> = SlotMap::with_key();
        let output = outputs.insert(Output::new("phone", Rect::new(0, 0, 400, 800)));
        let osd = CycleOsd::layout(output, Rect::new(0, 0, 400, 800), &[], &CycleConfig::default());
        assert_eq!(osd.panel.width, 400);
        assert_eq!(osd.panel.x, 0);
    }
}
