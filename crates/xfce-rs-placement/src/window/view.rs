use bitflags::bitflags;

use crate::core::{Axes, Edges, Rect};
use crate::snap::regions::RegionId;
use crate::window::output::OutputId;

pub use crate::core::ViewId;

/// How a view is currently placed. Exactly one applies at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementState {
    Floating,
    /// Snapped to one or two screen edges (halves and quarters).
    Tiled { edges: Edges },
    /// Snapped to a user-defined region.
    Region { region: RegionId },
    Maximized { axes: Axes },
    Fullscreen,
}

impl PlacementState {
    pub fn is_floating(&self) -> bool {
        matches!(self, PlacementState::Floating)
    }

    /// Tiled to an edge or region, or maximized on any axis.
    pub fn is_snapped(&self) -> bool {
        matches!(
            self,
            PlacementState::Tiled { .. } | PlacementState::Region { .. } | PlacementState::Maximized { .. }
        )
    }

    pub fn maximized_axes(&self) -> Axes {
        match self {
            PlacementState::Maximized { axes } => *axes,
            _ => Axes::empty(),
        }
    }
}

bitflags! {
    /// Static properties of a view that restrict interactive placement.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ViewFlags: u8 {
        /// Position is chosen by the client (e.g. docks, desktop windows).
        const FIXED_POSITION = 0b001;
        /// Reserves screen space (panels).
        const RESERVES_STRUT = 0b010;
        const MODAL          = 0b100;
    }
}

#[derive(Debug, Clone)]
pub struct View {
    pub title: String,
    /// Geometry currently shown on screen.
    pub current: Rect,
    /// Geometry last requested from the client.
    pub pending: Rect,
    /// Floating geometry to return to when leaving a tiled or maximized state.
    pub natural: Rect,
    pub placement: PlacementState,
    pub flags: ViewFlags,
    pub parent: Option<ViewId>,
    pub focusable: bool,
    pub output: Option<OutputId>,
    /// Name of the region this view was evacuated from during an output reconfigure.
    pub evacuated_region: Option<String>,
}

impl View {
    pub fn new(title: impl Into<String>, geometry: Rect) -> Self {
        Self {
            title: title.into(),
            current: geometry,
            pending: geometry,
            natural: geometry,
            placement: PlacementState::Floating,
            flags: ViewFlags::empty(),
            parent: None,
            focusable: true,
            output: None,
            evacuated_region: None,
        }
    }

    pub fn with_flags(mut self, flags: ViewFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_parent(mut self, parent: ViewId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_placement(mut self, placement: PlacementState) -> Self {
        self.placement = placement;
        self
    }

    pub fn is_fixed_position(&self) -> bool {
        self.flags.contains(ViewFlags::FIXED_POSITION)
    }

    pub fn reserves_strut(&self) -> bool {
        self.flags.contains(ViewFlags::RESERVES_STRUT)
    }

    pub fn is_modal(&self) -> bool {
        self.flags.contains(ViewFlags::MODAL)
    }

    pub fn is_fullscreen(&self) -> bool {
        matches!(self.placement, PlacementState::Fullscreen)
    }

    /// Not subordinated to another view.
    pub fn is_root(&self) -> bool {
        self.parent.is_none() && !self.is_modal()
    }

    /// Interactive move and resize are never offered for these views.
    pub fn is_movable(&self) -> bool {
        !self.is_fixed_position() && !self.reserves_strut()
    }

    /// Store the current geometry as the natural one, but only while floating.
    pub fn store_natural_geometry(&mut self) {
        if self.placement.is_floating() && !self.current.is_empty() {
            self.natural = self.current;
        }
    }
}
