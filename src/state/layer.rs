use crate::{
    assets::catalog::EyeStyle,
    assets::raster::Raster,
    foundation::core::Side,
    foundation::error::{CountryballError, CountryballResult},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Background source. A flag and an uploaded photo are mutually exclusive.
pub enum Background {
    #[default]
    None,
    /// Curated flag asset, letterboxed.
    Flag(Raster),
    /// User photo, cover-cropped.
    Uploaded(Raster),
}

impl Background {
    pub fn raster(&self) -> Option<&Raster> {
        match self {
            Self::None => None,
            Self::Flag(r) | Self::Uploaded(r) => Some(r),
        }
    }

    pub fn is_uploaded(&self) -> bool {
        matches!(self, Self::Uploaded(_))
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Flag(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// How the eye raster is placed on the output.
pub enum EyeMode {
    /// Pre-composed to the full frame, drawn without offset or scaling controls.
    FullFrame,
    /// Centered, then moved by the offsets and scaled to the target size.
    Adjustable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// User-controlled eye placement, used only in [`EyeMode::Adjustable`].
pub struct EyePlacement {
    /// Horizontal offset from center, in output pixels.
    pub offset_x: i32,
    /// Vertical offset from center, in output pixels.
    pub offset_y: i32,
    /// Target bounding dimension in output pixels.
    pub size: u32,
}

impl Default for EyePlacement {
    fn default() -> Self {
        Self {
            offset_x: 0,
            offset_y: 0,
            size: 200,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Independently reloadable layer slot. Template and mask share one slot.
pub enum LoadSlot {
    Flag,
    Template,
    Eyes,
}

impl LoadSlot {
    fn idx(self) -> usize {
        match self {
            Self::Flag => 0,
            Self::Template => 1,
            Self::Eyes => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Handle for an in-flight load. Only the newest ticket of a slot may write its result.
pub struct LoadTicket {
    slot: LoadSlot,
    generation: u64,
}

impl LoadTicket {
    pub fn slot(self) -> LoadSlot {
        self.slot
    }

    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// The single mutable record every picker writes and the compositor reads.
///
/// Fields are replaced, never merged. Setters keep the invariants: one background source at a
/// time, eye mode derived from the eye style, template and mask replaced together.
#[derive(Debug, Default)]
pub struct LayerState {
    background: Background,
    template: Option<Raster>,
    mask: Option<Raster>,
    eyes: Option<Raster>,
    eye_style: EyeStyle,
    eye_placement: EyePlacement,
    side: Side,
    flag_index: usize,
    eye_index: usize,
    template_index: usize,
    generations: [u64; 3],
}

impl LayerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn template(&self) -> Option<&Raster> {
        self.template.as_ref()
    }

    pub fn mask(&self) -> Option<&Raster> {
        self.mask.as_ref()
    }

    pub fn eyes(&self) -> Option<&Raster> {
        self.eyes.as_ref()
    }

    pub fn eye_style(&self) -> EyeStyle {
        self.eye_style
    }

    pub fn eye_mode(&self) -> EyeMode {
        self.eye_style.eye_mode()
    }

    pub fn eye_placement(&self) -> EyePlacement {
        self.eye_placement
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn flag_index(&self) -> usize {
        self.flag_index
    }

    pub fn eye_index(&self) -> usize {
        self.eye_index
    }

    pub fn template_index(&self) -> usize {
        self.template_index
    }

    /// Make an uploaded photo the background. Any flag is dropped and in-flight flag loads are
    /// invalidated so they cannot replace the photo.
    pub fn set_uploaded(&mut self, raster: Raster) {
        self.background = Background::Uploaded(raster);
        self.bump(LoadSlot::Flag);
    }

    pub fn set_side(&mut self, side: Side) {
        self.side = side;
    }

    /// Flip the shared side toggle and return the new side.
    pub fn flip_side(&mut self) -> Side {
        self.side = self.side.flipped();
        self.side
    }

    pub fn set_flag_index(&mut self, index: usize) {
        self.flag_index = index;
    }

    pub fn set_eye_index(&mut self, index: usize) {
        self.eye_index = index;
    }

    pub fn set_template_index(&mut self, index: usize) {
        self.template_index = index;
    }

    /// Switch eye style: resets the eye index, drops the current eye raster and any load of
    /// the previous style still in flight.
    pub fn set_eye_style(&mut self, style: EyeStyle) {
        self.eye_style = style;
        self.eye_index = 0;
        self.eyes = None;
        self.bump(LoadSlot::Eyes);
    }

    pub fn set_eye_offset_x(&mut self, offset_x: i32) {
        self.eye_placement.offset_x = offset_x;
    }

    pub fn set_eye_offset_y(&mut self, offset_y: i32) {
        self.eye_placement.offset_y = offset_y;
    }

    pub fn set_eye_size(&mut self, size: u32) -> CountryballResult<()> {
        if size == 0 {
            return Err(CountryballError::validation("eye size must be > 0"));
        }
        self.eye_placement.size = size;
        Ok(())
    }

    /// Start a load for `slot`, superseding every earlier ticket of that slot.
    pub fn begin_load(&mut self, slot: LoadSlot) -> LoadTicket {
        LoadTicket {
            slot,
            generation: self.bump(slot),
        }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.generations[ticket.slot.idx()] == ticket.generation
    }

    /// Apply a finished flag load. A failed load (`None`) leaves no background.
    ///
    /// Returns `false` and changes nothing when the ticket is stale.
    pub fn complete_flag(&mut self, ticket: LoadTicket, raster: Option<Raster>) -> bool {
        if !self.accepts(ticket, LoadSlot::Flag) {
            return false;
        }
        self.background = match raster {
            Some(r) => Background::Flag(r),
            None => Background::None,
        };
        true
    }

    /// Apply a finished template + mask load; each side of the pair may have failed alone.
    pub fn complete_template(
        &mut self,
        ticket: LoadTicket,
        template: Option<Raster>,
        mask: Option<Raster>,
    ) -> bool {
        if !self.accepts(ticket, LoadSlot::Template) {
            return false;
        }
        self.template = template;
        self.mask = mask;
        true
    }

    pub fn complete_eyes(&mut self, ticket: LoadTicket, raster: Option<Raster>) -> bool {
        if !self.accepts(ticket, LoadSlot::Eyes) {
            return false;
        }
        self.eyes = raster;
        true
    }

    fn accepts(&self, ticket: LoadTicket, slot: LoadSlot) -> bool {
        let ok = ticket.slot == slot && self.is_current(ticket);
        if !ok {
            tracing::debug!(
                ?slot,
                generation = ticket.generation,
                "dropping stale load result"
            );
        }
        ok
    }

    fn bump(&mut self, slot: LoadSlot) -> u64 {
        let g = &mut self.generations[slot.idx()];
        *g += 1;
        *g
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/layer.rs"]
mod tests;
