/// The two caption regions shown over the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSlot {
    Title,
    Subtitle,
}

impl TextSlot {
    pub const ALL: [TextSlot; 2] = [TextSlot::Title, TextSlot::Subtitle];
}

/// Animatable presentation of a caption region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Vertical offset in device-independent units; positive pushes down.
    pub offset: f32,
    pub opacity: f32,
}

impl TextStyle {
    pub const fn new(offset: f32, opacity: f32) -> Self {
        Self { offset, opacity }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// Display surface the transition writes captions into.
pub trait TextSurface {
    fn set_text(&mut self, slot: TextSlot, text: &str);
    fn style(&self, slot: TextSlot) -> TextStyle;
    fn set_style(&mut self, slot: TextSlot, style: TextStyle);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRegion {
    pub text: String,
    pub style: TextStyle,
}

/// In-memory caption state; hidden until the first entrance animation.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    title: TextRegion,
    subtitle: TextRegion,
}

impl Default for TextOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl TextOverlay {
    pub fn new() -> Self {
        Self {
            title: TextRegion {
                text: String::new(),
                style: TextStyle::new(10.0, 0.0),
            },
            subtitle: TextRegion {
                text: String::new(),
                style: TextStyle::new(50.0, 0.0),
            },
        }
    }

    pub fn region(&self, slot: TextSlot) -> &TextRegion {
        match slot {
            TextSlot::Title => &self.title,
            TextSlot::Subtitle => &self.subtitle,
        }
    }

    fn region_mut(&mut self, slot: TextSlot) -> &mut TextRegion {
        match slot {
            TextSlot::Title => &mut self.title,
            TextSlot::Subtitle => &mut self.subtitle,
        }
    }
}

impl TextSurface for TextOverlay {
    fn set_text(&mut self, slot: TextSlot, text: &str) {
        let region = self.region_mut(slot);
        region.text.clear();
        region.text.push_str(text);
    }

    fn style(&self, slot: TextSlot) -> TextStyle {
        self.region(slot).style
    }

    fn set_style(&mut self, slot: TextSlot, style: TextStyle) {
        self.region_mut(slot).style = style;
    }
}
