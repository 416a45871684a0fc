use std::fmt;
use std::sync::Arc;

/// Advisory upper bound for room photographs (10 MiB).
pub const RECOMMENDED_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Binary image payload supplied by the image capture collaborator.
///
/// The bytes are shared behind an `Arc` so the payload can be handed to the
/// generation task and echoed into variants without copying. The payload is
/// never mutated after capture.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData {
    bytes: Arc<[u8]>,
    media_type: String,
}

impl ImageData {
    pub fn new(bytes: impl Into<Arc<[u8]>>, media_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
        }
    }

    /// Convenience constructor for JPEG payloads
    pub fn jpeg(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::new(bytes, "image/jpeg")
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True when the payload exceeds the advertised 10 MiB limit
    pub fn exceeds_recommended_size(&self) -> bool {
        self.len() > RECOMMENDED_MAX_IMAGE_BYTES
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("len", &self.bytes.len())
            .field("media_type", &self.media_type)
            .finish()
    }
}

/// Design style requested for the redecoration.
///
/// The named variants are the styles offered in the style picker. The list is
/// advisory: any other non-empty value is carried as [`DesignStyle::Custom`]
/// and forwarded to the backend untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DesignStyle {
    Finnish,
    Swedish,
    Arabic,
    Russian,
    American,
    Modern,
    Custom(String),
}

impl DesignStyle {
    /// Styles offered by the picker, in display order
    pub const KNOWN: [DesignStyle; 6] = [
        DesignStyle::Finnish,
        DesignStyle::Swedish,
        DesignStyle::Arabic,
        DesignStyle::Russian,
        DesignStyle::American,
        DesignStyle::Modern,
    ];

    /// Parse a user-entered style. Returns `None` for blank input.
    ///
    /// Known names match case-insensitively; anything else becomes `Custom`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let known = Self::KNOWN
            .iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(trimmed))
            .cloned();

        Some(known.unwrap_or_else(|| DesignStyle::Custom(trimmed.to_string())))
    }

    pub fn as_str(&self) -> &str {
        match self {
            DesignStyle::Finnish => "Finnish",
            DesignStyle::Swedish => "Swedish",
            DesignStyle::Arabic => "Arabic",
            DesignStyle::Russian => "Russian",
            DesignStyle::American => "American",
            DesignStyle::Modern => "Modern",
            DesignStyle::Custom(name) => name,
        }
    }

    /// Short blurb shown next to the style in the picker
    pub fn description(&self) -> &'static str {
        match self {
            DesignStyle::Finnish => "Minimalist, natural wood, clean lines",
            DesignStyle::Swedish => "Scandinavian hygge, neutral tones",
            DesignStyle::Arabic => "Rich patterns, ornate details, warm colors",
            DesignStyle::Russian => "Classical elegance, imperial colors",
            DesignStyle::American => "Contemporary comfort, bold colors",
            DesignStyle::Modern => "Clean lines, minimal clutter",
            DesignStyle::Custom(_) => "Custom style",
        }
    }

    /// Signature elements a redesign in this style adds to the room.
    ///
    /// Unrecognized styles fall back to the Modern set.
    pub fn signature_elements(&self) -> [&'static str; 3] {
        match self {
            DesignStyle::Finnish => [
                "Birch wood accents",
                "Minimalist lighting",
                "Natural textiles",
            ],
            DesignStyle::Swedish => ["Hygge textiles", "Light wood furniture", "Cozy blankets"],
            DesignStyle::Arabic => ["Ornate patterns", "Rich tapestries", "Geometric art"],
            DesignStyle::Russian => [
                "Classical furniture",
                "Rich fabrics",
                "Ornate decorations",
            ],
            DesignStyle::American => [
                "Contemporary furniture",
                "Bold artwork",
                "Mixed materials",
            ],
            DesignStyle::Modern | DesignStyle::Custom(_) => [
                "Clean-lined furniture",
                "Neutral colors",
                "Minimalist decor",
            ],
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, DesignStyle::Custom(_))
    }
}

impl fmt::Display for DesignStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of room shown in the photograph
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoomType {
    LivingRoom,
    Bedroom,
    Kitchen,
    DiningRoom,
    Bathroom,
    Office,
    GeneralRoom,
    Custom(String),
}

impl RoomType {
    pub const KNOWN: [RoomType; 7] = [
        RoomType::LivingRoom,
        RoomType::Bedroom,
        RoomType::Kitchen,
        RoomType::DiningRoom,
        RoomType::Bathroom,
        RoomType::Office,
        RoomType::GeneralRoom,
    ];

    /// Parse a user-entered room type. Blank input means "unset".
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let known = Self::KNOWN
            .iter()
            .find(|room| room.as_str().eq_ignore_ascii_case(trimmed))
            .cloned();

        Some(known.unwrap_or_else(|| RoomType::Custom(trimmed.to_string())))
    }

    pub fn as_str(&self) -> &str {
        match self {
            RoomType::LivingRoom => "Living Room",
            RoomType::Bedroom => "Bedroom",
            RoomType::Kitchen => "Kitchen",
            RoomType::DiningRoom => "Dining Room",
            RoomType::Bathroom => "Bathroom",
            RoomType::Office => "Office",
            RoomType::GeneralRoom => "General Room",
            RoomType::Custom(name) => name,
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preferred color scheme for the redesign
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColorPreference {
    Neutral,
    Warm,
    Cool,
    Bold,
    Earthy,
    Pastel,
    Monochrome,
    Custom(String),
}

impl ColorPreference {
    pub const KNOWN: [ColorPreference; 7] = [
        ColorPreference::Neutral,
        ColorPreference::Warm,
        ColorPreference::Cool,
        ColorPreference::Bold,
        ColorPreference::Earthy,
        ColorPreference::Pastel,
        ColorPreference::Monochrome,
    ];

    /// Parse a user-entered color preference. Blank input means "any color scheme".
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let known = Self::KNOWN
            .iter()
            .find(|color| color.as_str().eq_ignore_ascii_case(trimmed))
            .cloned();

        Some(known.unwrap_or_else(|| ColorPreference::Custom(trimmed.to_string())))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ColorPreference::Neutral => "Neutral",
            ColorPreference::Warm => "Warm",
            ColorPreference::Cool => "Cool",
            ColorPreference::Bold => "Bold",
            ColorPreference::Earthy => "Earthy",
            ColorPreference::Pastel => "Pastel",
            ColorPreference::Monochrome => "Monochrome",
            ColorPreference::Custom(name) => name,
        }
    }
}

impl fmt::Display for ColorPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw fields as entered by the user, before validation.
///
/// Strings may be empty; `preserve_existing_furniture` is `None` when the user
/// never touched the checkbox.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestFields {
    pub image: Option<ImageData>,
    pub design_style: String,
    pub room_type: String,
    pub color_preference: String,
    pub preserve_existing_furniture: Option<bool>,
}

/// A validated decoration request.
///
/// Only [`crate::services::RequestBuilder`] produces these; once submitted the
/// request is shared immutably with the job that tracks it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecorationRequest {
    pub image: ImageData,
    pub design_style: DesignStyle,
    pub room_type: Option<RoomType>,
    pub color_preference: Option<ColorPreference>,
    pub preserve_existing_furniture: bool,
}
