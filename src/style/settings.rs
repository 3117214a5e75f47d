use std::fmt;
use std::str::FromStr;

use crate::foundation::core::Rgba;
use crate::foundation::error::{SketchError, SketchResult};

/// The closed set of stylization recipes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Pencil,
    Charcoal,
    Detailed,
    Crosshatch,
    Ink,
    Woodcut,
    Etching,
    Conte,
    Stippling,
    Scribble,
    Geometric,
    Drybrush,
    Lithograph,
    Zentangle,
    Topographic,
    Blueprint,
    Architectural,
    Gesture,
    Wireframe,
}

impl Style {
    /// Every style, in catalogue order.
    pub const ALL: [Style; 19] = [
        Style::Pencil,
        Style::Charcoal,
        Style::Detailed,
        Style::Crosshatch,
        Style::Ink,
        Style::Woodcut,
        Style::Etching,
        Style::Conte,
        Style::Stippling,
        Style::Scribble,
        Style::Geometric,
        Style::Drybrush,
        Style::Lithograph,
        Style::Zentangle,
        Style::Topographic,
        Style::Blueprint,
        Style::Architectural,
        Style::Gesture,
        Style::Wireframe,
    ];

    /// Stable identifier used in settings records.
    pub fn as_str(self) -> &'static str {
        match self {
            Style::Pencil => "pencil",
            Style::Charcoal => "charcoal",
            Style::Detailed => "detailed",
            Style::Crosshatch => "crosshatch",
            Style::Ink => "ink",
            Style::Woodcut => "woodcut",
            Style::Etching => "etching",
            Style::Conte => "conte",
            Style::Stippling => "stippling",
            Style::Scribble => "scribble",
            Style::Geometric => "geometric",
            Style::Drybrush => "drybrush",
            Style::Lithograph => "lithograph",
            Style::Zentangle => "zentangle",
            Style::Topographic => "topographic",
            Style::Blueprint => "blueprint",
            Style::Architectural => "architectural",
            Style::Gesture => "gesture",
            Style::Wireframe => "wireframe",
        }
    }

    /// Paper colour painted before any marks.
    pub fn background(self) -> Rgba {
        match self {
            Style::Charcoal => Rgba::rgb(248, 248, 248),
            Style::Ink => Rgba::rgb(250, 248, 242),
            Style::Etching => Rgba::rgb(252, 250, 245),
            Style::Conte => Rgba::rgb(242, 233, 216),
            Style::Drybrush => Rgba::rgb(250, 248, 244),
            Style::Lithograph => Rgba::rgb(246, 243, 236),
            Style::Topographic => Rgba::rgb(250, 247, 238),
            Style::Blueprint => Rgba::rgb(16, 60, 128),
            Style::Architectural => Rgba::rgb(252, 252, 250),
            Style::Pencil
            | Style::Detailed
            | Style::Crosshatch
            | Style::Woodcut
            | Style::Stippling
            | Style::Scribble
            | Style::Geometric
            | Style::Zentangle
            | Style::Gesture
            | Style::Wireframe => Rgba::WHITE,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Style {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| SketchError::validation(format!("unknown style '{s}'")))
    }
}

/// Clamp a user-supplied parameter into `[min, max]`. Non-finite values fall back to `default`.
pub(crate) fn clamp_param(value: f64, min: f64, max: f64, default: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        default
    }
}

/// Parameters shared by every style, as percentages.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommonParams {
    /// Mark opacity, `[1, 100]`.
    pub line_strength: f64,
    /// Edge detector sensitivity, `[1, 100]`.
    pub detail: f64,
    /// Strength of the tone/texture passes, `[0, 100]`.
    pub shading: f64,
}

impl Default for CommonParams {
    fn default() -> Self {
        Self {
            line_strength: 50.0,
            detail: 50.0,
            shading: 30.0,
        }
    }
}

impl CommonParams {
    /// Copy with every value clamped into its documented range.
    pub fn clamped(self) -> Self {
        Self {
            line_strength: clamp_param(self.line_strength, 1.0, 100.0, 50.0),
            detail: clamp_param(self.detail, 1.0, 100.0, 50.0),
            shading: clamp_param(self.shading, 0.0, 100.0, 30.0),
        }
    }

    /// Sobel sensitivity, `detail / 100`.
    pub fn sensitivity(self) -> f64 {
        self.clamped().detail / 100.0
    }

    /// `lineStrength / 100`.
    pub fn line_fraction(self) -> f64 {
        self.clamped().line_strength / 100.0
    }

    /// `shading / 100`.
    pub fn shading_fraction(self) -> f64 {
        self.clamped().shading / 100.0
    }

    /// Every value multiplied by `progress` and rounded, as used for progressive previews.
    pub fn scaled(self, progress: f64) -> Self {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self {
            line_strength: (self.line_strength * progress).round(),
            detail: (self.detail * progress).round(),
            shading: (self.shading * progress).round(),
        }
    }
}

/// Declares a style's parameter cluster: a camelCase serde record whose absent fields take the
/// default, plus a `clamped` accessor.
macro_rules! style_params {
    ($(#[$doc:meta])* $name:ident { $($(#[$fdoc:meta])* $field:ident: $min:literal ..= $max:literal = $default:literal),+ $(,)? }) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct $name {
            $($(#[$fdoc])* pub $field: f64,)+
        }

        impl Default for $name {
            fn default() -> Self {
                Self { $($field: $default,)+ }
            }
        }

        impl $name {
            /// Copy with every value clamped into its documented range.
            pub fn clamped(self) -> Self {
                Self { $($field: clamp_param(self.$field, $min, $max, $default),)+ }
            }
        }
    };
}

style_params!(
    /// Pencil: 1 is soft, thick and dark; 5 is hard, thin and light.
    PencilParams { pencil_hardness: 1.0..=5.0 = 3.0 }
);
style_params!(CharcoalParams { charcoal_texture: 0.0..=100.0 = 50.0 });
style_params!(DetailedParams { detailed_density: 1.0..=100.0 = 50.0 });
style_params!(
    CrosshatchParams {
        /// Primary hatch angle in degrees.
        crosshatch_angle: 15.0..=75.0 = 45.0,
        crosshatch_density: 1.0..=100.0 = 50.0,
    }
);
style_params!(InkParams { ink_texture: 0.0..=100.0 = 50.0 });
style_params!(WoodcutParams { woodcut_boldness: 0.0..=100.0 = 50.0 });
style_params!(EtchingParams { etching_depth: 0.0..=100.0 = 50.0 });
style_params!(ConteParams { conte_softness: 0.0..=100.0 = 50.0 });
style_params!(StipplingParams { stippling_density: 1.0..=100.0 = 50.0 });
style_params!(ScribbleParams { scribble_chaos: 0.0..=100.0 = 50.0 });
style_params!(
    GeometricParams {
        /// Cell edge length in pixels.
        geometric_cell_size: 4.0..=40.0 = 12.0,
    }
);
style_params!(DrybrushParams { drybrush_bristles: 1.0..=20.0 = 8.0 });
style_params!(LithographParams { lithograph_grain: 0.0..=100.0 = 50.0 });
style_params!(ZentangleParams { zentangle_complexity: 1.0..=10.0 = 5.0 });
style_params!(TopographicParams { topographic_levels: 2.0..=20.0 = 8.0 });
style_params!(
    BlueprintParams {
        /// Grid pitch in pixels.
        blueprint_grid_size: 10.0..=100.0 = 20.0,
    }
);
style_params!(ArchitecturalParams { architectural_precision: 0.0..=100.0 = 50.0 });
style_params!(GestureParams { gesture_fluidity: 0.0..=100.0 = 50.0 });
style_params!(WireframeParams { wireframe_density: 1.0..=100.0 = 50.0 });

/// The active style and its parameter cluster.
///
/// Only the selected style's parameters exist; the `style` tag picks the variant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum StyleParams {
    Pencil(PencilParams),
    Charcoal(CharcoalParams),
    Detailed(DetailedParams),
    Crosshatch(CrosshatchParams),
    Ink(InkParams),
    Woodcut(WoodcutParams),
    Etching(EtchingParams),
    Conte(ConteParams),
    Stippling(StipplingParams),
    Scribble(ScribbleParams),
    Geometric(GeometricParams),
    Drybrush(DrybrushParams),
    Lithograph(LithographParams),
    Zentangle(ZentangleParams),
    Topographic(TopographicParams),
    Blueprint(BlueprintParams),
    Architectural(ArchitecturalParams),
    Gesture(GestureParams),
    Wireframe(WireframeParams),
}

impl StyleParams {
    /// Default parameter cluster for `style`.
    pub fn default_for(style: Style) -> Self {
        match style {
            Style::Pencil => Self::Pencil(PencilParams::default()),
            Style::Charcoal => Self::Charcoal(CharcoalParams::default()),
            Style::Detailed => Self::Detailed(DetailedParams::default()),
            Style::Crosshatch => Self::Crosshatch(CrosshatchParams::default()),
            Style::Ink => Self::Ink(InkParams::default()),
            Style::Woodcut => Self::Woodcut(WoodcutParams::default()),
            Style::Etching => Self::Etching(EtchingParams::default()),
            Style::Conte => Self::Conte(ConteParams::default()),
            Style::Stippling => Self::Stippling(StipplingParams::default()),
            Style::Scribble => Self::Scribble(ScribbleParams::default()),
            Style::Geometric => Self::Geometric(GeometricParams::default()),
            Style::Drybrush => Self::Drybrush(DrybrushParams::default()),
            Style::Lithograph => Self::Lithograph(LithographParams::default()),
            Style::Zentangle => Self::Zentangle(ZentangleParams::default()),
            Style::Topographic => Self::Topographic(TopographicParams::default()),
            Style::Blueprint => Self::Blueprint(BlueprintParams::default()),
            Style::Architectural => Self::Architectural(ArchitecturalParams::default()),
            Style::Gesture => Self::Gesture(GestureParams::default()),
            Style::Wireframe => Self::Wireframe(WireframeParams::default()),
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Pencil(_) => Style::Pencil,
            Self::Charcoal(_) => Style::Charcoal,
            Self::Detailed(_) => Style::Detailed,
            Self::Crosshatch(_) => Style::Crosshatch,
            Self::Ink(_) => Style::Ink,
            Self::Woodcut(_) => Style::Woodcut,
            Self::Etching(_) => Style::Etching,
            Self::Conte(_) => Style::Conte,
            Self::Stippling(_) => Style::Stippling,
            Self::Scribble(_) => Style::Scribble,
            Self::Geometric(_) => Style::Geometric,
            Self::Drybrush(_) => Style::Drybrush,
            Self::Lithograph(_) => Style::Lithograph,
            Self::Zentangle(_) => Style::Zentangle,
            Self::Topographic(_) => Style::Topographic,
            Self::Blueprint(_) => Style::Blueprint,
            Self::Architectural(_) => Style::Architectural,
            Self::Gesture(_) => Style::Gesture,
            Self::Wireframe(_) => Style::Wireframe,
        }
    }
}

/// Settings record for one conversion: common parameters plus the active style's cluster.
///
/// Serializes flat, e.g.
/// `{"style":"pencil","lineStrength":50,"detail":50,"shading":30,"pencilHardness":3}`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleSettings {
    #[serde(flatten)]
    pub common: CommonParams,
    #[serde(flatten)]
    pub params: StyleParams,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self::new(Style::Pencil)
    }
}

impl StyleSettings {
    /// Default settings for `style`.
    pub fn new(style: Style) -> Self {
        Self {
            common: CommonParams::default(),
            params: StyleParams::default_for(style),
        }
    }

    pub fn style(&self) -> Style {
        self.params.style()
    }

    pub fn with_line_strength(mut self, value: f64) -> Self {
        self.common.line_strength = value;
        self
    }

    pub fn with_detail(mut self, value: f64) -> Self {
        self.common.detail = value;
        self
    }

    pub fn with_shading(mut self, value: f64) -> Self {
        self.common.shading = value;
        self
    }

    pub fn with_params(mut self, params: StyleParams) -> Self {
        self.params = params;
        self
    }

    /// Same settings with the common parameters scaled by `progress` (see
    /// [`CommonParams::scaled`]).
    pub fn scaled(&self, progress: f64) -> Self {
        Self {
            common: self.common.scaled(progress),
            params: self.params,
        }
    }

    /// Parse a settings record. Unknown styles and malformed values are validation errors.
    pub fn from_json(json: &str) -> SketchResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SketchError::validation(format!("invalid style settings: {e}")))
    }

    pub fn to_json(&self) -> SketchResult<String> {
        serde_json::to_string(self).map_err(|e| SketchError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/settings.rs"]
mod tests;
