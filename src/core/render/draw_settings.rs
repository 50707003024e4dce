//=========================================================================
// Draw Settings
//=========================================================================
//
// Styling for renderer primitives.
//
// Every field is optional. `merged` layers an override on top of a base
// (set override fields win, unset ones fall back), and renderers resolve
// the final style as `DrawSettings::defaults().merged(requested)`.
//
//=========================================================================

//=== Shadow ==============================================================

/// Drop shadow, in grid units. Merged as a whole value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shadow {
    pub color: String,
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
}

//=== DrawSettings ========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawSettings {
    pub fill: Option<bool>,
    pub color: Option<String>,
    pub border: Option<bool>,
    pub border_color: Option<String>,
    /// Border width in 1/64ths of a grid cell.
    pub border_size: Option<f64>,
    /// Rotation in degrees around the shape's center.
    pub angle: Option<f64>,
    /// Opacity, clamped to `0..=1` by renderers.
    pub alpha: Option<f64>,
    pub shadow: Option<Shadow>,
}

impl DrawSettings {
    /// Empty settings; every field falls back when merged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fully populated baseline: black fill, no border, opaque, unrotated.
    pub fn defaults() -> Self {
        Self {
            fill: Some(true),
            color: Some("#000000".to_string()),
            border: Some(false),
            border_color: Some("#000000".to_string()),
            border_size: Some(1.0),
            angle: Some(0.0),
            alpha: Some(1.0),
            shadow: Some(Shadow::default()),
        }
    }

    /// Returns `self` overlaid with every field `overrides` sets.
    pub fn merged(&self, overrides: &DrawSettings) -> DrawSettings {
        DrawSettings {
            fill: overrides.fill.or(self.fill),
            color: overrides.color.clone().or_else(|| self.color.clone()),
            border: overrides.border.or(self.border),
            border_color: overrides
                .border_color
                .clone()
                .or_else(|| self.border_color.clone()),
            border_size: overrides.border_size.or(self.border_size),
            angle: overrides.angle.or(self.angle),
            alpha: overrides.alpha.or(self.alpha),
            shadow: overrides.shadow.clone().or_else(|| self.shadow.clone()),
        }
    }

    //--- Builder Helpers --------------------------------------------------

    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_border(mut self, border: bool) -> Self {
        self.border = Some(border);
        self
    }

    pub fn with_border_color(mut self, color: impl Into<String>) -> Self {
        self.border_color = Some(color.into());
        self
    }

    pub fn with_border_size(mut self, size: f64) -> Self {
        self.border_size = Some(size);
        self
    }

    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.angle = Some(degrees);
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
