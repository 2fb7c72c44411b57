/// Pixel size of a replaced element. Both axes are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Builds a size, raising zero axes to one pixel.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }
}

/// Box dimensions requested by the layout for a replaced element.
///
/// `None` on an axis means "use the content's intrinsic size".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DimensionHint {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl DimensionHint {
    pub const UNSPECIFIED: DimensionHint = DimensionHint {
        width: None,
        height: None,
    };

    pub fn new(width: Option<u32>, height: Option<u32>) -> Self {
        Self {
            width: width.filter(|w| *w > 0),
            height: height.filter(|h| *h > 0),
        }
    }

    /// Converts CSS box dimensions, where zero or negative values mean "unset".
    pub fn from_css(css_width: i32, css_height: i32) -> Self {
        fn positive(v: i32) -> Option<u32> {
            u32::try_from(v).ok().filter(|v| *v > 0)
        }
        Self {
            width: positive(css_width),
            height: positive(css_height),
        }
    }

    /// Fills unset axes from `intrinsic`, independently per axis.
    pub fn resolve(self, intrinsic: Size) -> Size {
        Size::new(
            self.width.unwrap_or(intrinsic.width),
            self.height.unwrap_or(intrinsic.height),
        )
    }
}
