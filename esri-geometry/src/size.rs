use crate::error::GeometryError;

/// Integer size of an image or a viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    width: i32,
    height: i32,
}

impl Size {
    /// Creates a new size.
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Size with equal width and height.
    pub fn square(side: i32) -> Self {
        Self::new(side, side)
    }

    /// Creates a size from `[side]` or `[width, height]`.
    pub fn from_dimensions(dimensions: &[i32]) -> Result<Self, GeometryError> {
        match *dimensions {
            [side] => Ok(Self::square(side)),
            [width, height] => Ok(Self::new(width, height)),
            _ => Err(GeometryError::Format(format!(
                "size needs 1 or 2 values, got {}",
                dimensions.len()
            ))),
        }
    }

    /// Width.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// True if either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `[width, height]`.
    pub fn to_dimensions(&self) -> [i32; 2] {
        [self.width, self.height]
    }
}
