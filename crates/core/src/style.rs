// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Spreadsheet-independent cell formatting.
//!
//! Descriptors only carry the attributes that are actually set. A `None`
//! field means "leave whatever is there".

/// Font used for every written cell.
pub const STANDARD_FONT_NAME: &str = "微軟正黑體";

/// Font size used for every written cell.
pub const STANDARD_FONT_SIZE: f64 = 12.0;

/// Number format applied to area and delta cells.
pub const AREA_NUMBER_FORMAT: &str = "0.00";

/// Border line style for written cells.
pub const THIN_BORDER: &str = "thin";

/// Opaque black, as an ARGB string.
pub const BLACK_ARGB: &str = "FF000000";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontDescriptor {
    pub name: Option<String>,
    pub size: Option<f64>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentDescriptor {
    pub horizontal: Option<String>,
    pub vertical: Option<String>,
    pub wrap_text: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BorderSideDescriptor {
    pub style: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BordersDescriptor {
    pub left: Option<BorderSideDescriptor>,
    pub right: Option<BorderSideDescriptor>,
    pub top: Option<BorderSideDescriptor>,
    pub bottom: Option<BorderSideDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillDescriptor {
    pub pattern_type: Option<String>,
    pub foreground_color: Option<String>,
    pub background_color: Option<String>,
}

/// Formatting of a single cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDescriptor {
    pub font: Option<FontDescriptor>,
    pub alignment: Option<AlignmentDescriptor>,
    pub borders: Option<BordersDescriptor>,
    pub fill: Option<FillDescriptor>,
    pub number_format: Option<String>,
}

/// Combines two optional attribute groups, letting `top` win field by field.
fn layer<T: Clone>(base: Option<&T>, top: Option<&T>, merge: fn(&T, &T) -> T) -> Option<T> {
    match (base, top) {
        (Some(base), Some(top)) => Some(merge(base, top)),
        (None, Some(only)) | (Some(only), None) => Some(only.clone()),
        (None, None) => None,
    }
}

fn pick<T: Clone>(base: Option<&T>, top: Option<&T>) -> Option<T> {
    top.or(base).cloned()
}

impl FontDescriptor {
    #[must_use]
    pub fn overlay(&self, other: &Self) -> Self {
        Self {
            name: pick(self.name.as_ref(), other.name.as_ref()),
            size: other.size.or(self.size),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            color: pick(self.color.as_ref(), other.color.as_ref()),
        }
    }
}

impl AlignmentDescriptor {
    #[must_use]
    pub fn overlay(&self, other: &Self) -> Self {
        Self {
            horizontal: pick(self.horizontal.as_ref(), other.horizontal.as_ref()),
            vertical: pick(self.vertical.as_ref(), other.vertical.as_ref()),
            wrap_text: other.wrap_text.or(self.wrap_text),
        }
    }
}

impl BordersDescriptor {
    #[must_use]
    pub fn overlay(&self, other: &Self) -> Self {
        Self {
            left: pick(self.left.as_ref(), other.left.as_ref()),
            right: pick(self.right.as_ref(), other.right.as_ref()),
            top: pick(self.top.as_ref(), other.top.as_ref()),
            bottom: pick(self.bottom.as_ref(), other.bottom.as_ref()),
        }
    }
}

impl StyleDescriptor {
    /// Returns whether no attribute is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.font.is_none()
            && self.alignment.is_none()
            && self.borders.is_none()
            && self.fill.is_none()
            && self.number_format.is_none()
    }

    /// Layers `other` on top of `self`.
    ///
    /// Font, alignment and border attributes are combined field by field, so
    /// an overlay that only sets the font name keeps a bold or italic base.
    /// Fill and number format are replaced whole when `other` sets them.
    #[must_use]
    pub fn overlay(&self, other: &Self) -> Self {
        Self {
            font: layer(self.font.as_ref(), other.font.as_ref(), FontDescriptor::overlay),
            alignment: layer(
                self.alignment.as_ref(),
                other.alignment.as_ref(),
                AlignmentDescriptor::overlay,
            ),
            borders: layer(
                self.borders.as_ref(),
                other.borders.as_ref(),
                BordersDescriptor::overlay,
            ),
            fill: pick(self.fill.as_ref(), other.fill.as_ref()),
            number_format: pick(self.number_format.as_ref(), other.number_format.as_ref()),
        }
    }

    /// Returns a copy of this descriptor with `format` as number format.
    #[must_use]
    pub fn with_number_format(&self, format: &str) -> Self {
        Self {
            number_format: Some(format.to_string()),
            ..self.clone()
        }
    }
}

fn thin_black_side() -> BorderSideDescriptor {
    BorderSideDescriptor {
        style: Some(String::from(THIN_BORDER)),
        color: Some(String::from(BLACK_ARGB)),
    }
}

/// The look applied to every data and total cell the tool writes:
/// standard font, centered both ways, thin black border on all four sides.
#[must_use]
pub fn standard_cell_style() -> StyleDescriptor {
    StyleDescriptor {
        font: Some(FontDescriptor {
            name: Some(String::from(STANDARD_FONT_NAME)),
            size: Some(STANDARD_FONT_SIZE),
            ..FontDescriptor::default()
        }),
        alignment: Some(AlignmentDescriptor {
            horizontal: Some(String::from("center")),
            vertical: Some(String::from("center")),
            wrap_text: None,
        }),
        borders: Some(BordersDescriptor {
            left: Some(thin_black_side()),
            right: Some(thin_black_side()),
            top: Some(thin_black_side()),
            bottom: Some(thin_black_side()),
        }),
        fill: None,
        number_format: None,
    }
}
