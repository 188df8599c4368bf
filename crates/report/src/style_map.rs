// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conversion between cell styles and style descriptors.

use std::str::FromStr;

use boundary_recon::{
    AlignmentDescriptor, BorderSideDescriptor, BordersDescriptor, FillDescriptor, FontDescriptor,
    StyleDescriptor,
};
use umya_spreadsheet::structs::{EnumTrait, HorizontalAlignmentValues, VerticalAlignmentValues};
use umya_spreadsheet::{Alignment, Border, Fill, Font, PatternValues, Style};

/// Reads the attributes of `style` that differ from the spreadsheet defaults.
#[must_use]
pub fn descriptor_from_style(style: &Style) -> StyleDescriptor {
    StyleDescriptor {
        font: style.get_font().and_then(descriptor_from_font),
        alignment: style.get_alignment().and_then(descriptor_from_alignment),
        borders: style.get_borders().and_then(|borders| {
            let descriptor: BordersDescriptor = BordersDescriptor {
                left: descriptor_from_border(borders.get_left_border()),
                right: descriptor_from_border(borders.get_right_border()),
                top: descriptor_from_border(borders.get_top_border()),
                bottom: descriptor_from_border(borders.get_bottom_border()),
            };
            let empty: bool = descriptor.left.is_none()
                && descriptor.right.is_none()
                && descriptor.top.is_none()
                && descriptor.bottom.is_none();
            (!empty).then_some(descriptor)
        }),
        fill: style.get_fill().and_then(descriptor_from_fill),
        number_format: style.get_number_format().and_then(|format| {
            let code: &str = format.get_format_code();
            (!code.eq_ignore_ascii_case("general")).then(|| code.to_string())
        }),
    }
}

fn descriptor_from_font(font: &Font) -> Option<FontDescriptor> {
    let descriptor: FontDescriptor = FontDescriptor {
        name: Some(font.get_name().to_string()).filter(|name| !name.is_empty()),
        size: Some(*font.get_size()).filter(|size| *size > 0.0),
        bold: font.get_bold().then_some(true),
        italic: font.get_italic().then_some(true),
        color: Some(font.get_color().get_argb().to_string()).filter(|argb| !argb.is_empty()),
    };

    let empty: bool = descriptor.name.is_none()
        && descriptor.size.is_none()
        && descriptor.bold.is_none()
        && descriptor.italic.is_none()
        && descriptor.color.is_none();
    (!empty).then_some(descriptor)
}

fn descriptor_from_alignment(alignment: &Alignment) -> Option<AlignmentDescriptor> {
    let descriptor: AlignmentDescriptor = AlignmentDescriptor {
        horizontal: (alignment.get_horizontal() != &HorizontalAlignmentValues::General)
            .then(|| alignment.get_horizontal().get_value_string().to_string()),
        vertical: (alignment.get_vertical() != &VerticalAlignmentValues::Bottom)
            .then(|| alignment.get_vertical().get_value_string().to_string()),
        wrap_text: alignment.get_wrap_text().then_some(true),
    };

    let empty: bool = descriptor.horizontal.is_none()
        && descriptor.vertical.is_none()
        && descriptor.wrap_text.is_none();
    (!empty).then_some(descriptor)
}

fn descriptor_from_border(border: &Border) -> Option<BorderSideDescriptor> {
    let style: &str = border.get_border_style();
    if style.is_empty() || style.eq_ignore_ascii_case("none") {
        return None;
    }
    Some(BorderSideDescriptor {
        style: Some(style.to_string()),
        color: Some(border.get_color().get_argb().to_string()).filter(|argb| !argb.is_empty()),
    })
}

fn descriptor_from_fill(fill: &Fill) -> Option<FillDescriptor> {
    let pattern = fill.get_pattern_fill()?;
    let kind: &str = pattern.get_pattern_type().get_value_string();
    let foreground_color: Option<String> = pattern
        .get_foreground_color()
        .map(|color| color.get_argb().to_string())
        .filter(|argb| !argb.is_empty());
    let background_color: Option<String> = pattern
        .get_background_color()
        .map(|color| color.get_argb().to_string())
        .filter(|argb| !argb.is_empty());

    let no_pattern: bool = kind.eq_ignore_ascii_case("none");
    if no_pattern && foreground_color.is_none() && background_color.is_none() {
        return None;
    }
    Some(FillDescriptor {
        pattern_type: (!no_pattern).then(|| kind.to_string()),
        foreground_color,
        background_color,
    })
}

/// Sets every attribute present in `descriptor` on `style`, leaving the
/// others untouched.
pub fn apply_descriptor(style: &mut Style, descriptor: &StyleDescriptor) {
    if let Some(font) = &descriptor.font {
        let target: &mut Font = style.get_font_mut();
        if let Some(name) = &font.name {
            target.set_name(name.clone());
        }
        if let Some(size) = font.size {
            target.set_size(size);
        }
        if let Some(bold) = font.bold {
            target.set_bold(bold);
        }
        if let Some(italic) = font.italic {
            target.set_italic(italic);
        }
        if let Some(color) = &font.color {
            target.get_color_mut().set_argb(color.clone());
        }
    }

    if let Some(alignment) = &descriptor.alignment {
        let target: &mut Alignment = style.get_alignment_mut();
        if let Some(value) = alignment
            .horizontal
            .as_deref()
            .and_then(|h| HorizontalAlignmentValues::from_str(h).ok())
        {
            target.set_horizontal(value);
        }
        if let Some(value) = alignment
            .vertical
            .as_deref()
            .and_then(|v| VerticalAlignmentValues::from_str(v).ok())
        {
            target.set_vertical(value);
        }
        if let Some(wrap) = alignment.wrap_text {
            target.set_wrap_text(wrap);
        }
    }

    if let Some(borders) = &descriptor.borders {
        let target = style.get_borders_mut();
        apply_border(target.get_left_border_mut(), borders.left.as_ref());
        apply_border(target.get_right_border_mut(), borders.right.as_ref());
        apply_border(target.get_top_border_mut(), borders.top.as_ref());
        apply_border(target.get_bottom_border_mut(), borders.bottom.as_ref());
    }

    if let Some(fill) = &descriptor.fill {
        let pattern = style.get_fill_mut().get_pattern_fill_mut();
        if let Some(kind) = fill
            .pattern_type
            .as_deref()
            .and_then(|kind| PatternValues::from_str(kind).ok())
        {
            pattern.set_pattern_type(kind);
        }
        if let Some(color) = &fill.foreground_color {
            pattern.get_foreground_color_mut().set_argb(color.clone());
        }
        if let Some(color) = &fill.background_color {
            pattern.get_background_color_mut().set_argb(color.clone());
        }
    }

    if let Some(format) = &descriptor.number_format {
        style.get_number_format_mut().set_format_code(format.clone());
    }
}

fn apply_border(border: &mut Border, side: Option<&BorderSideDescriptor>) {
    let Some(side) = side else {
        return;
    };
    if let Some(line) = &side.style {
        border.set_border_style(line.clone());
    }
    if let Some(color) = &side.color {
        border.get_color_mut().set_argb(color.clone());
    }
}
