//! Typed panel styling with capability queries.
//!
//! Panel configurations carry a [`StyleOptions`] block. It is turned into a list of
//! [`StyleAttr`]s and offered to both the axes decor and the panel's primary artist; each target
//! reports through [`Stylable::supports`] whether it can take an attribute. Attributes nobody
//! supports are skipped, never raised.

use crate::figure::{Axes, TextLabel};
use crate::shading::color::Rgb8;
use std::collections::BTreeMap;

/// Identifies a style attribute without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleKey {
    /// Axes title.
    Title,
    /// X-axis label.
    XLabel,
    /// Y-axis label.
    YLabel,
    /// X limits.
    XLim,
    /// Y limits.
    YLim,
    /// Intensity limits of scalar images.
    CLim,
    /// Artist color.
    Color,
}

/// A style attribute with its value.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleAttr {
    /// Axes title.
    Title(TextLabel),
    /// X-axis label.
    XLabel(TextLabel),
    /// Y-axis label.
    YLabel(TextLabel),
    /// X limits `(lo, hi)`.
    XLim(f64, f64),
    /// Y limits `(lo, hi)`.
    YLim(f64, f64),
    /// Intensity limits `(lo, hi)`.
    CLim(f64, f64),
    /// Artist color.
    Color(Rgb8),
}

impl StyleAttr {
    /// Key of this attribute.
    pub fn key(&self) -> StyleKey {
        match self {
            StyleAttr::Title(_) => StyleKey::Title,
            StyleAttr::XLabel(_) => StyleKey::XLabel,
            StyleAttr::YLabel(_) => StyleKey::YLabel,
            StyleAttr::XLim(..) => StyleKey::XLim,
            StyleAttr::YLim(..) => StyleKey::YLim,
            StyleAttr::CLim(..) => StyleKey::CLim,
            StyleAttr::Color(_) => StyleKey::Color,
        }
    }
}

/// Something that can receive style attributes.
pub trait Stylable {
    /// Return `true` when `key` can be applied to `self`.
    fn supports(&self, key: StyleKey) -> bool;

    /// Apply one attribute. Unsupported attributes are a no-op.
    fn apply_style(&mut self, attr: &StyleAttr);
}

/// Recognized per-panel style options.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    /// Fixed x limits.
    pub xlim: Option<[f64; 2]>,
    /// Fixed y limits.
    pub ylim: Option<[f64; 2]>,
    /// Intensity limits of scalar images.
    pub clim: Option<[f64; 2]>,
    /// X-axis label.
    pub xlabel: Option<String>,
    /// Y-axis label.
    pub ylabel: Option<String>,
    /// Artist color (`"r"`, `"black"`, `"#336699"`).
    pub color: Option<String>,
    /// Font size override for this panel's title and labels.
    pub fontsize: Option<f64>,
}

impl StyleOptions {
    /// Resolve into attributes. `title` is rendered bold at the effective font size.
    ///
    /// An unparsable color is dropped with a debug event.
    pub fn attrs(&self, title: Option<&str>, fontsize: f64) -> Vec<StyleAttr> {
        let size = self.fontsize.unwrap_or(fontsize);
        let mut out = Vec::new();
        if let Some(t) = title {
            out.push(StyleAttr::Title(TextLabel::bold(t, size)));
        }
        if let Some(l) = &self.xlabel {
            out.push(StyleAttr::XLabel(TextLabel::bold(l.as_str(), size)));
        }
        if let Some(l) = &self.ylabel {
            out.push(StyleAttr::YLabel(TextLabel::bold(l.as_str(), size)));
        }
        if let Some([lo, hi]) = self.xlim {
            out.push(StyleAttr::XLim(lo, hi));
        }
        if let Some([lo, hi]) = self.ylim {
            out.push(StyleAttr::YLim(lo, hi));
        }
        if let Some([lo, hi]) = self.clim {
            out.push(StyleAttr::CLim(lo, hi));
        }
        if let Some(c) = &self.color {
            match Rgb8::parse(c) {
                Ok(c) => out.push(StyleAttr::Color(c)),
                Err(e) => tracing::debug!(color = %c, error = %e, "ignoring style color"),
            }
        }
        out
    }
}

/// Outcome of [`apply_style`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleReport {
    /// Keys taken by at least one target.
    pub applied: Vec<StyleKey>,
    /// Keys no target supported.
    pub skipped: Vec<StyleKey>,
}

/// Offer every attribute to the axes decor and the primary artist of `axes`.
pub fn apply_style(axes: &mut Axes, attrs: &[StyleAttr]) -> StyleReport {
    let mut report = StyleReport::default();
    let slot = axes.slot;
    let Axes {
        decor, artists, ..
    } = axes;
    let mut primary = artists.first_mut();
    for attr in attrs {
        let key = attr.key();
        let mut taken = false;
        if decor.supports(key) {
            decor.apply_style(attr);
            taken = true;
        }
        if let Some(artist) = primary.as_deref_mut()
            && artist.supports(key)
        {
            artist.apply_style(attr);
            taken = true;
        }
        if taken {
            report.applied.push(key);
        } else {
            report.skipped.push(key);
        }
    }
    if !report.skipped.is_empty() {
        tracing::debug!(slot, skipped = ?report.skipped, "style attributes not supported");
    }
    report
}

/// Log option keys that are not recognized anywhere.
pub fn log_unknown_options(context: &str, extra: &BTreeMap<String, serde_json::Value>) {
    for key in extra.keys() {
        tracing::debug!(context, key = %key, "ignoring unknown panel option");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/resolve.rs"]
mod tests;
