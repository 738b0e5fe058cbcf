use crate::style::StyleOptions;
use std::collections::BTreeMap;

/// Keyword form of a dome normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormKeyword {
    /// Range taken from the data.
    Auto,
}

/// Normalization range of a dome panel: `"auto"` or `[vmin, vmax]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum NormSpec {
    /// Explicit range.
    Range([f64; 2]),
    /// Keyword.
    Keyword(NormKeyword),
}

/// User-facing configuration of one panel.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Plot kind name; inferred when absent.
    #[serde(alias = "type")]
    pub kind: Option<String>,
    /// Explicit channel-index groups.
    pub ids: Option<Vec<Vec<usize>>>,
    /// Reshape target `(rows, cols)` for image-like kinds.
    pub shape: Option<[usize; 2]>,
    /// Panel title.
    pub title: Option<String>,
    /// Transpose single-channel images after reshaping.
    #[serde(alias = "trans")]
    pub transpose: bool,
    /// Dome normalization.
    pub norm: Option<NormSpec>,
    /// Waveform format string, e.g. `"r-"`.
    pub fmt: Option<String>,
    /// Recognized style options.
    #[serde(flatten)]
    pub style: StyleOptions,
    /// Unrecognized keys; logged and ignored.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PanelConfig {
    /// Configuration with an explicit kind.
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    /// Set explicit channel groups.
    pub fn with_ids(mut self, ids: Vec<Vec<usize>>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Set the reshape target.
    pub fn with_shape(mut self, rows: usize, cols: usize) -> Self {
        self.shape = Some([rows, cols]);
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the dome normalization.
    pub fn with_norm(mut self, norm: NormSpec) -> Self {
        self.norm = Some(norm);
        self
    }
}
