//! Named color palettes
//!
//! Color lists match the Plotly palettes of the same names.

use crate::types::ColorScheme;

pub const PLOTLY_QUALITATIVE: &[&str] = &[
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

pub const VIRIDIS: &[&str] = &[
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b", "#fde725",
];

pub const PLASMA: &[&str] = &[
    "#0d0887", "#46039f", "#7201a8", "#9c179e", "#bd3786", "#d8576b", "#ed7953", "#fb9f3a",
    "#fdca26", "#f0f921",
];

pub const BLUES: &[&str] = &[
    "rgb(247,251,255)", "rgb(222,235,247)", "rgb(198,219,239)", "rgb(158,202,225)",
    "rgb(107,174,214)", "rgb(66,146,198)", "rgb(33,113,181)", "rgb(8,81,156)", "rgb(8,48,107)",
];

pub const REDS: &[&str] = &[
    "rgb(255,245,240)", "rgb(254,224,210)", "rgb(252,187,161)", "rgb(252,146,114)",
    "rgb(251,106,74)", "rgb(239,59,44)", "rgb(203,24,29)", "rgb(165,15,21)", "rgb(103,0,13)",
];

pub const GREENS: &[&str] = &[
    "rgb(247,252,245)", "rgb(229,245,224)", "rgb(199,233,192)", "rgb(161,217,155)",
    "rgb(116,196,118)", "rgb(65,171,93)", "rgb(35,139,69)", "rgb(0,109,44)", "rgb(0,68,27)",
];

pub const SUNSET: &[&str] = &[
    "rgb(243, 231, 155)", "rgb(250, 196, 132)", "rgb(248, 160, 126)", "rgb(235, 127, 134)",
    "rgb(206, 102, 147)", "rgb(160, 89, 160)", "rgb(92, 83, 165)",
];

pub const TEAL: &[&str] = &[
    "rgb(209, 238, 234)", "rgb(168, 219, 217)", "rgb(133, 196, 201)", "rgb(104, 171, 184)",
    "rgb(79, 144, 166)", "rgb(59, 115, 143)", "rgb(42, 86, 116)",
];

pub const PURPLES: &[&str] = &[
    "rgb(252,251,253)", "rgb(239,237,245)", "rgb(218,218,235)", "rgb(188,189,220)",
    "rgb(158,154,200)", "rgb(128,125,186)", "rgb(106,81,163)", "rgb(84,39,143)", "rgb(63,0,125)",
];

impl ColorScheme {
    /// Discrete colors for this scheme, or `None` for an unknown name
    pub fn palette(&self) -> Option<&'static [&'static str]> {
        match self {
            ColorScheme::Default => Some(PLOTLY_QUALITATIVE),
            ColorScheme::Viridis => Some(VIRIDIS),
            ColorScheme::Plasma => Some(PLASMA),
            ColorScheme::Blues => Some(BLUES),
            ColorScheme::Reds => Some(REDS),
            ColorScheme::Greens => Some(GREENS),
            ColorScheme::Sunset => Some(SUNSET),
            ColorScheme::Ocean => Some(TEAL),
            ColorScheme::Purple => Some(PURPLES),
            ColorScheme::Custom(_) => None,
        }
    }

    /// Continuous scale for heatmaps. The qualitative default has none.
    pub fn continuous_scale(&self) -> Option<&'static [&'static str]> {
        match self {
            ColorScheme::Default | ColorScheme::Custom(_) => None,
            other => other.palette(),
        }
    }
}
