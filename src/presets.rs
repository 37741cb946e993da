//! Selectable products offered by the wizard.

/// A product the reseller can pick from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductPreset {
    /// Display name.
    pub name: &'static str,
    /// Image shown next to the name.
    pub image_url: &'static str,
}

/// Built-in product menu, in display order.
pub const PRODUCT_PRESETS: &[ProductPreset] = &[
    ProductPreset { name: "ArceusX", image_url: "images/arceusx.png" },
    ProductPreset { name: "Bunni", image_url: "images/bunni.png" },
    ProductPreset { name: "Cryptic", image_url: "images/cryptic.png" },
    ProductPreset { name: "Exoliner", image_url: "images/exoliner.png" },
    ProductPreset { name: "Fluxus", image_url: "images/fluxus.png" },
    ProductPreset { name: "MacSploit", image_url: "images/macsploit.png" },
    ProductPreset { name: "Ronin", image_url: "images/ronin.png" },
    ProductPreset { name: "Wave", image_url: "images/wave.png" },
    ProductPreset { name: "Zenith", image_url: "images/zenith.png" },
    ProductPreset { name: "Seliware", image_url: "images/seliware.png" },
    ProductPreset { name: "Assembly", image_url: "images/assembly.png" },
    ProductPreset { name: "Valex", image_url: "images/valex.png" },
];

/// Finds a preset by name, ignoring case and surrounding whitespace.
#[inline]
#[must_use]
pub fn find_preset(name: &str) -> Option<&'static ProductPreset> {
    let wanted = name.trim();
    PRODUCT_PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(wanted))
}
