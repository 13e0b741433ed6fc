//! # Product Icons
//!
//! One immutable table from icon name to [`IconId`], grouped the way the icon picker shows
//! them. Lookups never fail: an absent or unknown name resolves to [`FALLBACK_ICON`].

use serde::Serialize;
use std::fmt::Display;

/// Opaque identifier a renderer maps to an actual glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IconId(&'static str);

impl IconId {
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl Display for IconId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

pub const FALLBACK_ICON: IconId = IconId("Pill");

#[derive(Debug, Clone, Copy)]
pub struct IconGroup {
    pub label: &'static str,
    pub icons: &'static [&'static str],
}

static ICON_GROUPS: &[IconGroup] = &[
    IconGroup {
        label: "Tablets & Capsules",
        icons: &["Pill", "Tablets", "Circle", "CircleDot", "Hexagon", "Square"],
    },
    IconGroup {
        label: "Liquids & Syrups",
        icons: &[
            "Droplet", "Droplets", "Beaker", "FlaskConical", "FlaskRound", "Wine", "Coffee",
            "Waves", "Soup",
        ],
    },
    IconGroup {
        label: "Injections & IV",
        icons: &["Syringe", "TestTube", "CloudRain"],
    },
    IconGroup {
        label: "Topical Products",
        icons: &["Bandage", "Sparkles", "Sparkle", "Snowflake", "Flame", "Gem"],
    },
    IconGroup {
        label: "Body Systems",
        icons: &[
            "Eye", "Ear", "Brain", "Bone", "Heart", "HeartPulse", "Activity", "Wind",
            "Footprints", "Fingerprint",
        ],
    },
    IconGroup {
        label: "Medical Equipment",
        icons: &[
            "Stethoscope", "Thermometer", "Microscope", "Cross", "Shield", "Ambulance",
            "Briefcase",
        ],
    },
    IconGroup {
        label: "Supplements & Vitamins",
        icons: &["Leaf", "Flower2", "Sun", "Dna", "Zap", "Atom", "Star", "Lightbulb"],
    },
    IconGroup {
        label: "Nutrition",
        icons: &["Apple", "Carrot", "Cherry", "Salad", "Milk"],
    },
    IconGroup {
        label: "Special Care",
        icons: &[
            "Baby", "User", "Users", "Moon", "Accessibility", "Glasses", "Shirt", "Watch",
        ],
    },
    IconGroup {
        label: "Packaging",
        icons: &["Package", "Package2", "Box", "Boxes"],
    },
    IconGroup {
        label: "General",
        icons: &["Check", "Plus", "AlertCircle", "AlertOctagon", "Triangle"],
    },
];

/// Groups in picker order.
pub fn icon_groups() -> &'static [IconGroup] {
    ICON_GROUPS
}

/// Every known icon, in picker order.
pub fn all_icons() -> impl Iterator<Item = IconId> {
    ICON_GROUPS
        .iter()
        .flat_map(|group| group.icons.iter().map(|name| IconId(*name)))
}

/// Resolves a stored icon name; unknown or missing names give [`FALLBACK_ICON`].
pub fn icon_for(name: Option<&str>) -> IconId {
    name.and_then(|wanted| all_icons().find(|icon| icon.0 == wanted))
        .unwrap_or(FALLBACK_ICON)
}
