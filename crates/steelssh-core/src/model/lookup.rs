// ── Model code lookup ──
//
// Node records carry internal model codes; operators know the product
// names. `ModelLookup` is the seam the directory builder resolves names
// through, so tests can swap in a fixed table.

use std::borrow::Cow;

/// Resolves an internal model code to a human-readable product name.
pub trait ModelLookup {
    /// Product name for `code`. Unknown codes are returned unchanged.
    fn model_name<'a>(&self, code: &'a str) -> Cow<'a, str>;
}

/// Built-in table of SteelConnect appliance codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelCatalog;

const CATALOG: &[(&str, &str)] = &[
    ("aardvark", "SDI-S48"),
    ("baloo", "SDI-AP5r"),
    ("beorn", "SDI-AP5"),
    ("booboo", "SDI-AP3"),
    ("cx3070", "SteelHead CX3070"),
    ("cx570", "SteelHead CX570"),
    ("cx770", "SteelHead CX770"),
    ("ewok", "SDI-S24"),
    ("grizzly", "SDI-1030"),
    ("koala", "SDI-S12"),
    ("kodiak", "SDI-AWS"),
    ("misha", "SDI-AZURE"),
    ("panda", "SDI-130"),
    ("panther", "SDI-5030"),
    ("raccoon", "SDI-330"),
    ("sloth", "SDI-USB-LTE"),
    ("ursus", "SDI-ESXI"),
    ("xr320", "Xirrus XR-320"),
    ("xr620", "Xirrus XR-620"),
    ("yogi", "SDI-130W"),
];

impl ModelLookup for ModelCatalog {
    fn model_name<'a>(&self, code: &'a str) -> Cow<'a, str> {
        CATALOG
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(code))
            .map_or(Cow::Borrowed(code), |(_, name)| Cow::Borrowed(*name))
    }
}

impl<F> ModelLookup for F
where
    F: Fn(&str) -> Option<&'static str>,
{
    fn model_name<'a>(&self, code: &'a str) -> Cow<'a, str> {
        self(code).map_or(Cow::Borrowed(code), Cow::Borrowed)
    }
}
