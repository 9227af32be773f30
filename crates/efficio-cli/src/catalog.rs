//! The object catalog: names every buildable part and constructs it from
//! `key=value` parameters.

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};

use efficio::buttons::Button;
use efficio::container::RoundedBox;
use efficio::fasteners::{M3Bolt, M3BoltAssembly, M3BoltChannel, M3HexNut};
use efficio::gears::{Gear, ToothForm};
use efficio::primitives::{Cuboid, Cylinder, Sphere};
use efficio::{Length, Object};

/// A catalog row: object name, what it is, and the parameters it accepts.
pub struct CatalogEntry {
    /// Name passed to `--object`.
    pub name: &'static str,
    /// One-line description.
    pub summary: &'static str,
    /// Parameter list, required first.
    pub params: &'static str,
}

/// Every object the CLI can build.
pub fn catalog() -> &'static [CatalogEntry] {
    &[
        CatalogEntry {
            name: "box",
            summary: "rectangular box, centered on the origin",
            params: "width, length, depth",
        },
        CatalogEntry {
            name: "cylinder",
            summary: "cylinder along Z, base on the XY plane",
            params: "length, radius",
        },
        CatalogEntry {
            name: "sphere",
            summary: "sphere centered on the origin",
            params: "radius",
        },
        CatalogEntry {
            name: "rectangular-gear",
            summary: "gear with straight full-width teeth",
            params: "radius, teeth, thickness",
        },
        CatalogEntry {
            name: "trapezoidal-gear",
            summary: "gear with tapered teeth",
            params: "radius, teeth, thickness",
        },
        CatalogEntry {
            name: "involute-gear",
            summary: "involute gear (sizing math only; cannot be built)",
            params: "radius, teeth, thickness",
        },
        CatalogEntry {
            name: "spherical-gear",
            summary: "sphere with tooth blocks on three rings",
            params: "radius, teeth",
        },
        CatalogEntry {
            name: "m3-bolt",
            summary: "M3 pan-head bolt",
            params: "length [, clearance]",
        },
        CatalogEntry {
            name: "m3-nut",
            summary: "M3 hex nut",
            params: "[clearance]",
        },
        CatalogEntry {
            name: "m3-bolt-assembly",
            summary: "M3 bolt with a nut flush on the shaft end",
            params: "length [, clearance]",
        },
        CatalogEntry {
            name: "m3-bolt-channel",
            summary: "clearance column with an M3 assembly cavity",
            params: "length",
        },
        CatalogEntry {
            name: "button",
            summary: "push-button blank: cap plus stem",
            params: "head-height, head-diameter, shaft-length, shaft-diameter [, clearance]",
        },
        CatalogEntry {
            name: "rounded-box",
            summary: "hollow rounded container with a parked lid",
            params: "width, length, depth",
        },
    ]
}

/// Parsed `key=value` parameters.
#[derive(Debug, Default)]
pub struct Params {
    values: BTreeMap<String, String>,
}

impl Params {
    /// Parse repeated `key=value` arguments; the value may itself contain
    /// `=`, the split happens at the first one.
    pub fn parse(pairs: &[String]) -> Result<Self> {
        let mut values = BTreeMap::new();
        for pair in pairs {
            let Some((key, value)) = pair.split_once('=') else {
                bail!("expected key=value, got {pair:?}");
            };
            if key.is_empty() {
                bail!("empty parameter name in {pair:?}");
            }
            values.insert(key.to_string(), value.to_string());
        }
        Ok(Self { values })
    }

    /// Build from an already-keyed map (recipe files).
    pub fn from_map(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    fn length(&self, key: &str) -> Result<Length> {
        let raw = self
            .values
            .get(key)
            .with_context(|| format!("missing required parameter {key:?}"))?;
        Ok(Length::parse(raw)?)
    }

    fn u32(&self, key: &str) -> Result<u32> {
        let raw = self
            .values
            .get(key)
            .with_context(|| format!("missing required parameter {key:?}"))?;
        raw.parse()
            .with_context(|| format!("parameter {key:?} is not a whole number: {raw:?}"))
    }

    fn bool_or(&self, key: &str, default: bool) -> Result<bool> {
        match self.values.get(key) {
            None => Ok(default),
            Some(raw) => match raw.as_str() {
                "true" | "yes" | "1" => Ok(true),
                "false" | "no" | "0" => Ok(false),
                other => bail!("parameter {key:?} is not a boolean: {other:?}"),
            },
        }
    }

    fn assert_known(&self, allowed: &[&str]) -> Result<()> {
        for key in self.values.keys() {
            if !allowed.contains(&key.as_str()) {
                bail!("unknown parameter {key:?} (expected one of {allowed:?})");
            }
        }
        Ok(())
    }
}

/// Construct the named object from its parameters.
pub fn build_object(name: &str, params: &Params) -> Result<Box<dyn Object>> {
    let object: Box<dyn Object> = match name {
        "box" => {
            params.assert_known(&["width", "length", "depth"])?;
            Box::new(Cuboid::new(
                params.length("width")?,
                params.length("length")?,
                params.length("depth")?,
            ))
        }
        "cylinder" => {
            params.assert_known(&["length", "radius"])?;
            Box::new(Cylinder::new(
                params.length("length")?,
                params.length("radius")?,
            ))
        }
        "sphere" => {
            params.assert_known(&["radius"])?;
            Box::new(Sphere::new(params.length("radius")?))
        }
        "rectangular-gear" | "trapezoidal-gear" | "involute-gear" => {
            params.assert_known(&["radius", "teeth", "thickness"])?;
            let form = match name {
                "rectangular-gear" => ToothForm::Rectangular,
                "trapezoidal-gear" => ToothForm::Trapezoidal,
                _ => ToothForm::Involute,
            };
            Box::new(Gear::new(
                params.length("radius")?,
                params.u32("teeth")?,
                params.length("thickness")?,
                form,
            ))
        }
        "spherical-gear" => {
            params.assert_known(&["radius", "teeth"])?;
            Box::new(Gear::spherical(
                params.length("radius")?,
                params.u32("teeth")?,
            ))
        }
        "m3-bolt" => {
            params.assert_known(&["length", "clearance"])?;
            Box::new(M3Bolt::new(
                params.length("length")?,
                params.bool_or("clearance", false)?,
            ))
        }
        "m3-nut" => {
            params.assert_known(&["clearance"])?;
            Box::new(M3HexNut::new(params.bool_or("clearance", false)?))
        }
        "m3-bolt-assembly" => {
            params.assert_known(&["length", "clearance"])?;
            Box::new(M3BoltAssembly::new(
                params.length("length")?,
                params.bool_or("clearance", false)?,
            ))
        }
        "m3-bolt-channel" => {
            params.assert_known(&["length"])?;
            Box::new(M3BoltChannel::new(params.length("length")?)?)
        }
        "button" => {
            params.assert_known(&[
                "head-height",
                "head-diameter",
                "shaft-length",
                "shaft-diameter",
                "clearance",
            ])?;
            Box::new(Button::new(
                params.length("head-height")?,
                params.length("head-diameter")?,
                params.length("shaft-length")?,
                params.length("shaft-diameter")?,
                params.bool_or("clearance", false)?,
            ))
        }
        "rounded-box" => {
            params.assert_known(&["width", "length", "depth"])?;
            Box::new(RoundedBox::new(
                params.length("width")?,
                params.length("length")?,
                params.length("depth")?,
            ))
        }
        other => bail!(
            "unknown object {other:?}; run `efficio list` for the catalog"
        ),
    };
    Ok(object)
}
