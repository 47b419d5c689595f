//! Compositions: named relative polygons plus a light-source position.
//!
//! A composition document is a JSON object mapping composition names to
//! `{ "lightSource": { "xRatio", "yRatio" }, "shapes": { name: [[x, y], ...] } }`.
//! Region order is significant (it is the paint order), so maps are read into
//! vectors in document order.
use std::fmt;
use std::marker::PhantomData;

use rand::RngCore;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::geometry::validate_polygon;
use crate::random;

/// Compositions shipped with the crate.
pub const BUNDLED_COMPOSITIONS: &str = include_str!("../assets/compositions.json");

/// Light-source position as fractions of the canvas width and height.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightRatios {
    pub x_ratio: f32,
    pub y_ratio: f32,
}

/// A region polygon in relative `[0, 1]` coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedPolygon {
    pub name: String,
    pub points: Vec<[f32; 2]>,
}

/// One composition: a light source and an ordered list of region polygons.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    #[serde(skip)]
    pub name: String,
    pub light_source: LightRatios,
    #[serde(deserialize_with = "ordered_regions")]
    pub shapes: Vec<NamedPolygon>,
}

impl Composition {
    /// Check light ratios and every region polygon.
    pub fn validate(&self) -> Result<()> {
        let LightRatios { x_ratio, y_ratio } = self.light_source;
        if !(0.0..=1.0).contains(&x_ratio) || !(0.0..=1.0).contains(&y_ratio) {
            return Err(Error::InvalidConfig(format!(
                "composition '{}': light source ratios must be within [0, 1], got ({x_ratio}, {y_ratio})",
                self.name
            )));
        }
        for region in &self.shapes {
            validate_polygon(&region.name, &region.points)?;
        }
        Ok(())
    }
}

/// A validated, ordered collection of compositions.
#[derive(Debug, Clone)]
pub struct CompositionSet {
    compositions: Vec<Composition>,
}

impl CompositionSet {
    /// The set bundled with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_COMPOSITIONS)
    }

    /// Parse and validate a composition document.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: OrderedDocument = serde_json::from_str(json)?;
        let compositions: Vec<Composition> = doc
            .0
            .into_iter()
            .map(|(name, composition)| Composition {
                name,
                ..composition
            })
            .collect();

        if compositions.is_empty() {
            return Err(Error::InvalidConfig(
                "composition document has no compositions".into(),
            ));
        }
        for composition in &compositions {
            composition.validate()?;
        }

        Ok(Self { compositions })
    }

    pub fn len(&self) -> usize {
        self.compositions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compositions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Composition> {
        self.compositions.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.compositions.iter().map(|c| c.name.as_str())
    }

    pub fn get(&self, name: &str) -> Result<&Composition> {
        self.compositions
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::UnknownComposition { name: name.into() })
    }

    /// Choose a composition uniformly at random.
    pub fn pick(&self, rng: &mut dyn RngCore) -> &Composition {
        random::pick(rng, &self.compositions).unwrap_or(&self.compositions[0])
    }
}

struct OrderedDocument(Vec<(String, Composition)>);

impl<'de> Deserialize<'de> for OrderedDocument {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer
            .deserialize_map(OrderedEntries::<Composition>::new(
                "a map of composition name to composition",
            ))
            .map(OrderedDocument)
    }
}

fn ordered_regions<'de, D>(deserializer: D) -> std::result::Result<Vec<NamedPolygon>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = deserializer.deserialize_map(OrderedEntries::<Vec<[f32; 2]>>::new(
        "a map of region name to relative points",
    ))?;
    Ok(entries
        .into_iter()
        .map(|(name, points)| NamedPolygon { name, points })
        .collect())
}

/// Reads a JSON object into `(key, value)` pairs, keeping document order.
struct OrderedEntries<V> {
    expecting: &'static str,
    marker: PhantomData<V>,
}

impl<V> OrderedEntries<V> {
    fn new(expecting: &'static str) -> Self {
        Self {
            expecting,
            marker: PhantomData,
        }
    }
}

impl<'de, V> Visitor<'de> for OrderedEntries<V>
where
    V: Deserialize<'de>,
{
    type Value = Vec<(String, V)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.expecting)
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<String, V>()? {
            out.push(entry);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    const DOC: &str = r#"{
        "second": {
            "lightSource": { "xRatio": 0.1, "yRatio": 0.9 },
            "shapes": {
                "zeta": [[0, 0], [1, 0], [1, 1]],
                "alpha": [[0, 0], [0.5, 0], [0.5, 0.5], [0, 0.5]]
            }
        },
        "first": {
            "lightSource": { "xRatio": 0.5, "yRatio": 0.5 },
            "shapes": {}
        }
    }"#;

    #[test]
    fn document_order_is_preserved() {
        let set = CompositionSet::from_json(DOC).unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), ["second", "first"]);

        let second = set.get("second").unwrap();
        let names: Vec<_> = second.shapes.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha"]);
        assert_eq!(second.shapes[1].points[2], [0.5, 0.5]);
        assert_eq!(
            second.light_source,
            LightRatios {
                x_ratio: 0.1,
                y_ratio: 0.9
            }
        );
    }

    #[test]
    fn unknown_composition_is_reported() {
        let set = CompositionSet::from_json(DOC).unwrap();
        assert!(matches!(
            set.get("missing"),
            Err(Error::UnknownComposition { ref name }) if name == "missing"
        ));
    }

    #[test]
    fn invalid_documents_are_rejected() {
        assert!(matches!(
            CompositionSet::from_json("{}"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            CompositionSet::from_json("[1, 2]"),
            Err(Error::Json(_))
        ));

        let short = r#"{"c": {"lightSource": {"xRatio": 0, "yRatio": 0},
            "shapes": {"line": [[0, 0], [1, 1]]}}}"#;
        assert!(matches!(
            CompositionSet::from_json(short),
            Err(Error::InvalidPolygon { ref name, .. }) if name == "line"
        ));

        let far_light = r#"{"c": {"lightSource": {"xRatio": 1.5, "yRatio": 0}, "shapes": {}}}"#;
        assert!(matches!(
            CompositionSet::from_json(far_light),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn bundled_set_parses_and_picks() {
        let set = CompositionSet::bundled().unwrap();
        assert!(set.len() >= 3);
        for composition in set.iter() {
            assert!(!composition.shapes.is_empty(), "{}", composition.name);
        }

        let mut rng = StdRng::seed_from_u64(10);
        let picked = set.pick(&mut rng);
        assert!(set.names().any(|n| n == picked.name));
    }
}
