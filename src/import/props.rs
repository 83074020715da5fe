//! Typed lookup into `Properties70` (and the older `Properties60`) blocks, with fallback to
//! the `Definitions` property templates.

use std::collections::HashMap;

use glam::DVec3;

use crate::types::{DocNode, Document, Property};

pub(crate) struct Props<'a> {
    values: HashMap<&'a str, &'a [Property]>,
    template: Option<&'a Props<'a>>,
}

impl<'a> Props<'a> {
    pub fn from_object(object: &'a DocNode, template: Option<&'a Props<'a>>) -> Props<'a> {
        let mut values = HashMap::new();
        // `P: name, type, label, flags, values...` vs. `Property: name, type, flags, values...`
        let blocks = [("Properties70", "P", 4), ("Properties60", "Property", 3)];
        for &(block, entry, skip) in blocks.iter() {
            if let Some(block) = object.child(block) {
                for p in block.children_named(entry) {
                    if let Some(name) = p.property(0).and_then(Property::as_str) {
                        let tail = p.properties.get(skip..).unwrap_or(&[]);
                        values.entry(name).or_insert(tail);
                    }
                }
                break;
            }
        }
        Props { values, template }
    }

    fn get(&self, name: &str) -> Option<&'a [Property]> {
        match self.values.get(name) {
            Some(&v) => Some(v),
            None => self.template.and_then(|t| t.get(name)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn real(&self, name: &str, default: f64) -> f64 {
        self.get(name)
            .and_then(|v| v.first())
            .and_then(Property::as_f64)
            .unwrap_or(default)
    }

    pub fn int(&self, name: &str, default: i64) -> i64 {
        match self.get(name).and_then(|v| v.first()) {
            Some(p) => p
                .as_i64()
                .or_else(|| p.as_f64().map(|f| f as i64))
                .unwrap_or(default),
            None => default,
        }
    }

    pub fn bool(&self, name: &str, default: bool) -> bool {
        self.int(name, default as i64) != 0
    }

    pub fn vec3(&self, name: &str, default: DVec3) -> DVec3 {
        match self.get(name) {
            Some(v) if v.len() >= 3 => match (v[0].as_f64(), v[1].as_f64(), v[2].as_f64()) {
                (Some(x), Some(y), Some(z)) => DVec3::new(x, y, z),
                _ => default,
            },
            _ => default,
        }
    }

    pub fn string(&self, name: &str) -> Option<&'a str> {
        self.get(name).and_then(|v| v.first()).and_then(Property::as_str)
    }
}

/// `Definitions/ObjectType/PropertyTemplate` blocks, which supply the values an exporter
/// omitted from individual objects.
pub(crate) struct Templates<'a> {
    templates: Vec<(&'a str, &'a str, Props<'a>)>,
}

impl<'a> Templates<'a> {
    pub fn from_document(document: &'a Document) -> Templates<'a> {
        let mut templates = Vec::new();
        if let Some(definitions) = document.node("Definitions") {
            for object_type in definitions.children_named("ObjectType") {
                let type_name = match object_type.property(0).and_then(Property::as_str) {
                    Some(name) => name,
                    None => continue,
                };
                for template in object_type.children_named("PropertyTemplate") {
                    let template_name =
                        template.property(0).and_then(Property::as_str).unwrap_or("");
                    templates.push((type_name, template_name, Props::from_object(template, None)));
                }
            }
        }
        Templates { templates }
    }

    /// Template `name` of `object_type`, or the first template of that type.
    pub fn get(&self, object_type: &str, name: &str) -> Option<&Props<'a>> {
        let mut candidates = self.templates.iter().filter(|t| t.0 == object_type);
        let first = candidates.clone().next();
        candidates
            .find(|t| t.1 == name)
            .or(first)
            .map(|t| &t.2)
    }
}
