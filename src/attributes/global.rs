//! Global (dataset level) attributes.

use super::AttrValue;
use crate::error::{CfStructError, Result};
use netcdf::AttributeValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `Conventions` value emitted when none is set.
pub const DEFAULT_CONVENTIONS: &str = "CF-1.8, ACDD-1.3";

macro_rules! global_attributes {
    ($( $(#[$doc:meta])* $field:ident => $name:tt ),+ $(,)?) => {
        /// Global attributes of a dataset.
        ///
        /// All attributes are optional free-form text; anything not covered by
        /// a field lives in [`GlobalAttributes::other`].
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct GlobalAttributes {
            $(
                $(#[$doc])*
                #[serde(rename = $name, default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<String>,
            )+
            /// Further global attributes.
            #[serde(flatten)]
            pub other: BTreeMap<String, AttrValue>,
        }

        impl GlobalAttributes {
            const FIELD_NAMES: &'static [&'static str] = &[$($name),+];

            fn field(&self, name: &str) -> Option<&Option<String>> {
                match name {
                    $($name => Some(&self.$field),)+
                    _ => None,
                }
            }

            fn field_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
                match name {
                    $($name => Some(&mut self.$field),)+
                    _ => None,
                }
            }
        }
    };
}

global_attributes! {
    /// Short description of the dataset.
    title => "title",
    /// Paragraph describing the dataset.
    summary => "summary",
    /// Comma separated keywords.
    keywords => "keywords",
    /// Conventions the dataset follows.
    conventions => "Conventions",
    /// Producing institution.
    institution => "institution",
    /// Method of production.
    source => "source",
    /// Processing history.
    history => "history",
    /// References describing the data.
    references => "references",
    /// Free text comment.
    comment => "comment",
    /// Usage license.
    license => "license",
    /// Project name.
    project => "project",
    /// Dataset id.
    id => "id",
    /// Naming authority of `id`.
    naming_authority => "naming_authority",
    /// Creator name.
    creator_name => "creator_name",
    /// Creator email.
    creator_email => "creator_email",
    /// Creator url.
    creator_url => "creator_url",
    /// Creation date (ISO 8601).
    date_created => "date_created",
}

impl GlobalAttributes {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style [`GlobalAttributes::set`].
    pub fn with(mut self, name: &str, value: impl Into<AttrValue>) -> Result<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Set an attribute. Named fields only accept text.
    pub fn set(&mut self, name: &str, value: impl Into<AttrValue>) -> Result<()> {
        let value = value.into();
        match self.field_mut(name) {
            Some(slot) => match value {
                AttrValue::Str(s) => *slot = Some(s),
                other => {
                    return Err(CfStructError::invalid_attribute(
                        name,
                        format!("expected string, got {} ({})", other.kind(), other),
                    ))
                }
            },
            None => {
                self.other.insert(name.to_string(), value);
            }
        }
        Ok(())
    }

    /// Get an attribute by its netCDF name.
    pub fn get(&self, name: &str) -> Option<AttrValue> {
        match self.field(name) {
            Some(slot) => slot.clone().map(AttrValue::Str),
            None => self.other.get(name).cloned(),
        }
    }

    /// Whether an attribute is set.
    pub fn contains(&self, name: &str) -> bool {
        match self.field(name) {
            Some(slot) => slot.is_some(),
            None => self.other.contains_key(name),
        }
    }

    /// Iterate over set attributes, named fields first.
    pub fn iter(&self) -> impl Iterator<Item = (String, AttrValue)> + '_ {
        let named = Self::FIELD_NAMES.iter().filter_map(move |name| {
            self.field(name)
                .and_then(|slot| slot.clone())
                .map(|v| (name.to_string(), AttrValue::Str(v)))
        });
        named.chain(self.other.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    /// All set attributes in netCDF form. `Conventions` falls back to
    /// [`DEFAULT_CONVENTIONS`].
    pub fn to_netcdf(&self) -> Vec<(String, AttributeValue)> {
        let mut out: Vec<(String, AttributeValue)> = self
            .iter()
            .map(|(name, value)| (name, AttributeValue::from(&value)))
            .collect();
        if self.conventions.is_none() {
            out.push((
                "Conventions".to_string(),
                AttributeValue::Str(DEFAULT_CONVENTIONS.to_string()),
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_fields_and_extras_share_one_namespace() {
        let attrs = GlobalAttributes::new()
            .with("title", "Sea ice concentration")
            .unwrap()
            .with("platform", "DMSP")
            .unwrap()
            .with("Conventions", "CF-1.10")
            .unwrap();

        assert_eq!(attrs.title.as_deref(), Some("Sea ice concentration"));
        assert_eq!(attrs.get("platform"), Some(AttrValue::from("DMSP")));
        assert!(attrs.contains("Conventions"));
        assert!(!attrs.contains("summary"));

        let names: Vec<String> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["title", "Conventions", "platform"]);
    }

    #[test]
    fn named_fields_reject_numbers() {
        let mut attrs = GlobalAttributes::new();
        assert!(attrs.set("title", 3.0).is_err());
        assert!(attrs.set("geospatial_lat_min", -90.0).is_ok());
    }
}
