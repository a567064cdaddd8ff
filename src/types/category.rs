//! Coarse type grouping for pickers and menus.

use super::{TypeHandle, builtin};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Coarse grouping used by tooling when listing types in a picker.
///
/// Known variants keep serialization stable; `Other` preserves labels written
/// by newer tooling.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeCategory {
    Core,
    Behaviour,
    Capability,
    Asset,
    Texture,
    Material,
    Mesh,
    Audio,
    Sprite,
    Ui,
    Rendering,
    Video,
    Uncategorized,
    Other(String),
}

// Checked in order; the first ancestor match wins.
const ANCESTOR_RULES: &[(&str, TypeCategory)] = &[
    (builtin::BEHAVIOUR, TypeCategory::Behaviour),
    (builtin::CAPABILITY, TypeCategory::Capability),
];

const ASSET_RULES: &[(&str, TypeCategory)] = &[
    (builtin::ASSET, TypeCategory::Asset),
    (builtin::TEXTURE, TypeCategory::Texture),
    (builtin::MATERIAL, TypeCategory::Material),
    (builtin::MESH, TypeCategory::Mesh),
    (builtin::AUDIO_CLIP, TypeCategory::Audio),
    (builtin::SPRITE, TypeCategory::Sprite),
];

const NAMESPACE_RULES: &[(&str, TypeCategory)] = &[
    ("ui", TypeCategory::Ui),
    ("rendering", TypeCategory::Rendering),
    ("audio", TypeCategory::Audio),
    ("video", TypeCategory::Video),
];

impl TypeCategory {
    /// Classify a type by ancestry, then by namespace prefix.
    pub fn of(ty: &TypeHandle) -> Self {
        if ty.is_universal() || ty.name() == builtin::NODE {
            return TypeCategory::Core;
        }
        let derives_from = |name: &str| ty.ancestors().any(|ancestor| ancestor.name() == name);
        for (name, category) in ANCESTOR_RULES.iter().chain(ASSET_RULES) {
            if derives_from(*name) {
                return category.clone();
            }
        }
        if let Some(namespace) = ty.namespace() {
            for (prefix, category) in NAMESPACE_RULES {
                if namespace.starts_with(prefix) {
                    return category.clone();
                }
            }
        }
        TypeCategory::Uncategorized
    }

    /// `Category/ShortName` path for a grouped type menu.
    pub fn menu_path(ty: &TypeHandle) -> String {
        format!("{}/{}", Self::of(ty).as_str(), ty.short_name())
    }

    pub fn as_str(&self) -> &str {
        match self {
            TypeCategory::Core => "Core",
            TypeCategory::Behaviour => "Behaviour",
            TypeCategory::Capability => "Capability",
            TypeCategory::Asset => "Asset",
            TypeCategory::Texture => "Texture",
            TypeCategory::Material => "Material",
            TypeCategory::Mesh => "Mesh",
            TypeCategory::Audio => "Audio",
            TypeCategory::Sprite => "Sprite",
            TypeCategory::Ui => "UI",
            TypeCategory::Rendering => "Rendering",
            TypeCategory::Video => "Video",
            TypeCategory::Uncategorized => "Other",
            TypeCategory::Other(value) => value.as_str(),
        }
    }

    fn from_label(value: &str) -> Self {
        match value {
            "Core" => TypeCategory::Core,
            "Behaviour" => TypeCategory::Behaviour,
            "Capability" => TypeCategory::Capability,
            "Asset" => TypeCategory::Asset,
            "Texture" => TypeCategory::Texture,
            "Material" => TypeCategory::Material,
            "Mesh" => TypeCategory::Mesh,
            "Audio" => TypeCategory::Audio,
            "Sprite" => TypeCategory::Sprite,
            "UI" => TypeCategory::Ui,
            "Rendering" => TypeCategory::Rendering,
            "Video" => TypeCategory::Video,
            "Other" => TypeCategory::Uncategorized,
            other => TypeCategory::Other(other.to_string()),
        }
    }
}

impl Serialize for TypeCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TypeCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_label(&value))
    }
}
