//! Closed attribute domains and attribute bundles
//!
//! Every classified field takes its value from a fixed Azerbaijani vocabulary
//! used by the storefront. The vocabularies are modeled as `Copy` enums so an
//! out-of-domain value cannot be represented after validation.
//!
//! - [`AttributeBundle`] is the mutable working record (fields may be empty)
//! - [`Attributes`] is the validated output (all six fields present)
//! - [`RawAttributes`] carries untrusted free text (AI JSON, catalog display text)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Common behaviour of the six closed vocabularies
pub trait AttributeValue: Copy + Eq + fmt::Debug + 'static {
    /// Every legal value in storefront order
    const ALL: &'static [Self];

    /// Wire key of the field this vocabulary belongs to
    const FIELD: &'static str;

    /// Value the validation gate substitutes for an unrecognized one
    const GATE_DEFAULT: Self;

    /// Storefront label
    fn label(self) -> &'static str;

    /// Exact label match
    fn from_label(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.label() == raw)
    }

    /// Exact match first, then case-insensitive
    fn parse_loose(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Self::from_label(raw).or_else(|| {
            let lowered = raw.to_lowercase();
            Self::ALL
                .iter()
                .copied()
                .find(|v| v.label().to_lowercase() == lowered)
        })
    }

    /// Clamp free text into the domain, using `fallback` for empty or unknown input
    fn clamp(raw: Option<&str>, fallback: Self) -> Self {
        raw.and_then(Self::parse_loose).unwrap_or(fallback)
    }

    /// Labels of every legal value, for prompts and error messages
    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.label()).collect()
    }
}

macro_rules! attribute_enum {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal, default = $default:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl AttributeValue for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];
            const FIELD: &'static str = $field;
            const GATE_DEFAULT: Self = Self::$default;

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

attribute_enum! {
    /// Dial color ("siferblat rəngi")
    DialColor, field = "sr_dial_color", default = Grey {
        White => "Ağ",
        Grey => "Boz",
        Turquoise => "Firuzə",
        Brown => "Gəhvəyi",
        Blue => "Göy",
        Cream => "Krem",
        Navy => "Mavi",
        Black => "Qara",
        Red => "Qırmızı",
        Yellow => "Sarı",
        Green => "Yaşıl",
    }
}

attribute_enum! {
    /// Bracelet / strap material
    BraceletType, field = "bracelet_type", default = Leather {
        Leather => "Dəri",
        Rubber => "Kauçuk",
        Steel => "Polad",
    }
}

attribute_enum! {
    Gender, field = "gender", default = Male {
        Male => "Kişi",
        Female => "Qadın",
    }
}

attribute_enum! {
    Movement, field = "movement", default = Mechanical {
        Quartz => "Kvarts",
        Mechanical => "Mexanika",
    }
}

attribute_enum! {
    /// Bracelet / strap color ("kəmər rəngi")
    BraceletColor, field = "bracelet_color", default = Brown {
        White => "Ağ",
        Grey => "Boz",
        GreyYellow => "Boz/Sarı",
        Brown => "Gəhvəyi",
        Blue => "Göy",
        Cream => "Krem",
        Black => "Qara",
        Yellow => "Sarı",
    }
}

attribute_enum! {
    CaseMaterial, field = "case_material", default = Steel {
        Steel => "Polad",
        Plastic => "Plastik",
        Rubber => "Rezin",
    }
}

/// Working record passed between classification stages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeBundle {
    #[serde(rename = "sr_dial_color", default)]
    pub dial_color: Option<DialColor>,
    #[serde(default)]
    pub bracelet_type: Option<BraceletType>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub movement: Option<Movement>,
    #[serde(default)]
    pub bracelet_color: Option<BraceletColor>,
    #[serde(default)]
    pub case_material: Option<CaseMaterial>,
}

/// Validated attribute set: every field is present and in-domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(rename = "sr_dial_color")]
    pub dial_color: DialColor,
    pub bracelet_type: BraceletType,
    pub gender: Gender,
    pub movement: Movement,
    pub bracelet_color: BraceletColor,
    pub case_material: CaseMaterial,
}

impl Attributes {
    /// Safe bundle used wherever a field has no better signal
    pub const SAFE_DEFAULTS: Attributes = Attributes {
        dial_color: DialColor::Grey,
        bracelet_type: BraceletType::Leather,
        gender: Gender::Male,
        movement: Movement::Mechanical,
        bracelet_color: BraceletColor::Brown,
        case_material: CaseMaterial::Steel,
    };
}

impl From<Attributes> for AttributeBundle {
    fn from(a: Attributes) -> Self {
        Self {
            dial_color: Some(a.dial_color),
            bracelet_type: Some(a.bracelet_type),
            gender: Some(a.gender),
            movement: Some(a.movement),
            bracelet_color: Some(a.bracelet_color),
            case_material: Some(a.case_material),
        }
    }
}

/// Untrusted free-text attribute values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAttributes {
    #[serde(rename = "sr_dial_color", default)]
    pub dial_color: Option<String>,
    #[serde(default)]
    pub bracelet_type: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub movement: Option<String>,
    #[serde(default)]
    pub bracelet_color: Option<String>,
    #[serde(default)]
    pub case_material: Option<String>,
}

impl RawAttributes {
    /// Read the six wire keys from a JSON object, ignoring non-string values.
    ///
    /// Returns `None` when `value` is not an object.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let obj = value.as_object()?;
        let field = |key: &str| obj.get(key).and_then(|v| v.as_str()).map(str::to_string);
        Some(Self {
            dial_color: field(DialColor::FIELD),
            bracelet_type: field(BraceletType::FIELD),
            gender: field(Gender::FIELD),
            movement: field(Movement::FIELD),
            bracelet_color: field(BraceletColor::FIELD),
            case_material: field(CaseMaterial::FIELD),
        })
    }

    /// Clamp every field, substituting the matching `fallback` field when a
    /// value is empty or outside its domain.
    pub fn clamp_with(&self, fallback: &Attributes) -> Attributes {
        Attributes {
            dial_color: DialColor::clamp(self.dial_color.as_deref(), fallback.dial_color),
            bracelet_type: BraceletType::clamp(
                self.bracelet_type.as_deref(),
                fallback.bracelet_type,
            ),
            gender: Gender::clamp(self.gender.as_deref(), fallback.gender),
            movement: Movement::clamp(self.movement.as_deref(), fallback.movement),
            bracelet_color: BraceletColor::clamp(
                self.bracelet_color.as_deref(),
                fallback.bracelet_color,
            ),
            case_material: CaseMaterial::clamp(
                self.case_material.as_deref(),
                fallback.case_material,
            ),
        }
    }

    /// Clamp into a working bundle.
    ///
    /// Empty values stay empty; present but unrecognized values become the
    /// field's gate default.
    pub fn to_bundle(&self) -> AttributeBundle {
        fn one<T: AttributeValue>(raw: &Option<String>) -> Option<T> {
            let raw = raw.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
            Some(T::parse_loose(raw).unwrap_or(T::GATE_DEFAULT))
        }
        AttributeBundle {
            dial_color: one(&self.dial_color),
            bracelet_type: one(&self.bracelet_type),
            gender: one(&self.gender),
            movement: one(&self.movement),
            bracelet_color: one(&self.bracelet_color),
            case_material: one(&self.case_material),
        }
    }
}
