//! Drugs owned by the current user

use crate::core::entity::{Entity, FailureMessages};
use crate::core::error::NormalizeError;
use crate::core::normalize;
use crate::entities::{DrugBrand, DrugName};
use crate::impl_string_enum;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

impl_string_enum!(DrugForm {
    Tablet => "tablet",
    Capsule => "capsule",
    Syrup => "syrup",
    Drops => "drops",
    Injection => "injection",
    Cream => "cream",
    Powder => "powder",
    Spray => "spray",
    Patch => "patch",
});

impl_string_enum!(DrugUnit {
    Milligram => "mg",
    Gram => "g",
    Microgram => "mcg",
    Milliliter => "ml",
    InternationalUnit => "ui",
    Percent => "%",
});

const ENTITY_TYPE: &str = "user_drug";

/// A drug in the user's medicine cabinet
///
/// Brand and name are embedded records, not foreign keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDrug {
    pub id: i64,
    pub drug_brand: DrugBrand,
    pub drug_name: DrugName,
    pub form: DrugForm,
    pub dose: f64,
    pub note: Option<String>,
    pub unit: DrugUnit,
    pub expiration_date_time: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /user-drug`, sent exactly as built by the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserDrug {
    pub drug_brand: DrugBrand,
    pub drug_name: DrugName,
    pub form: DrugForm,
    pub dose: f64,
    pub note: Option<String>,
    pub unit: DrugUnit,
    pub expiration_date_time: Option<DateTime<Utc>>,
}

fn enum_field<T>(
    obj: &serde_json::Map<String, Value>,
    field: &str,
    parse: fn(&str) -> T,
) -> Result<T, NormalizeError> {
    normalize::string_field(ENTITY_TYPE, obj, field).map(|raw| parse(&raw))
}

impl Entity for UserDrug {
    type Payload = NewUserDrug;

    const RESOURCE: &'static str = "user-drug";

    const FAILURES: FailureMessages = FailureMessages {
        fetch_all: "Impossible de récupérer vos médicaments",
        create: "Impossible de créer votre médicament",
        delete_one: "Suppression impossible",
    };

    fn id(&self) -> i64 {
        self.id
    }

    fn from_json(value: &Value) -> Result<Self, NormalizeError> {
        let obj = normalize::as_object(ENTITY_TYPE, value)?;

        Ok(Self {
            id: normalize::id_field(ENTITY_TYPE, obj, "id")?,
            drug_brand: DrugBrand::normalize(normalize::object_field(
                ENTITY_TYPE,
                obj,
                "drugBrand",
            )?)?,
            drug_name: DrugName::normalize(normalize::object_field(
                ENTITY_TYPE,
                obj,
                "drugName",
            )?)?,
            form: enum_field(obj, "form", DrugForm::parse)?,
            dose: normalize::number_field(ENTITY_TYPE, obj, "dose")?,
            note: normalize::opt_string_field(ENTITY_TYPE, obj, "note")?,
            unit: enum_field(obj, "unit", DrugUnit::parse)?,
            expiration_date_time: normalize::opt_datetime_field(
                ENTITY_TYPE,
                obj,
                "expirationDateTime",
            )?,
            created_at: normalize::opt_datetime_field(ENTITY_TYPE, obj, "createdAt")?,
            updated_at: normalize::opt_datetime_field(ENTITY_TYPE, obj, "updatedAt")?,
        })
    }
}
