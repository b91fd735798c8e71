//! Drug brands

use crate::core::entity::{Entity, FailureMessages};
use crate::core::error::NormalizeError;
use crate::impl_named_entity;
use serde::{Deserialize, Serialize};
use serde_json::Value;

impl_named_entity!(DrugBrand, "drug_brand");

/// Body of `POST /drug-brand`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDrugBrand {
    pub name: String,
}

impl NewDrugBrand {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Entity for DrugBrand {
    type Payload = NewDrugBrand;

    const RESOURCE: &'static str = "drug-brand";

    const FAILURES: FailureMessages = FailureMessages {
        fetch_all: "Impossible de récupérer les marques de médicaments",
        create: "Impossible de créer la marque de médicament",
        delete_one: "Impossible de supprimer la marque de médicament",
    };

    fn id(&self) -> i64 {
        self.id
    }

    fn from_json(value: &Value) -> Result<Self, NormalizeError> {
        Self::normalize(value)
    }
}
