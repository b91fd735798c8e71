//! Drug names (active ingredients), embedded in user drugs

use crate::impl_named_entity;

impl_named_entity!(DrugName, "drug_name");
